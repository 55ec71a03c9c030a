//! API error taxonomy
//!
//! A non-2xx response is first classified by HTTP status, then refined by
//! matching the response message against an ordered list of patterns for
//! that status. The first matching pattern wins.

use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Header carrying the server-side request ID
pub const REQUEST_ID_HEADER: &str = "x-openstack-request-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 404
    NotFound,
    PodNotFound,
    /// 409
    Conflict,
    RecordAlreadyExists,
    PodRegionDuplicated,
    TopRegionAlreadyExists,
    /// 422
    UnprocessableEntity,
    RegionRequiredForTopRegion,
    RegionRequiredForPod,
    /// Any other status
    Client,
}

impl ErrorKind {
    /// Coarse classification by HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::Unauthorized,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            422 => ErrorKind::UnprocessableEntity,
            _ => ErrorKind::Client,
        }
    }

    /// The coarse kind a refined kind belongs to
    pub fn family(self) -> Self {
        match self {
            ErrorKind::PodNotFound => ErrorKind::NotFound,
            ErrorKind::RecordAlreadyExists
            | ErrorKind::PodRegionDuplicated
            | ErrorKind::TopRegionAlreadyExists => ErrorKind::Conflict,
            ErrorKind::RegionRequiredForTopRegion | ErrorKind::RegionRequiredForPod => {
                ErrorKind::UnprocessableEntity
            }
            other => other,
        }
    }

    /// Message used when the response carries none
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::NotFound => "Not found",
            ErrorKind::PodNotFound => "Pod not found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::RecordAlreadyExists => "Record already exists",
            ErrorKind::PodRegionDuplicated => {
                "Pod region name duplicated with the top region name"
            }
            ErrorKind::TopRegionAlreadyExists => "Top region already exists",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::RegionRequiredForTopRegion => {
                "Valid region_name is required for top region"
            }
            ErrorKind::RegionRequiredForPod => "Valid region_name is required for pod",
            ErrorKind::Client => "Unknown Error",
        }
    }
}

/// Refinement rules, `(coarse, refined, pattern)`, in priority order
const REFINEMENTS: &[(ErrorKind, ErrorKind, &str)] = &[
    (ErrorKind::NotFound, ErrorKind::PodNotFound, "Pod .* does not exist"),
    (ErrorKind::Conflict, ErrorKind::RecordAlreadyExists, "Record already exists"),
    (
        ErrorKind::Conflict,
        ErrorKind::PodRegionDuplicated,
        "Pod region name duplicated with the top region name",
    ),
    (ErrorKind::Conflict, ErrorKind::TopRegionAlreadyExists, "Top region already exists"),
    (
        ErrorKind::UnprocessableEntity,
        ErrorKind::RegionRequiredForTopRegion,
        "Valid region_name is required for top region",
    ),
    (
        ErrorKind::UnprocessableEntity,
        ErrorKind::RegionRequiredForPod,
        "Valid region_name is required for pod",
    ),
];

static RULES: OnceLock<Vec<(ErrorKind, ErrorKind, Regex)>> = OnceLock::new();

fn rules() -> &'static [(ErrorKind, ErrorKind, Regex)] {
    RULES.get_or_init(|| {
        REFINEMENTS
            .iter()
            .filter_map(|&(coarse, refined, pattern)| {
                // Anchored: the message must start with the pattern
                Regex::new(&format!("^(?:{})", pattern))
                    .ok()
                    .map(|re| (coarse, refined, re))
            })
            .collect()
    })
}

/// Refine a coarse kind using the response message
pub fn refine(kind: ErrorKind, message: &str) -> ErrorKind {
    rules()
        .iter()
        .find(|(coarse, _, re)| *coarse == kind && re.is_match(message))
        .map(|(_, refined, _)| *refined)
        .unwrap_or(kind)
}

/// Error returned by the service
#[derive(Debug, Clone, Error)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub code: u16,
    pub message: String,
    pub request_id: Option<String>,
    pub url: Option<String>,
    pub method: Option<String>,
    pub retry_after: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if self.code != 0 {
            write!(f, " (HTTP {})", self.code)?;
        }
        if let Some(ref id) = self.request_id {
            write!(f, " (Request-ID: {})", id)?;
        }
        Ok(())
    }
}

/// Parts of an HTTP response needed to build an [`ApiError`]
#[derive(Debug, Default)]
pub struct ErrorResponse<'a> {
    pub status: u16,
    pub body: &'a str,
    pub request_id: Option<String>,
    pub retry_after: Option<String>,
    pub url: Option<String>,
    pub method: Option<String>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, code: u16) -> Self {
        Self {
            kind,
            code,
            message: kind.default_message().to_string(),
            request_id: None,
            url: None,
            method: None,
            retry_after: None,
        }
    }

    /// Classify a failed response
    pub fn from_response(response: ErrorResponse<'_>) -> Self {
        let coarse = ErrorKind::from_status(response.status);
        let message = extract_message(response.body);

        let (kind, message) = match message {
            Some(msg) => (refine(coarse, &msg), msg),
            None => (coarse, coarse.default_message().to_string()),
        };

        Self {
            kind,
            code: response.status,
            message,
            request_id: response.request_id,
            url: response.url,
            method: response.method,
            retry_after: response.retry_after,
        }
    }

    /// True for any 404, including refined kinds
    pub fn is_not_found(&self) -> bool {
        self.kind.family() == ErrorKind::NotFound
    }

    pub fn is_conflict(&self) -> bool {
        self.kind.family() == ErrorKind::Conflict
    }
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"message": ..}`, `{"error": {"message": ..}}`, the single-key
/// wrappers WSGI frameworks emit (`{"NotFound": {"message": ..}}`), or plain
/// text.
fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Some(body.to_string());
    };

    let nested = value
        .as_object()
        .filter(|obj| obj.len() == 1)
        .and_then(|obj| obj.values().next());

    let message = [Some(&value), nested]
        .into_iter()
        .flatten()
        .find_map(|v| v.get("message").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string());
    Some(message)
}
