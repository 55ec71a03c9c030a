//! HTTP utilities for the service's REST API

use super::error::{ApiError, ErrorResponse, REQUEST_ID_HEADER};
use crate::error::Result;
use reqwest::{Client, Method, Response};
use serde_json::Value;

/// Header carrying the identity-service token
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        format!(
            "{}... [truncated, {} bytes total]",
            &body[..cut],
            body.len()
        )
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// HTTP client wrapper for service calls
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client, optionally authenticating every call with `token`
    pub fn new(token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("mrnctl/{}", crate::VERSION))
            .build()?;

        Ok(Self { client, token })
    }

    pub async fn get(&self, url: &str) -> Result<Value> {
        self.send(Method::GET, url, None).await
    }

    pub async fn post(&self, url: &str, body: &Value) -> Result<Value> {
        self.send(Method::POST, url, Some(body)).await
    }

    /// PUT, with no body when `body` is `None`
    pub async fn put(&self, url: &str, body: Option<&Value>) -> Result<Value> {
        self.send(Method::PUT, url, body).await
    }

    pub async fn delete(&self, url: &str) -> Result<Value> {
        self.send(Method::DELETE, url, None).await
    }

    async fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Value> {
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        if let Some(ref token) = self.token {
            request = request.header(AUTH_TOKEN_HEADER, token);
        }
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(error_from_response(method, response).await.into());
        }

        let body = response.text().await?;

        // Handle empty response
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

async fn error_from_response(method: Method, response: Response) -> ApiError {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let request_id = header(REQUEST_ID_HEADER);
    let retry_after = header("retry-after");

    let body = response.text().await.unwrap_or_default();

    // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
    tracing::error!(
        "API error: {} {} - {} - {}",
        method,
        url,
        status,
        sanitize_for_log(&body)
    );

    ApiError::from_response(ErrorResponse {
        status,
        body: &body,
        request_id,
        retry_after,
        url: Some(url),
        method: Some(method.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(sanitized.ends_with("[truncated, 500 bytes total]"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("line1\nline2\r"), "line1line2");
    }

    #[test]
    fn test_sanitize_respects_char_boundaries() {
        let body = "é".repeat(150);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("[truncated, 300 bytes total]"));
    }
}
