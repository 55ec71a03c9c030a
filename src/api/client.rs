//! Service client
//!
//! Binds the HTTP transport to the service's base URL and hands out one
//! resource manager per family.

use super::http::HttpClient;
use super::manager::{Family, ResourceManager};
use crate::config::Settings;
use crate::error::Result;
use serde_json::Value;

/// Main service client
#[derive(Clone)]
pub struct ApiClient {
    pub http: HttpClient,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (already including the API version)
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(token)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from resolved connection settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.base_url(), settings.token.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a service path such as `/jobs?limit=2`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.http.get(&self.url(path)).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.http.post(&self.url(path), body).await
    }

    pub async fn put(&self, path: &str, body: Option<&Value>) -> Result<Value> {
        self.http.put(&self.url(path), body).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.http.delete(&self.url(path)).await
    }

    /// Resource manager for `family`
    pub fn manager(&self, family: Family) -> ResourceManager<'_> {
        ResourceManager::new(self, family)
    }

    pub fn jobs(&self) -> ResourceManager<'_> {
        ResourceManager::new(self, Family::Job)
    }

    pub fn pods(&self) -> ResourceManager<'_> {
        ResourceManager::new(self, Family::Pod)
    }

    pub fn routings(&self) -> ResourceManager<'_> {
        ResourceManager::new(self, Family::Routing)
    }
}
