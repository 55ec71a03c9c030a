//! Resource Manager
//!
//! One generic CRUD manager, instantiated per resource family. Every call is
//! a single live round-trip; nothing is cached or retried here.
//!
//! | Operation | Request |
//! |---|---|
//! | [`list`](ResourceManager::list) | `GET /<collection>[?query]` |
//! | [`create`](ResourceManager::create) | `POST /<collection>` with `{<member>: {...}}` |
//! | [`get`](ResourceManager::get) | `GET /<collection>/<id>` |
//! | [`delete`](ResourceManager::delete) | `DELETE /<collection>/<id>` |
//! | [`update`](ResourceManager::update) | `PUT /<collection>/<id>` with `{<member>: {...}}` |
//! | [`redo`](ResourceManager::redo) | `PUT /<collection>/<id>` without a body |
//!
//! Routings use `update`; jobs use `redo`.

use super::client::ApiClient;
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Job,
    Pod,
    Routing,
}

impl Family {
    /// Key of the list envelope, also the path segment
    pub fn collection(self) -> &'static str {
        match self {
            Family::Job => "jobs",
            Family::Pod => "pods",
            Family::Routing => "routings",
        }
    }

    /// Key of the single-resource envelope
    pub fn member(self) -> &'static str {
        match self {
            Family::Job => "job",
            Family::Pod => "pod",
            Family::Routing => "routing",
        }
    }

    /// Collection path, `/jobs`
    pub fn path(self) -> String {
        format!("/{}", self.collection())
    }

    /// Member path with a percent-encoded ID, `/jobs/<id>`
    pub fn member_path(self, id: &str) -> String {
        format!("/{}/{}", self.collection(), urlencoding::encode(id))
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.member())
    }
}

pub struct ResourceManager<'a> {
    client: &'a ApiClient,
    family: Family,
}

impl<'a> ResourceManager<'a> {
    pub fn new(client: &'a ApiClient, family: Family) -> Self {
        Self { client, family }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// List resources. `path` already carries any query string.
    pub async fn list(&self, path: &str) -> Result<Vec<Value>> {
        let body = self.client.get(path).await?;
        match body.get(self.family.collection()) {
            Some(Value::Array(items)) => Ok(items.clone()),
            _ => Err(Error::MissingField(self.family.collection().to_string())),
        }
    }

    /// Create a resource from its unwrapped body
    pub async fn create(&self, resource: Map<String, Value>) -> Result<Map<String, Value>> {
        let body = self.envelope(resource);
        let response = self.client.post(&self.family.path(), &body).await?;
        self.unwrap_member(response)
    }

    pub async fn get(&self, id: &str) -> Result<Map<String, Value>> {
        let response = self.client.get(&self.family.member_path(id)).await?;
        self.unwrap_member(response)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&self.family.member_path(id)).await?;
        Ok(())
    }

    /// Partial update. Only the supplied fields are sent; an `id` among them
    /// is dropped since the ID travels in the path. `None` means the server
    /// answered with an empty body.
    pub async fn update(
        &self,
        id: &str,
        mut fields: Map<String, Value>,
    ) -> Result<Option<Map<String, Value>>> {
        fields.remove("id");
        let body = self.envelope(fields);
        let response = self
            .client
            .put(&self.family.member_path(id), Some(&body))
            .await?;
        match response {
            Value::Null => Ok(None),
            response => self.unwrap_member(response).map(Some),
        }
    }

    /// Re-trigger a resource's execution: a PUT without a body
    pub async fn redo(&self, id: &str) -> Result<()> {
        self.client.put(&self.family.member_path(id), None).await?;
        Ok(())
    }

    fn envelope(&self, resource: Map<String, Value>) -> Value {
        let mut body = Map::new();
        body.insert(self.family.member().to_string(), Value::Object(resource));
        Value::Object(body)
    }

    fn unwrap_member(&self, mut response: Value) -> Result<Map<String, Value>> {
        match response
            .as_object_mut()
            .and_then(|obj| obj.remove(self.family.member()))
        {
            Some(Value::Object(resource)) => Ok(resource),
            _ => Err(Error::MissingField(self.family.member().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_paths() {
        assert_eq!(Family::Job.path(), "/jobs");
        assert_eq!(Family::Routing.member_path("42"), "/routings/42");
        assert_eq!(Family::Pod.member_path("a b/c"), "/pods/a%20b%2Fc");
    }

    #[test]
    fn test_family_envelope_keys() {
        assert_eq!(Family::Pod.collection(), "pods");
        assert_eq!(Family::Pod.member(), "pod");
        assert_eq!(Family::Job.to_string(), "job");
    }
}
