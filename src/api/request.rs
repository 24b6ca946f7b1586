use crate::error::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

/// One outbound call, built fresh per request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Multi-value parameters, sent as `key[]=v1&key[]=v2`.
    pub repeated: Vec<(String, Vec<String>)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            repeated: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Adds a scalar parameter. Empty values are dropped.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.query.push((key.to_string(), value));
        }
        self
    }

    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn repeated<V: ToString>(mut self, key: &str, values: &[V]) -> Self {
        if !values.is_empty() {
            self.repeated.push((
                key.to_string(),
                values.iter().map(ToString::to_string).collect(),
            ));
        }
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Executes a request against the Pachca API.
///
/// Returns the decoded JSON body, or `None` for `204 No Content`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<Option<Value>>;
}
