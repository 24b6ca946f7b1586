use crate::api::request::{ApiRequest, Transport};
use crate::error::{PachcaError, Result};
use crate::models::CredentialBundle;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const EXCERPT_CHARS: usize = 200;
const USER_ID_HEADER: &str = "user-id";

/// HTTP transport for the Pachca API. Credentials are fixed at construction.
pub struct PachcaClient {
    http: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
    timeout: Duration,
}

impl PachcaClient {
    pub fn new(base_url: &str, credentials: &CredentialBundle) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: auth_headers(credentials)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build_url(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, request.path)).map_err(|e| {
            PachcaError::InvalidArgument(format!("invalid request path '{}': {}", request.path, e))
        })?;

        if !request.query.is_empty() || !request.repeated.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
            for (key, values) in &request.repeated {
                let key = format!("{}[]", key);
                for value in values {
                    pairs.append_pair(&key, value);
                }
            }
        }

        Ok(url)
    }

    async fn send(&self, request: ApiRequest, url: Url) -> Result<Option<Value>> {
        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .headers(self.headers.clone());

        if let Some(body) = &request.body {
            builder = builder
                .header(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/json; charset=utf-8"),
                )
                .body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        if status == StatusCode::UNAUTHORIZED {
            // Drain so the connection can be reused; the body carries nothing actionable.
            let _ = response.bytes().await;
            warn!(method = %request.method, url = %url, status = status.as_u16(), "Pachca session rejected");
            return Err(PachcaError::AuthExpired);
        }

        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
            error!(
                method = %request.method,
                url = %url,
                status = status.as_u16(),
                body = %body,
                "Pachca API error"
            );
            return Err(PachcaError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<Value>(&text)
            .map(Some)
            .map_err(|_| PachcaError::MalformedResponse {
                status: status.as_u16(),
                excerpt: excerpt(&text),
            })
    }
}

#[async_trait]
impl Transport for PachcaClient {
    async fn execute(&self, request: ApiRequest) -> Result<Option<Value>> {
        let url = self.build_url(&request)?;
        debug!(method = %request.method, url = %url, "Pachca API request");

        // On expiry `timeout` drops the send future, which aborts the connection,
        // and drops its own timer with it.
        match timeout(self.timeout, self.send(request, url.clone())).await {
            Ok(result) => result,
            Err(_) => {
                error!(url = %url, timeout_ms = self.timeout.as_millis() as u64, "Pachca API request timeout");
                Err(PachcaError::RequestTimeout {
                    url: url.to_string(),
                })
            }
        }
    }
}

fn auth_headers(credentials: &CredentialBundle) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut authorization = HeaderValue::from_str(&format!("Bearer {}", credentials.token))
        .map_err(|_| PachcaError::SessionError("session token is not a valid header value".to_string()))?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(user_id) = &credentials.user_id {
        let value = HeaderValue::from_str(user_id)
            .map_err(|_| PachcaError::SessionError("session user id is not a valid header value".to_string()))?;
        headers.insert(HeaderName::from_static(USER_ID_HEADER), value);
    }

    if let Some(cookie) = credentials.cookie_header() {
        let mut value = HeaderValue::from_str(&cookie)
            .map_err(|_| PachcaError::SessionError("session cookies are not a valid header value".to_string()))?;
        value.set_sensitive(true);
        headers.insert(COOKIE, value);
    }

    Ok(headers)
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}
