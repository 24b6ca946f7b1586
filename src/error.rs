use serde_json::Value;
use std::fmt;

#[derive(Debug)]
pub enum PachcaError {
    /// Caller-supplied arguments have the wrong shape. Raised before any network call.
    InvalidArgument(String),
    /// A valid lookup resolved to zero records.
    NotFound {
        resource: &'static str,
        key: String,
        available: Vec<String>,
    },
    /// The remote rejected the session credentials (HTTP 401).
    AuthExpired,
    ApiError {
        status: u16,
        body: Value,
    },
    /// Success status, but the body could not be decoded into the expected shape.
    MalformedResponse {
        status: u16,
        excerpt: String,
    },
    RequestTimeout {
        url: String,
    },
    NetworkError(reqwest::Error),
    ConfigError(String),
    SessionError(String),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    Other(String),
}

impl PachcaError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        PachcaError::InvalidArgument(msg.into())
    }

    pub fn not_found(resource: &'static str, key: impl fmt::Display) -> Self {
        PachcaError::NotFound {
            resource,
            key: key.to_string(),
            available: Vec::new(),
        }
    }

    /// Stable code for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            PachcaError::InvalidArgument(_) => "invalid_argument",
            PachcaError::NotFound { .. } => "not_found",
            PachcaError::AuthExpired => "auth_expired",
            PachcaError::ApiError { .. } => "api_error",
            PachcaError::MalformedResponse { .. } => "malformed_response",
            PachcaError::RequestTimeout { .. } => "request_timeout",
            PachcaError::NetworkError(_) => "network_error",
            PachcaError::ConfigError(_) => "config_error",
            PachcaError::SessionError(_) => "session_error",
            PachcaError::IoError(_) => "io_error",
            PachcaError::JsonError(_) => "json_error",
            PachcaError::YamlError(_) => "yaml_error",
            PachcaError::Other(_) => "other",
        }
    }
}

impl fmt::Display for PachcaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PachcaError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            PachcaError::NotFound {
                resource,
                key,
                available,
            } => {
                write!(f, "{} not found: {}", resource, key)?;
                if !available.is_empty() {
                    write!(f, " (available: {})", available.join(", "))?;
                }
                Ok(())
            }
            PachcaError::AuthExpired => write!(
                f,
                "Pachca session expired (HTTP 401). Log in again to refresh the session file, then restart the server"
            ),
            PachcaError::ApiError { status, body } => {
                write!(f, "Pachca API error (HTTP {}): {}", status, body)
            }
            PachcaError::MalformedResponse { status, excerpt } => write!(
                f,
                "Malformed Pachca API response (HTTP {}): {}",
                status, excerpt
            ),
            PachcaError::RequestTimeout { url } => {
                write!(f, "Pachca API request timeout: {}", url)
            }
            PachcaError::NetworkError(e) => write!(f, "Network error: {}", e),
            PachcaError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            PachcaError::SessionError(msg) => write!(f, "Session error: {}", msg),
            PachcaError::IoError(e) => write!(f, "IO error: {}", e),
            PachcaError::JsonError(e) => write!(f, "JSON error: {}", e),
            PachcaError::YamlError(e) => write!(f, "YAML error: {}", e),
            PachcaError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PachcaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PachcaError::NetworkError(e) => Some(e),
            PachcaError::IoError(e) => Some(e),
            PachcaError::JsonError(e) => Some(e),
            PachcaError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PachcaError {
    fn from(err: reqwest::Error) -> Self {
        PachcaError::NetworkError(err)
    }
}

impl From<std::io::Error> for PachcaError {
    fn from(err: std::io::Error) -> Self {
        PachcaError::IoError(err)
    }
}

impl From<serde_json::Error> for PachcaError {
    fn from(err: serde_json::Error) -> Self {
        PachcaError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for PachcaError {
    fn from(err: serde_yaml::Error) -> Self {
        PachcaError::YamlError(err)
    }
}

impl From<anyhow::Error> for PachcaError {
    fn from(err: anyhow::Error) -> Self {
        PachcaError::Other(format!("{:#}", err))
    }
}

impl From<String> for PachcaError {
    fn from(msg: String) -> Self {
        PachcaError::Other(msg)
    }
}

impl From<&str> for PachcaError {
    fn from(msg: &str) -> Self {
        PachcaError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PachcaError>;
