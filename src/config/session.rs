use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Session file path; `${VAR}` references are expanded
    #[serde(default)]
    pub path: Option<String>,
}
