use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `mcp_pachca=debug`
    #[serde(default)]
    pub level: Option<String>,
    /// `pretty` or `json`
    #[serde(default)]
    pub format: Option<String>,
}
