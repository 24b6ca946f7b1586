use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "mcp-pachca")]
#[command(about = "MCP server exposing the Pachca team chat as agent tools", long_about = None)]
#[command(version)]
pub struct Args {
    #[arg(long = "config", help = "Path to a YAML or JSON config file")]
    pub config: Option<PathBuf>,

    #[arg(long = "session", help = "Path to the Pachca session file")]
    pub session: Option<PathBuf>,

    #[arg(long = "base-url", help = "Pachca API base URL")]
    pub base_url: Option<String>,

    #[arg(long = "timeout", help = "Per-request timeout in seconds")]
    pub timeout_secs: Option<u64>,

    #[arg(short = 'v', long = "verbose", help = "Log at debug level")]
    pub verbose: bool,

    #[arg(long = "log-format", value_enum, help = "Log output format (stderr)")]
    pub log_format: Option<LogFormat>,

    #[arg(
        long = "write-client-config",
        value_enum,
        help = "Register this server in an MCP client config file and exit"
    )]
    pub write_client_config: Option<ClientKind>,

    #[arg(
        long = "scope",
        value_enum,
        default_value_t = ConfigScope::Project,
        help = "Where --write-client-config writes (project = current directory)"
    )]
    pub scope: ConfigScope,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "pretty" | "text" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientKind {
    ClaudeCode,
    Cursor,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigScope {
    #[default]
    Project,
    Global,
}
