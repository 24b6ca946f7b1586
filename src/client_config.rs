use crate::cli::{ClientKind, ConfigScope};
use crate::error::{PachcaError, Result};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const SERVER_KEY: &str = "pachca";

/// Config file an MCP client reads its server list from.
pub fn config_path(client: ClientKind, scope: ConfigScope, cwd: &Path, home: &Path) -> PathBuf {
    let root = match scope {
        ConfigScope::Project => cwd,
        ConfigScope::Global => home,
    };
    match client {
        ClientKind::ClaudeCode => root.join(".mcp.json"),
        ClientKind::Cursor => root.join(".cursor").join("mcp.json"),
    }
}

pub fn server_entry(command: &str) -> Value {
    json!({
        "type": "stdio",
        "command": command,
        "args": []
    })
}

/// Adds or replaces `mcpServers.pachca` in the file at `path`, keeping every
/// other key. A file that exists but is not valid JSON is left untouched.
pub fn write_server_entry(path: &Path, entry: Value) -> Result<()> {
    let mut config = if path.exists() {
        let raw = fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            Map::new()
        } else {
            match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Object(map)) => map,
                _ => {
                    return Err(PachcaError::ConfigError(format!(
                        "{} contains malformed JSON. Fix it manually before re-running",
                        path.display()
                    )))
                }
            }
        }
    } else {
        Map::new()
    };

    let servers = config
        .entry("mcpServers")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(servers) = servers.as_object_mut() else {
        return Err(PachcaError::ConfigError(format!(
            "'mcpServers' in {} is not an object",
            path.display()
        )));
    };
    servers.insert(SERVER_KEY.to_string(), entry);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut content = serde_json::to_string_pretty(&Value::Object(config))?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}
