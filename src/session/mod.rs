mod filesystem;
mod storage;

pub use filesystem::FilesystemSessionStore;
pub use storage::SessionStore;

use std::path::PathBuf;

/// `~/.config/mcp-pachca/session.json`
pub fn default_session_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("mcp-pachca")
        .join("session.json")
}
