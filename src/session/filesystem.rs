use super::storage::SessionStore;
use crate::error::{PachcaError, Result};
use crate::models::Session;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct FilesystemSessionStore {
    path: PathBuf,
}

impl FilesystemSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FilesystemSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session = serde_json::from_str(&content).map_err(|e| {
            PachcaError::SessionError(format!(
                "malformed session file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut content = serde_json::to_string_pretty(session)?;
        content.push('\n');
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Default for FilesystemSessionStore {
    fn default() -> Self {
        Self::new(super::default_session_path())
    }
}
