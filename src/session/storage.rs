use crate::error::Result;
use crate::models::{CredentialBundle, Session};
use tracing::warn;

/// Trait for session storage backends
pub trait SessionStore: Send + Sync {
    /// Load the stored session, `None` if none has been saved yet
    fn load(&self) -> Result<Option<Session>>;

    /// Persist a session, replacing any previous one
    fn save(&self, session: &Session) -> Result<()>;

    /// Credentials for the active session. An unreadable session counts as absent.
    fn current_credentials(&self) -> Option<CredentialBundle> {
        match self.load() {
            Ok(session) => session.map(|s| s.credentials()),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable session");
                None
            }
        }
    }
}
