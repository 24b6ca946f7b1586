mod session;

pub use session::{CredentialBundle, Session};
