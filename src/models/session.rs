use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Session file written by the Pachca login flow.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub jwt: String,
    pub workspace_jwt: String,
    pub profile_id: u64,
    pub company_id: u64,
    #[serde(default)]
    pub cookies: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Credentials for workspace API calls: the workspace token, the profile id
    /// as the `user-id` header, and the `name=value` part of each stored cookie.
    pub fn credentials(&self) -> CredentialBundle {
        let cookies = self
            .cookies
            .iter()
            .filter_map(|raw| raw.split(';').next())
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(str::to_string)
            .collect();

        CredentialBundle {
            token: self.workspace_jwt.clone(),
            user_id: Some(self.profile_id.to_string()),
            cookies,
        }
    }
}

/// Identity material attached to every outbound request. Read-only for the
/// lifetime of a server run.
#[derive(Clone)]
pub struct CredentialBundle {
    pub token: String,
    pub user_id: Option<String>,
    pub cookies: Vec<String>,
}

impl CredentialBundle {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: None,
            cookies: Vec::new(),
        }
    }

    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            None
        } else {
            Some(self.cookies.join("; "))
        }
    }
}

impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("cookies", &format!("<{} redacted>", self.cookies.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        serde_json::from_str(
            r#"{
                "email": "dev@example.com",
                "jwt": "account-jwt",
                "workspaceJwt": "workspace-jwt",
                "profileId": 77,
                "companyId": 5,
                "cookies": ["_pachca_session=abc123; Path=/; HttpOnly", "locale=ru; Path=/"],
                "createdAt": "2026-01-10T09:00:00Z"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn credentials_use_workspace_token_and_profile() {
        let creds = sample_session().credentials();
        assert_eq!(creds.token, "workspace-jwt");
        assert_eq!(creds.user_id.as_deref(), Some("77"));
    }

    #[test]
    fn cookie_attributes_are_stripped() {
        let creds = sample_session().credentials();
        assert_eq!(
            creds.cookie_header().as_deref(),
            Some("_pachca_session=abc123; locale=ru")
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let creds = sample_session().credentials();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("workspace-jwt"));
        assert!(!debug.contains("abc123"));
    }

    #[test]
    fn bearer_only_bundle_has_no_cookie_header() {
        assert!(CredentialBundle::bearer("t").cookie_header().is_none());
    }
}
