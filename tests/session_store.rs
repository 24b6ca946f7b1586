use chrono::Utc;
use mcp_pachca::models::Session;
use mcp_pachca::session::{FilesystemSessionStore, SessionStore};
use std::fs;
use tempfile::TempDir;

fn test_session() -> Session {
    Session {
        email: "ivan@example.com".to_string(),
        jwt: "account-jwt".to_string(),
        workspace_jwt: "workspace-jwt".to_string(),
        profile_id: 4242,
        company_id: 7,
        cookies: vec!["_session=abc; Path=/; HttpOnly".to_string()],
        created_at: Utc::now(),
    }
}

#[test]
fn test_missing_session_file_is_none() {
    let temp_dir = TempDir::new().unwrap();
    let store = FilesystemSessionStore::new(temp_dir.path().join("session.json"));

    assert!(store.load().unwrap().is_none());
    assert!(store.current_credentials().is_none());
}

#[test]
fn test_save_creates_directories_and_loads_back() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("mcp-pachca").join("session.json");
    let store = FilesystemSessionStore::new(&path);

    store.save(&test_session()).unwrap();
    assert!(path.exists());

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.email, "ivan@example.com");
    assert_eq!(loaded.profile_id, 4242);
}

#[test]
fn test_reads_camel_case_file_from_login_flow() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("session.json");
    fs::write(
        &path,
        r#"{
            "email": "ivan@example.com",
            "jwt": "account-jwt",
            "workspaceJwt": "workspace-jwt",
            "profileId": 4242,
            "companyId": 7,
            "cookies": ["_session=abc; Path=/", "locale=ru; Secure"],
            "createdAt": "2026-01-15T10:00:00Z"
        }"#,
    )
    .unwrap();

    let credentials = FilesystemSessionStore::new(&path)
        .current_credentials()
        .unwrap();
    assert_eq!(credentials.token, "workspace-jwt");
    assert_eq!(credentials.user_id.as_deref(), Some("4242"));
    assert_eq!(credentials.cookie_header().as_deref(), Some("_session=abc; locale=ru"));
}

#[test]
fn test_malformed_session_is_error_and_counts_as_absent() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("session.json");
    fs::write(&path, "{\"email\": ").unwrap();

    let store = FilesystemSessionStore::new(&path);
    let err = store.load().unwrap_err();
    assert_eq!(err.kind(), "session_error");
    assert!(store.current_credentials().is_none());
}
