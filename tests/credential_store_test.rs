//! Integration tests for the file-backed credential store.

use securesocial::adapters::FileCredentialStore;
use securesocial::auth::{CredentialsManager, TokenPair, UserInfo};
use securesocial::traits::CredentialStore;
use tempfile::TempDir;

fn alice() -> UserInfo {
    UserInfo {
        id: "u-1".to_string(),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
    }
}

#[tokio::test]
async fn test_save_then_read_back() {
    let dir = TempDir::new().unwrap();
    let store = FileCredentialStore::with_path(dir.path().join("credentials.json"));

    store.save_tokens(&TokenPair::new("A", "R")).await.unwrap();

    assert_eq!(store.get_access_token().await.unwrap().as_deref(), Some("A"));
    assert_eq!(store.get_refresh_token().await.unwrap().as_deref(), Some("R"));
}

#[tokio::test]
async fn test_clear_then_reads_are_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileCredentialStore::with_path(dir.path().join("credentials.json"));
    store.save_tokens(&TokenPair::new("A", "R")).await.unwrap();
    store.save_user(&alice()).await.unwrap();

    store.clear().await.unwrap();

    assert_eq!(store.get_access_token().await.unwrap(), None);
    assert_eq!(store.get_refresh_token().await.unwrap(), None);
    assert_eq!(store.get_user_info().await.unwrap(), None);
}

#[tokio::test]
async fn test_state_survives_new_store_instance() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("credentials.json");

    {
        let store = FileCredentialStore::with_path(&path);
        store.save_tokens(&TokenPair::new("A", "R")).await.unwrap();
        store.save_user(&alice()).await.unwrap();
    }

    let reopened = FileCredentialStore::with_path(&path);
    assert_eq!(reopened.get_user_info().await.unwrap(), Some(alice()));
    assert_eq!(reopened.get_access_token().await.unwrap().as_deref(), Some("A"));
}

#[tokio::test]
async fn test_rotation_replaces_both_tokens() {
    let dir = TempDir::new().unwrap();
    let store = FileCredentialStore::with_path(dir.path().join("credentials.json"));
    store.save_tokens(&TokenPair::new("A1", "R1")).await.unwrap();
    store.save_user(&alice()).await.unwrap();

    store.save_tokens(&TokenPair::new("A2", "R2")).await.unwrap();

    let creds = store.load().await.unwrap();
    assert_eq!(creds.access_token.as_deref(), Some("A2"));
    assert_eq!(creds.refresh_token.as_deref(), Some("R2"));
    assert_eq!(creds.user_info(), Some(alice()));
}

#[tokio::test]
async fn test_manager_reads_what_store_wrote() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("credentials.json");
    let store = FileCredentialStore::with_path(&path);
    store.save_tokens(&TokenPair::new("A", "R")).await.unwrap();

    let on_disk = CredentialsManager::with_path(&path).load().unwrap();
    assert_eq!(on_disk.access_token.as_deref(), Some("A"));
    assert_eq!(on_disk.refresh_token.as_deref(), Some("R"));
    assert!(!path.with_extension("json.tmp").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_credentials_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("credentials.json");
    let store = FileCredentialStore::with_path(&path);
    store.save_tokens(&TokenPair::new("A", "R")).await.unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
