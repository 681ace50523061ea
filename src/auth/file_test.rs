use super::*;
use crate::auth::session::{SessionLookup, SessionReader};
use crate::test_helpers::user_payload;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

fn scratch_dir() -> PathBuf {
    let n = NEXT_DIR.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("istc-admin-file-test-{}-{n}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

// =============================================================================
// FileCredentialStore
// =============================================================================

#[test]
fn credential_store_round_trips_and_creates_parent() {
    let dir = scratch_dir();
    let store = FileCredentialStore::new(dir.join("nested").join("token"));
    store.store("tok-abc").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("tok-abc"));
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn credential_store_load_missing_is_none() {
    let dir = scratch_dir();
    let store = FileCredentialStore::new(dir.join("token"));
    assert_eq!(store.load().unwrap(), None);
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn credential_store_clear_is_idempotent() {
    let dir = scratch_dir();
    let store = FileCredentialStore::new(dir.join("token"));
    store.store("tok").unwrap();
    store.clear().unwrap();
    store.clear().unwrap();
    assert!(!store.path().exists());
    fs::remove_dir_all(dir).unwrap();
}

// =============================================================================
// FileSessionProvider
// =============================================================================

#[tokio::test]
async fn missing_session_file_is_anonymous() {
    let dir = scratch_dir();
    let reader = SessionReader::new(Arc::new(FileSessionProvider::new(dir.join("session.json"))));
    assert_eq!(reader.lookup().await, SessionLookup::Anonymous);
    fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn session_file_yields_principal() {
    let dir = scratch_dir();
    let path = dir.join("session.json");
    let doc = serde_json::json!({ "user": user_payload("admin") });
    fs::write(&path, doc.to_string()).unwrap();

    let reader = SessionReader::new(Arc::new(FileSessionProvider::new(&path)));
    let principal = reader.current_user().await.unwrap();
    assert!(principal.is_admin());
    fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn corrupt_session_file_is_unavailable() {
    let dir = scratch_dir();
    let path = dir.join("session.json");
    fs::write(&path, "{not json").unwrap();

    let reader = SessionReader::new(Arc::new(FileSessionProvider::new(&path)));
    assert!(matches!(reader.lookup().await, SessionLookup::Unavailable(_)));
    fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn sign_out_removes_session_file_and_tolerates_absence() {
    let dir = scratch_dir();
    let path = dir.join("session.json");
    fs::write(&path, "{}").unwrap();
    let provider = FileSessionProvider::new(&path);

    provider.sign_out(SignOutOptions::default()).await.unwrap();
    assert!(!path.exists());
    provider.sign_out(SignOutOptions::default()).await.unwrap();
    fs::remove_dir_all(dir).unwrap();
}
