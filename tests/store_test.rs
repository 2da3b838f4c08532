use serde_json::json;
use spotify_scrobbler::ScrobblerError;
use spotify_scrobbler::management::CredentialStore;
use tempfile::tempdir;

#[test]
fn test_load_reads_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, include_str!("fixtures/credentials.json")).unwrap();

    let store = CredentialStore::load(&path).unwrap();

    assert_eq!(store.path(), path.as_path());
    assert_eq!(store.document()["lastfm"]["session_key"], "other_key");
}

#[test]
fn test_load_missing_file_is_config_error() {
    let dir = tempdir().unwrap();
    let result = CredentialStore::load(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ScrobblerError::Config(_))));
}

#[test]
fn test_load_invalid_json_is_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        CredentialStore::load(&path),
        Err(ScrobblerError::Config(_))
    ));
}

#[test]
fn test_persist_writes_and_replaces_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, include_str!("fixtures/credentials.json")).unwrap();

    let mut store = CredentialStore::load(&path).unwrap();
    let mut updated = store.document().clone();
    updated["spotify"]["access_token"] = json!("fresh");

    store.persist(updated.clone()).unwrap();

    assert_eq!(store.document(), &updated);
    let reloaded = CredentialStore::load(&path).unwrap();
    assert_eq!(reloaded.document(), &updated);
}
