use sp2yt::management::{FileTokenStore, MemoryTokenStore, StoreError, TokenStore};
use tempfile::TempDir;

#[tokio::test]
async fn test_file_store_missing_key_loads_none() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileTokenStore::new(dir.path().join("tokens"));

    let loaded = store.load("spotify_creds").await.expect("load");
    assert!(loaded.is_none());
}

#[tokio::test]
async fn test_file_store_save_load_invalidate() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileTokenStore::new(dir.path().join("tokens"));

    store
        .save("youtube_token", r#"{"token":"abc"}"#)
        .await
        .expect("save");
    assert!(dir.path().join("tokens/youtube_token.json").is_file());

    let loaded = store.load("youtube_token").await.expect("load");
    assert_eq!(loaded.as_deref(), Some(r#"{"token":"abc"}"#));

    store.invalidate("youtube_token").await.expect("invalidate");
    assert!(store.load("youtube_token").await.expect("load").is_none());

    // Invalidating twice is fine
    store.invalidate("youtube_token").await.expect("invalidate");
}

#[tokio::test]
async fn test_file_store_overwrites() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileTokenStore::new(dir.path().to_path_buf());

    store.save("spotify_creds", "first").await.expect("save");
    store.save("spotify_creds", "second").await.expect("save");

    let loaded = store.load("spotify_creds").await.expect("load");
    assert_eq!(loaded.as_deref(), Some("second"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_file_store_restricts_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().expect("temp dir");
    let store = FileTokenStore::new(dir.path().to_path_buf());
    store.save("spotify_creds", "secret").await.expect("save");

    let mode = std::fs::metadata(dir.path().join("spotify_creds.json"))
        .expect("metadata")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[tokio::test]
async fn test_file_store_rejects_path_like_keys() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileTokenStore::new(dir.path().to_path_buf());

    for key in ["", "../escape", "nested/key", "dot.key"] {
        let result = store.save(key, "x").await;
        assert!(
            matches!(result, Err(StoreError::CriticalError(_))),
            "key {key:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_memory_store_clones_share_entries() {
    let store = MemoryTokenStore::new();
    let clone = store.clone();

    store.save("spotify_creds", "abc").await.expect("save");
    assert_eq!(
        clone.load("spotify_creds").await.expect("load").as_deref(),
        Some("abc")
    );

    clone.invalidate("spotify_creds").await.expect("invalidate");
    assert!(store.load("spotify_creds").await.expect("load").is_none());
}
