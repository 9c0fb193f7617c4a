use std::time::Duration;

use reqwest::Client;
use sp2yt::management::{ResponseCache, YOUTUBE_CACHE, cache_key};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DAY: Duration = Duration::from_secs(86_400);

#[tokio::test]
async fn test_init_is_idempotent() {
    let dir = TempDir::new().expect("temp dir");
    let mut cache = ResponseCache::new(dir.path().to_path_buf(), YOUTUBE_CACHE, DAY);

    assert!(cache.init().await.expect("first init"));
    assert!(!cache.init().await.expect("second init"));
    assert!(dir.path().join("youtube_cache/store.json").is_file());
}

#[tokio::test]
async fn test_existing_store_keeps_its_ttl() {
    let dir = TempDir::new().expect("temp dir");
    let mut first = ResponseCache::new(dir.path().to_path_buf(), YOUTUBE_CACHE, DAY);
    first.init().await.expect("init");

    let mut second = ResponseCache::new(
        dir.path().to_path_buf(),
        YOUTUBE_CACHE,
        Duration::from_secs(5),
    );
    assert!(!second.init().await.expect("init"));
    assert_eq!(second.ttl(), DAY);
}

#[tokio::test]
async fn test_empty_store_header_counts_as_initialized() {
    let dir = TempDir::new().expect("temp dir");
    let namespace = dir.path().join(YOUTUBE_CACHE);
    std::fs::create_dir_all(&namespace).expect("namespace dir");
    std::fs::write(namespace.join("store.json"), "").expect("empty header");

    let mut cache = ResponseCache::new(dir.path().to_path_buf(), YOUTUBE_CACHE, DAY);
    assert!(!cache.init().await.expect("init"));
    assert_eq!(cache.ttl(), DAY);
    assert!(!cache.init().await.expect("second init"));
}

#[tokio::test]
async fn test_garbage_store_header_keeps_configured_ttl() {
    let dir = TempDir::new().expect("temp dir");
    let namespace = dir.path().join(YOUTUBE_CACHE);
    std::fs::create_dir_all(&namespace).expect("namespace dir");
    std::fs::write(namespace.join("store.json"), "{not json").expect("garbage header");

    let ttl = Duration::from_secs(42);
    let mut cache = ResponseCache::new(dir.path().to_path_buf(), YOUTUBE_CACHE, ttl);
    assert!(!cache.init().await.expect("init"));
    assert_eq!(cache.ttl(), ttl);
    // The header is left as it was
    assert_eq!(
        std::fs::read_to_string(namespace.join("store.json")).expect("header"),
        "{not json"
    );
}

#[tokio::test]
async fn test_fresh_entry_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"items":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let mut cache = ResponseCache::new(dir.path().to_path_buf(), YOUTUBE_CACHE, DAY);
    cache.init().await.expect("init");
    let client = Client::new();
    let url = format!("{}/search?q=song", server.uri());

    let live = cache.cached_get(&client, &url, &[]).await.expect("live");
    let cached = cache.cached_get(&client, &url, &[]).await.expect("cached");

    assert!(!live.from_cache);
    assert!(cached.from_cache);
    assert_eq!(cached.status, 200);
    assert_eq!(cached.body, live.body);
}

#[tokio::test]
async fn test_zero_ttl_never_serves_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(2)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let cache = ResponseCache::new(dir.path().to_path_buf(), YOUTUBE_CACHE, Duration::ZERO);
    let client = Client::new();
    let url = format!("{}/search", server.uri());

    for _ in 0..2 {
        let response = cache.cached_get(&client, &url, &[]).await.expect("get");
        assert!(!response.from_cache);
    }
}

#[tokio::test]
async fn test_error_responses_are_not_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let cache = ResponseCache::new(dir.path().to_path_buf(), YOUTUBE_CACHE, DAY);
    let client = Client::new();
    let url = format!("{}/search", server.uri());

    for _ in 0..2 {
        let response = cache.cached_get(&client, &url, &[]).await.expect("get");
        assert_eq!(response.status, 500);
        assert!(!response.from_cache);
    }
}

#[test]
fn test_cache_key_ignores_authorization_and_header_order() {
    let url = "https://api.spotify.com/v1/playlists/abc/tracks";

    assert_eq!(
        cache_key(url, &[("Authorization", "Bearer one")]),
        cache_key(url, &[("authorization", "Bearer two")])
    );
    assert_eq!(
        cache_key(url, &[("Accept", "application/json"), ("X-Trace", "1")]),
        cache_key(url, &[("x-trace", "1"), ("accept", "application/json")])
    );
    assert_ne!(
        cache_key(url, &[("Accept", "application/json")]),
        cache_key(url, &[])
    );
    assert_ne!(cache_key(url, &[]), cache_key(&format!("{url}?offset=100"), &[]));
}
