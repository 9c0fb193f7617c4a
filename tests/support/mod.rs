#![allow(dead_code)]

use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use reqwest::Client;
use sp2yt::{
    Res,
    config::Settings,
    management::{MemoryTokenStore, TokenStore, YOUTUBE_TOKEN_KEY},
    types::{ClientSecrets, Track, YouTubeCredentials},
    utils,
    youtube::auth::AuthorizationProvider,
};
use wiremock::MockServer;

/// Settings pointing every endpoint at the mock server and the data dir at `data_dir`.
pub fn settings(server: &MockServer, data_dir: &Path) -> Settings {
    Settings {
        spotify_client_id: "client-id".to_string(),
        spotify_client_secret: "client-secret".to_string(),
        youtube_api_key: "yt-key".to_string(),
        spotify_api_url: format!("{}/v1", server.uri()),
        spotify_token_url: format!("{}/api/token", server.uri()),
        youtube_api_url: format!("{}/youtube/v3", server.uri()),
        data_dir: data_dir.to_path_buf(),
        client_secrets_file: data_dir.join("client_secrets.json"),
        redirect_address: "127.0.0.1:0".to_string(),
        auth_timeout: Duration::from_secs(1),
        cache_ttl: Duration::from_secs(86_400),
    }
}

pub fn track(id: &str, name: &str, artists: &[&str]) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
    }
}

pub fn credentials(server: &MockServer, token: &str, expires_in: u64) -> YouTubeCredentials {
    YouTubeCredentials {
        token: token.to_string(),
        refresh_token: Some("refresh-1".to_string()),
        token_uri: format!("{}/token", server.uri()),
        client_id: "google-client".to_string(),
        client_secret: "google-secret".to_string(),
        scopes: vec!["https://www.googleapis.com/auth/youtube".to_string()],
        expires_at: utils::now_timestamp() + expires_in,
    }
}

pub async fn seed_credentials(store: &MemoryTokenStore, creds: &YouTubeCredentials) {
    let json = serde_json::to_string(creds).expect("serialize credentials");
    store
        .save(YOUTUBE_TOKEN_KEY, &json)
        .await
        .expect("seed credentials");
}

pub async fn stored_credentials(store: &MemoryTokenStore) -> Option<YouTubeCredentials> {
    store
        .load(YOUTUBE_TOKEN_KEY)
        .await
        .expect("load credentials")
        .map(|json| serde_json::from_str(&json).expect("parse credentials"))
}

/// Hands out a fixed credential and counts how often consent was requested.
#[derive(Clone)]
pub struct StaticAuthorization {
    creds: YouTubeCredentials,
    calls: Arc<AtomicUsize>,
}

impl StaticAuthorization {
    pub fn new(creds: YouTubeCredentials) -> Self {
        Self {
            creds,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AuthorizationProvider for StaticAuthorization {
    async fn authorize(
        &self,
        _http: &Client,
        _secrets: &ClientSecrets,
        _scopes: &[&str],
    ) -> Res<YouTubeCredentials> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.creds.clone())
    }
}
