//! Configuration management for the playlist copier.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Credentials have no defaults: a missing value is
//! not checked at startup and surfaces later as an authentication failure from
//! the provider. Endpoints, paths and timings fall back to sensible defaults.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, fmt, path::PathBuf, time::Duration};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_REDIRECT_ADDRESS: &str = "127.0.0.1:0";
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;

/// Raised when a required local file or value is missing or unusable.
#[derive(Debug)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "configuration error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` in the current working directory first and then in the
/// platform-specific local data directory under `sp2yt/.env`. Both files are
/// optional and never override variables that are already set.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/sp2yt/.env`
/// - macOS: `~/Library/Application Support/sp2yt/.env`
/// - Windows: `%LOCALAPPDATA%/sp2yt/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.to_string()),
    }

    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn secs_or(name: &str, default: u64) -> Duration {
    Duration::from_secs(
        env::var(name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default),
    )
}

/// Returns the Spotify client ID used for the client-credentials grant.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").unwrap_or_default()
}

/// Returns the Spotify client secret used for the client-credentials grant.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_CLIENT_SECRET").unwrap_or_default()
}

/// Returns the YouTube Data API key used for searches.
pub fn youtube_api_key() -> String {
    env::var("YOUTUBE_API_KEY").unwrap_or_default()
}

/// Returns the Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Returns the Spotify OAuth token URL.
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Returns the YouTube Data API base URL.
pub fn youtube_apiurl() -> String {
    var_or("YOUTUBE_API_URL", DEFAULT_YOUTUBE_API_URL)
}

/// Returns the directory holding persisted tokens and response caches.
///
/// Defaults to `sp2yt` inside the platform's local data directory and can be
/// moved with `SP2YT_DATA_DIR`.
pub fn data_dir() -> PathBuf {
    match env::var("SP2YT_DATA_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("sp2yt");
            path
        }
    }
}

/// Returns the path of the Google OAuth client secret file.
pub fn youtube_client_secrets_file() -> PathBuf {
    match env::var("YOUTUBE_CLIENT_SECRETS_FILE") {
        Ok(file) if !file.trim().is_empty() => PathBuf::from(file),
        _ => data_dir().join("client_secrets.json"),
    }
}

/// Returns the address the OAuth redirect listener binds to.
///
/// Port `0` lets the operating system pick a free port.
pub fn youtube_redirect_address() -> String {
    var_or("YOUTUBE_REDIRECT_ADDRESS", DEFAULT_REDIRECT_ADDRESS)
}

/// Returns how long the consent flow waits for the browser redirect.
pub fn youtube_auth_timeout() -> Duration {
    secs_or("YOUTUBE_AUTH_TIMEOUT_SECS", DEFAULT_AUTH_TIMEOUT_SECS)
}

/// Returns the time-to-live of cached API responses.
pub fn cache_ttl() -> Duration {
    secs_or("SP2YT_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)
}

/// All settings of a single run, gathered once and handed to the session.
#[derive(Debug, Clone)]
pub struct Settings {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub youtube_api_key: String,
    pub spotify_api_url: String,
    pub spotify_token_url: String,
    pub youtube_api_url: String,
    pub data_dir: PathBuf,
    pub client_secrets_file: PathBuf,
    pub redirect_address: String,
    pub auth_timeout: Duration,
    pub cache_ttl: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            spotify_client_id: spotify_client_id(),
            spotify_client_secret: spotify_client_secret(),
            youtube_api_key: youtube_api_key(),
            spotify_api_url: spotify_apiurl(),
            spotify_token_url: spotify_apitoken_url(),
            youtube_api_url: youtube_apiurl(),
            data_dir: data_dir(),
            client_secrets_file: youtube_client_secrets_file(),
            redirect_address: youtube_redirect_address(),
            auth_timeout: youtube_auth_timeout(),
            cache_ttl: cache_ttl(),
        }
    }

    pub fn token_dir(&self) -> PathBuf {
        self.data_dir.join("tokens")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir.join("cache")
    }
}
