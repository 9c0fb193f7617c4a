use std::{
    fmt,
    io::{Error, ErrorKind},
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    http::{self, ApiError, HttpResponse},
    utils, warning,
};

pub const SPOTIFY_CACHE: &str = "spotify_cache";
pub const YOUTUBE_CACHE: &str = "youtube_cache";

/// Headers that never take part in the cache key.
const UNKEYED_HEADERS: &[&str] = &["authorization"];

#[derive(Debug)]
pub enum CacheError {
    IoError(Error),
    SerdeError(serde_json::Error),
    Api(ApiError),
}

impl From<Error> for CacheError {
    fn from(err: Error) -> Self {
        CacheError::IoError(err)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::SerdeError(err)
    }
}

impl From<ApiError> for CacheError {
    fn from(err: ApiError) -> Self {
        CacheError::Api(err)
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::IoError(e) => write!(f, "response cache I/O error: {e}"),
            CacheError::SerdeError(e) => write!(f, "response cache data is corrupt: {e}"),
            CacheError::Api(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CacheError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreMeta {
    name: String,
    ttl_secs: u64,
    created_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    stored_at: u64,
    response: HttpResponse,
}

/// A namespaced GET response cache with time-boxed entries.
///
/// Each namespace is a directory holding `store.json` and one JSON file per
/// cached request, named after the request signature.
pub struct ResponseCache {
    name: String,
    dir: PathBuf,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(root: PathBuf, name: &str, ttl: Duration) -> Self {
        Self {
            name: name.to_string(),
            dir: root.join(name),
            ttl,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Creates the backing store unless it already exists.
    ///
    /// An existing store is left untouched and its stored TTL wins over the
    /// configured one; an unreadable header keeps the configured TTL.
    /// Returns whether the store was created.
    pub async fn init(&mut self) -> Result<bool, CacheError> {
        let meta_path = self.meta_path();
        match async_fs::read_to_string(&meta_path).await {
            Ok(content) => {
                match serde_json::from_str::<StoreMeta>(&content) {
                    Ok(meta) => self.ttl = Duration::from_secs(meta.ttl_secs),
                    Err(e) => warning!(
                        "Cannot read header of response cache {}, keeping a TTL of {}s. Err: {}",
                        self.name,
                        self.ttl.as_secs(),
                        e
                    ),
                }
                Ok(false)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                async_fs::create_dir_all(&self.dir).await?;
                let meta = StoreMeta {
                    name: self.name.clone(),
                    ttl_secs: self.ttl.as_secs(),
                    created_at: utils::now_timestamp(),
                };
                async_fs::write(&meta_path, serde_json::to_string_pretty(&meta)?).await?;
                Ok(true)
            }
            Err(e) => Err(CacheError::IoError(e)),
        }
    }

    /// GETs `url`, answering from the cache while a stored entry is fresh.
    ///
    /// Only successful responses are stored. The returned response tells
    /// whether it was served from the cache.
    pub async fn cached_get(
        &self,
        client: &Client,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, CacheError> {
        let entry_path = self.dir.join(format!("{}.json", cache_key(url, headers)));

        if let Some(response) = self.read_fresh(&entry_path).await {
            return Ok(response);
        }

        let response = http::get(client, url, headers).await?;
        if response.is_success() {
            let entry = CacheEntry {
                url: url.to_string(),
                stored_at: utils::now_timestamp(),
                response: response.clone(),
            };
            async_fs::create_dir_all(&self.dir).await?;
            async_fs::write(&entry_path, serde_json::to_string(&entry)?).await?;
        }

        Ok(response)
    }

    /// Missing, stale or unreadable entries all count as a miss.
    async fn read_fresh(&self, entry_path: &Path) -> Option<HttpResponse> {
        let content = async_fs::read_to_string(entry_path).await.ok()?;
        let entry: CacheEntry = serde_json::from_str(&content).ok()?;
        let age = utils::now_timestamp().saturating_sub(entry.stored_at);
        if age >= self.ttl.as_secs() {
            return None;
        }

        let mut response = entry.response;
        response.from_cache = true;
        Some(response)
    }

    fn meta_path(&self) -> PathBuf {
        self.dir.join("store.json")
    }
}

/// Request signature: method, URL and the keyed headers sorted by name.
pub fn cache_key(url: &str, headers: &[(&str, &str)]) -> String {
    let mut keyed: Vec<(String, &str)> = headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), *value))
        .filter(|(name, _)| !UNKEYED_HEADERS.contains(&name.as_str()))
        .collect();
    keyed.sort();

    let mut parts = vec!["GET".to_string(), url.to_string()];
    parts.extend(keyed.into_iter().map(|(name, value)| format!("{name}:{value}")));
    let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
    utils::hex_digest(&parts)
}
