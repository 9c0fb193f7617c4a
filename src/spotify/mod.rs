//! # Spotify Integration Module
//!
//! Read-only access to the Spotify Web API, the source service of a transfer.
//!
//! ## Overview
//!
//! ```text
//! Pipeline
//!     ↓
//! SpotifyClient
//!     ├── SpotifyTokenManager (client-credentials grant, TokenStore)
//!     └── ResponseCache ("spotify_cache")
//!     ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - client-credentials token request (HTTP Basic auth)
//! - [`playlist`] - playlist name and track listing, with track filtering
//!
//! ## Authentication
//!
//! Only an application token is needed: public playlists can be read without
//! user consent. A request answered with 401 invalidates the token and is
//! retried once with a freshly requested one.
//!
//! ## Caching
//!
//! The track listing goes through the `spotify_cache` namespace of the
//! response cache, so repeated runs within 24 hours do not hit the API. The
//! playlist name lookup is always a live request.

use reqwest::Client;

use crate::{
    Res,
    http::{self, HttpResponse},
    management::{ResponseCache, SpotifyTokenManager, TokenStore},
    warning,
};

pub mod auth;
pub mod playlist;

pub struct SpotifyClient<S> {
    http: Client,
    api_url: String,
    tokens: SpotifyTokenManager<S>,
    cache: ResponseCache,
}

impl<S> SpotifyClient<S> {
    pub fn new(
        http: Client,
        api_url: String,
        tokens: SpotifyTokenManager<S>,
        cache: ResponseCache,
    ) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            tokens,
            cache,
        }
    }

    pub fn tokens(&self) -> &SpotifyTokenManager<S> {
        &self.tokens
    }

    pub fn cache_mut(&mut self) -> &mut ResponseCache {
        &mut self.cache
    }
}

impl<S: TokenStore> SpotifyClient<S> {
    /// GETs an API resource with a bearer token, optionally through the cache.
    ///
    /// A 401 answer invalidates the token and the request is sent once more.
    async fn authorized_get(&mut self, url: &str, cached: bool) -> Res<HttpResponse> {
        let mut retried = false;
        loop {
            let token = self.tokens.get_token().await?;
            let bearer = format!("Bearer {}", token.access_token);
            let headers = [("Authorization", bearer.as_str())];

            let response = if cached {
                self.cache.cached_get(&self.http, url, &headers).await?
            } else {
                http::get(&self.http, url, &headers).await?
            };

            if response.is_unauthorized() && !retried {
                warning!("Spotify rejected the access token, requesting a new one.");
                self.tokens.invalidate().await?;
                retried = true;
                continue;
            }

            return Ok(response.error_for_status("Spotify")?);
        }
    }
}
