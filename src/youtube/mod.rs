//! # YouTube Integration Module
//!
//! Access to the YouTube Data API v3, the destination service of a transfer.
//!
//! ## Core Modules
//!
//! - [`auth`] - the [`AuthorizationProvider`](auth::AuthorizationProvider)
//!   seam, the loopback consent flow, code exchange and token refresh
//! - [`search`] - per-track video search producing a
//!   [`MatchReport`](crate::report::MatchReport)
//! - [`playlist`] - playlist creation and item insertion
//!
//! ## Authentication
//!
//! Searches only need the API key. Playlist writes need user credentials,
//! which are requested lazily on the first write, so the consent page only
//! shows up once the matches are known. A write answered with 401 forces one
//! credential refresh and is sent once more.

use reqwest::Client;
use serde::Serialize;

use crate::{
    Res,
    http::HttpResponse,
    management::{ResponseCache, TokenStore, YouTubeCredentialManager},
    warning,
};

pub mod auth;
pub mod playlist;
pub mod search;

use auth::AuthorizationProvider;

pub struct YouTubeClient<S, A> {
    http: Client,
    api_url: String,
    api_key: String,
    credentials: YouTubeCredentialManager<S, A>,
    cache: ResponseCache,
}

impl<S, A> YouTubeClient<S, A> {
    pub fn new(
        http: Client,
        api_url: String,
        api_key: String,
        credentials: YouTubeCredentialManager<S, A>,
        cache: ResponseCache,
    ) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            credentials,
            cache,
        }
    }

    pub fn cache_mut(&mut self) -> &mut ResponseCache {
        &mut self.cache
    }
}

impl<S: TokenStore, A: AuthorizationProvider> YouTubeClient<S, A> {
    /// POSTs a JSON payload with the user's bearer token.
    async fn authorized_post<B: Serialize>(
        &mut self,
        url: &str,
        payload: &B,
    ) -> Res<HttpResponse> {
        let mut retried = false;
        loop {
            let creds = self.credentials.get_credentials().await?;
            let response = self
                .http
                .post(url)
                .bearer_auth(&creds.token)
                .json(payload)
                .send()
                .await?;

            let response = HttpResponse {
                status: response.status().as_u16(),
                body: response.text().await?,
                from_cache: false,
            };

            if response.is_unauthorized() && !retried {
                warning!("YouTube rejected the credentials, refreshing them.");
                self.credentials.force_refresh().await?;
                retried = true;
                continue;
            }

            return Ok(response.error_for_status("YouTube")?);
        }
    }
}
