use reqwest::Client;

use crate::{Res, info, management::TokenStore, spotify, types::SpotifyToken};

pub const SPOTIFY_TOKEN_KEY: &str = "spotify_creds";

/// Hands out client-credentials tokens for the Spotify Web API.
///
/// Lookup order is memory, then the token store, then a fresh token request.
/// New tokens are written back to both.
pub struct SpotifyTokenManager<S> {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    store: S,
    token: Option<SpotifyToken>,
}

impl<S: TokenStore> SpotifyTokenManager<S> {
    pub fn new(
        http: Client,
        token_url: String,
        client_id: String,
        client_secret: String,
        store: S,
    ) -> Self {
        SpotifyTokenManager {
            http,
            token_url,
            client_id,
            client_secret,
            store,
            token: None,
        }
    }

    pub async fn get_token(&mut self) -> Res<SpotifyToken> {
        if let Some(token) = self.token.as_ref().filter(|t| t.is_usable()) {
            return Ok(token.clone());
        }

        if let Some(token) = self.load().await?.filter(|t| t.is_usable()) {
            self.token = Some(token.clone());
            return Ok(token);
        }

        info!("Fetching Spotify access token from the API.");
        let token = spotify::auth::request_client_credentials_token(
            &self.http,
            &self.token_url,
            &self.client_id,
            &self.client_secret,
        )
        .await?;
        self.persist(&token).await?;
        self.token = Some(token.clone());

        Ok(token)
    }

    /// Forgets the current token after the provider rejected it.
    pub async fn invalidate(&mut self) -> Res<()> {
        self.token = None;
        self.store.invalidate(SPOTIFY_TOKEN_KEY).await?;
        Ok(())
    }

    pub fn current_token(&self) -> Option<&SpotifyToken> {
        self.token.as_ref()
    }

    /// An unreadable stored record is treated like a missing one.
    async fn load(&self) -> Res<Option<SpotifyToken>> {
        let Some(content) = self.store.load(SPOTIFY_TOKEN_KEY).await? else {
            return Ok(None);
        };
        Ok(serde_json::from_str(&content).ok())
    }

    async fn persist(&self, token: &SpotifyToken) -> Res<()> {
        let json = serde_json::to_string_pretty(token)?;
        self.store.save(SPOTIFY_TOKEN_KEY, &json).await?;
        Ok(())
    }
}
