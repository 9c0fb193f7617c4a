use std::path::PathBuf;

use reqwest::Client;

use crate::{
    Res, info,
    management::TokenStore,
    types::YouTubeCredentials,
    warning,
    youtube::auth::{self, AuthorizationProvider, YOUTUBE_SCOPE},
};

pub const YOUTUBE_TOKEN_KEY: &str = "youtube_token";

/// Hands out user OAuth credentials for the YouTube Data API.
///
/// Lookup order is memory, then the token store. An invalid credential is
/// refreshed once when it carries a refresh token; otherwise the user goes
/// through the consent flow of the configured [`AuthorizationProvider`].
pub struct YouTubeCredentialManager<S, A> {
    http: Client,
    client_secrets_file: PathBuf,
    store: S,
    provider: A,
    credentials: Option<YouTubeCredentials>,
}

impl<S: TokenStore, A: AuthorizationProvider> YouTubeCredentialManager<S, A> {
    pub fn new(http: Client, client_secrets_file: PathBuf, store: S, provider: A) -> Self {
        Self {
            http,
            client_secrets_file,
            store,
            provider,
            credentials: None,
        }
    }

    pub async fn get_credentials(&mut self) -> Res<YouTubeCredentials> {
        if self.credentials.is_none() {
            self.credentials = self.load().await?;
        }

        if let Some(creds) = self.credentials.as_ref().filter(|c| c.is_valid()) {
            return Ok(creds.clone());
        }

        if let Some(stale) = self.credentials.take() {
            if stale.refresh_token.is_some() {
                info!("Refreshing YouTube credentials.");
                match auth::refresh_credentials(&self.http, &stale).await {
                    Ok(fresh) => return self.remember(fresh).await,
                    Err(e) => warning!("Failed to refresh YouTube credentials: {}", e),
                }
            }
        }

        let secrets = auth::load_client_secrets(&self.client_secrets_file).await?;
        info!("Starting YouTube authorization.");
        let fresh = self
            .provider
            .authorize(&self.http, &secrets, &[YOUTUBE_SCOPE])
            .await?;
        self.remember(fresh).await
    }

    /// Treats the current credential as expired and obtains a new one.
    ///
    /// Used once after the API rejected a request with 401.
    pub async fn force_refresh(&mut self) -> Res<YouTubeCredentials> {
        if self.credentials.is_none() {
            self.credentials = self.load().await?;
        }
        if let Some(creds) = self.credentials.as_mut() {
            creds.expires_at = 0;
        }
        self.get_credentials().await
    }

    async fn remember(&mut self, creds: YouTubeCredentials) -> Res<YouTubeCredentials> {
        let json = serde_json::to_string_pretty(&creds)?;
        self.store.save(YOUTUBE_TOKEN_KEY, &json).await?;
        self.credentials = Some(creds.clone());
        Ok(creds)
    }

    /// An unreadable stored credential is treated like a missing one.
    async fn load(&self) -> Res<Option<YouTubeCredentials>> {
        let Some(content) = self.store.load(YOUTUBE_TOKEN_KEY).await? else {
            return Ok(None);
        };
        Ok(serde_json::from_str(&content).ok())
    }
}
