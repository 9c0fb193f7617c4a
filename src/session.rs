use reqwest::Client;

use crate::{
    Res,
    config::Settings,
    info,
    management::{
        ResponseCache, SPOTIFY_CACHE, SpotifyTokenManager, TokenStore, YOUTUBE_CACHE,
        YouTubeCredentialManager,
    },
    spotify::SpotifyClient,
    youtube::{YouTubeClient, auth::AuthorizationProvider},
};

/// Everything one transfer run works with.
///
/// Built once per run. Token state lives inside the clients' token managers
/// and is only changed by them; both managers share the same token store.
pub struct Session<S, A> {
    pub spotify: SpotifyClient<S>,
    pub youtube: YouTubeClient<S, A>,
}

impl<S: TokenStore + Clone, A: AuthorizationProvider> Session<S, A> {
    pub fn new(settings: &Settings, store: S, provider: A) -> Self {
        let http = Client::new();

        let spotify_tokens = SpotifyTokenManager::new(
            http.clone(),
            settings.spotify_token_url.clone(),
            settings.spotify_client_id.clone(),
            settings.spotify_client_secret.clone(),
            store.clone(),
        );
        let youtube_credentials = YouTubeCredentialManager::new(
            http.clone(),
            settings.client_secrets_file.clone(),
            store,
            provider,
        );

        Session {
            spotify: SpotifyClient::new(
                http.clone(),
                settings.spotify_api_url.clone(),
                spotify_tokens,
                ResponseCache::new(settings.cache_dir(), SPOTIFY_CACHE, settings.cache_ttl),
            ),
            youtube: YouTubeClient::new(
                http,
                settings.youtube_api_url.clone(),
                settings.youtube_api_key.clone(),
                youtube_credentials,
                ResponseCache::new(settings.cache_dir(), YOUTUBE_CACHE, settings.cache_ttl),
            ),
        }
    }
}

impl<S, A> Session<S, A> {
    /// Makes sure both response cache namespaces exist. Safe to call repeatedly.
    pub async fn init_caches(&mut self) -> Res<()> {
        for cache in [self.spotify.cache_mut(), self.youtube.cache_mut()] {
            if cache.init().await? {
                info!("Initialized response cache {}.", cache.name());
            }
        }
        Ok(())
    }
}
