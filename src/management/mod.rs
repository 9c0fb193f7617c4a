mod auth;
mod cache;
mod credentials;
mod store;

pub use auth::SPOTIFY_TOKEN_KEY;
pub use auth::SpotifyTokenManager;
pub use cache::CacheError;
pub use cache::ResponseCache;
pub use cache::SPOTIFY_CACHE;
pub use cache::YOUTUBE_CACHE;
pub use cache::cache_key;
pub use credentials::YOUTUBE_TOKEN_KEY;
pub use credentials::YouTubeCredentialManager;
pub use store::FileTokenStore;
pub use store::MemoryTokenStore;
pub use store::StoreError;
pub use store::TokenStore;
