use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

/// Client-credentials access token of the source service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyToken {
    pub access_token: String,
    pub expires_at: u64,
}

impl SpotifyToken {
    /// A token is usable only while its expiry lies strictly in the future.
    pub fn is_usable(&self) -> bool {
        !self.access_token.is_empty() && self.expires_at > utils::now_timestamp()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientCredentialsResponse {
    pub access_token: String,
    pub expires_in: Option<u64>,
}

/// Token lifetime assumed when a token endpoint does not state one.
pub const DEFAULT_TOKEN_LIFETIME: u64 = 3600;

/// Seconds before expiry at which a YouTube credential stops reporting itself valid.
pub const CREDENTIAL_REFRESH_MARGIN: u64 = 240;

/// User OAuth credential of the destination service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YouTubeCredentials {
    pub token: String,
    pub refresh_token: Option<String>,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    pub scopes: Vec<String>,
    pub expires_at: u64,
}

impl YouTubeCredentials {
    pub fn is_valid(&self) -> bool {
        !self.token.is_empty()
            && utils::now_timestamp() + CREDENTIAL_REFRESH_MARGIN < self.expires_at
    }
}

/// Token endpoint answer for both the code exchange and the refresh grant.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
}

/// Google client secret file, as downloaded from the cloud console.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecretsFile {
    pub installed: Option<ClientSecrets>,
    pub web: Option<ClientSecrets>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
}

/// State shared between the consent flow and the redirect handler.
#[derive(Debug, Clone)]
pub struct PendingAuthorization {
    pub csrf_state: String,
    pub code: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistResponse {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<RawTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTrack {
    pub id: Option<String>,
    pub name: Option<String>,
    pub artists: Option<Vec<ArtistRef>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
}

impl TryFrom<RawTrack> for Track {
    type Error = ();

    fn try_from(raw: RawTrack) -> Result<Self, Self::Error> {
        match (raw.id, raw.name, raw.artists) {
            (Some(id), Some(name), Some(artists)) => Ok(Track {
                id,
                name,
                artists: artists.into_iter().map(|a| a.name).collect(),
            }),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub snippet: PlaylistSnippet,
    pub status: PlaylistStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistSnippet {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistStatus {
    pub privacy_status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsertPlaylistItemRequest {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub playlist_id: String,
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub kind: String,
    pub video_id: String,
}

/// The destination playlist created for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistDescriptor {
    pub id: String,
    pub title: String,
}

#[derive(Tabled)]
pub struct MatchTableRow {
    pub track: String,
    pub artists: String,
    pub result: String,
}
