use crate::{
    Res, info,
    management::TokenStore,
    types::{
        CreatePlaylistRequest, CreatePlaylistResponse, InsertPlaylistItemRequest,
        PlaylistDescriptor, PlaylistItemSnippet, PlaylistSnippet, PlaylistStatus, ResourceId,
    },
    youtube::{YouTubeClient, auth::AuthorizationProvider},
};

pub const PLAYLIST_DESCRIPTION: &str = "Playlist generated from Spotify.";

impl<S: TokenStore, A: AuthorizationProvider> YouTubeClient<S, A> {
    /// Creates a public playlist titled `title`.
    ///
    /// No check is made for an existing playlist with the same title; every
    /// call creates a new one.
    pub async fn create_playlist(&mut self, title: &str) -> Res<PlaylistDescriptor> {
        let api_url = format!("{uri}/playlists?part=snippet,status", uri = self.api_url);
        let request = CreatePlaylistRequest {
            snippet: PlaylistSnippet {
                title: title.to_string(),
                description: PLAYLIST_DESCRIPTION.to_string(),
            },
            status: PlaylistStatus {
                privacy_status: "public".to_string(),
            },
        };

        let response = self.authorized_post(&api_url, &request).await?;
        let created: CreatePlaylistResponse = response.json()?;

        Ok(PlaylistDescriptor {
            id: created.id,
            title: title.to_string(),
        })
    }

    /// Appends the videos one request at a time, in order.
    ///
    /// The first failing insert is returned as the error and the remaining
    /// videos are not attempted; already inserted items stay in the playlist.
    /// Returns the number of inserted items.
    pub async fn append_videos(
        &mut self,
        playlist_id: &str,
        video_ids: &[String],
    ) -> Res<usize> {
        let api_url = format!("{uri}/playlistItems?part=snippet", uri = self.api_url);
        let mut appended = 0;

        for video_id in video_ids {
            let request = InsertPlaylistItemRequest {
                snippet: PlaylistItemSnippet {
                    playlist_id: playlist_id.to_string(),
                    resource_id: ResourceId {
                        kind: "youtube#video".to_string(),
                        video_id: video_id.clone(),
                    },
                },
            };

            self.authorized_post(&api_url, &request).await?;
            appended += 1;
            info!("Added video {} ({}/{}).", video_id, appended, video_ids.len());
        }

        Ok(appended)
    }
}
