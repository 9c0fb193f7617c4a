use crate::{
    Res, info,
    management::TokenStore,
    spotify::SpotifyClient,
    types::{PlaylistResponse, PlaylistTracksPage, Track},
    utils,
};

impl<S: TokenStore> SpotifyClient<S> {
    /// Retrieves the name of the playlist behind `playlist_url`.
    ///
    /// Always a live request; the name is not cached.
    ///
    /// # Errors
    ///
    /// Any API error (unknown playlist id, rejected token) or a body without
    /// a `name` ends the run.
    pub async fn get_playlist_name(&mut self, playlist_url: &str) -> Res<String> {
        let api_url = format!(
            "{uri}/playlists/{id}",
            uri = self.api_url,
            id = utils::playlist_id_from_url(playlist_url)
        );

        let response = self.authorized_get(&api_url, false).await?;
        let playlist: PlaylistResponse = response.json()?;
        Ok(playlist.name)
    }

    /// Retrieves every usable track of the playlist behind `playlist_url`.
    ///
    /// Pages are followed through the `next` link and each page goes through
    /// the response cache. Entries without an embedded track, or whose track
    /// lacks an id, name or artist list, are skipped.
    pub async fn get_playlist_tracks(&mut self, playlist_url: &str) -> Res<Vec<Track>> {
        let mut next = Some(format!(
            "{uri}/playlists/{id}/tracks",
            uri = self.api_url,
            id = utils::playlist_id_from_url(playlist_url)
        ));
        let mut tracks = Vec::new();
        let mut all_cached = true;

        while let Some(api_url) = next {
            let response = self.authorized_get(&api_url, true).await?;
            all_cached &= response.from_cache;

            let (page_tracks, page_next) = parse_playlist_tracks(&response.body)?;
            tracks.extend(page_tracks);
            next = page_next;
        }

        if all_cached {
            info!("Using cached Spotify playlist tracks.");
        } else {
            info!("Fetching Spotify playlist tracks from the API.");
        }

        Ok(tracks)
    }
}

/// Parses one page of a playlist track listing.
///
/// Returns the usable tracks in playlist order plus the URL of the next page.
/// Never yields more tracks than the page has items.
pub fn parse_playlist_tracks(
    body: &str,
) -> Result<(Vec<Track>, Option<String>), serde_json::Error> {
    let page: PlaylistTracksPage = serde_json::from_str(body)?;
    let tracks = page
        .items
        .into_iter()
        .filter_map(|item| item.track)
        .filter_map(|raw| Track::try_from(raw).ok())
        .collect();

    Ok((tracks, page.next))
}
