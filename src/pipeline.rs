//! The one-shot Spotify → YouTube transfer.

use crate::{
    Res, info,
    management::TokenStore,
    report::MatchReport,
    session::Session,
    success,
    types::PlaylistDescriptor,
    youtube::auth::AuthorizationProvider,
};

#[derive(Debug, Clone)]
pub struct TransferSummary {
    pub playlist: PlaylistDescriptor,
    pub report: MatchReport,
    pub appended: usize,
}

/// Copies the playlist behind `playlist_url` into a new YouTube playlist.
///
/// Steps run strictly in order: caches, playlist name, tracks, searches,
/// playlist creation, appends. Search failures only cost the affected track;
/// any other error ends the run and nothing is rolled back.
pub async fn transfer<S, A>(
    session: &mut Session<S, A>,
    playlist_url: &str,
) -> Res<TransferSummary>
where
    S: TokenStore,
    A: AuthorizationProvider,
{
    session.init_caches().await?;

    let playlist_name = session.spotify.get_playlist_name(playlist_url).await?;
    info!("Copying Spotify playlist \"{}\".", playlist_name);

    let tracks = session.spotify.get_playlist_tracks(playlist_url).await?;
    info!("Found {} tracks.", tracks.len());

    let report = session.youtube.find_matches(&tracks).await;
    info!(
        "Matched {} of {} tracks ({} without result, {} failed).",
        report.matched_count(),
        report.len(),
        report.no_match_count(),
        report.failed_count()
    );

    let playlist = session.youtube.create_playlist(&playlist_name).await?;
    let appended = session
        .youtube
        .append_videos(&playlist.id, &report.video_ids())
        .await?;

    success!("Playlist \"{}\" created successfully.", playlist.title);

    Ok(TransferSummary {
        playlist,
        report,
        appended,
    })
}
