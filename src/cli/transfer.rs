use std::io::{self, Write};

use tabled::Table;

use crate::{
    config::Settings,
    error,
    management::FileTokenStore,
    pipeline,
    session::Session,
    warning,
    youtube::auth::LocalRedirectAuthorization,
};

/// Copies a Spotify playlist to YouTube.
///
/// Asks for the playlist URL on stdin when none was given on the command line.
/// Tracks without a usable match are listed once the playlist is filled.
pub async fn transfer(url: Option<String>) {
    let playlist_url = match url {
        Some(url) => url,
        None => match prompt_playlist_url() {
            Ok(url) => url,
            Err(e) => error!("Cannot read playlist URL. Err: {}", e),
        },
    };

    if playlist_url.is_empty() {
        error!("No playlist URL given.");
    }

    let settings = Settings::from_env();
    let mut session = Session::new(
        &settings,
        FileTokenStore::new(settings.token_dir()),
        LocalRedirectAuthorization::from_settings(&settings),
    );

    let summary = match pipeline::transfer(&mut session, &playlist_url).await {
        Ok(summary) => summary,
        Err(e) => error!("Failed to copy playlist. Err: {}", e),
    };

    let unmatched = summary.report.unmatched_rows();
    if !unmatched.is_empty() {
        warning!(
            "{} of {} tracks were not added:",
            unmatched.len(),
            summary.report.len()
        );
        println!("{}", Table::new(unmatched));
    }
}

fn prompt_playlist_url() -> io::Result<String> {
    print!("Enter the Spotify playlist URL: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
