use reqwest::Client;

use crate::{
    config::Settings,
    error,
    management::{FileTokenStore, YouTubeCredentialManager},
    success,
    youtube::auth::LocalRedirectAuthorization,
};

/// Obtains YouTube user credentials and stores them for later transfers.
///
/// Valid stored credentials are reused, so this only opens the consent page
/// when there is nothing usable yet.
pub async fn auth() {
    let settings = Settings::from_env();
    let mut credentials = YouTubeCredentialManager::new(
        Client::new(),
        settings.client_secrets_file.clone(),
        FileTokenStore::new(settings.token_dir()),
        LocalRedirectAuthorization::from_settings(&settings),
    );

    match credentials.get_credentials().await {
        Ok(_) => success!("YouTube authorization complete."),
        Err(e) => error!("YouTube authorization failed. Err: {}", e),
    }
}
