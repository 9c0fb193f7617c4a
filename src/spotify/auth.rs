use reqwest::Client;

use crate::{
    http::ApiError,
    types::{ClientCredentialsResponse, DEFAULT_TOKEN_LIFETIME, SpotifyToken},
    utils,
};

/// Requests an application token using the client-credentials grant.
///
/// Authenticates with HTTP Basic auth built from `client_id:client_secret`
/// and posts `grant_type=client_credentials` to the token endpoint. The
/// returned token expires `expires_in` seconds from now, or after
/// [`DEFAULT_TOKEN_LIFETIME`] when the response leaves it out.
///
/// # Errors
///
/// Network failures, non-2xx answers (e.g. invalid client credentials) and
/// bodies without an `access_token` are returned as [`ApiError`].
///
/// # Example
///
/// ```
/// let token = request_client_credentials_token(
///     &client,
///     "https://accounts.spotify.com/api/token",
///     "client-id",
///     "client-secret",
/// )
/// .await?;
/// println!("Token valid until {}", token.expires_at);
/// ```
pub async fn request_client_credentials_token(
    client: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<SpotifyToken, ApiError> {
    let response = client
        .post(token_url)
        .header(
            "Authorization",
            utils::basic_auth_header(client_id, client_secret),
        )
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status {
            service: "Spotify",
            status: status.as_u16(),
            body,
        });
    }

    let json: ClientCredentialsResponse = serde_json::from_str(&body)?;
    Ok(SpotifyToken {
        access_token: json.access_token,
        expires_at: utils::now_timestamp()
            .saturating_add(json.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME)),
    })
}
