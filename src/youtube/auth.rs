use std::{
    future::Future,
    io::ErrorKind,
    net::{Ipv4Addr, SocketAddr},
    path::Path,
    sync::Arc,
    time::{Duration, Instant},
};

use reqwest::{Client, Url};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    Res,
    config::{ConfigError, Settings},
    http::ApiError,
    info,
    server::serve_callback,
    types::{
        ClientSecrets, ClientSecretsFile, DEFAULT_TOKEN_LIFETIME, OAuthTokenResponse,
        PendingAuthorization, YouTubeCredentials,
    },
    utils, warning,
};

pub const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube";

/// Obtains user credentials for the given scopes.
///
/// The crate ships [`LocalRedirectAuthorization`], which needs a browser and
/// a person in front of it. Automated environments plug in their own
/// implementation (service account, pre-provisioned token, test double).
pub trait AuthorizationProvider {
    fn authorize(
        &self,
        http: &Client,
        secrets: &ClientSecrets,
        scopes: &[&str],
    ) -> impl Future<Output = Res<YouTubeCredentials>> + Send;
}

/// Authorization-code flow with PKCE and a loopback redirect listener.
///
/// 1. binds a listener (an OS-assigned port by default)
/// 2. opens the consent page in the default browser
/// 3. waits until the redirect hits the listener or the timeout elapses
/// 4. exchanges the authorization code for credentials
#[derive(Debug, Clone)]
pub struct LocalRedirectAuthorization {
    bind_address: String,
    timeout: Duration,
}

impl LocalRedirectAuthorization {
    pub fn new(bind_address: String, timeout: Duration) -> Self {
        Self {
            bind_address,
            timeout,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.redirect_address.clone(), settings.auth_timeout)
    }
}

impl AuthorizationProvider for LocalRedirectAuthorization {
    async fn authorize(
        &self,
        http: &Client,
        secrets: &ClientSecrets,
        scopes: &[&str],
    ) -> Res<YouTubeCredentials> {
        let listener = TcpListener::bind(&self.bind_address).await?;
        let mut addr = listener.local_addr()?;
        if addr.ip().is_unspecified() {
            addr = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), addr.port());
        }
        let redirect_uri = format!("http://{addr}/");

        let code_verifier = utils::generate_code_verifier();
        let code_challenge = utils::generate_code_challenge(&code_verifier);
        let csrf_state = utils::generate_csrf_state();

        let shared_state = Arc::new(Mutex::new(Some(PendingAuthorization {
            csrf_state: csrf_state.clone(),
            code: None,
            error: None,
        })));

        let server_state = Arc::clone(&shared_state);
        let server = tokio::spawn(async move {
            if let Err(e) = serve_callback(listener, server_state).await {
                warning!("OAuth redirect listener stopped: {}", e);
            }
        });

        let auth_url = authorization_url(
            secrets,
            &redirect_uri,
            scopes,
            &csrf_state,
            &code_challenge,
        )?;

        if webbrowser::open(auth_url.as_str()).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                auth_url
            )
        }
        info!("Waiting for YouTube authorization in the browser...");

        let code = wait_for_code(shared_state, self.timeout).await;
        server.abort();

        let creds = exchange_code(
            http,
            secrets,
            &code?,
            &code_verifier,
            &redirect_uri,
            scopes,
        )
        .await?;
        Ok(creds)
    }
}

/// Builds the consent page URL for an authorization-code request with PKCE.
pub fn authorization_url(
    secrets: &ClientSecrets,
    redirect_uri: &str,
    scopes: &[&str],
    csrf_state: &str,
    code_challenge: &str,
) -> Res<Url> {
    let scope = scopes.join(" ");
    let url = Url::parse_with_params(
        &secrets.auth_uri,
        &[
            ("client_id", secrets.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", scope.as_str()),
            ("state", csrf_state),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )?;
    Ok(url)
}

/// Polls the shared state until the redirect delivered a code or an error.
async fn wait_for_code(
    shared_state: Arc<Mutex<Option<PendingAuthorization>>>,
    max_wait: Duration,
) -> Res<String> {
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pending) = lock.as_ref() {
            if let Some(code) = &pending.code {
                return Ok(code.clone());
            }
            if let Some(error) = &pending.error {
                return Err(format!("YouTube authorization failed: {error}").into());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    Err(format!(
        "YouTube authorization timed out after {} seconds",
        max_wait.as_secs()
    )
    .into())
}

/// Exchanges an authorization code for credentials.
pub async fn exchange_code(
    http: &Client,
    secrets: &ClientSecrets,
    code: &str,
    code_verifier: &str,
    redirect_uri: &str,
    scopes: &[&str],
) -> Result<YouTubeCredentials, ApiError> {
    let response = http
        .post(&secrets.token_uri)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", secrets.client_id.as_str()),
            ("client_secret", secrets.client_secret.as_str()),
            ("redirect_uri", redirect_uri),
            ("code_verifier", code_verifier),
        ])
        .send()
        .await?;
    let json = read_token_response(response).await?;

    Ok(YouTubeCredentials {
        token: json.access_token,
        refresh_token: json.refresh_token,
        token_uri: secrets.token_uri.clone(),
        client_id: secrets.client_id.clone(),
        client_secret: secrets.client_secret.clone(),
        scopes: granted_scopes(json.scope.as_deref(), scopes),
        expires_at: utils::now_timestamp()
            .saturating_add(json.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME)),
    })
}

/// Exchanges the refresh token of `creds` for a new access token.
///
/// Google usually omits the refresh token from this answer; the old one is
/// kept in that case.
pub async fn refresh_credentials(
    http: &Client,
    creds: &YouTubeCredentials,
) -> Res<YouTubeCredentials> {
    let Some(refresh_token) = creds.refresh_token.as_deref() else {
        return Err("YouTube credentials carry no refresh token".into());
    };

    let response = http
        .post(&creds.token_uri)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
        ])
        .send()
        .await?;
    let json = read_token_response(response).await?;

    let scopes: Vec<&str> = creds.scopes.iter().map(String::as_str).collect();
    Ok(YouTubeCredentials {
        token: json.access_token,
        refresh_token: json.refresh_token.or_else(|| creds.refresh_token.clone()),
        token_uri: creds.token_uri.clone(),
        client_id: creds.client_id.clone(),
        client_secret: creds.client_secret.clone(),
        scopes: granted_scopes(json.scope.as_deref(), &scopes),
        expires_at: utils::now_timestamp()
            .saturating_add(json.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME)),
    })
}

async fn read_token_response(
    response: reqwest::Response,
) -> Result<OAuthTokenResponse, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status {
            service: "Google OAuth",
            status: status.as_u16(),
            body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

fn granted_scopes(granted: Option<&str>, requested: &[&str]) -> Vec<String> {
    match granted {
        Some(scope) if !scope.trim().is_empty() => {
            scope.split_whitespace().map(str::to_string).collect()
        }
        _ => requested.iter().map(|s| s.to_string()).collect(),
    }
}

/// Reads the OAuth client secret file.
///
/// # Errors
///
/// A missing, unreadable or malformed file is a [`ConfigError`]; the consent
/// flow cannot run without it.
pub async fn load_client_secrets(path: &Path) -> Result<ClientSecrets, ConfigError> {
    let content = async_fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ConfigError(format!(
                "client secret file {} does not exist",
                path.display()
            ))
        } else {
            ConfigError(format!(
                "client secret file {} cannot be read: {e}",
                path.display()
            ))
        }
    })?;

    let file: ClientSecretsFile = serde_json::from_str(&content).map_err(|e| {
        ConfigError(format!(
            "client secret file {} is malformed: {e}",
            path.display()
        ))
    })?;

    file.installed.or(file.web).ok_or_else(|| {
        ConfigError(format!(
            "client secret file {} has neither an 'installed' nor a 'web' section",
            path.display()
        ))
    })
}
