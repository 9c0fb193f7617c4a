use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn now_timestamp() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Random value echoed back by the OAuth redirect to tie it to our request.
pub fn generate_csrf_state() -> String {
    random_alphanumeric(32)
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Builds the value of an HTTP Basic `Authorization` header.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{client_id}:{client_secret}"))
    )
}

/// Extracts the playlist id from a playlist URL.
///
/// The id is the last path segment; a query string or fragment such as the
/// `?si=` share suffix is ignored. Nothing else is validated.
pub fn playlist_id_from_url(playlist_url: &str) -> &str {
    let path = playlist_url
        .split(['?', '#'])
        .next()
        .unwrap_or(playlist_url);
    path.rsplit('/').next().unwrap_or(path)
}

pub fn hex_digest(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
