//! Shared HTTP plumbing for both API clients.

use std::fmt;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// A response body together with where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    #[serde(skip)]
    pub from_cache: bool,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED.as_u16()
    }

    /// Turns a non-2xx response into an [`ApiError::Status`] carrying the raw body.
    pub fn error_for_status(self, service: &'static str) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                service,
                status: self.status,
                body: self.body,
            })
        }
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(ApiError::Decode)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Request(reqwest::Error),
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },
    Decode(serde_json::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Request(e) => write!(f, "request failed: {e}"),
            ApiError::Status {
                service,
                status,
                body,
            } => write!(f, "{service} API responded with status {status}: {body}"),
            ApiError::Decode(e) => write!(f, "unexpected response body: {e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Request(e) => Some(e),
            ApiError::Decode(e) => Some(e),
            ApiError::Status { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Request(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err)
    }
}

/// Issues a GET without touching any cache.
pub async fn get(
    client: &Client,
    url: &str,
    headers: &[(&str, &str)],
) -> Result<HttpResponse, ApiError> {
    let mut request = client.get(url);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }

    let response = request.send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;

    Ok(HttpResponse {
        status,
        body,
        from_cache: false,
    })
}
