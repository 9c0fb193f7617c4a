//! # API Module
//!
//! HTTP handlers of the short-lived local server that receives the Google
//! OAuth redirect during the YouTube consent flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - accepts the redirect (`/?state=…&code=…`), checks the
//!   CSRF state and hands the authorization code (or the provider's error)
//!   to the waiting flow through the shared [`PendingAuthorization`] slot.
//!
//! The code exchange itself happens in [`crate::youtube::auth`], after the
//! handler has stored the code.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use sp2yt::api::callback;
//!
//! let app = Router::new().route("/", get(callback));
//! ```
//!
//! [`PendingAuthorization`]: crate::types::PendingAuthorization

mod callback;

pub use callback::callback;
