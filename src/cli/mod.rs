//! # CLI Module
//!
//! User-facing commands of the playlist copier. Each command builds what it
//! needs from [`Settings`](crate::config::Settings), delegates to the library
//! and turns failures into a printed error and a non-zero exit code.
//!
//! ## Commands
//!
//! - [`transfer`] - copies a Spotify playlist to a new YouTube playlist
//! - [`auth`] - runs the YouTube consent flow ahead of a transfer
//!
//! ## Usage
//!
//! ```bash
//! sp2yt                                              # prompts for the playlist URL
//! sp2yt transfer --url https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! sp2yt auth                                         # authorize YouTube only
//! ```

mod auth;
mod transfer;

pub use auth::auth;
pub use transfer::transfer;
