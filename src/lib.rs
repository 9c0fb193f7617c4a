//! Spotify to YouTube Playlist Copier Library
//!
//! This library copies a Spotify playlist to YouTube. Every track of the source
//! playlist is searched on YouTube, the first matching music video is picked and
//! a new public YouTube playlist named after the source playlist is filled with
//! the matches.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth redirect listener
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `http` - Shared HTTP response handling and API errors
//! - `management` - Token stores, token managers and the response cache
//! - `pipeline` - The playlist transfer pipeline
//! - `report` - Per-track match outcomes
//! - `server` - Local HTTP server for OAuth callbacks
//! - `session` - Per-run context holding both API clients
//! - `spotify` - Spotify Web API client (source service)
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `youtube` - YouTube Data API client (destination service)
//!
//! # Example
//!
//! ```
//! use sp2yt::{
//!     config::{self, Settings},
//!     management::FileTokenStore,
//!     pipeline,
//!     session::Session,
//!     youtube::auth::LocalRedirectAuthorization,
//! };
//!
//! #[tokio::main]
//! async fn main() -> sp2yt::Res<()> {
//!     config::load_env().await?;
//!
//!     let settings = Settings::from_env();
//!     let mut session = Session::new(
//!         &settings,
//!         FileTokenStore::new(settings.token_dir()),
//!         LocalRedirectAuthorization::from_settings(&settings),
//!     );
//!
//!     let summary = pipeline::transfer(
//!         &mut session,
//!         "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M",
//!     )
//!     .await?;
//!     println!("{} videos added", summary.appended);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod http;
pub mod management;
pub mod pipeline;
pub mod report;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod youtube;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. Module specific errors
/// (`ConfigError`, `StoreError`, `CacheError`, `ApiError`) convert into it
/// with `?`.
///
/// # Example
///
/// ```
/// use sp2yt::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching Spotify access token from the API.");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist \"{}\" created successfully.", title);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1 right after printing. Only the
/// binary uses it; library code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Transfer failed: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, for example a track whose search failed.
///
/// # Example
///
/// ```
/// warning!("Search failed for track {}: {}", name, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
