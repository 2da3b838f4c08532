//! Spotify to Last.fm Scrobbler Library
//!
//! This library fetches a user's recently played tracks from Spotify and
//! submits them to Last.fm. It keeps the user's Spotify OAuth tokens alive
//! along the way and hands any refreshed credentials back to the caller,
//! which is responsible for storing them.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `credentials` - Per-user credential document for both services
//! - `error` - Error type and result alias
//! - `http` - Blocking HTTP transport used by the API clients
//! - `lastfm` - Signed Last.fm scrobble client
//! - `management` - Credential file storage used by the binary
//! - `scrobbler` - The scrobble job tying both services together
//! - `spotify` - Spotify Web API client with token refresh
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotify_scrobbler::{config::Settings, http::HttpTransport, lastfm::LastfmClient,
//!     scrobbler, spotify::SpotifyClient};
//!
//! fn main() -> spotify_scrobbler::Res<()> {
//!     let settings = Settings::from_env()?;
//!     let transport = HttpTransport::new(settings.http_timeout)?;
//!     let spotify = SpotifyClient::new(settings.spotify, Box::new(transport.clone()));
//!     let lastfm = LastfmClient::new(settings.lastfm, Box::new(transport));
//!
//!     let document = serde_json::from_str(&std::fs::read_to_string("credentials.json")?)?;
//!     let outcome = scrobbler::scrobble(&document, &spotify, &lastfm, Default::default())?;
//!     if let Some(updated) = outcome.updated_document() {
//!         std::fs::write("credentials.json", updated.to_string())?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod lastfm;
pub mod management;
pub mod scrobbler;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Res, ScrobblerError};

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Loaded credentials from {}", path.display());
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
/// success!("Scrobbled {} tracks!", count);
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
/// Only meant for the binary: the library itself reports failures through
/// [`ScrobblerError`]. Terminates with exit code 1 so a scheduler can tell
/// the run failed.
///
/// # Example
///
/// ```
/// error!("Scrobbling failed. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Refreshed credentials could not be stored. Err: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
