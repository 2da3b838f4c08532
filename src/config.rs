//! Configuration management for the scrobbler.
//!
//! This module loads settings from environment variables and an optional
//! `.env` file. API keys and client secrets belong to the application and are
//! configured here; per-user tokens live in the credential document instead
//! (see [`crate::credentials`]).
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{path::PathBuf, time::Duration};

use crate::error::{Res, ScrobblerError};

pub const APP_DIR: &str = "spotify-scrobbler";

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_LASTFM_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Returns the application directory inside the platform's local data dir.
///
/// - Linux: `~/.local/share/spotify-scrobbler`
/// - macOS: `~/Library/Application Support/spotify-scrobbler`
/// - Windows: `%LOCALAPPDATA%/spotify-scrobbler`
pub fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Loads environment variables from `.env` in the application directory.
///
/// A missing file is fine: the process environment still applies. Only a
/// file that exists but cannot be parsed is reported.
pub fn load_env() -> Res<()> {
    let path = app_dir().join(".env");
    if !path.is_file() {
        log::debug!("no .env file at {}", path.display());
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| ScrobblerError::Config(format!("cannot load {}: {}", path.display(), e)))
}

/// Application settings for both remote services.
#[derive(Debug, Clone)]
pub struct Settings {
    pub spotify: SpotifySettings,
    pub lastfm: LastfmSettings,
    /// Per-request timeout. `None` keeps the transport's own behaviour.
    pub http_timeout: Option<Duration>,
    pub credentials_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub token_url: String,
    pub auth_url: String,
}

#[derive(Debug, Clone)]
pub struct LastfmSettings {
    pub api_key: String,
    pub api_secret: String,
    pub api_url: String,
}

impl SpotifySettings {
    /// Settings for the given application, pointing at Spotify's public endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            token_url: DEFAULT_SPOTIFY_TOKEN_URL.to_string(),
            auth_url: DEFAULT_SPOTIFY_AUTH_URL.to_string(),
        }
    }
}

impl LastfmSettings {
    /// Settings for the given API account, pointing at `ws.audioscrobbler.com`.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_url: DEFAULT_LASTFM_API_URL.to_string(),
        }
    }
}

impl Settings {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through `lookup`, which maps a variable name to its
    /// value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| ScrobblerError::Config(format!("{key} must be set")))
        };

        let spotify = SpotifySettings {
            client_id: required("SPOTIFY_CLIENT_ID")?,
            client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            api_url: get("SPOTIFY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string()),
            token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_TOKEN_URL.to_string()),
            auth_url: get("SPOTIFY_API_AUTH_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_AUTH_URL.to_string()),
        };

        let lastfm = LastfmSettings {
            api_key: required("LASTFM_API_KEY")?,
            api_secret: required("LASTFM_API_SECRET")?,
            api_url: get("LASTFM_API_URL").unwrap_or_else(|| DEFAULT_LASTFM_API_URL.to_string()),
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    ScrobblerError::Config(format!("HTTP_TIMEOUT_SECS is not a number: {raw}"))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let credentials_file = get("SCROBBLER_CREDENTIALS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| app_dir().join("credentials.json"));

        Ok(Settings {
            spotify,
            lastfm,
            http_timeout,
            credentials_file,
        })
    }
}
