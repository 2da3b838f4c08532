//! Per-user credentials for both services.
//!
//! The credential document has a fixed shape:
//!
//! ```text
//! {
//!   "lastfm":  { "session_key": "..." },
//!   "spotify": { "access_token": "...", "token_type": "Bearer",
//!                "refresh_token": "...", "scope": "..." }
//! }
//! ```
//!
//! Loading and storing the document is up to the caller. The only mutation
//! the library performs is patching the Spotify tokens after a refresh.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Res, ScrobblerError};

/// Last.fm session. Never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastfmCredentials {
    pub session_key: String,
}

/// Spotify OAuth2 tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyCredentials {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: String,
    pub scope: String,
}

/// The subset of a token endpoint response that may replace stored tokens.
///
/// Any other keys in the response (`expires_in`, `scope`, ...) are dropped
/// when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenPatch {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl SpotifyCredentials {
    /// Value for the `Authorization` header, `"<token_type> <access_token>"`.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Overwrites the tokens present in `patch`, leaving the rest untouched.
    ///
    /// Returns whether anything actually changed.
    pub fn update(&mut self, patch: TokenPatch) -> bool {
        let mut changed = false;

        if let Some(access_token) = patch.access_token {
            changed |= self.access_token != access_token;
            self.access_token = access_token;
        }

        if let Some(refresh_token) = patch.refresh_token {
            changed |= self.refresh_token != refresh_token;
            self.refresh_token = refresh_token;
        }

        changed
    }
}

/// Credentials for both services. A missing half is omitted on output.
///
/// [`Credentials::from_document`] always fills both halves. They are
/// optional so that credentials built by hand, half-way through an
/// authorization handshake, still serialize to a valid partial document.
/// [`Credentials::lastfm`] and [`Credentials::spotify_mut`] turn a missing
/// half into a [`ScrobblerError::Config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastfm: Option<LastfmCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify: Option<SpotifyCredentials>,
}

impl Credentials {
    /// Credentials with both halves present.
    pub fn new(lastfm: LastfmCredentials, spotify: SpotifyCredentials) -> Self {
        Self {
            lastfm: Some(lastfm),
            spotify: Some(spotify),
        }
    }

    /// Builds credentials from a credential document.
    ///
    /// Both halves and every field in them are required; anything missing is
    /// a [`ScrobblerError::Config`]. Unrecognised keys are ignored.
    pub fn from_document(document: &Value) -> Res<Self> {
        let lastfm = section::<LastfmCredentials>(document, "lastfm")?;
        let spotify = section::<SpotifyCredentials>(document, "spotify")?;
        Ok(Self::new(lastfm, spotify))
    }

    /// Serializes back to the document shape accepted by [`Credentials::from_document`].
    pub fn to_document(&self) -> Value {
        let mut document = serde_json::Map::new();

        if let Some(lastfm) = &self.lastfm {
            document.insert(
                "lastfm".to_string(),
                serde_json::json!({ "session_key": lastfm.session_key }),
            );
        }

        if let Some(spotify) = &self.spotify {
            document.insert(
                "spotify".to_string(),
                serde_json::json!({
                    "access_token": spotify.access_token,
                    "token_type": spotify.token_type,
                    "refresh_token": spotify.refresh_token,
                    "scope": spotify.scope,
                }),
            );
        }

        Value::Object(document)
    }

    /// The Last.fm session, or a configuration error when it is absent.
    pub fn lastfm(&self) -> Res<&LastfmCredentials> {
        self.lastfm
            .as_ref()
            .ok_or_else(|| ScrobblerError::Config("lastfm credentials are missing".to_string()))
    }

    /// Mutable Spotify tokens, for calls that may refresh them.
    pub fn spotify_mut(&mut self) -> Res<&mut SpotifyCredentials> {
        self.spotify
            .as_mut()
            .ok_or_else(|| ScrobblerError::Config("spotify credentials are missing".to_string()))
    }
}

fn section<T: serde::de::DeserializeOwned>(document: &Value, key: &str) -> Res<T> {
    let value = document
        .get(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ScrobblerError::Config(format!("credential document has no '{key}'")))?;

    T::deserialize(value)
        .map_err(|e| ScrobblerError::Config(format!("invalid '{key}' credentials: {e}")))
}
