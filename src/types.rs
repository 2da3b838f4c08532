use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Response of `GET /me/player/recently-played`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentlyPlayed {
    pub items: Vec<PlayHistory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistory {
    pub track: Track,
    /// ISO-8601 timestamp of when playback started.
    pub played_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub album: Option<Album>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
}

/// Response of `GET /me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
}

/// A played track in the form Last.fm expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listen {
    pub name: String,
    /// Credited artists in order; the first one is submitted.
    pub artists: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// POSIX seconds, UTC.
    pub played_at: i64,
}

#[derive(Tabled)]
pub struct ListenTableRow {
    pub played_at: String,
    pub artist: String,
    pub name: String,
    pub album: String,
}
