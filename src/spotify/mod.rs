//! # Spotify Integration Module
//!
//! Read-only client for the Spotify Web API. It fetches the listening history
//! that gets forwarded to Last.fm and keeps the user's OAuth tokens alive
//! while doing so.
//!
//! ## Token Lifecycle
//!
//! Every authenticated call sends `Authorization: <token_type> <access_token>`.
//! When Spotify answers `401 Unauthorized` the client exchanges the refresh
//! token at the token endpoint, patches the caller's
//! [`SpotifyCredentials`] in place and repeats the request once. A second
//! `401` is reported as [`ScrobblerError::Unauthorized`]; any other failure
//! status is reported as [`ScrobblerError::Status`] without a refresh.
//!
//! Whether the refresh changed the tokens is returned in
//! [`Authorized::refreshed`] so the caller knows the credentials need to be
//! stored again.
//!
//! ## API Coverage
//!
//! - `GET /me/player/recently-played?limit=50` - [`SpotifyClient::recently_played_tracks`]
//! - `GET /tracks/{id}` - [`SpotifyClient::get_track`]
//! - `GET /me` - [`SpotifyClient::user_id`]
//! - `POST /api/token` - see [`auth`]

pub mod auth;

use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::{
    config::SpotifySettings,
    credentials::SpotifyCredentials,
    error::{Res, ScrobblerError, Service},
    http::{HttpRequest, Transport},
    types::{RecentlyPlayed, Track, UserProfile},
};

/// Page size of the recently-played request. Spotify's maximum.
pub const RECENTLY_PLAYED_LIMIT: u32 = 50;

/// Result of an authenticated call.
#[derive(Debug, Clone, PartialEq)]
pub struct Authorized<T> {
    pub value: T,
    /// The call refreshed the tokens and the stored ones changed.
    ///
    /// A refresh that hands back the tokens already held leaves this `false`.
    pub refreshed: bool,
}

impl<T> Authorized<T> {
    /// Transforms the value, keeping the refresh flag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Authorized<U> {
        Authorized {
            value: f(self.value),
            refreshed: self.refreshed,
        }
    }
}

/// Spotify Web API client for one application.
///
/// The client holds the application settings; user tokens are passed into
/// every call instead.
#[derive(Debug)]
pub struct SpotifyClient {
    settings: SpotifySettings,
    transport: Box<dyn Transport>,
}

impl SpotifyClient {
    /// Creates a client that sends its requests through `transport`.
    pub fn new(settings: SpotifySettings, transport: Box<dyn Transport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Fetches the user's 50 most recently played tracks.
    pub fn recently_played_tracks(
        &self,
        credentials: &mut SpotifyCredentials,
    ) -> Res<Authorized<RecentlyPlayed>> {
        let url = format!(
            "{api}/me/player/recently-played?limit={limit}",
            api = self.settings.api_url,
            limit = RECENTLY_PLAYED_LIMIT
        );
        self.get_json(credentials, &url)
    }

    /// Fetches catalog information for a single track.
    pub fn get_track(
        &self,
        track_id: &str,
        credentials: &mut SpotifyCredentials,
    ) -> Res<Authorized<Track>> {
        let url = format!("{api}/tracks/{track_id}", api = self.settings.api_url);
        self.get_json(credentials, &url)
    }

    /// Returns the Spotify user name the credentials belong to.
    pub fn user_id(&self, credentials: &mut SpotifyCredentials) -> Res<Authorized<String>> {
        let url = format!("{api}/me", api = self.settings.api_url);
        let profile: Authorized<UserProfile> = self.get_json(credentials, &url)?;
        Ok(profile.map(|p| p.id))
    }

    /// Authenticated GET with a single refresh-and-retry on `401`.
    fn get_json<T: DeserializeOwned>(
        &self,
        credentials: &mut SpotifyCredentials,
        url: &str,
    ) -> Res<Authorized<T>> {
        let mut retried = false;
        let mut refreshed = false;

        loop {
            let request = HttpRequest::get(url).header("Authorization", credentials.authorization());
            let response = self.transport.send(request)?;

            if response.is_success() {
                return Ok(Authorized {
                    value: response.json()?,
                    refreshed,
                });
            }

            if response.status == 401 {
                if retried {
                    return Err(ScrobblerError::Unauthorized);
                }

                warn!("Spotify access token expired, refreshing");
                let patch = self.refresh_access_token(&credentials.refresh_token)?;
                if credentials.update(patch) {
                    debug!("stored Spotify tokens were replaced");
                    refreshed = true;
                }
                retried = true;
                continue; // retry
            }

            return Err(ScrobblerError::Status {
                service: Service::Spotify,
                status: response.status,
                body: response.body,
            });
        }
    }
}
