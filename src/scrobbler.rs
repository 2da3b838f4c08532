//! The scrobble job: Spotify history in, Last.fm listens out.

use log::{debug, info};
use serde_json::Value;

use crate::{
    credentials::{Credentials, SpotifyCredentials},
    error::Res,
    lastfm::LastfmClient,
    spotify::SpotifyClient,
    types::{Listen, PlayHistory},
    utils,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScrobbleOptions {
    /// Look up the album of tracks whose history entry has none.
    pub enrich_albums: bool,
}

/// Result of [`scrobble_credentials`]; the credentials stay with the caller.
#[derive(Debug, Clone)]
pub struct Submission {
    /// The stored Spotify tokens changed during the run.
    pub refreshed: bool,
    pub listens: Vec<Listen>,
    pub response: Value,
}

/// Everything a caller needs after a run.
#[derive(Debug, Clone)]
pub struct ScrobbleOutcome {
    /// Credentials to store; tokens may have been refreshed.
    pub credentials: Credentials,
    /// The stored Spotify tokens changed during the run.
    pub refreshed: bool,
    /// The listens that were submitted, in submission order.
    pub listens: Vec<Listen>,
    /// Last.fm's response to the submission.
    pub response: Value,
}

/// Converts one recently-played entry to a [`Listen`].
pub fn convert_to_lastfm(item: &PlayHistory) -> Res<Listen> {
    let track = &item.track;
    Ok(Listen {
        name: track.name.clone(),
        artists: track.artists.iter().map(|a| a.name.clone()).collect(),
        album: track.album.as_ref().map(|a| a.name.clone()),
        played_at: utils::to_posix_timestamp(&item.played_at)?,
    })
}

/// Fills in missing album names by fetching each track from Spotify.
///
/// Returns whether the stored tokens changed while fetching.
pub fn add_album_to_tracks(
    spotify: &SpotifyClient,
    credentials: &mut SpotifyCredentials,
    items: &mut [PlayHistory],
) -> Res<bool> {
    let mut refreshed = false;

    for item in items.iter_mut().filter(|item| item.track.album.is_none()) {
        let Some(track_id) = item.track.id.clone() else {
            debug!("'{}' has no track id, leaving album empty", item.track.name);
            continue;
        };

        let track = spotify.get_track(&track_id, credentials)?;
        refreshed |= track.refreshed;
        item.track.album = track.value.album;
    }

    Ok(refreshed)
}

/// Scrobbles the 50 most recently played Spotify tracks to Last.fm.
///
/// `document` is the stored credential document. Nothing is persisted here:
/// the returned [`ScrobbleOutcome`] carries the possibly refreshed credentials
/// and the caller decides what to do with them.
///
/// Tokens refreshed before a later step fails are lost with this entry
/// point. Callers that must keep them use [`scrobble_credentials`].
pub fn scrobble(
    document: &Value,
    spotify: &SpotifyClient,
    lastfm: &LastfmClient,
    options: ScrobbleOptions,
) -> Res<ScrobbleOutcome> {
    let mut credentials = Credentials::from_document(document)?;
    let submission = scrobble_credentials(&mut credentials, spotify, lastfm, options)?;

    Ok(ScrobbleOutcome {
        credentials,
        refreshed: submission.refreshed,
        listens: submission.listens,
        response: submission.response,
    })
}

/// Runs the scrobble job against credentials owned by the caller.
///
/// Spotify tokens are patched in `credentials` as soon as a refresh
/// succeeds, so they stay available to the caller even when a later step
/// (album lookup, timestamp conversion, the Last.fm submission) fails.
///
/// # Errors
///
/// Any failure of either service, a malformed payload or an unparseable
/// `played_at` aborts the run. `credentials` may have changed regardless.
pub fn scrobble_credentials(
    credentials: &mut Credentials,
    spotify: &SpotifyClient,
    lastfm: &LastfmClient,
    options: ScrobbleOptions,
) -> Res<Submission> {
    credentials.lastfm()?;
    let spotify_credentials = credentials.spotify_mut()?;

    let recent = spotify.recently_played_tracks(spotify_credentials)?;
    let mut refreshed = recent.refreshed;
    let mut items = recent.value.items;

    if options.enrich_albums {
        refreshed |= add_album_to_tracks(spotify, spotify_credentials, &mut items)?;
    }

    if refreshed {
        info!("Spotify credentials changed during the run");
    }

    let listens = items
        .iter()
        .map(convert_to_lastfm)
        .collect::<Res<Vec<_>>>()?;

    let response = lastfm.scrobble(credentials.lastfm()?, &listens)?;
    info!("submitted {} listens to Last.fm", listens.len());

    Ok(Submission {
        refreshed,
        listens,
        response,
    })
}

impl ScrobbleOutcome {
    /// The credential document to persist, if it needs persisting.
    pub fn updated_document(&self) -> Option<Value> {
        self.refreshed.then(|| self.credentials.to_document())
    }
}
