use std::{path::PathBuf, time::Duration};

use chrono::DateTime;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Settings,
    credentials::Credentials,
    error, info,
    http::HttpTransport,
    lastfm::LastfmClient,
    management::CredentialStore,
    scrobbler::{self, ScrobbleOptions},
    spotify::SpotifyClient,
    success,
    types::{Listen, ListenTableRow},
    warning,
};

/// Runs one scrobble job against the stored credentials.
///
/// The credential file is rewritten only when Spotify tokens changed during
/// the run, including runs that fail after the refresh.
pub fn scrobble(settings: Settings, credentials: Option<PathBuf>, albums: bool) {
    let path = credentials.unwrap_or_else(|| settings.credentials_file.clone());
    let mut store = match CredentialStore::load(&path) {
        Ok(store) => store,
        Err(e) => error!("{}", e),
    };
    let stored = match Credentials::from_document(store.document()) {
        Ok(creds) => creds,
        Err(e) => error!("Stored credentials are incomplete. Err: {}", e),
    };
    let mut creds = stored.clone();

    let transport = match HttpTransport::new(settings.http_timeout) {
        Ok(t) => t,
        Err(e) => error!("Cannot build HTTP client. Err: {}", e),
    };
    let spotify = SpotifyClient::new(settings.spotify, Box::new(transport.clone()));
    let lastfm = LastfmClient::new(settings.lastfm, Box::new(transport));

    let pb = ProgressBar::new_spinner();
    pb.set_message("Scrobbling recently played tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let options = ScrobbleOptions {
        enrich_albums: albums,
    };
    let result = scrobbler::scrobble_credentials(&mut creds, &spotify, &lastfm, options);
    pb.finish_and_clear();

    // Tokens refreshed before a failure still have to be stored.
    if creds != stored {
        match store.persist(creds.to_document()) {
            Ok(()) => info!("Updated credentials in {}", store.path().display()),
            Err(e) => warning!("Refreshed credentials could not be stored. Err: {}", e),
        }
    }

    let submission = match result {
        Ok(submission) => submission,
        Err(e) => error!("Scrobbling failed. Err: {}", e),
    };

    if submission.listens.is_empty() {
        success!("Nothing played recently.");
        return;
    }

    println!("{}", Table::new(table_rows(&submission.listens)));
    success!("Scrobbled {} tracks!", submission.listens.len());
}

fn table_rows(listens: &[Listen]) -> Vec<ListenTableRow> {
    listens
        .iter()
        .map(|l| ListenTableRow {
            played_at: DateTime::from_timestamp(l.played_at, 0)
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| l.played_at.to_string()),
            artist: l.artists.first().cloned().unwrap_or_default(),
            name: l.name.clone(),
            album: l.album.clone().unwrap_or_default(),
        })
        .collect()
}
