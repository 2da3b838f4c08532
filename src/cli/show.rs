use std::path::PathBuf;

use crate::{
    config::Settings, credentials::Credentials, error, info, management::CredentialStore,
    utils::mask_secret,
};

/// Prints the stored credentials with every secret masked.
pub fn show(settings: Settings, credentials: Option<PathBuf>) {
    let path = credentials.unwrap_or(settings.credentials_file);
    let store = match CredentialStore::load(&path) {
        Ok(store) => store,
        Err(e) => error!("{}", e),
    };

    let creds = match Credentials::from_document(store.document()) {
        Ok(creds) => creds,
        Err(e) => error!("Stored credentials are incomplete. Err: {}", e),
    };

    info!("Credentials file: {}", store.path().display());
    if let Some(lastfm) = &creds.lastfm {
        info!("Last.fm session key: {}", mask_secret(&lastfm.session_key));
    }
    if let Some(spotify) = &creds.spotify {
        info!("Spotify token type: {}", spotify.token_type);
        info!("Spotify scope: {}", spotify.scope);
        info!("Spotify access token: {}", mask_secret(&spotify.access_token));
        info!("Spotify refresh token: {}", mask_secret(&spotify.refresh_token));
    }
}
