//! Calls against the Spotify accounts service.
//!
//! Only [`SpotifyClient::refresh_access_token`] is needed by the scrobble job.
//! The authorization-code helpers exist for whoever performs the initial
//! handshake and then stores the resulting credentials.

use base64::{Engine, engine::general_purpose::STANDARD};
use log::info;
use reqwest::Url;

use super::SpotifyClient;
use crate::{
    credentials::{SpotifyCredentials, TokenPatch},
    error::{Res, ScrobblerError, Service},
    http::{HttpRequest, HttpResponse},
    utils,
};

/// Scope requested during authorization.
pub const AUTH_SCOPE: &str = "user-read-recently-played";

impl SpotifyClient {
    /// `Basic` header value built from `client_id:client_secret`.
    pub fn basic_authorization(&self) -> String {
        let pair = format!(
            "{}:{}",
            self.settings.client_id, self.settings.client_secret
        );
        format!("Basic {}", STANDARD.encode(pair))
    }

    /// Exchanges a refresh token for new tokens.
    ///
    /// The response is reduced to the fields that may replace stored ones;
    /// Spotify does not always rotate the refresh token.
    pub fn refresh_access_token(&self, refresh_token: &str) -> Res<TokenPatch> {
        let request = HttpRequest::post(&self.settings.token_url)
            .header("Authorization", self.basic_authorization())
            .form([
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ]);

        let response = token_response(self.transport.send(request)?)?;
        let patch: TokenPatch = response.json()?;
        if patch.access_token.is_none() {
            return Err(ScrobblerError::MalformedResponse(
                "token response has no access_token".to_string(),
            ));
        }

        info!("Spotify access token refreshed");
        Ok(patch)
    }

    /// Builds the URL the user has to visit to authorize this app.
    ///
    /// Returns the URL together with the generated `state` value, which the
    /// redirect must echo back.
    pub fn authorization_url(&self, redirect_uri: &str) -> Res<(String, String)> {
        let state = utils::generate_state();
        let url = Url::parse_with_params(
            &self.settings.auth_url,
            &[
                ("client_id", self.settings.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", redirect_uri),
                ("scope", AUTH_SCOPE),
                ("state", state.as_str()),
            ],
        )
        .map_err(|e| ScrobblerError::Config(format!("invalid Spotify auth URL: {e}")))?;

        Ok((url.to_string(), state))
    }

    /// Exchanges an authorization code for a full set of credentials.
    pub fn request_access_token(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Res<SpotifyCredentials> {
        let request = HttpRequest::post(&self.settings.token_url).form([
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
        ]);

        token_response(self.transport.send(request)?)?.json()
    }
}

fn token_response(response: HttpResponse) -> Res<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ScrobblerError::Status {
            service: Service::Spotify,
            status: response.status,
            body: response.body,
        })
    }
}
