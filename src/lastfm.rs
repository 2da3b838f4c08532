//! Last.fm scrobbling client.
//!
//! Write calls to the Last.fm API must be signed: every request parameter
//! except `format` and `api_sig` is sorted by name, concatenated as
//! `name + value`, suffixed with the shared secret and hashed with MD5.
//! See <https://www.last.fm/api/webauth>.

use std::collections::BTreeMap;

use log::debug;
use serde_json::Value;

use crate::{
    config::LastfmSettings,
    credentials::LastfmCredentials,
    error::{Res, ScrobblerError, Service},
    http::{HttpRequest, Transport},
    types::Listen,
};

pub const SCROBBLE_METHOD: &str = "track.scrobble";

/// Client for Last.fm's write API, signed with the application's secret.
#[derive(Debug)]
pub struct LastfmClient {
    settings: LastfmSettings,
    transport: Box<dyn Transport>,
}

impl LastfmClient {
    /// Creates a client that signs with `settings.api_secret` and sends its
    /// requests through `transport`.
    ///
    /// # Arguments
    ///
    /// * `settings` - API key, shared secret and endpoint URL
    /// * `transport` - Where requests go; the reqwest client in production
    pub fn new(settings: LastfmSettings, transport: Box<dyn Transport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Signature over `parameters`, as lowercase hex MD5.
    ///
    /// The input order does not matter; parameters are always signed sorted
    /// by name.
    pub fn sign<'a, I>(&self, parameters: I) -> String
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let sorted: BTreeMap<&str, &str> = parameters.into_iter().collect();

        let mut signature_base = String::new();
        for (key, value) in sorted {
            signature_base.push_str(key);
            signature_base.push_str(value);
        }
        signature_base.push_str(&self.settings.api_secret);

        format!("{:x}", md5::compute(signature_base.as_bytes()))
    }

    /// Submits `listens` as one signed batch and returns Last.fm's response.
    ///
    /// Listens keep their order; the `i`-th listen is sent as `track[i]`,
    /// `artist[i]` (its first artist), `timestamp[i]` and, when known,
    /// `album[i]`. An empty batch is still sent.
    pub fn scrobble(&self, credentials: &LastfmCredentials, listens: &[Listen]) -> Res<Value> {
        let mut payload: Vec<(String, String)> = vec![
            ("api_key".to_string(), self.settings.api_key.clone()),
            ("method".to_string(), SCROBBLE_METHOD.to_string()),
            ("sk".to_string(), credentials.session_key.clone()),
        ];

        for (i, listen) in listens.iter().enumerate() {
            let artist = listen.artists.first().ok_or_else(|| {
                ScrobblerError::MalformedResponse(format!("track '{}' has no artist", listen.name))
            })?;

            payload.push((format!("track[{i}]"), listen.name.clone()));
            payload.push((format!("artist[{i}]"), artist.clone()));
            payload.push((format!("timestamp[{i}]"), listen.played_at.to_string()));
            if let Some(album) = &listen.album {
                payload.push((format!("album[{i}]"), album.clone()));
            }
        }

        let api_sig = self.sign(payload.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        payload.push(("api_sig".to_string(), api_sig));
        payload.push(("format".to_string(), "json".to_string()));

        debug!("scrobbling {} listens", listens.len());
        let request = HttpRequest::post(&self.settings.api_url).form(payload);
        let response = self.transport.send(request)?;

        if !response.is_success() {
            return Err(ScrobblerError::Status {
                service: Service::Lastfm,
                status: response.status,
                body: response.body,
            });
        }

        let body: Value = response.json()?;
        if let Some(code) = body.get("error").and_then(Value::as_i64) {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(ScrobblerError::Lastfm { code, message });
        }

        Ok(body)
    }
}
