#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use serde_json::{Value, json};
use spotify_scrobbler::{
    Res,
    config::{LastfmSettings, SpotifySettings},
    http::{HttpRequest, HttpResponse, Transport},
    lastfm::LastfmClient,
    spotify::SpotifyClient,
};

pub const API_URL: &str = "https://api.test/v1";
pub const TOKEN_URL: &str = "https://accounts.test/api/token";
pub const LASTFM_URL: &str = "https://lastfm.test/2.0/";

/// Replays canned responses in order and records every request.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    responses: Rc<RefCell<VecDeque<HttpResponse>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: Rc::new(RefCell::new(responses.into())),
            requests: Rc::default(),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: HttpRequest) -> Res<HttpResponse> {
        let url = request.url.clone();
        self.requests.borrow_mut().push(request);
        let next = self.responses.borrow_mut().pop_front();
        match next {
            Some(response) => Ok(response),
            None => panic!("no scripted response left for {url}"),
        }
    }
}

pub fn ok(body: Value) -> HttpResponse {
    HttpResponse::new(200, body.to_string())
}

pub fn status(code: u16, body: &str) -> HttpResponse {
    HttpResponse::new(code, body)
}

pub fn spotify_settings() -> SpotifySettings {
    let mut settings = SpotifySettings::new("client", "secret");
    settings.api_url = API_URL.to_string();
    settings.token_url = TOKEN_URL.to_string();
    settings
}

pub fn lastfm_settings() -> LastfmSettings {
    let mut settings = LastfmSettings::new("api-key", "api-secret");
    settings.api_url = LASTFM_URL.to_string();
    settings
}

pub fn spotify_client(transport: &ScriptedTransport) -> SpotifyClient {
    SpotifyClient::new(spotify_settings(), Box::new(transport.clone()))
}

pub fn lastfm_client(transport: &ScriptedTransport) -> LastfmClient {
    LastfmClient::new(lastfm_settings(), Box::new(transport.clone()))
}

pub fn credentials_document() -> Value {
    json!({
        "lastfm": {"session_key": "session"},
        "spotify": {
            "access_token": "old-access",
            "token_type": "Bearer",
            "refresh_token": "old-refresh",
            "scope": "user-read-recently-played"
        }
    })
}

pub fn recently_played(items: Vec<Value>) -> Value {
    json!({ "items": items, "limit": 50 })
}

pub fn play(id: &str, name: &str, artists: &[&str], played_at: &str) -> Value {
    json!({
        "track": {
            "id": id,
            "name": name,
            "artists": artists.iter().map(|a| json!({"name": a})).collect::<Vec<_>>(),
        },
        "played_at": played_at
    })
}

pub fn lastfm_accepted(count: usize) -> Value {
    json!({
        "scrobbles": {
            "@attr": {"accepted": count, "ignored": 0}
        }
    })
}
