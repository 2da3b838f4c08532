mod common;

use common::*;
use serde_json::json;
use spotify_scrobbler::{
    ScrobblerError,
    credentials::LastfmCredentials,
    error::Service,
    http::{HttpRequest, Method},
    types::Listen,
};

fn session() -> LastfmCredentials {
    LastfmCredentials {
        session_key: "session".to_string(),
    }
}

fn listen(name: &str, artists: &[&str], album: Option<&str>, played_at: i64) -> Listen {
    Listen {
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        album: album.map(str::to_string),
        played_at,
    }
}

fn field_names(request: &HttpRequest) -> Vec<&str> {
    request.form.iter().map(|(k, _)| k.as_str()).collect()
}

#[test]
fn test_empty_batch_is_still_sent() {
    let transport = ScriptedTransport::new(vec![ok(lastfm_accepted(0))]);
    let client = lastfm_client(&transport);

    let response = client.scrobble(&session(), &[]).unwrap();
    assert_eq!(response, lastfm_accepted(0));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, LASTFM_URL);

    let mut names = field_names(request);
    names.sort_unstable();
    assert_eq!(names, vec!["api_key", "api_sig", "format", "method", "sk"]);
    assert_eq!(request.form_value("api_key"), Some("api-key"));
    assert_eq!(request.form_value("method"), Some("track.scrobble"));
    assert_eq!(request.form_value("sk"), Some("session"));
    assert_eq!(request.form_value("format"), Some("json"));
}

#[test]
fn test_listens_are_indexed_in_order() {
    let transport = ScriptedTransport::new(vec![ok(lastfm_accepted(2))]);
    let client = lastfm_client(&transport);
    let listens = [
        listen("First Song", &["Lead", "Feature"], Some("Record"), 1609459200),
        listen("Second Song", &["Other"], None, 1609459500),
    ];

    client.scrobble(&session(), &listens).unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.form_value("track[0]"), Some("First Song"));
    assert_eq!(request.form_value("artist[0]"), Some("Lead"));
    assert_eq!(request.form_value("timestamp[0]"), Some("1609459200"));
    assert_eq!(request.form_value("album[0]"), Some("Record"));

    assert_eq!(request.form_value("track[1]"), Some("Second Song"));
    assert_eq!(request.form_value("artist[1]"), Some("Other"));
    assert_eq!(request.form_value("timestamp[1]"), Some("1609459500"));
    assert_eq!(request.form_value("album[1]"), None);
}

#[test]
fn test_signature_covers_everything_but_format() {
    let transport = ScriptedTransport::new(vec![ok(lastfm_accepted(1))]);
    let client = lastfm_client(&transport);
    let listens = [listen("Song", &["Artist"], Some("Record"), 1609459200)];

    client.scrobble(&session(), &listens).unwrap();

    let request = &transport.requests()[0];
    let signed = request
        .form
        .iter()
        .filter(|(k, _)| k != "api_sig" && k != "format")
        .map(|(k, v)| (k.as_str(), v.as_str()));

    assert_eq!(request.form_value("api_sig"), Some(client.sign(signed).as_str()));
}

#[test]
fn test_signature_follows_documented_scheme() {
    let transport = ScriptedTransport::new(vec![]);
    let client = lastfm_client(&transport);

    // sorted: api_key, method, sk; then the secret
    let base = "api_keyapi-keymethodtrack.scrobblesksessionapi-secret";
    let expected = format!("{:x}", md5::compute(base));

    let sig = client.sign([
        ("sk", "session"),
        ("method", "track.scrobble"),
        ("api_key", "api-key"),
    ]);
    assert_eq!(sig, expected);
}

#[test]
fn test_error_document_is_reported() {
    let transport = ScriptedTransport::new(vec![ok(json!({
        "error": 9,
        "message": "Invalid session key - Please re-authenticate"
    }))]);
    let client = lastfm_client(&transport);

    match client.scrobble(&session(), &[]) {
        Err(ScrobblerError::Lastfm { code, message }) => {
            assert_eq!(code, 9);
            assert!(message.contains("Invalid session key"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_failure_status_is_reported() {
    let transport = ScriptedTransport::new(vec![status(503, "try later")]);
    let client = lastfm_client(&transport);

    match client.scrobble(&session(), &[]) {
        Err(ScrobblerError::Status {
            service, status, ..
        }) => {
            assert_eq!(service, Service::Lastfm);
            assert_eq!(status, 503);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_listen_without_artist_is_rejected_before_sending() {
    let transport = ScriptedTransport::new(vec![]);
    let client = lastfm_client(&transport);
    let listens = [listen("Nobody's Song", &[], None, 0)];

    assert!(matches!(
        client.scrobble(&session(), &listens),
        Err(ScrobblerError::MalformedResponse(_))
    ));
    assert!(transport.requests().is_empty());
}
