//! Error types shared by every part of the scrobbler.
//!
//! All fallible operations in the library return [`Res`], whose error side is
//! [`ScrobblerError`]. The variants follow the failure classes of the job:
//! configuration problems are fatal at load time, remote failures carry the
//! status code and body for diagnosis, and malformed payloads are reported
//! with the key or schema problem that was hit.

use thiserror::Error;

/// Which remote service produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Spotify,
    Lastfm,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Service::Spotify => write!(f, "Spotify"),
            Service::Lastfm => write!(f, "Last.fm"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ScrobblerError {
    /// A required credential field or setting is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A remote service answered with a non-success status.
    #[error("got status code {status} from {service}: {body}")]
    Status {
        service: Service,
        status: u16,
        body: String,
    },

    /// The access token was still rejected after one refresh.
    #[error("Spotify rejected the refreshed access token")]
    Unauthorized,

    /// Last.fm accepted the request but returned an error document.
    #[error("Last.fm API error ({code}): {message}")]
    Lastfm { code: i64, message: String },

    /// A response did not contain what was expected.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid timestamp '{0}'")]
    Timestamp(String),

    /// Connection, TLS or timeout failure below the HTTP layer.
    #[error("http transport error: {0}")]
    Transport(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ScrobblerError {
    fn from(e: reqwest::Error) -> Self {
        ScrobblerError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ScrobblerError {
    fn from(e: serde_json::Error) -> Self {
        ScrobblerError::MalformedResponse(e.to_string())
    }
}

/// A convenient Result type alias for operations that may fail.
pub type Res<T> = std::result::Result<T, ScrobblerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_reports_code_and_body() {
        let err = ScrobblerError::Status {
            service: Service::Spotify,
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "got status code 500 from Spotify: boom");
    }

    #[test]
    fn json_errors_become_malformed_response() {
        let err: ScrobblerError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ScrobblerError::MalformedResponse(_)));
    }
}
