use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rand::{Rng, distr::Alphanumeric};

use crate::error::{Res, ScrobblerError};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Converts an ISO-8601 timestamp to POSIX seconds.
///
/// Timestamps with an offset (`Z`, `+02:00`) are converted honouring it;
/// timestamps without one are taken to be UTC. A bare date means midnight
/// UTC. Sub-second precision is truncated.
pub fn to_posix_timestamp(timestamp: &str) -> Res<i64> {
    let timestamp = timestamp.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Ok(dt.timestamp());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(timestamp, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().timestamp())
        .ok_or_else(|| ScrobblerError::Timestamp(timestamp.to_string()))
}

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Masks all but the last four characters of a secret for display.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }

    let visible: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), visible)
}
