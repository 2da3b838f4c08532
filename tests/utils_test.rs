use spotify_scrobbler::ScrobblerError;
use spotify_scrobbler::utils::*;

#[test]
fn test_to_posix_timestamp_utc() {
    assert_eq!(to_posix_timestamp("2021-01-01T00:00:00Z").unwrap(), 1609459200);
    assert_eq!(to_posix_timestamp("1970-01-01T00:00:00Z").unwrap(), 0);
}

#[test]
fn test_to_posix_timestamp_truncates_fractional_seconds() {
    // Spotify reports played_at with milliseconds
    assert_eq!(
        to_posix_timestamp("2021-01-01T00:00:00.999Z").unwrap(),
        1609459200
    );
    assert_eq!(
        to_posix_timestamp("2024-03-10T17:45:12.123456Z").unwrap(),
        to_posix_timestamp("2024-03-10T17:45:12Z").unwrap()
    );
}

#[test]
fn test_to_posix_timestamp_honours_offset() {
    // 02:00 at +02:00 is midnight UTC
    assert_eq!(
        to_posix_timestamp("2021-01-01T02:00:00+02:00").unwrap(),
        1609459200
    );
    assert_eq!(
        to_posix_timestamp("2020-12-31T19:00:00-05:00").unwrap(),
        1609459200
    );
}

#[test]
fn test_to_posix_timestamp_naive_is_utc() {
    assert_eq!(to_posix_timestamp("2021-01-01T00:00:00").unwrap(), 1609459200);
    assert_eq!(to_posix_timestamp("2021-01-01 00:00:00.5").unwrap(), 1609459200);
}

#[test]
fn test_to_posix_timestamp_date_only_is_midnight_utc() {
    assert_eq!(to_posix_timestamp("2021-01-01").unwrap(), 1609459200);
    assert_eq!(to_posix_timestamp("1970-01-02").unwrap(), 86400);
}

#[test]
fn test_to_posix_timestamp_trims_whitespace() {
    assert_eq!(
        to_posix_timestamp("  2021-01-01T00:00:00Z\n").unwrap(),
        1609459200
    );
}

#[test]
fn test_to_posix_timestamp_invalid() {
    for input in ["", "yesterday", "2021-13-01T00:00:00Z", "2021-02-30", "01/01/2021"] {
        match to_posix_timestamp(input) {
            Err(ScrobblerError::Timestamp(_)) => {}
            other => panic!("expected timestamp error for {input:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_generate_state() {
    let first = generate_state();
    let second = generate_state();

    assert_eq!(first.len(), 32);
    assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(first, second);
}

#[test]
fn test_mask_secret() {
    assert_eq!(mask_secret("abcdefgh"), "****efgh");
    assert_eq!(mask_secret("abcde"), "*bcde");
    assert_eq!(mask_secret("abcd"), "****");
    assert_eq!(mask_secret("ab"), "**");
    assert_eq!(mask_secret(""), "");
}

#[test]
fn test_mask_secret_counts_characters_not_bytes() {
    assert_eq!(mask_secret("äöüßxyz1"), "****xyz1");
}
