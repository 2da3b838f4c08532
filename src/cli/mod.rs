//! # CLI Module
//!
//! Commands behind the `spotify-scrobbler` binary. The binary is a thin
//! caller of the library: it owns the credential file, runs the job and
//! reports the outcome.
//!
//! ## Commands
//!
//! - [`scrobble`] - Submits the recently played Spotify tracks to Last.fm and
//!   stores refreshed tokens afterwards
//! - [`show`] - Prints the stored credentials with secrets masked
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotify-scrobbler scrobble                      # run once, e.g. from cron
//! spotify-scrobbler scrobble --albums             # look up missing album names
//! spotify-scrobbler show --credentials ./creds.json
//! ```
//!
//! Fatal problems are printed with the `error!` macro, which exits with
//! status 1 so schedulers notice the failed run.

mod scrobble;
mod show;

pub use scrobble::scrobble;
pub use show::show;
