// Remote data access: the admissions feed and the Nominatim geocoder.

pub mod admissions;
pub mod nominatim;

pub use admissions::fetch_admissions;
pub use nominatim::{geocode, Place};

use reqwest::StatusCode;
use thiserror::Error;

/// Identifies this client to the services it calls. Nominatim's usage policy
/// requires a recognizable user agent.
pub const USER_AGENT: &str = concat!("antagning-tui/", env!("CARGO_PKG_VERSION"));

/// Failures surfaced by the fetchers. A geocode query with zero matches is
/// not a failure; that case is `Ok(None)` on [`geocode`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Build the shared HTTP client. No timeouts are configured; a hung request
/// is left to the caller's status reporting.
pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().user_agent(USER_AGENT).build()
}
