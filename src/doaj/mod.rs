//! DOAJ search API client.
//!
//! One ISSN in, a tri-state [`LookupResult`] out. The client throttles
//! itself with a fixed sleep before every outbound call - the DOAJ is
//! shared infrastructure and the delay applies regardless of how long the
//! previous call took.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use issnaudit::doaj::{DoajClient, DoajLookup, LookupResult};
//! use issnaudit::issn::Issn;
//!
//! let client = DoajClient::new();
//! let issn = Issn::parse("2167-8359").unwrap();
//! match client.lookup(&issn).await {
//!     LookupResult::Found => println!("indexed"),
//!     LookupResult::NotFound => println!("not indexed"),
//!     LookupResult::Failed => println!("could not determine"),
//! }
//! ```

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

use crate::issn::Issn;

/// Default DOAJ journal search endpoint.
pub const DOAJ_SEARCH_URL: &str = "https://doaj.org/api/v1/search/journals/";

/// Response header carrying the total number of matches for a search.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Default minimum delay between outbound calls.
pub const DEFAULT_CALL_INTERVAL: Duration = Duration::from_millis(100);

/// Outcome of checking one ISSN against the registry.
///
/// Lookups never return an error: anything that prevents a determination
/// (non-success status, transport failure, missing count header) is
/// `Failed`, and the caller decides how to aggregate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LookupResult {
    /// The registry reports at least one match.
    Found,
    /// The registry reports zero matches.
    NotFound,
    /// No determination could be made.
    Failed,
}

/// Client configuration.
///
/// Passed at construction instead of living in module globals, so tests
/// and callers can point the client elsewhere or tighten the throttle.
#[derive(Debug, Clone)]
pub struct DoajConfig {
    /// Search endpoint base URL; the query `issn:<value>` is appended.
    pub base_url: String,
    /// Minimum delay enforced before every outbound call.
    pub min_call_interval: Duration,
}

impl Default for DoajConfig {
    fn default() -> Self {
        Self {
            base_url: DOAJ_SEARCH_URL.to_string(),
            min_call_interval: DEFAULT_CALL_INTERVAL,
        }
    }
}

/// Anything that can resolve an ISSN against the registry.
///
/// The reporter is generic over this, so tests drive it with a stub
/// instead of the network.
#[allow(async_fn_in_trait)]
pub trait DoajLookup {
    /// Resolve one ISSN to a tri-state outcome.
    async fn lookup(&self, issn: &Issn) -> LookupResult;
}

/// HTTP client for the DOAJ search API.
#[derive(Debug, Clone)]
pub struct DoajClient {
    http: reqwest::Client,
    config: DoajConfig,
}

impl DoajClient {
    /// Create a client with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DoajConfig::default())
    }

    /// Create a client with explicit configuration.
    pub fn with_config(config: DoajConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Set the search endpoint base URL.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.to_string();
        self
    }

    /// Set the minimum delay between calls.
    pub fn with_call_interval(mut self, interval: Duration) -> Self {
        self.config.min_call_interval = interval;
        self
    }
}

impl Default for DoajClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DoajLookup for DoajClient {
    async fn lookup(&self, issn: &Issn) -> LookupResult {
        // Hold your horses: throttle every call, unconditionally.
        tokio::time::sleep(self.config.min_call_interval).await;

        let url = format!("{}issn:{}", self.config.base_url, issn);
        match self.http.get(&url).send().await {
            Ok(resp) => classify(resp.status(), total_count(resp.headers())),
            Err(_) => LookupResult::Failed,
        }
    }
}

/// Extract the total-count header as a raw string, if present and readable.
fn total_count(headers: &HeaderMap) -> Option<&str> {
    headers.get(TOTAL_COUNT_HEADER).and_then(|v| v.to_str().ok())
}

/// Map a response status and total-count header onto a lookup outcome.
///
/// The API contract says the count header accompanies every success
/// response; a 200 without a parseable count is classified as `Failed`
/// rather than trusted or crashed on.
pub fn classify(status: StatusCode, total_count: Option<&str>) -> LookupResult {
    if !status.is_success() {
        return LookupResult::Failed;
    }
    match total_count.and_then(|v| v.trim().parse::<u64>().ok()) {
        Some(n) if n >= 1 => LookupResult::Found,
        Some(_) => LookupResult::NotFound,
        None => LookupResult::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_matches_is_found() {
        assert_eq!(classify(StatusCode::OK, Some("1")), LookupResult::Found);
        assert_eq!(classify(StatusCode::OK, Some("37")), LookupResult::Found);
    }

    #[test]
    fn test_success_with_zero_is_not_found() {
        assert_eq!(classify(StatusCode::OK, Some("0")), LookupResult::NotFound);
    }

    #[test]
    fn test_non_success_is_failed() {
        assert_eq!(
            classify(StatusCode::INTERNAL_SERVER_ERROR, Some("1")),
            LookupResult::Failed
        );
        assert_eq!(classify(StatusCode::NOT_FOUND, None), LookupResult::Failed);
        assert_eq!(
            classify(StatusCode::TOO_MANY_REQUESTS, Some("0")),
            LookupResult::Failed
        );
    }

    #[test]
    fn test_missing_count_header_is_failed() {
        assert_eq!(classify(StatusCode::OK, None), LookupResult::Failed);
    }

    #[test]
    fn test_unparseable_count_header_is_failed() {
        assert_eq!(
            classify(StatusCode::OK, Some("many")),
            LookupResult::Failed
        );
        assert_eq!(classify(StatusCode::OK, Some("")), LookupResult::Failed);
        assert_eq!(classify(StatusCode::OK, Some("-1")), LookupResult::Failed);
    }

    #[test]
    fn test_count_header_tolerates_whitespace() {
        assert_eq!(classify(StatusCode::OK, Some(" 2 ")), LookupResult::Found);
    }

    #[test]
    fn test_builder_configuration() {
        let client = DoajClient::new()
            .with_base_url("http://localhost:8080/search/")
            .with_call_interval(Duration::from_millis(0));
        assert_eq!(client.config.base_url, "http://localhost:8080/search/");
        assert_eq!(client.config.min_call_interval, Duration::ZERO);
    }
}
