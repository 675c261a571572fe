//! The engine's seam to the park data network feeds.
//!
//! The trait is synchronous to keep the core embeddable anywhere;
//! implementations bridge to async HTTP internally. The two per-request
//! feeds (static catalogue and live status) are fetched together: a
//! mismatched join between entities and live data is worse than no result,
//! so [`ParkDataProvider::fetch_park_data`] either yields both or fails as
//! one aggregate error.

use thiserror::Error;

use crate::entity::AttractionEntity;
use crate::live::LiveStatusEntry;
use crate::park::ParkConfig;
use crate::schedule::ScheduleWindow;

/// Both per-request feeds, fetched together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParkData {
    /// Static catalogue entries.
    pub entities: Vec<AttractionEntity>,
    /// Live status entries keyed by the same ids.
    pub live_entries: Vec<LiveStatusEntry>,
}

/// Errors from a park data provider.
///
/// Variants carry the request URL so diagnostics can be logged in detail
/// while callers surface a generic "recommendation data unavailable"
/// failure to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParkDataError {
    /// The request could not be completed.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport-level diagnostic.
        message: String,
    },
    /// The service answered with a non-success status.
    #[error("request to {url} returned HTTP {status}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The response body did not match the expected shape.
    #[error("failed to decode response from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder diagnostic.
        message: String,
    },
}

/// Fetch park feeds for one request.
///
/// Implementations must treat the catalogue and live fetches as a single
/// unit of work: issue them concurrently (they have no ordering dependency)
/// and report any failure of either as one error, never a partial result.
/// Retry, backoff, and caching policies belong to implementations, not to
/// the engine.
pub trait ParkDataProvider: Send + Sync {
    /// Fetch the static catalogue and the live feed together.
    ///
    /// # Errors
    /// Returns [`ParkDataError`] when either feed cannot be fetched or
    /// decoded; no partial data is ever returned.
    fn fetch_park_data(&self, park: &ParkConfig) -> Result<ParkData, ParkDataError>;

    /// Fetch today's schedule windows, filtered to the park's own "today".
    ///
    /// # Errors
    /// Returns [`ParkDataError`] when the schedule feed cannot be fetched
    /// or decoded. An empty window list is a valid result (the resolver
    /// reports the park state as unknown).
    fn fetch_today_schedule(&self, park: &ParkConfig) -> Result<Vec<ScheduleWindow>, ParkDataError>;
}
