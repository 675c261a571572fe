//! Configuration errors raised before any computation or network access.

use thiserror::Error;

/// A caller mistake in park or land selection.
///
/// Configuration errors are surfaced distinctly from upstream data errors:
/// they indicate a bad request, not an outage, and they fail fast before
/// any fetch is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The requested park key is not in the directory.
    #[error("unknown park '{park}'")]
    UnknownPark {
        /// Requested park key.
        park: String,
    },
    /// The requested land is not defined for the park.
    #[error("unknown land '{land}' for park '{park}'")]
    UnknownLand {
        /// Park the lookup ran against.
        park: String,
        /// Requested land slug.
        land: String,
    },
}
