//! HTTP implementation of the engine's park data seam.
//!
//! The [`ParkDataProvider`] trait is synchronous to keep the core library
//! embeddable in synchronous contexts; this provider bridges the async
//! HTTP calls onto a Tokio runtime it owns. The catalogue and live feeds
//! have no ordering dependency, so they are fetched concurrently, and a
//! failure of either aborts the pair: a mismatched join is worse than no
//! result.
//!
//! # Example
//!
//! ```no_run
//! use ridewise_core::{ParkDataProvider, ParkDirectory};
//! use ridewise_data::HttpParkDataProvider;
//!
//! let directory = ParkDirectory::builtin();
//! let park = directory.get("magic_kingdom")?;
//! let provider = HttpParkDataProvider::new()?;
//!
//! let data = provider.fetch_park_data(park)?;
//! assert_eq!(data.entities.is_empty(), data.live_entries.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::Runtime;

use ridewise_core::{ParkConfig, ParkData, ParkDataError, ParkDataProvider, ScheduleWindow};

use super::api::{ChildrenResponse, LiveResponse, ScheduleResponse};
use crate::runtime::{block_on, build_runtime};

/// Default base URL of the themeparks.wiki v1 API.
pub const DEFAULT_BASE_URL: &str = "https://api.themeparks.wiki/v1";

/// Default user agent for park data requests.
pub const DEFAULT_USER_AGENT: &str = "ridewise/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error type for [`HttpParkDataProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`HttpParkDataProvider`].
#[derive(Debug, Clone)]
pub struct HttpParkDataProviderConfig {
    /// Base URL for the API (e.g. `"https://api.themeparks.wiki/v1"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpParkDataProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpParkDataProviderConfig {
    /// Create a configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP-based park data provider for the themeparks.wiki API.
pub struct HttpParkDataProvider {
    client: Client,
    config: HttpParkDataProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpParkDataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpParkDataProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpParkDataProvider {
    /// Create a provider with the default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpParkDataProviderConfig::default())
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpParkDataProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = build_runtime().map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Build the URL for one of a park's entity feeds.
    fn feed_url(&self, park: &ParkConfig, feed: &str) -> String {
        format!(
            "{}/entity/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            park.entity_id,
            feed
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ParkDataError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        response.json().await.map_err(|err| ParkDataError::Decode {
            url: url.to_owned(),
            message: err.to_string(),
        })
    }

    /// Convert a reqwest error to a `ParkDataError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> ParkDataError {
        if error.is_timeout() {
            return ParkDataError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return ParkDataError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
            };
        }

        ParkDataError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    async fn fetch_park_data_async(&self, park: &ParkConfig) -> Result<ParkData, ParkDataError> {
        let children_url = self.feed_url(park, "children");
        let live_url = self.feed_url(park, "live");

        // Both feeds or neither: a partial join is unrepresentable here.
        let (children, live): (ChildrenResponse, LiveResponse) = tokio::try_join!(
            self.get_json(&children_url),
            self.get_json(&live_url)
        )?;

        Ok(ParkData {
            entities: children.into_entities(),
            live_entries: live.into_entries(),
        })
    }

    async fn fetch_schedule_async(
        &self,
        park: &ParkConfig,
    ) -> Result<Vec<ScheduleWindow>, ParkDataError> {
        let url = self.feed_url(park, "schedule");
        let response: ScheduleResponse = self.get_json(&url).await?;

        // "Today" is the park's calendar date, not the caller's.
        let today = Utc::now().with_timezone(&park.time_zone).date_naive();
        Ok(response.windows_for(today))
    }
}

impl ParkDataProvider for HttpParkDataProvider {
    fn fetch_park_data(&self, park: &ParkConfig) -> Result<ParkData, ParkDataError> {
        block_on(&self.runtime, self.fetch_park_data_async(park))
    }

    fn fetch_today_schedule(&self, park: &ParkConfig) -> Result<Vec<ScheduleWindow>, ParkDataError> {
        block_on(&self.runtime, self.fetch_schedule_async(park))
    }
}
