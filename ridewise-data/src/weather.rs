//! Weather context from the US National Weather Service.
//!
//! The NWS API is a two-step lookup: `/points/{lat},{lon}` names the
//! forecast endpoint for a grid square, and the forecast's first period is
//! today's outlook. Weather is display context only; failures here never
//! fail a recommendation request, the caller logs and substitutes a
//! placeholder.

use std::time::Duration;

use geo::Coord;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::runtime::Runtime;

use crate::runtime::{block_on, build_runtime};
use crate::themeparks::ProviderBuildError;

/// Default base URL of the NWS API.
pub const DEFAULT_BASE_URL: &str = "https://api.weather.gov";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Today's forecast, reduced to what the response surface shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    /// Temperature in the reported unit.
    pub temperature: i32,
    /// Unit letter as reported, e.g. `F`.
    pub temperature_unit: String,
    /// Short human outlook, e.g. `Mostly Sunny`.
    pub short_forecast: String,
}

impl std::fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}°{}, {}",
            self.temperature, self.temperature_unit, self.short_forecast
        )
    }
}

/// Errors from a weather provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
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
    /// The response body did not match the expected shape.
    #[error("failed to decode response from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder diagnostic.
        message: String,
    },
    /// The forecast carried no periods.
    #[error("forecast response contained no periods")]
    MissingForecast,
}

/// Fetch today's forecast for a point.
pub trait WeatherProvider: Send + Sync {
    /// Fetch the forecast for a WGS84 point (`x` = longitude, `y` =
    /// latitude).
    ///
    /// # Errors
    /// Returns [`WeatherError`] when either lookup step fails; callers are
    /// expected to degrade gracefully.
    fn fetch_forecast(&self, point: Coord<f64>) -> Result<WeatherReport, WeatherError>;
}

/// Response of the `/points/{lat},{lon}` lookup.
#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    forecast: String,
}

/// Forecast response named by the points lookup.
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    #[serde(default)]
    periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastPeriod {
    temperature: i32,
    temperature_unit: String,
    short_forecast: String,
}

/// Configuration for [`NwsWeatherProvider`].
#[derive(Debug, Clone)]
pub struct NwsWeatherProviderConfig {
    /// Base URL for the NWS API.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string; NWS requires one identifying the caller.
    pub user_agent: String,
}

impl Default for NwsWeatherProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: crate::themeparks::DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl NwsWeatherProviderConfig {
    /// Create a configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Weather provider backed by the NWS API.
pub struct NwsWeatherProvider {
    client: Client,
    config: NwsWeatherProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for NwsWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NwsWeatherProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl NwsWeatherProvider {
    /// Create a provider with the default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(NwsWeatherProviderConfig::default())
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: NwsWeatherProviderConfig) -> Result<Self, ProviderBuildError> {
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

    /// Build the points URL; NWS expects latitude first, four decimals.
    fn points_url(&self, point: Coord<f64>) -> String {
        format!(
            "{}/points/{:.4},{:.4}",
            self.config.base_url.trim_end_matches('/'),
            point.y,
            point.x
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, WeatherError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(&err, url))?;

        response.json().await.map_err(|err| WeatherError::Decode {
            url: url.to_owned(),
            message: err.to_string(),
        })
    }

    async fn fetch_forecast_async(&self, point: Coord<f64>) -> Result<WeatherReport, WeatherError> {
        let points_url = self.points_url(point);
        let points: PointsResponse = self.get_json(&points_url).await?;

        let forecast: ForecastResponse = self.get_json(&points.properties.forecast).await?;
        let period = forecast
            .properties
            .periods
            .into_iter()
            .next()
            .ok_or(WeatherError::MissingForecast)?;

        Ok(WeatherReport {
            temperature: period.temperature,
            temperature_unit: period.temperature_unit,
            short_forecast: period.short_forecast,
        })
    }
}

impl WeatherProvider for NwsWeatherProvider {
    fn fetch_forecast(&self, point: Coord<f64>) -> Result<WeatherReport, WeatherError> {
        block_on(&self.runtime, self.fetch_forecast_async(point))
    }
}

fn convert_reqwest_error(error: &reqwest::Error, url: &str) -> WeatherError {
    if let Some(status) = error.status() {
        return WeatherError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
        };
    }
    WeatherError::Network {
        url: url.to_owned(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn points_url_is_lat_then_lon_with_four_decimals() {
        let provider = NwsWeatherProvider::with_config(NwsWeatherProviderConfig::new(
            "http://weather.example.com",
        ))
        .expect("provider should build");

        let url = provider.points_url(Coord {
            x: -81.581216,
            y: 28.417666,
        });

        assert_eq!(url, "http://weather.example.com/points/28.4177,-81.5812");
    }

    #[rstest]
    fn forecast_period_decodes() {
        let json = r#"{
            "properties": {
                "periods": [
                    {
                        "temperature": 72,
                        "temperatureUnit": "F",
                        "shortForecast": "Mostly Sunny"
                    }
                ]
            }
        }"#;

        let response: ForecastResponse = serde_json::from_str(json).expect("should deserialise");
        let period = &response.properties.periods[0];
        assert_eq!(period.temperature, 72);
        assert_eq!(period.short_forecast, "Mostly Sunny");
    }

    #[rstest]
    fn report_displays_like_the_response_surface() {
        let report = WeatherReport {
            temperature: 72,
            temperature_unit: "F".to_owned(),
            short_forecast: "Mostly Sunny".to_owned(),
        };
        assert_eq!(report.to_string(), "72°F, Mostly Sunny");
    }
}
