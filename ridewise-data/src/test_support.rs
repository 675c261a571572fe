//! Deterministic test doubles for the network collaborators.
//!
//! The stubs return pre-configured responses without touching the network,
//! so engine and CLI behaviour can be verified hermetically.

use geo::Coord;

use ridewise_core::{
    ParkConfig, ParkData, ParkDataError, ParkDataProvider, ScheduleWindow,
};

use crate::summary::{SummaryContext, SummaryError, Summarizer};
use crate::weather::{WeatherError, WeatherProvider, WeatherReport};

/// Stub `ParkDataProvider` returning canned feeds or errors.
///
/// # Example
///
/// ```
/// use ridewise_core::{ParkData, ParkDataProvider, ParkDirectory};
/// use ridewise_data::test_support::StubParkDataProvider;
///
/// let provider = StubParkDataProvider::with_data(ParkData::default());
/// let directory = ParkDirectory::builtin();
/// let park = directory.get("magic_kingdom").expect("built-in park");
///
/// let data = provider.fetch_park_data(park).expect("canned data");
/// assert!(data.entities.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct StubParkDataProvider {
    park_data: Result<ParkData, ParkDataError>,
    schedule: Result<Vec<ScheduleWindow>, ParkDataError>,
}

impl StubParkDataProvider {
    /// Return the given feeds and an empty schedule.
    #[must_use]
    pub fn with_data(park_data: ParkData) -> Self {
        Self {
            park_data: Ok(park_data),
            schedule: Ok(Vec::new()),
        }
    }

    /// Return the given error from every fetch.
    #[must_use]
    pub fn with_error(error: ParkDataError) -> Self {
        Self {
            park_data: Err(error.clone()),
            schedule: Err(error),
        }
    }

    /// Replace the canned schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: Vec<ScheduleWindow>) -> Self {
        self.schedule = Ok(schedule);
        self
    }

    /// Fail only the schedule fetch.
    #[must_use]
    pub fn with_schedule_error(mut self, error: ParkDataError) -> Self {
        self.schedule = Err(error);
        self
    }
}

impl ParkDataProvider for StubParkDataProvider {
    fn fetch_park_data(&self, _park: &ParkConfig) -> Result<ParkData, ParkDataError> {
        self.park_data.clone()
    }

    fn fetch_today_schedule(
        &self,
        _park: &ParkConfig,
    ) -> Result<Vec<ScheduleWindow>, ParkDataError> {
        self.schedule.clone()
    }
}

/// Stub `WeatherProvider` returning a canned report or error.
#[derive(Debug, Clone)]
pub struct StubWeatherProvider {
    response: Result<WeatherReport, WeatherError>,
}

impl StubWeatherProvider {
    /// Return the given report for any point.
    #[must_use]
    pub fn with_report(report: WeatherReport) -> Self {
        Self {
            response: Ok(report),
        }
    }

    /// Return the given error for any point.
    #[must_use]
    pub fn with_error(error: WeatherError) -> Self {
        Self {
            response: Err(error),
        }
    }

    /// A pleasant default report.
    #[must_use]
    pub fn sunny() -> Self {
        Self::with_report(WeatherReport {
            temperature: 72,
            temperature_unit: "F".to_owned(),
            short_forecast: "Mostly Sunny".to_owned(),
        })
    }
}

impl WeatherProvider for StubWeatherProvider {
    fn fetch_forecast(&self, _point: Coord<f64>) -> Result<WeatherReport, WeatherError> {
        self.response.clone()
    }
}

/// Stub `Summarizer` returning canned text or an error.
#[derive(Debug, Clone)]
pub struct StubSummarizer {
    response: Result<String, ()>,
}

impl StubSummarizer {
    /// Return the given text for any context.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
        }
    }

    /// Fail every summarisation.
    #[must_use]
    pub fn failing() -> Self {
        Self { response: Err(()) }
    }
}

impl Summarizer for StubSummarizer {
    fn summarize(&self, _context: &SummaryContext) -> Result<String, SummaryError> {
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(()) => Err(SummaryError::EmptyCompletion),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridewise_core::ParkDirectory;
    use rstest::rstest;

    #[rstest]
    fn data_stub_returns_the_canned_error_for_both_feeds() {
        let error = ParkDataError::Http {
            url: "http://parks.example.com/entity/x/live".to_owned(),
            status: 503,
        };
        let provider = StubParkDataProvider::with_error(error.clone());
        let directory = ParkDirectory::builtin();
        let park = directory.get("disneyland").expect("built-in park");

        assert_eq!(provider.fetch_park_data(park), Err(error.clone()));
        assert_eq!(provider.fetch_today_schedule(park), Err(error));
    }

    #[rstest]
    fn summary_stub_modes() {
        let context = SummaryContext {
            park_name: String::new(),
            park_message: String::new(),
            weather: None,
            recommendations: Vec::new(),
        };
        assert!(StubSummarizer::with_text("hi").summarize(&context).is_ok());
        assert!(StubSummarizer::failing().summarize(&context).is_err());
    }
}
