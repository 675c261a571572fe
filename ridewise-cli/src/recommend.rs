//! The `recommend` subcommand: the routing-layer pipeline around the
//! engine.

use std::io::Write;

use chrono::Utc;
use clap::Parser;
use serde::Serialize;

use ridewise_core::{
    Engine, ParkDataProvider, ParkDirectory, ParkState, ParkStatus, PriorityMode, ProcessingMode,
    RecommendationRecord, RecommendationRequest, resolve_park_status,
};
use ridewise_data::{
    HttpParkDataProvider, HttpParkDataProviderConfig, NwsWeatherProvider, OpenAiSummarizer,
    SummaryContext, Summarizer, WeatherProvider, summarize_or_fallback,
};

use crate::CliError;

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Fetch today's schedule, the live queue feed, and the \
                  attraction catalogue for a park, then rank the rides \
                  nearest the visitor's land under the chosen priority.",
    about = "Recommend rides for a visitor's location and priority"
)]
pub struct RecommendArgs {
    /// Park key, e.g. `magic_kingdom` or `disneyland`.
    #[arg(long, value_name = "park")]
    pub park: String,
    /// Land the visitor is standing in, e.g. `adventureland`.
    #[arg(long, value_name = "land")]
    pub land: String,
    /// Priority mode: BALANCED, WAIT_ONLY, or DISTANCE_ONLY. Unrecognised
    /// names fall back to BALANCED.
    #[arg(long, value_name = "mode", default_value = "BALANCED")]
    pub priority: String,
    /// Drop open-mode candidates further than this many metres away.
    #[arg(long, value_name = "metres")]
    pub max_distance: Option<f64>,
    /// Override the park data API base URL.
    #[arg(long, value_name = "url")]
    pub base_url: Option<String>,
    /// Skip weather lookup.
    #[arg(long)]
    pub no_weather: bool,
    /// Skip summary generation even when an API key is configured.
    #[arg(long)]
    pub no_summary: bool,
}

/// The serialised response: status context plus the ranked records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct WizardResponse {
    /// Park display name.
    pub park: String,
    /// Resolved park status.
    pub status: ParkStatus,
    /// Weather line, when the lookup succeeded.
    pub weather: Option<String>,
    /// Generated or fallback summary text.
    pub summary: String,
    /// Ranked recommendations, best first.
    pub recommendations: Vec<RecommendationRecord>,
}

/// The injected collaborators; tests pass stubs.
pub(crate) struct Collaborators<'a> {
    pub park_data: &'a dyn ParkDataProvider,
    pub weather: Option<&'a dyn WeatherProvider>,
    pub summarizer: Option<&'a dyn Summarizer>,
}

pub(crate) fn run_recommend(args: &RecommendArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let provider_config = args
        .base_url
        .as_deref()
        .map_or_else(HttpParkDataProviderConfig::default, |url| {
            HttpParkDataProviderConfig::new(url)
        });
    let park_data = HttpParkDataProvider::with_config(provider_config)?;

    let weather = if args.no_weather {
        None
    } else {
        Some(NwsWeatherProvider::new()?)
    };

    let summarizer = if args.no_summary {
        None
    } else {
        OpenAiSummarizer::from_env()?
    };

    let collaborators = Collaborators {
        park_data: &park_data,
        weather: weather.as_ref().map(|w| w as &dyn WeatherProvider),
        summarizer: summarizer.as_ref().map(|s| s as &dyn Summarizer),
    };
    let directory = ParkDirectory::builtin();
    execute_recommend(args, &directory, &collaborators, writer)
}

/// Run the pipeline against explicit collaborators.
///
/// Order matters: configuration resolves (and fails fast) before any fetch
/// is issued, and upstream data failures surface as the generic
/// "recommendation data unavailable" error while the diagnostic chain is
/// logged.
pub(crate) fn execute_recommend(
    args: &RecommendArgs,
    directory: &ParkDirectory,
    collaborators: &Collaborators<'_>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let park = directory.get(&args.park)?;
    let reference = park.land(&args.land)?;
    let priority = PriorityMode::parse_lenient(&args.priority);

    let windows = collaborators
        .park_data
        .fetch_today_schedule(park)
        .map_err(|source| {
            log::error!("schedule fetch failed: {source}");
            CliError::DataUnavailable { source }
        })?;
    let status = resolve_park_status(&windows, Utc::now(), park.time_zone);

    let weather = collaborators.weather.and_then(|provider| {
        match provider.fetch_forecast(park.coords) {
            Ok(report) => Some(report.to_string()),
            Err(err) => {
                // Weather is display context; degrade without failing.
                log::warn!("weather lookup failed: {err}");
                None
            }
        }
    });

    let recommendations = if status.state == ParkState::Unknown {
        // Without usable hours the status message carries the news; an
        // empty list is a valid, non-error result.
        Vec::new()
    } else {
        let mode = ProcessingMode::from_status(&status);
        let data = collaborators
            .park_data
            .fetch_park_data(park)
            .map_err(|source| {
                log::error!("park data fetch failed: {source}");
                CliError::DataUnavailable { source }
            })?;
        let request = RecommendationRequest {
            entities: &data.entities,
            live_entries: &data.live_entries,
            reference,
            priority,
            max_distance_meters: args.max_distance,
        };
        Engine::default().recommend(mode, &request)
    };

    let summary = summarize_or_fallback(
        collaborators.summarizer,
        &SummaryContext {
            park_name: park.name.clone(),
            park_message: status.human_message.clone(),
            weather: weather.clone(),
            recommendations: recommendations.clone(),
        },
    );

    let response = WizardResponse {
        park: park.name.clone(),
        status,
        weather,
        summary,
        recommendations,
    };
    write_response(writer, &response)
}

fn write_response(writer: &mut dyn Write, response: &WizardResponse) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerializeResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use geo::Coord;
    use ridewise_core::{
        AttractionEntity, EntityType, LiveStatus, LiveStatusEntry, ParkData, ParkDataError,
        ScheduleWindow, WindowKind,
    };
    use ridewise_data::test_support::{StubParkDataProvider, StubSummarizer, StubWeatherProvider};
    use rstest::{fixture, rstest};

    fn args(park: &str, land: &str) -> RecommendArgs {
        RecommendArgs {
            park: park.to_owned(),
            land: land.to_owned(),
            priority: "BALANCED".to_owned(),
            max_distance: None,
            base_url: None,
            no_weather: false,
            no_summary: false,
        }
    }

    /// An operating window wrapped around the current instant.
    fn open_today() -> Vec<ScheduleWindow> {
        let now = Utc::now();
        vec![ScheduleWindow::new(
            now - Duration::hours(2),
            now + Duration::hours(6),
            WindowKind::Operating,
        )]
    }

    #[fixture]
    fn park_feeds() -> ParkData {
        // Near the Magic Kingdom adventureland reference point.
        let entities = vec![
            AttractionEntity::new(
                "pirates",
                "Pirates of the Caribbean",
                EntityType::Attraction,
                Some(Coord { x: -81.583400, y: 28.418200 }),
            ),
            AttractionEntity::new(
                "jungle",
                "Jungle Cruise",
                EntityType::Attraction,
                Some(Coord { x: -81.583700, y: 28.417900 }),
            ),
        ];
        let live_entries = vec![
            LiveStatusEntry::new("pirates", LiveStatus::Operating, Some(20)),
            LiveStatusEntry::new("jungle", LiveStatus::Operating, Some(45)),
        ];
        ParkData {
            entities,
            live_entries,
        }
    }

    fn run_to_json(
        args: &RecommendArgs,
        collaborators: &Collaborators<'_>,
    ) -> Result<serde_json::Value, CliError> {
        let directory = ParkDirectory::builtin();
        let mut output = Vec::new();
        execute_recommend(args, &directory, collaborators, &mut output)?;
        Ok(serde_json::from_slice(&output).expect("valid JSON response"))
    }

    #[rstest]
    fn unknown_park_fails_fast(park_feeds: ParkData) {
        let provider = StubParkDataProvider::with_data(park_feeds).with_schedule(open_today());
        let collaborators = Collaborators {
            park_data: &provider,
            weather: None,
            summarizer: None,
        };
        let err = run_to_json(&args("epcot", "adventureland"), &collaborators)
            .expect_err("config error");
        assert!(matches!(err, CliError::Config(_)));
    }

    #[rstest]
    fn unknown_land_fails_fast(park_feeds: ParkData) {
        let provider = StubParkDataProvider::with_data(park_feeds).with_schedule(open_today());
        let collaborators = Collaborators {
            park_data: &provider,
            weather: None,
            summarizer: None,
        };
        let err = run_to_json(&args("magic_kingdom", "narnia"), &collaborators)
            .expect_err("config error");
        assert!(matches!(err, CliError::Config(_)));
    }

    #[rstest]
    fn open_park_ranks_and_summarises(park_feeds: ParkData) {
        let provider = StubParkDataProvider::with_data(park_feeds).with_schedule(open_today());
        let weather = StubWeatherProvider::sunny();
        let collaborators = Collaborators {
            park_data: &provider,
            weather: Some(&weather),
            summarizer: None,
        };
        let json = run_to_json(&args("magic_kingdom", "adventureland"), &collaborators)
            .expect("valid run");

        assert_eq!(json["status"]["state"], "OPEN");
        assert_eq!(json["weather"], "72°F, Mostly Sunny");
        let recommendations = json["recommendations"].as_array().expect("array");
        assert_eq!(recommendations.len(), 2);
        // Pirates is both closer and the shorter queue under BALANCED.
        assert_eq!(recommendations[0]["id"], "pirates");
        assert!(
            json["summary"]
                .as_str()
                .expect("summary text")
                .contains("Pirates of the Caribbean")
        );
    }

    #[rstest]
    fn upstream_failure_is_a_single_aggregate_error(park_feeds: ParkData) {
        let _ = park_feeds;
        let provider = StubParkDataProvider::with_error(ParkDataError::Http {
            url: "http://parks.example.com/entity/x/live".to_owned(),
            status: 502,
        })
        .with_schedule(open_today());
        let collaborators = Collaborators {
            park_data: &provider,
            weather: None,
            summarizer: None,
        };
        let err = run_to_json(&args("magic_kingdom", "adventureland"), &collaborators)
            .expect_err("data error");
        assert!(matches!(err, CliError::DataUnavailable { .. }));
        assert_eq!(err.to_string(), "recommendation data unavailable");
    }

    #[rstest]
    fn empty_schedule_reports_unknown_with_no_recommendations(park_feeds: ParkData) {
        let provider = StubParkDataProvider::with_data(park_feeds);
        let collaborators = Collaborators {
            park_data: &provider,
            weather: None,
            summarizer: None,
        };
        let json = run_to_json(&args("magic_kingdom", "adventureland"), &collaborators)
            .expect("valid run");

        assert_eq!(json["status"]["state"], "UNKNOWN");
        assert!(json["recommendations"].as_array().expect("array").is_empty());
        assert_eq!(
            json["summary"],
            "No rides matched your current location and preferences."
        );
    }

    #[rstest]
    fn weather_failure_never_fails_the_request(park_feeds: ParkData) {
        let provider = StubParkDataProvider::with_data(park_feeds).with_schedule(open_today());
        let weather = StubWeatherProvider::with_error(
            ridewise_data::WeatherError::MissingForecast,
        );
        let collaborators = Collaborators {
            park_data: &provider,
            weather: Some(&weather),
            summarizer: None,
        };
        let json = run_to_json(&args("magic_kingdom", "adventureland"), &collaborators)
            .expect("valid run");

        assert_eq!(json["weather"], serde_json::Value::Null);
        assert!(!json["recommendations"].as_array().expect("array").is_empty());
    }

    #[rstest]
    fn summariser_failure_falls_back(park_feeds: ParkData) {
        let provider = StubParkDataProvider::with_data(park_feeds).with_schedule(open_today());
        let summarizer = StubSummarizer::failing();
        let collaborators = Collaborators {
            park_data: &provider,
            weather: None,
            summarizer: Some(&summarizer),
        };
        let json = run_to_json(&args("magic_kingdom", "adventureland"), &collaborators)
            .expect("valid run");

        assert!(
            json["summary"]
                .as_str()
                .expect("summary text")
                .starts_with("Top pick:")
        );
    }

    #[rstest]
    fn closed_park_returns_distance_ranked_planning_list(park_feeds: ParkData) {
        let now = Utc::now();
        let provider = StubParkDataProvider::with_data(park_feeds).with_schedule(vec![
            ScheduleWindow::new(
                now + Duration::hours(2),
                now + Duration::hours(12),
                WindowKind::Operating,
            ),
        ]);
        let collaborators = Collaborators {
            park_data: &provider,
            weather: None,
            summarizer: None,
        };
        let json = run_to_json(&args("magic_kingdom", "adventureland"), &collaborators)
            .expect("valid run");

        assert_eq!(json["status"]["state"], "CLOSED");
        let recommendations = json["recommendations"].as_array().expect("array");
        assert_eq!(recommendations.len(), 2);
        assert!(recommendations.iter().all(|r| r["status"] == "CLOSED"));
        assert!(recommendations.iter().all(|r| r["listed_wait_minutes"] == 0));
    }

    #[rstest]
    fn unrecognised_priority_falls_back_to_balanced(park_feeds: ParkData) {
        let provider = StubParkDataProvider::with_data(park_feeds).with_schedule(open_today());
        let collaborators = Collaborators {
            park_data: &provider,
            weather: None,
            summarizer: None,
        };
        let mut request = args("magic_kingdom", "adventureland");
        request.priority = "TELEPORT".to_owned();
        let json = run_to_json(&request, &collaborators).expect("valid run");
        assert!(!json["recommendations"].as_array().expect("array").is_empty());
    }
}
