//! Facade crate for the Ridewise recommendation engine.
//!
//! This crate re-exports the core domain types and, behind the
//! `provider-http` feature, the HTTP collaborators (park data, weather, and
//! summary generation).

#![forbid(unsafe_code)]

pub use ridewise_core::{
    AttractionEntity, ConfigError, DraftRecord, Engine, EntityType, LiveStatus, LiveStatusEntry,
    ParkConfig, ParkData, ParkDataError, ParkDataProvider, ParkDirectory, ParkState, ParkStatus,
    PriorityMode, ProcessingMode, RecommendationRecord, RecommendationRequest, ScheduleWindow,
    WeightProfile, WeightProfiles, WindowKind, distance, resolve_park_status,
};

#[cfg(feature = "provider-http")]
pub use ridewise_data::{
    HttpParkDataProvider, HttpParkDataProviderConfig, NwsWeatherProvider, OpenAiSummarizer,
    SummaryContext, Summarizer, WeatherProvider, WeatherReport, summarize_or_fallback,
};
