//! Core domain types and decision logic for the Ridewise engine.
//!
//! The crate is the synchronous heart of the recommender: it resolves the
//! park's operating status from today's schedule, joins static attraction
//! metadata with the live queue feed into a snapshot, scores each candidate
//! under the visitor's priority profile, and selects the ranked shortlist.
//! Everything here is pure computation over data handed in by collaborators;
//! network access lives behind the [`ParkDataProvider`] seam and is
//! implemented elsewhere.
//!
//! All configuration (park directory, weight profiles) is explicit and
//! injected, so multiple parks and profiles can be exercised in isolation.

#![forbid(unsafe_code)]

pub mod distance;
pub mod engine;
pub mod entity;
pub mod error;
pub mod live;
pub mod park;
pub mod profile;
pub mod provider;
pub mod schedule;
pub mod score;
pub mod select;
pub mod snapshot;

pub use distance::distance;
pub use engine::{Engine, ProcessingMode, RecommendationRequest};
pub use entity::{AttractionEntity, EntityType};
pub use error::ConfigError;
pub use live::{LiveStatus, LiveStatusEntry};
pub use park::{ParkConfig, ParkDirectory};
pub use profile::{PriorityMode, WeightProfile, WeightProfiles};
pub use provider::{ParkData, ParkDataError, ParkDataProvider};
pub use schedule::{
    ActiveEvent, ParkState, ParkStatus, ScheduleWindow, WindowKind, resolve_park_status,
};
pub use score::score;
pub use select::{
    CLOSED_RESULT_LIMIT, OPEN_RESULT_LIMIT, RecommendationRecord, ScoredDraft, select_closed,
    select_open,
};
pub use snapshot::{DraftRecord, build_closed_snapshot, build_open_snapshot};
