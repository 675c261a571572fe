//! The recommendation engine: one parametrised pipeline with an explicit
//! open/closed branch.
//!
//! Historical revisions of this system grew near-duplicate join/score/select
//! pipelines that drifted apart in policy. The engine deliberately exposes a
//! single pipeline switched by [`ProcessingMode`] instead: the snapshot
//! variant and the ranking policy are the only things the branch changes.

use geo::Coord;

use crate::entity::AttractionEntity;
use crate::live::LiveStatusEntry;
use crate::profile::{PriorityMode, WeightProfiles};
use crate::schedule::{ParkState, ParkStatus};
use crate::score::score;
use crate::select::{RecommendationRecord, ScoredDraft, select_closed, select_open};
use crate::snapshot::{build_closed_snapshot, build_open_snapshot};

/// Which variant of the pipeline a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingMode {
    /// Live join, scoring, top 7.
    Open,
    /// Catalogue only, distance ranking, top 10.
    Closed,
}

impl ProcessingMode {
    /// Derive the mode from a resolved park status.
    ///
    /// An unknown state runs the closed pipeline: without usable hours the
    /// engine can still support forward planning by distance, which is all
    /// closed mode promises.
    pub fn from_status(status: &ParkStatus) -> Self {
        match status.state {
            ParkState::Open => Self::Open,
            ParkState::Closed | ParkState::Unknown => Self::Closed,
        }
    }
}

/// Everything one recommendation run needs besides the mode.
///
/// The engine borrows the feeds; nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct RecommendationRequest<'a> {
    /// Static catalogue from the provider's children listing.
    pub entities: &'a [AttractionEntity],
    /// Live feed entries; ignored in closed mode.
    pub live_entries: &'a [LiveStatusEntry],
    /// The visitor's reference point (their chosen land).
    pub reference: Coord<f64>,
    /// The visitor's priority; ignored in closed mode.
    pub priority: PriorityMode,
    /// Optional walking radius in metres; ignored in closed mode.
    pub max_distance_meters: Option<f64>,
}

/// The recommendation engine with its injected weight-profile table.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use ridewise_core::{
///     AttractionEntity, Engine, EntityType, LiveStatus, LiveStatusEntry,
///     PriorityMode, ProcessingMode, RecommendationRequest,
/// };
///
/// let entities = vec![AttractionEntity::new(
///     "ride-1",
///     "Big Thunder Mountain",
///     EntityType::Attraction,
///     Some(Coord { x: -81.5803, y: 28.4200 }),
/// )];
/// let live = vec![LiveStatusEntry::new("ride-1", LiveStatus::Operating, Some(15))];
/// let request = RecommendationRequest {
///     entities: &entities,
///     live_entries: &live,
///     reference: Coord { x: -81.5813, y: 28.4177 },
///     priority: PriorityMode::Balanced,
///     max_distance_meters: None,
/// };
///
/// let ranked = Engine::default().recommend(ProcessingMode::Open, &request);
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].id, "ride-1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    profiles: WeightProfiles,
}

impl Engine {
    /// Construct an engine with an explicit profile table.
    pub fn new(profiles: WeightProfiles) -> Self {
        Self { profiles }
    }

    /// Run the pipeline for one request and return the ranked records.
    ///
    /// The computation is pure and synchronous: given identical inputs and
    /// mode, repeated calls return identical output.
    pub fn recommend(
        &self,
        mode: ProcessingMode,
        request: &RecommendationRequest<'_>,
    ) -> Vec<RecommendationRecord> {
        match mode {
            ProcessingMode::Open => {
                let profile = self.profiles.get(request.priority);
                let snapshot = build_open_snapshot(
                    request.entities,
                    request.live_entries,
                    request.reference,
                    request.max_distance_meters,
                );
                let scored: Vec<ScoredDraft> = snapshot
                    .into_iter()
                    .map(|draft| ScoredDraft {
                        score: score(draft.distance_meters, draft.wait_minutes, profile),
                        draft,
                    })
                    .collect();
                select_open(&scored)
            }
            ProcessingMode::Closed => {
                let snapshot = build_closed_snapshot(request.entities, request.reference);
                select_closed(&snapshot)
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(WeightProfiles::default())
    }
}
