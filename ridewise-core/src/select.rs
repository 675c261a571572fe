//! Order, truncate, and freeze the snapshot into recommendation records.
//!
//! The selector never mutates its input; it returns a fresh ordered `Vec`.
//! Ties are broken by ascending distance and then by original provider
//! order, which keeps repeated runs over identical input byte-identical.

use crate::entity::EntityType;
use crate::live::LiveStatus;
use crate::snapshot::DraftRecord;

/// Maximum records returned while the park is open.
pub const OPEN_RESULT_LIMIT: usize = 7;

/// Maximum records returned while the park is closed.
///
/// Closed mode returns more candidates: the visitor is planning a future
/// visit rather than choosing the next ride.
pub const CLOSED_RESULT_LIMIT: usize = 10;

/// A draft record paired with its ranking score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDraft {
    /// The snapshot candidate.
    pub draft: DraftRecord,
    /// Score under the selected weight profile; higher is better.
    pub score: f64,
}

/// The output unit of the engine: one ranked recommendation.
///
/// Records are produced fresh per request and never mutated afterwards;
/// their position in the output array is the ranking.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecommendationRecord {
    /// Provider-unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Catalogue classification.
    pub entity_type: EntityType,
    /// Status at recommendation time.
    pub status: LiveStatus,
    /// Walking distance in whole metres (rounded).
    pub distance_meters: u32,
    /// Posted standby wait in minutes; zero in closed mode.
    pub listed_wait_minutes: u32,
    /// Ranking score; fixed at `0.0` in closed mode, where ordering is
    /// purely by distance.
    pub score: f64,
}

/// Rank open-mode candidates: score descending, then distance ascending,
/// then provider order; truncated to [`OPEN_RESULT_LIMIT`].
pub fn select_open(scored: &[ScoredDraft]) -> Vec<RecommendationRecord> {
    let mut order: Vec<(usize, &ScoredDraft)> = scored.iter().enumerate().collect();
    order.sort_by(|(index_a, a), (index_b, b)| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.draft.distance_meters.total_cmp(&b.draft.distance_meters))
            .then_with(|| index_a.cmp(index_b))
    });
    order
        .into_iter()
        .take(OPEN_RESULT_LIMIT)
        .map(|(_, s)| to_record(&s.draft, s.score))
        .collect()
}

/// Rank closed-mode candidates: distance ascending, then provider order;
/// truncated to [`CLOSED_RESULT_LIMIT`]. Scores are not consulted and the
/// emitted records carry a zero score.
pub fn select_closed(snapshot: &[DraftRecord]) -> Vec<RecommendationRecord> {
    let mut order: Vec<(usize, &DraftRecord)> = snapshot.iter().enumerate().collect();
    order.sort_by(|(index_a, a), (index_b, b)| {
        a.distance_meters
            .total_cmp(&b.distance_meters)
            .then_with(|| index_a.cmp(index_b))
    });
    order
        .into_iter()
        .take(CLOSED_RESULT_LIMIT)
        .map(|(_, draft)| to_record(draft, 0.0))
        .collect()
}

fn to_record(draft: &DraftRecord, score: f64) -> RecommendationRecord {
    RecommendationRecord {
        id: draft.id.clone(),
        name: draft.name.clone(),
        entity_type: draft.entity_type,
        status: draft.status,
        distance_meters: draft.distance_meters.round() as u32,
        listed_wait_minutes: draft.wait_minutes,
        score,
    }
}
