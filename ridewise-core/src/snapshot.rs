//! Build the per-request snapshot of candidate attractions.
//!
//! The snapshot joins the static catalogue with the live feed (open mode)
//! or takes the catalogue alone (closed mode), attaches walking distance
//! from the visitor's reference point, and drops everything that cannot be
//! recommended. Both builders preserve provider order so downstream
//! tie-breaks stay deterministic.

use geo::Coord;

use crate::distance::distance;
use crate::entity::{AttractionEntity, EntityType};
use crate::live::{LiveStatus, LiveStatusEntry, index_entries};

/// One joined, filtered candidate prior to scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRecord {
    /// Provider-unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Catalogue classification (always `ATTRACTION` after filtering).
    pub entity_type: EntityType,
    /// Status carried into the output record.
    pub status: LiveStatus,
    /// Walking distance from the reference point, in metres.
    pub distance_meters: f64,
    /// Wait minutes used for scoring; forced to zero in closed mode.
    pub wait_minutes: u32,
}

/// Build the open-mode snapshot.
///
/// An entity survives only when it is an attraction, has a live entry in
/// `OPERATING` status with a known standby wait, carries a usable location,
/// and (when a radius is configured) lies within `max_distance_meters` of
/// the reference point. A running ride with an unknown wait is excluded:
/// it cannot be scored, and treating the gap as a zero-minute wait would
/// rank it above genuinely short queues.
pub fn build_open_snapshot(
    entities: &[AttractionEntity],
    live_entries: &[LiveStatusEntry],
    reference: Coord<f64>,
    max_distance_meters: Option<f64>,
) -> Vec<DraftRecord> {
    let live_by_id = index_entries(live_entries);
    let mut snapshot = Vec::new();

    for entity in entities {
        if entity.entity_type != EntityType::Attraction {
            continue;
        }
        let Some(live) = live_by_id.get(entity.id.as_str()) else {
            continue;
        };
        if live.status != LiveStatus::Operating {
            continue;
        }
        let Some(wait_minutes) = live.standby_wait_minutes else {
            continue;
        };
        let Some(location) = usable_location(entity) else {
            continue;
        };
        let distance_meters = distance(reference, location);
        if let Some(radius) = max_distance_meters {
            if distance_meters > radius {
                continue;
            }
        }
        snapshot.push(DraftRecord {
            id: entity.id.clone(),
            name: entity.name.clone(),
            entity_type: entity.entity_type,
            status: LiveStatus::Operating,
            distance_meters,
            wait_minutes,
        });
    }

    snapshot
}

/// Build the closed-mode snapshot.
///
/// While the park is closed the live feed is meaningless, so no join is
/// attempted and no candidate is excluded for being closed: the visitor is
/// planning ahead, not routing in real time. Wait minutes are forced to
/// zero and the status to `CLOSED`. The max-distance radius never applies
/// in this mode.
pub fn build_closed_snapshot(
    entities: &[AttractionEntity],
    reference: Coord<f64>,
) -> Vec<DraftRecord> {
    entities
        .iter()
        .filter(|entity| entity.entity_type == EntityType::Attraction)
        .filter_map(|entity| {
            let location = usable_location(entity)?;
            Some(DraftRecord {
                id: entity.id.clone(),
                name: entity.name.clone(),
                entity_type: entity.entity_type,
                status: LiveStatus::Closed,
                distance_meters: distance(reference, location),
                wait_minutes: 0,
            })
        })
        .collect()
}

/// A location is usable when present, finite, and not the upstream
/// zeroed-coordinate sentinel for missing data.
fn usable_location(entity: &AttractionEntity) -> Option<Coord<f64>> {
    let location = entity.location?;
    let usable = location.x != 0.0
        && location.y != 0.0
        && location.x.is_finite()
        && location.y.is_finite();
    usable.then_some(location)
}
