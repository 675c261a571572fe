//! Response documents for the themeparks.wiki v1 entity feeds.
//!
//! Deserialisation is deliberately tolerant: entries with unknown enum
//! values, missing names, or absent queues decode rather than failing the
//! whole feed, and the conversion into core types decides what survives.
//!
//! See: <https://api.themeparks.wiki/docs/v1/>

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use geo::Coord;
use ridewise_core::{
    AttractionEntity, EntityType, LiveStatus, LiveStatusEntry, ScheduleWindow, WindowKind,
};
use serde::Deserialize;

/// Response of the `/entity/{id}/children` listing.
#[derive(Debug, Deserialize)]
pub struct ChildrenResponse {
    /// Catalogue entries beneath the requested park.
    #[serde(default)]
    pub children: Vec<EntityDoc>,
}

impl ChildrenResponse {
    /// Convert the listing into core entities, provider order preserved.
    pub fn into_entities(self) -> Vec<AttractionEntity> {
        self.children.into_iter().map(EntityDoc::into_entity).collect()
    }
}

/// One catalogue entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDoc {
    /// Provider-unique identifier.
    pub id: String,
    /// Display name; occasionally absent upstream.
    #[serde(default)]
    pub name: Option<String>,
    /// Catalogue classification; unknown values decode as `OTHER`.
    #[serde(default)]
    pub entity_type: Option<EntityType>,
    /// Position, when the catalogue has one.
    #[serde(default)]
    pub location: Option<LocationDoc>,
}

impl EntityDoc {
    fn into_entity(self) -> AttractionEntity {
        let location = self.location.and_then(LocationDoc::into_coord);
        let name = self.name.unwrap_or_else(|| self.id.clone());
        AttractionEntity::new(
            self.id,
            name,
            self.entity_type.unwrap_or(EntityType::Other),
            location,
        )
    }
}

/// Latitude/longitude pair as the catalogue spells it.
#[derive(Debug, Deserialize)]
pub struct LocationDoc {
    /// Degrees north.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Degrees east.
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl LocationDoc {
    fn into_coord(self) -> Option<Coord<f64>> {
        match (self.longitude, self.latitude) {
            (Some(x), Some(y)) => Some(Coord { x, y }),
            _ => None,
        }
    }
}

/// Response of the `/entity/{id}/live` feed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveResponse {
    /// Live entries for the park's children.
    #[serde(default)]
    pub live_data: Vec<LiveDoc>,
}

impl LiveResponse {
    /// Convert the feed into core live entries, provider order preserved.
    pub fn into_entries(self) -> Vec<LiveStatusEntry> {
        self.live_data.into_iter().map(LiveDoc::into_entry).collect()
    }
}

/// One live feed entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveDoc {
    /// Identifier shared with the catalogue.
    pub id: String,
    /// Operating state; missing or unknown values decode as `UNKNOWN`.
    #[serde(default)]
    pub status: Option<LiveStatus>,
    /// Queue block; absent for entries without a standby queue.
    #[serde(default)]
    pub queue: Option<QueueDoc>,
}

impl LiveDoc {
    fn into_entry(self) -> LiveStatusEntry {
        let wait = self
            .queue
            .and_then(|q| q.standby)
            .and_then(|s| s.wait_time);
        LiveStatusEntry::new(self.id, self.status.unwrap_or(LiveStatus::Unknown), wait)
    }
}

/// Queue block of a live entry.
#[derive(Debug, Deserialize)]
pub struct QueueDoc {
    /// The standby queue, when posted.
    #[serde(rename = "STANDBY", default)]
    pub standby: Option<StandbyDoc>,
}

/// Standby queue details.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandbyDoc {
    /// Posted wait in minutes; `null` while the ride is down or unmetered.
    #[serde(default)]
    pub wait_time: Option<u32>,
}

/// Response of the `/entity/{id}/schedule` feed.
#[derive(Debug, Deserialize)]
pub struct ScheduleResponse {
    /// Schedule rows, typically spanning several weeks.
    #[serde(default)]
    pub schedule: Vec<ScheduleDoc>,
}

impl ScheduleResponse {
    /// Convert the rows dated `today` (the park's own calendar date) into
    /// core schedule windows.
    pub fn windows_for(self, today: NaiveDate) -> Vec<ScheduleWindow> {
        self.schedule
            .into_iter()
            .filter(|row| row.date == today)
            .map(ScheduleDoc::into_window)
            .collect()
    }
}

/// One schedule row.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDoc {
    /// Calendar date of the row in the park's time zone.
    pub date: NaiveDate,
    /// Row kind; kinds the engine does not model decode as `Other`.
    #[serde(rename = "type")]
    pub kind: WindowKind,
    /// Opening instant (offset-qualified upstream).
    pub opening_time: DateTime<FixedOffset>,
    /// Closing instant.
    pub closing_time: DateTime<FixedOffset>,
    /// Row description, mostly present for ticketed events.
    #[serde(default)]
    pub description: Option<String>,
}

impl ScheduleDoc {
    fn into_window(self) -> ScheduleWindow {
        let window = ScheduleWindow::new(
            self.opening_time.with_timezone(&Utc),
            self.closing_time.with_timezone(&Utc),
            self.kind,
        );
        match self.description {
            Some(description) => window.with_description(description),
            None => window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn deserialise_children_listing() {
        let json = r#"{
            "children": [
                {
                    "id": "ride-1",
                    "name": "Space Mountain",
                    "entityType": "ATTRACTION",
                    "location": {"latitude": 28.4190, "longitude": -81.5781}
                },
                {
                    "id": "shop-1",
                    "name": "Emporium",
                    "entityType": "MERCHANDISE"
                }
            ]
        }"#;

        let response: ChildrenResponse = serde_json::from_str(json).expect("should deserialise");
        let entities = response.into_entities();

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].entity_type, EntityType::Attraction);
        let location = entities[0].location.expect("has coordinates");
        assert!((location.x - -81.5781).abs() < 1e-9);
        // Unknown entity types survive decoding as OTHER without a location.
        assert_eq!(entities[1].entity_type, EntityType::Other);
        assert!(entities[1].location.is_none());
    }

    #[test]
    fn deserialise_live_feed() {
        let json = r#"{
            "liveData": [
                {
                    "id": "ride-1",
                    "status": "OPERATING",
                    "queue": {"STANDBY": {"waitTime": 35}}
                },
                {
                    "id": "ride-2",
                    "status": "OPERATING",
                    "queue": {"STANDBY": {"waitTime": null}}
                },
                {"id": "ride-3"}
            ]
        }"#;

        let response: LiveResponse = serde_json::from_str(json).expect("should deserialise");
        let entries = response.into_entries();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].standby_wait_minutes, Some(35));
        // A posted-but-null wait and a missing queue both decode to None.
        assert_eq!(entries[1].standby_wait_minutes, None);
        assert_eq!(entries[2].status, LiveStatus::Unknown);
        assert_eq!(entries[2].standby_wait_minutes, None);
    }

    #[test]
    fn schedule_rows_filter_to_the_requested_date() {
        let json = r#"{
            "schedule": [
                {
                    "date": "2025-01-15",
                    "type": "OPERATING",
                    "openingTime": "2025-01-15T09:00:00-05:00",
                    "closingTime": "2025-01-15T22:00:00-05:00"
                },
                {
                    "date": "2025-01-15",
                    "type": "TICKETED_EVENT",
                    "openingTime": "2025-01-15T19:00:00-05:00",
                    "closingTime": "2025-01-15T23:00:00-05:00",
                    "description": "Villains After Dark"
                },
                {
                    "date": "2025-01-15",
                    "type": "INFO",
                    "openingTime": "2025-01-15T09:00:00-05:00",
                    "closingTime": "2025-01-15T09:00:00-05:00"
                },
                {
                    "date": "2025-01-16",
                    "type": "OPERATING",
                    "openingTime": "2025-01-16T09:00:00-05:00",
                    "closingTime": "2025-01-16T22:00:00-05:00"
                }
            ]
        }"#;

        let response: ScheduleResponse = serde_json::from_str(json).expect("should deserialise");
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date");
        let windows = response.windows_for(today);

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].kind, WindowKind::Operating);
        assert_eq!(windows[1].kind, WindowKind::TicketedEvent);
        assert_eq!(windows[1].description.as_deref(), Some("Villains After Dark"));
        // The INFO row is carried as Other so "schedule data exists" stays
        // observable even on event-only days.
        assert_eq!(windows[2].kind, WindowKind::Other);
        // Offsets normalise to instants: 09:00 -05:00 is 14:00 UTC.
        assert_eq!(
            windows[0].opens_at,
            Utc.with_ymd_and_hms(2025, 1, 15, 14, 0, 0)
                .single()
                .expect("valid instant")
        );
    }

    #[test]
    fn entity_without_name_falls_back_to_its_id() {
        let json = r#"{"children": [{"id": "mystery", "entityType": "ATTRACTION"}]}"#;
        let response: ChildrenResponse = serde_json::from_str(json).expect("should deserialise");
        let entities = response.into_entities();
        assert_eq!(entities[0].name, "mystery");
    }
}
