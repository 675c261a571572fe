//! Resolve the park's operating status from today's schedule.
//!
//! The resolver consumes the day's schedule windows (already filtered to
//! "today" in the park's own time zone by the data layer) and the current
//! instant, and derives whether the park is open, closed, or unknowable.
//! Window containment is computed on instants; only the human-facing
//! message renders times in the park's time zone. Mixing those two concerns
//! is the classic failure mode here, so the split is deliberate and tested.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Kind of a schedule window.
///
/// The upstream feed carries kinds beyond the two the engine reasons about
/// (`INFO`, `EXTRA_HOURS`, ...); they deserialise as [`WindowKind::Other`].
/// Such windows still count as "schedule data exists for today" but are
/// never containment-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum WindowKind {
    /// Regular operating hours.
    Operating,
    /// A separately ticketed special event.
    TicketedEvent,
    /// Any other schedule row the provider publishes.
    #[cfg_attr(feature = "serde", serde(other))]
    Other,
}

/// One schedule window for the resolved "today".
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleWindow {
    /// Instant the window opens.
    pub opens_at: DateTime<Utc>,
    /// Instant the window closes.
    pub closes_at: DateTime<Utc>,
    /// Window classification.
    pub kind: WindowKind,
    /// Provider description, mostly present for ticketed events.
    pub description: Option<String>,
}

impl ScheduleWindow {
    /// Construct a window without a description.
    pub fn new(opens_at: DateTime<Utc>, closes_at: DateTime<Utc>, kind: WindowKind) -> Self {
        Self {
            opens_at,
            closes_at,
            kind,
            description: None,
        }
    }

    /// Attach a description while returning `self` for chaining.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Inclusive containment check; zero-length windows never match.
    fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.opens_at != self.closes_at && instant >= self.opens_at && instant <= self.closes_at
    }
}

/// Resolved operating state of the park.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ParkState {
    /// The current instant falls inside an operating window.
    Open,
    /// Schedule data exists for today, but no operating window contains now.
    Closed,
    /// No usable schedule data for today.
    Unknown,
}

/// A ticketed event overlapping the current instant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEvent {
    /// Provider description of the event.
    pub description: String,
}

/// Derived park status: never persisted, rebuilt per request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParkStatus {
    /// Operating state for the current instant.
    pub state: ParkState,
    /// The ticketed event containing now, only ever set while open.
    pub active_event: Option<ActiveEvent>,
    /// Display message with times rendered in the park's time zone.
    pub human_message: String,
}

/// Resolve the park status for `now` against today's schedule windows.
///
/// `tz` is the park's own time zone and is used exclusively for message
/// formatting; containment is decided on instants. Windows may arrive
/// unsorted or overlapping; operating windows are sorted by opening time
/// before any containment check. Both window boundaries are inclusive, so
/// an instant equal to the closing time still counts as open.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use ridewise_core::{ParkState, ScheduleWindow, WindowKind, resolve_park_status};
///
/// let open = Utc.with_ymd_and_hms(2025, 6, 1, 13, 0, 0).unwrap();
/// let close = Utc.with_ymd_and_hms(2025, 6, 2, 2, 0, 0).unwrap();
/// let windows = vec![ScheduleWindow::new(open, close, WindowKind::Operating)];
///
/// let noon_park_time = Utc.with_ymd_and_hms(2025, 6, 1, 16, 0, 0).unwrap();
/// let status = resolve_park_status(&windows, noon_park_time, chrono_tz::America::New_York);
/// assert_eq!(status.state, ParkState::Open);
/// ```
pub fn resolve_park_status(windows: &[ScheduleWindow], now: DateTime<Utc>, tz: Tz) -> ParkStatus {
    if windows.is_empty() {
        return ParkStatus {
            state: ParkState::Unknown,
            active_event: None,
            human_message: "Hours data unavailable.".to_owned(),
        };
    }

    let mut operating: Vec<&ScheduleWindow> = windows
        .iter()
        .filter(|w| w.kind == WindowKind::Operating)
        .collect();
    operating.sort_by_key(|w| w.opens_at);

    if operating.is_empty() {
        return ParkStatus {
            state: ParkState::Closed,
            active_event: None,
            human_message: "No operating hours today.".to_owned(),
        };
    }

    if let Some(current) = operating.iter().copied().find(|w| w.contains(now)) {
        return open_status(windows, current, now, tz);
    }

    if let Some(next) = operating.iter().copied().find(|w| now < w.opens_at) {
        return ParkStatus {
            state: ParkState::Closed,
            active_event: None,
            human_message: format!("Opens at {}", local_time(next.opens_at, tz)),
        };
    }

    let human_message = operating.last().map_or_else(
        || "Closed.".to_owned(),
        |last| format!("Closed since {}", local_time(last.closes_at, tz)),
    );
    ParkStatus {
        state: ParkState::Closed,
        active_event: None,
        human_message,
    }
}

fn open_status(
    windows: &[ScheduleWindow],
    current: &ScheduleWindow,
    now: DateTime<Utc>,
    tz: Tz,
) -> ParkStatus {
    let event = windows
        .iter()
        .find(|w| w.kind == WindowKind::TicketedEvent && w.contains(now));

    let mut human_message = format!(
        "Open {} – {}",
        local_time(current.opens_at, tz),
        local_time(current.closes_at, tz)
    );
    if let Some(event) = event {
        human_message.push_str(&format!(
            " | Ticketed event: {}",
            event.description.as_deref().unwrap_or("special event")
        ));
    }

    ParkStatus {
        state: ParkState::Open,
        active_event: event.map(|w| ActiveEvent {
            description: w
                .description
                .clone()
                .unwrap_or_else(|| "Ticketed event".to_owned()),
        }),
        human_message,
    }
}

/// Render an instant as a short clock time in the park's time zone,
/// including the zone abbreviation, e.g. `9:00 AM EST`.
fn local_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format("%-I:%M %p %Z")
        .to_string()
}
