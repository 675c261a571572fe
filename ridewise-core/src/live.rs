//! Live operational state reported by the park data provider.

use std::collections::HashMap;

/// Operating state of an attraction at the time of the fetch.
///
/// Unknown wire values deserialise as [`LiveStatus::Unknown`] rather than
/// failing the whole feed.
///
/// # Examples
/// ```
/// use ridewise_core::LiveStatus;
///
/// assert_eq!(LiveStatus::Operating.as_str(), "OPERATING");
/// assert_eq!(LiveStatus::Refurbishment.to_string(), "REFURBISHMENT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum LiveStatus {
    /// Running and accepting guests.
    Operating,
    /// Closed for the day (or the park is closed).
    Closed,
    /// Temporarily down, expected back.
    Down,
    /// Out of service for scheduled refurbishment.
    Refurbishment,
    /// Status missing or unrecognised.
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl LiveStatus {
    /// Return the provider's wire spelling of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Operating => "OPERATING",
            Self::Closed => "CLOSED",
            Self::Down => "DOWN",
            Self::Refurbishment => "REFURBISHMENT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for LiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live record for a single attraction, keyed by the same id as the static
/// catalogue.
///
/// `standby_wait_minutes` is `None` when the provider reports no standby
/// queue or no wait time; open-mode snapshots treat that as "cannot be
/// scored", never as a zero-minute wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveStatusEntry {
    /// Provider-unique identifier, shared with the static catalogue.
    pub id: String,
    /// Reported operating state.
    pub status: LiveStatus,
    /// Posted standby wait, when available.
    pub standby_wait_minutes: Option<u32>,
}

impl LiveStatusEntry {
    /// Construct a live entry.
    pub fn new(
        id: impl Into<String>,
        status: LiveStatus,
        standby_wait_minutes: Option<u32>,
    ) -> Self {
        Self {
            id: id.into(),
            status,
            standby_wait_minutes,
        }
    }
}

/// Index live entries by id for the snapshot join.
///
/// The provider occasionally repeats an id within one feed; the later entry
/// wins and the collision is logged as a data-quality warning. This is an
/// observed upstream quirk, not a documented invariant.
pub fn index_entries(entries: &[LiveStatusEntry]) -> HashMap<&str, &LiveStatusEntry> {
    let mut by_id: HashMap<&str, &LiveStatusEntry> = HashMap::with_capacity(entries.len());
    for entry in entries {
        if by_id.insert(entry.id.as_str(), entry).is_some() {
            log::warn!("duplicate live entry for id {}; keeping the later one", entry.id);
        }
    }
    by_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn index_keys_by_id() {
        let entries = vec![
            LiveStatusEntry::new("a", LiveStatus::Operating, Some(10)),
            LiveStatusEntry::new("b", LiveStatus::Down, None),
        ];
        let by_id = index_entries(&entries);
        assert_eq!(by_id.len(), 2);
        assert_eq!(by_id.get("a").map(|e| e.status), Some(LiveStatus::Operating));
    }

    #[rstest]
    fn duplicate_id_keeps_the_later_entry() {
        let entries = vec![
            LiveStatusEntry::new("a", LiveStatus::Down, None),
            LiveStatusEntry::new("a", LiveStatus::Operating, Some(25)),
        ];
        let by_id = index_entries(&entries);
        assert_eq!(by_id.len(), 1);
        let kept = by_id.get("a").expect("entry present");
        assert_eq!(kept.status, LiveStatus::Operating);
        assert_eq!(kept.standby_wait_minutes, Some(25));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn unknown_status_is_tolerated() {
        let parsed: LiveStatus = serde_json::from_str("\"TESTING\"").expect("tolerant");
        assert_eq!(parsed, LiveStatus::Unknown);
    }
}
