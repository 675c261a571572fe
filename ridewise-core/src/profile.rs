//! Priority modes and the weight profiles behind them.
//!
//! A weight profile is a pair of multipliers controlling how strongly wait
//! time and walking distance pull on the ranking score. The table of
//! profiles is injected configuration, not a process-wide constant.

/// The visitor's stated optimisation priority.
///
/// # Examples
/// ```
/// use ridewise_core::PriorityMode;
///
/// assert_eq!(PriorityMode::parse_lenient("WAIT_ONLY"), PriorityMode::WaitOnly);
/// // Unrecognised names fall back to the balanced profile instead of failing.
/// assert_eq!(PriorityMode::parse_lenient("TELEPORT"), PriorityMode::Balanced);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PriorityMode {
    /// Shortest wait dominates.
    WaitOnly,
    /// Closest walk dominates.
    DistanceOnly,
    /// Weigh wait and distance roughly equally.
    ///
    /// Doubles as the catch-all: unknown wire values deserialise here, the
    /// historical `SCORE_BALANCED` spelling included.
    #[default]
    #[cfg_attr(feature = "serde", serde(other))]
    Balanced,
}

impl PriorityMode {
    /// Return the canonical spelling of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Balanced => "BALANCED",
            Self::WaitOnly => "WAIT_ONLY",
            Self::DistanceOnly => "DISTANCE_ONLY",
        }
    }

    /// Parse a mode name, falling back to [`PriorityMode::Balanced`] for
    /// anything unrecognised.
    ///
    /// The historical UI sent `SCORE_BALANCED` for the balanced mode; both
    /// spellings are accepted. Parsing is case-insensitive.
    pub fn parse_lenient(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "WAIT_ONLY" => Self::WaitOnly,
            "DISTANCE_ONLY" => Self::DistanceOnly,
            _ => Self::Balanced,
        }
    }
}

impl std::fmt::Display for PriorityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multipliers applied to the wait and distance sub-scores.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightProfile {
    /// Multiplier on the wait sub-score.
    pub wait_factor: f64,
    /// Multiplier on the distance sub-score.
    pub distance_factor: f64,
}

/// The injected table of weight profiles, one per [`PriorityMode`].
///
/// The dominant-axis profiles use a large factor against a small-but-nonzero
/// one so the suppressed axis still breaks ties between otherwise identical
/// candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightProfiles {
    /// Profile for [`PriorityMode::Balanced`].
    pub balanced: WeightProfile,
    /// Profile for [`PriorityMode::WaitOnly`].
    pub wait_only: WeightProfile,
    /// Profile for [`PriorityMode::DistanceOnly`].
    pub distance_only: WeightProfile,
}

impl WeightProfiles {
    /// Look up the profile for a mode.
    pub fn get(&self, mode: PriorityMode) -> WeightProfile {
        match mode {
            PriorityMode::Balanced => self.balanced,
            PriorityMode::WaitOnly => self.wait_only,
            PriorityMode::DistanceOnly => self.distance_only,
        }
    }
}

impl Default for WeightProfiles {
    fn default() -> Self {
        Self {
            balanced: WeightProfile {
                wait_factor: 1.0,
                distance_factor: 1.0,
            },
            wait_only: WeightProfile {
                wait_factor: 100.0,
                distance_factor: 0.001,
            },
            distance_only: WeightProfile {
                wait_factor: 0.001,
                distance_factor: 100.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("BALANCED", PriorityMode::Balanced)]
    #[case("SCORE_BALANCED", PriorityMode::Balanced)]
    #[case("wait_only", PriorityMode::WaitOnly)]
    #[case("DISTANCE_ONLY", PriorityMode::DistanceOnly)]
    #[case("nonsense", PriorityMode::Balanced)]
    #[case("", PriorityMode::Balanced)]
    fn lenient_parsing(#[case] name: &str, #[case] expected: PriorityMode) {
        assert_eq!(PriorityMode::parse_lenient(name), expected);
    }

    #[rstest]
    fn dominant_profiles_keep_the_other_axis_nonzero() {
        let profiles = WeightProfiles::default();
        assert!(profiles.wait_only.distance_factor > 0.0);
        assert!(profiles.distance_only.wait_factor > 0.0);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn unknown_mode_deserialises_as_balanced() {
        let parsed: PriorityMode = serde_json::from_str("\"SPICY\"").expect("tolerant");
        assert_eq!(parsed, PriorityMode::Balanced);
    }
}
