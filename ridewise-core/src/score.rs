//! Convert a (distance, wait) pair into a single ranking score.

use crate::profile::WeightProfile;

/// Score one open-mode candidate; higher is better.
///
/// Distance and wait are first normalised onto comparable point scales: a
/// 0-1000 m walk and a 0-60 min queue both map onto roughly 10 down to 0,
/// so the balanced profile gives each axis similar influence before the
/// profile factors are applied. Values beyond either range clamp to a zero
/// sub-score rather than going negative.
///
/// Closed-mode ranking never calls this: wait time is meaningless while
/// the park is closed, so closed mode orders purely by ascending distance.
///
/// # Examples
/// ```
/// use ridewise_core::{WeightProfile, score};
///
/// let balanced = WeightProfile { wait_factor: 1.0, distance_factor: 1.0 };
/// let value = score(200.0, 10, balanced);
/// assert!((value - (8.0 + 50.0 / 6.0)).abs() < 1e-9);
/// ```
pub fn score(distance_meters: f64, wait_minutes: u32, profile: WeightProfile) -> f64 {
    let distance_score = ((1000.0 - distance_meters) / 100.0).max(0.0);
    let wait_score = ((60.0 - f64::from(wait_minutes)) / 6.0).max(0.0);
    distance_score * profile.distance_factor + wait_score * profile.wait_factor
}
