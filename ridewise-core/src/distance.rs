//! Great-circle distance between park coordinates.
//!
//! Walking distance inside a park is approximated by the haversine formula
//! on a spherical Earth. Over the few hundred metres that separate lands
//! from rides the spherical error is far below the precision of the land
//! reference points themselves.

use geo::Coord;

/// Mean Earth radius in metres.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Compute the haversine distance between two WGS84 coordinates, in metres.
///
/// Coordinates follow the `geo` convention: `x` is longitude and `y` is
/// latitude, both in degrees. The function is symmetric and returns `0.0`
/// for identical inputs. Non-finite components propagate as `NaN` rather
/// than panicking; this is a pure numeric primitive with no error cases.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use ridewise_core::distance;
///
/// let hub = Coord { x: -81.581335, y: 28.417714 };
/// let adventureland = Coord { x: -81.583307, y: 28.418298 };
///
/// let metres = distance(hub, adventureland);
/// assert!(metres > 150.0 && metres < 250.0);
/// assert_eq!(distance(hub, hub), 0.0);
/// ```
pub fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}
