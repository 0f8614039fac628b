//! Great-circle distance between WGS84 coordinates.
//!
//! Coordinates follow the [`geo`] convention: `x = longitude`,
//! `y = latitude`, both in degrees. Distances are statute miles, the unit
//! the vehicle range model works in.

use geo::Coord;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine distance between two coordinates, in statute miles.
///
/// Uses the spherical-earth formula with no ellipsoid correction, so the
/// result is deterministic and symmetric: `distance_miles(a, b)` equals
/// `distance_miles(b, a)`, and the distance from a point to itself is zero.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use roadside_core::geo::distance_miles;
///
/// let sf = Coord { x: -122.4194, y: 37.7749 };
/// let la = Coord { x: -118.2437, y: 34.0522 };
/// let miles = distance_miles(sf, la);
/// assert!((330.0..360.0).contains(&miles));
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine is floating-point throughout"
)]
pub fn distance_miles(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let d_lat = (b.y - a.y).to_radians();
    let d_lng = (b.x - a.x).to_radians();
    let sin_lat = (d_lat / 2.0).sin();
    let sin_lng = (d_lng / 2.0).sin();
    let h = sin_lat * sin_lat + a.y.to_radians().cos() * b.y.to_radians().cos() * sin_lng * sin_lng;
    EARTH_RADIUS_MILES * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}
