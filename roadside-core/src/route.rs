//! The planned route, as returned by the directions provider.
//!
//! Only the pieces this core consumes are kept: the decoded geometry and
//! the provider's distance and duration totals. Legs, steps, and map
//! bounds stay with the presentation layer.

use geo::Coord;

use crate::polyline::{self, PolylineError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A planned route from origin to destination.
///
/// # Examples
/// ```
/// use roadside_core::RoutePlan;
///
/// let plan = RoutePlan::from_encoded("_p~iF~ps|U_ulLnnqC_mqNvxq`@", 480.0, 510.0)?;
/// assert_eq!(plan.path.len(), 3);
/// assert_eq!(plan.total_distance_miles, 480.0);
/// # Ok::<(), roadside_core::PolylineError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoutePlan {
    /// Decoded route geometry, ordered origin to destination.
    pub path: Vec<Coord<f64>>,
    /// Provider's driving distance total, miles.
    pub total_distance_miles: f64,
    /// Provider's driving duration total, minutes.
    pub total_duration_minutes: f64,
}

impl RoutePlan {
    /// Construct a plan from an already decoded path.
    #[must_use]
    pub const fn new(
        path: Vec<Coord<f64>>,
        total_distance_miles: f64,
        total_duration_minutes: f64,
    ) -> Self {
        Self {
            path,
            total_distance_miles,
            total_duration_minutes,
        }
    }

    /// Construct a plan by decoding the provider's encoded polyline.
    ///
    /// # Errors
    /// Returns [`PolylineError`] when the encoded geometry is malformed.
    pub fn from_encoded(
        encoded: &str,
        total_distance_miles: f64,
        total_duration_minutes: f64,
    ) -> Result<Self, PolylineError> {
        let path = polyline::decode(encoded)?;
        Ok(Self::new(path, total_distance_miles, total_duration_minutes))
    }

    /// Great-circle length of the decoded path, miles.
    ///
    /// A straight-line lower bound on the driving distance; useful as a
    /// sanity check against the provider's total.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "summing per-segment great-circle distances"
    )]
    pub fn path_length_miles(&self) -> f64 {
        self.path
            .windows(2)
            .filter_map(|pair| match pair {
                [a, b] => Some(crate::geo::distance_miles(*a, *b)),
                _ => None,
            })
            .sum()
    }
}
