//! Candidate stops supplied by the places provider.
//!
//! A [`Stop`] is an immutable snapshot of one place: identity, position,
//! the provider's quality signals, and a [`StopAttributes`] sum type
//! carrying the category-specific detail. The stop's category is derived
//! from the attributes variant, so a fuel station can never carry hotel
//! attributes by construction.

use geo::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Category of a candidate stop.
///
/// # Examples
/// ```
/// use roadside_core::StopCategory;
///
/// assert_eq!(StopCategory::Fuel.as_str(), "fuel");
/// assert_eq!(StopCategory::Hotel.to_string(), "hotel");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StopCategory {
    /// Gas and charging stations.
    Fuel,
    /// Restaurants and cafes.
    Restaurant,
    /// Rest areas and scenic pull-offs.
    Rest,
    /// Hotels and motels.
    Hotel,
}

impl StopCategory {
    /// Return the category as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fuel => "fuel",
            Self::Restaurant => "restaurant",
            Self::Rest => "rest",
            Self::Hotel => "hotel",
        }
    }
}

impl std::fmt::Display for StopCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StopCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fuel" => Ok(Self::Fuel),
            "restaurant" => Ok(Self::Restaurant),
            "rest" => Ok(Self::Rest),
            "hotel" => Ok(Self::Hotel),
            _ => Err(format!("unknown stop category '{s}'")),
        }
    }
}

/// Category-specific attributes, one variant per [`StopCategory`].
///
/// Matched exhaustively wherever attributes are consumed; adding a
/// category extends this enum and the compiler finds every site.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "category", rename_all = "lowercase"))]
pub enum StopAttributes {
    /// Gas station detail.
    Fuel {
        /// Station brand, e.g. "Shell".
        brand: String,
        /// Price per gallon when the provider reports one.
        fuel_price: Option<f64>,
        /// On-site amenities (car wash, convenience store, ...).
        amenities: Vec<String>,
    },
    /// Restaurant detail.
    Restaurant {
        /// Cuisine labels.
        cuisines: Vec<String>,
        /// Provider price-range string, e.g. "$$".
        price_range: String,
        /// Estimated wait when known.
        estimated_wait_minutes: Option<u32>,
    },
    /// Rest-area detail.
    Rest {
        /// Restrooms available.
        has_restrooms: bool,
        /// Picnic tables available.
        has_picnic_area: bool,
        /// Vending machines available.
        has_vending_machines: bool,
    },
    /// Hotel detail.
    Hotel {
        /// Star rating, 1..=5.
        star_rating: u8,
        /// Advertised amenities.
        amenities: Vec<String>,
        /// Nightly rate when the provider reports one.
        price_per_night: Option<f64>,
        /// Check-in time string when known.
        check_in_time: Option<String>,
    },
}

impl StopAttributes {
    /// The category this attribute variant belongs to.
    #[must_use]
    pub const fn category(&self) -> StopCategory {
        match self {
            Self::Fuel { .. } => StopCategory::Fuel,
            Self::Restaurant { .. } => StopCategory::Restaurant,
            Self::Rest { .. } => StopCategory::Rest,
            Self::Hotel { .. } => StopCategory::Hotel,
        }
    }
}

/// An immutable candidate stop from the places provider.
///
/// Detour figures are computed by the routing layer, not this core; they
/// default to zero and are carried through untouched.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use roadside_core::{Stop, StopAttributes, StopCategory};
///
/// let stop = Stop::new(
///     "s-1",
///     "Valley Fuel",
///     Coord { x: -120.0, y: 38.0 },
///     StopAttributes::Fuel {
///         brand: "Valero".into(),
///         fuel_price: None,
///         amenities: Vec::new(),
///     },
/// )
/// .with_rating(4.2);
///
/// assert_eq!(stop.category(), StopCategory::Fuel);
/// assert_eq!(stop.rating, Some(4.2));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stop {
    /// Stable identifier within one trip.
    pub id: String,
    /// Provider place identifier.
    pub place_id: String,
    /// Display name.
    pub name: String,
    /// Position, WGS84 (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
    /// Extra travel distance to visit this stop, filled in externally.
    pub detour_distance_miles: f64,
    /// Extra travel time to visit this stop, filled in externally.
    pub detour_duration_minutes: f64,
    /// Provider rating, when rated.
    pub rating: Option<f32>,
    /// Provider price level, when priced.
    pub price_level: Option<u8>,
    /// Whether the place reported itself open.
    pub open_now: Option<bool>,
    /// Provider photo references.
    pub photos: Vec<String>,
    /// Category-specific detail; also determines [`Stop::category`].
    pub attributes: StopAttributes,
}

impl Stop {
    /// Construct a stop with the required fields; everything else starts
    /// empty or zero and can be chained on with the `with_*` builders.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Coord<f64>,
        attributes: StopAttributes,
    ) -> Self {
        Self {
            id: id.into(),
            place_id: String::new(),
            name: name.into(),
            location,
            detour_distance_miles: 0.0,
            detour_duration_minutes: 0.0,
            rating: None,
            price_level: None,
            open_now: None,
            photos: Vec::new(),
            attributes,
        }
    }

    /// The stop's category, derived from its attributes variant.
    #[must_use]
    pub const fn category(&self) -> StopCategory {
        self.attributes.category()
    }

    /// Set the provider place identifier while returning `self`.
    #[must_use]
    pub fn with_place_id(mut self, place_id: impl Into<String>) -> Self {
        self.place_id = place_id.into();
        self
    }

    /// Set the provider rating while returning `self`.
    #[must_use]
    pub const fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the provider price level while returning `self`.
    #[must_use]
    pub const fn with_price_level(mut self, level: u8) -> Self {
        self.price_level = Some(level);
        self
    }

    /// Set the open-now flag while returning `self`.
    #[must_use]
    pub const fn with_open_now(mut self, open: bool) -> Self {
        self.open_now = Some(open);
        self
    }

    /// Set the externally computed detour figures while returning `self`.
    #[must_use]
    pub const fn with_detour(mut self, miles: f64, minutes: f64) -> Self {
        self.detour_distance_miles = miles;
        self.detour_duration_minutes = minutes;
        self
    }
}
