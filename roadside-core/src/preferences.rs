//! Traveler preferences guiding recommendations.
//!
//! Preferences are advisory inputs to the recommendation engine: the
//! cadence thresholds gate the rest trigger, while budget, cuisine, and
//! brand filters ride along for downstream presentation. The engine never
//! rejects a candidate on a preference mismatch.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Spending tier for a stop category.
///
/// # Examples
/// ```
/// use roadside_core::BudgetLevel;
///
/// assert_eq!(BudgetLevel::Premium.as_str(), "premium");
/// assert_eq!(BudgetLevel::default(), BudgetLevel::Moderate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BudgetLevel {
    /// Cheapest workable option.
    Budget,
    /// Mid-range.
    #[default]
    Moderate,
    /// Comfort over cost.
    Premium,
}

impl BudgetLevel {
    /// Return the budget level as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Moderate => "moderate",
            Self::Premium => "premium",
        }
    }
}

impl std::fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BudgetLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "budget" => Ok(Self::Budget),
            "moderate" => Ok(Self::Moderate),
            "premium" => Ok(Self::Premium),
            _ => Err(format!("unknown budget level '{s}'")),
        }
    }
}

/// Dining preferences.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiningPreferences {
    /// Preferred cuisine labels.
    pub cuisine_types: Vec<String>,
    /// Dietary restrictions to surface alongside candidates.
    pub dietary_restrictions: Vec<String>,
    /// Spending tier for meals.
    pub budget_level: BudgetLevel,
}

/// Lodging preferences.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LodgingPreferences {
    /// Minimum acceptable star rating.
    pub min_star_rating: u8,
    /// Amenities worth surfacing.
    pub amenities: Vec<String>,
    /// Spending tier for overnight stays.
    pub budget_level: BudgetLevel,
}

impl Default for LodgingPreferences {
    fn default() -> Self {
        Self {
            min_star_rating: 3,
            amenities: Vec::new(),
            budget_level: BudgetLevel::Moderate,
        }
    }
}

/// The traveler's stored preferences, read-only to this core.
///
/// # Examples
/// ```
/// use roadside_core::UserPreferences;
///
/// let prefs = UserPreferences::default();
/// assert_eq!(prefs.rest_frequency_minutes, 120);
/// assert_eq!(prefs.max_driving_duration_minutes, 180);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserPreferences {
    /// Hard ceiling on continuous driving, in minutes.
    pub max_driving_duration_minutes: u32,
    /// Desired interval between rest breaks, in minutes.
    pub rest_frequency_minutes: u32,
    /// Spending tier for fuel.
    pub fuel_budget_level: BudgetLevel,
    /// Dining preferences.
    pub dining: DiningPreferences,
    /// Lodging preferences.
    pub lodging: LodgingPreferences,
    /// Preferred fuel brands.
    pub preferred_brands: Vec<String>,
    /// Whether routing should avoid highways; carried for the routing
    /// layer, unused by this core.
    pub avoid_highways: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            max_driving_duration_minutes: 180,
            rest_frequency_minutes: 120,
            fuel_budget_level: BudgetLevel::Moderate,
            dining: DiningPreferences::default(),
            lodging: LodgingPreferences::default(),
            preferred_brands: Vec::new(),
            avoid_highways: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn defaults_match_profile_defaults() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.max_driving_duration_minutes, 180);
        assert_eq!(prefs.rest_frequency_minutes, 120);
        assert_eq!(prefs.fuel_budget_level, BudgetLevel::Moderate);
        assert_eq!(prefs.lodging.min_star_rating, 3);
        assert!(prefs.preferred_brands.is_empty());
        assert!(!prefs.avoid_highways);
    }

    #[test]
    fn budget_level_round_trips_through_strings() {
        for level in [
            BudgetLevel::Budget,
            BudgetLevel::Moderate,
            BudgetLevel::Premium,
        ] {
            assert_eq!(
                BudgetLevel::from_str(level.as_str()).expect("round trip"),
                level
            );
        }
    }

    #[test]
    fn budget_level_parsing_rejects_unknown() {
        let err = BudgetLevel::from_str("lavish").expect_err("unknown level");
        assert!(err.contains("unknown budget level"));
    }
}
