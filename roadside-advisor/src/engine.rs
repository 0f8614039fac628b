//! The recommendation trigger engine.
//!
//! [`evaluate`] is a pure decision function: given the current trip
//! context, the vehicle's remaining range, the traveler's preferences,
//! and the candidate pools, it produces zero to three [`Proposal`]s, one
//! per category whose gate fires this cycle. Categories are evaluated
//! independently and may all fire at once; arbitration between
//! overlapping proposals is the traveler's job, not the engine's.
//!
//! Proposals carry no identity or timestamp. The session mints both when
//! merging, which keeps `evaluate` referentially transparent: calling it
//! twice with the same input yields the same output.

use chrono::{NaiveDateTime, Timelike};

use roadside_core::geo::distance_miles;
use roadside_core::{Stop, StopCategory, TimeOfDay, TripContext, UserPreferences};

use geo::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum candidates surfaced per fired category.
pub const RECOMMENDATIONS_PER_CATEGORY: usize = 3;

/// Fuel fraction at or below which the fuel proposal reports `LowFuel`.
pub const FUEL_WARNING_THRESHOLD: f64 = 0.25;

/// Wall-clock hour from which lodging proposals fire.
pub const EVENING_LODGING_HOUR: u32 = 20;

/// The condition that caused a recommendation to be generated.
///
/// `MealTime`, `WeatherAlert`, and `TrafficDelay` are reserved for
/// external collaborators (meal scheduling, weather, traffic feeds) that
/// inject recommendations through the session rather than this engine.
///
/// # Examples
/// ```
/// use roadside_advisor::Trigger;
///
/// assert_eq!(Trigger::LowFuel.as_str(), "low_fuel");
/// assert_eq!(Trigger::EveningLodging.to_string(), "evening_lodging");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Trigger {
    /// Fuel fraction at or below the warning threshold.
    LowFuel,
    /// A meal window is open.
    MealTime,
    /// Continuous driving reached the rest cadence.
    DrivingDuration,
    /// Nightfall; time to find lodging.
    EveningLodging,
    /// Severe weather ahead.
    WeatherAlert,
    /// Significant traffic delay ahead.
    TrafficDelay,
    /// No urgent condition; surfaced for general interest.
    UserRequest,
}

impl Trigger {
    /// Return the trigger as a `snake_case` `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LowFuel => "low_fuel",
            Self::MealTime => "meal_time",
            Self::DrivingDuration => "driving_duration",
            Self::EveningLodging => "evening_lodging",
            Self::WeatherAlert => "weather_alert",
            Self::TrafficDelay => "traffic_delay",
            Self::UserRequest => "user_request",
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate stop with its straight-line distance from the vehicle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankedStop {
    /// The candidate.
    pub stop: Stop,
    /// Great-circle distance from the current position, miles.
    pub distance_miles: f64,
}

/// Externally supplied candidate pools, one list per category.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandidatePools {
    /// Fuel station candidates.
    pub fuel: Vec<Stop>,
    /// Rest area candidates.
    pub rest: Vec<Stop>,
    /// Lodging candidates.
    pub lodging: Vec<Stop>,
}

/// Inputs to one evaluation cycle.
#[derive(Debug, Clone)]
pub struct EvaluationInput<'a> {
    /// Remaining vehicle range, miles; also the candidate search radius.
    pub fuel_range_miles: f64,
    /// Current trip snapshot.
    pub context: &'a TripContext,
    /// Traveler preferences.
    pub preferences: &'a UserPreferences,
    /// Candidate pools for this cycle.
    pub pools: &'a CandidatePools,
    /// Wall-clock time supplied by the driver.
    pub now: NaiveDateTime,
}

/// One fired category's proposal: the trigger, a human-readable reason,
/// and up to [`RECOMMENDATIONS_PER_CATEGORY`] candidates, nearest first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Proposal {
    /// Category this proposal covers.
    pub category: StopCategory,
    /// Condition that fired.
    pub trigger: Trigger,
    /// Human-readable justification.
    pub reason: String,
    /// Ranked candidates, nearest first.
    pub stops: Vec<RankedStop>,
}

/// Evaluate every category gate against the current trip state.
///
/// Returns at most one proposal per category. An unknown current
/// position yields no proposals at all, since candidates cannot be
/// ranked without one; an empty pool yields no proposal for that
/// category. Neither case is an error.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use geo::Coord;
/// use roadside_advisor::{CandidatePools, EvaluationInput, Trigger, evaluate};
/// use roadside_core::{Stop, StopAttributes, TripContext, UserPreferences};
///
/// let mut context = TripContext::new();
/// context.set_position(Coord { x: -120.0, y: 38.0 });
/// context.set_fuel_level(0.1);
///
/// let pools = CandidatePools {
///     fuel: vec![Stop::new(
///         "fuel-1",
///         "Valley Fuel",
///         Coord { x: -120.05, y: 38.0 },
///         StopAttributes::Fuel {
///             brand: "Valero".into(),
///             fuel_price: None,
///             amenities: Vec::new(),
///         },
///     )],
///     ..CandidatePools::default()
/// };
///
/// let noon = NaiveDate::from_ymd_opt(2024, 6, 15)
///     .and_then(|d| d.and_hms_opt(12, 0, 0))
///     .expect("valid timestamp");
/// let proposals = evaluate(&EvaluationInput {
///     fuel_range_miles: 42.0,
///     context: &context,
///     preferences: &UserPreferences::default(),
///     pools: &pools,
///     now: noon,
/// });
///
/// assert_eq!(proposals.len(), 1);
/// assert_eq!(proposals[0].trigger, Trigger::LowFuel);
/// ```
#[must_use]
pub fn evaluate(input: &EvaluationInput<'_>) -> Vec<Proposal> {
    let Some(position) = input.context.current_position() else {
        return Vec::new();
    };

    let mut proposals = Vec::new();

    let fuel = rank_within_range(position, &input.pools.fuel, input.fuel_range_miles);
    if !fuel.is_empty() {
        let low = input.context.estimated_fuel_remaining() <= FUEL_WARNING_THRESHOLD;
        let (trigger, reason) = if low {
            (Trigger::LowFuel, "Fuel level is getting low".to_owned())
        } else {
            (Trigger::UserRequest, "Nearby gas stations".to_owned())
        };
        proposals.push(Proposal {
            category: StopCategory::Fuel,
            trigger,
            reason,
            stops: fuel,
        });
    }

    let overdue = input.context.elapsed_driving_minutes()
        >= f64::from(input.preferences.rest_frequency_minutes);
    if overdue {
        let rest = rank_within_range(position, &input.pools.rest, input.fuel_range_miles);
        if !rest.is_empty() {
            proposals.push(Proposal {
                category: StopCategory::Rest,
                trigger: Trigger::DrivingDuration,
                reason: format!(
                    "You've been driving for {} minutes",
                    input.context.elapsed_driving_minutes().round()
                ),
                stops: rest,
            });
        }
    }

    if is_night(input.now) {
        let lodging = rank_within_range(position, &input.pools.lodging, input.fuel_range_miles);
        if !lodging.is_empty() {
            proposals.push(Proposal {
                category: StopCategory::Hotel,
                trigger: Trigger::EveningLodging,
                reason: "It's getting late, consider stopping for the night".to_owned(),
                stops: lodging,
            });
        }
    }

    proposals
}

/// Whether lodging should be proposed at this wall-clock time.
///
/// The hour threshold and the derived bucket are OR-ed so a boundary
/// disagreement between the two representations still fires.
#[must_use]
pub fn is_night(now: NaiveDateTime) -> bool {
    now.hour() >= EVENING_LODGING_HOUR || TimeOfDay::from_hour(now.hour()).is_night()
}

/// Rank a pool by straight-line distance from `position`.
///
/// Candidates beyond `max_miles` are dropped; the rest are sorted
/// nearest first (stable, so equal distances keep pool order) and
/// truncated to [`RECOMMENDATIONS_PER_CATEGORY`].
fn rank_within_range(position: Coord<f64>, pool: &[Stop], max_miles: f64) -> Vec<RankedStop> {
    let mut ranked: Vec<RankedStop> = pool
        .iter()
        .map(|stop| RankedStop {
            distance_miles: distance_miles(position, stop.location),
            stop: stop.clone(),
        })
        .filter(|ranked_stop| ranked_stop.distance_miles <= max_miles)
        .collect();
    ranked.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    ranked.truncate(RECOMMENDATIONS_PER_CATEGORY);
    ranked
}
