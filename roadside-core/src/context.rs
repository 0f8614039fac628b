//! The evolving snapshot of a trip in progress.
//!
//! [`TripContext`] is mutated only through its named update operations,
//! which the telemetry driver calls as position, fuel, and timing
//! estimates arrive. Elapsed time and distance traveled are guarded
//! monotone: a regressing estimate is ignored with a warning rather than
//! rewinding the trip.

use chrono::NaiveDateTime;
use geo::Coord;
use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coarse wall-clock bucket used by the lodging trigger and display.
///
/// # Examples
/// ```
/// use roadside_core::TimeOfDay;
///
/// assert_eq!(TimeOfDay::from_hour(8), TimeOfDay::Morning);
/// assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Night);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeOfDay {
    /// 05:00 to 10:59.
    #[default]
    Morning,
    /// 11:00 to 13:59.
    Midday,
    /// 14:00 to 16:59.
    Afternoon,
    /// 17:00 to 20:59.
    Evening,
    /// 21:00 to 04:59.
    Night,
}

impl TimeOfDay {
    /// Derive the bucket from a wall-clock hour (0..=23).
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            5..=10 => Self::Morning,
            11..=13 => Self::Midday,
            14..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Return the bucket as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Midday => "midday",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    /// Whether this bucket is the night bucket.
    #[must_use]
    pub const fn is_night(&self) -> bool {
        matches!(self, Self::Night)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A partial batch update to the trip context.
///
/// Fields left `None` keep their current value, mirroring how the
/// telemetry feed reports whichever estimates it has.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContextUpdate {
    /// Total driving time so far, minutes.
    pub elapsed_driving_minutes: Option<f64>,
    /// Fuel remaining as a fraction of a full tank; clamped on apply.
    pub estimated_fuel_remaining: Option<f64>,
    /// Route distance still ahead, miles.
    pub estimated_miles_remaining: Option<f64>,
    /// Distance covered so far, miles.
    pub distance_traveled_miles: Option<f64>,
    /// Latest position fix.
    pub current_position: Option<Coord<f64>>,
    /// Index of the route segment the vehicle is on.
    pub current_segment_index: Option<usize>,
    /// Wall-clock bucket, when the driver re-derives it.
    pub time_of_day: Option<TimeOfDay>,
    /// Minutes since the last committed stop.
    pub minutes_since_last_stop: Option<f64>,
}

/// Mutable snapshot of a single trip in progress.
///
/// Created with zeroed defaults when a trip enters planning, mutated
/// through the update operations while the trip is active, and reset when
/// the trip is reset or ended. Pausing freezes updates at the session
/// layer; the context itself keeps its values.
///
/// # Examples
/// ```
/// use roadside_core::{ContextUpdate, TripContext};
///
/// let mut context = TripContext::new();
/// context.apply(ContextUpdate {
///     elapsed_driving_minutes: Some(45.0),
///     distance_traveled_miles: Some(38.5),
///     ..ContextUpdate::default()
/// });
/// assert_eq!(context.elapsed_driving_minutes(), 45.0);
/// assert_eq!(context.estimated_fuel_remaining(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TripContext {
    elapsed_driving_minutes: f64,
    estimated_fuel_remaining: f64,
    estimated_miles_remaining: f64,
    distance_traveled_miles: f64,
    current_position: Option<Coord<f64>>,
    current_segment_index: usize,
    time_of_day: TimeOfDay,
    last_stop_time: Option<NaiveDateTime>,
    minutes_since_last_stop: f64,
}

impl TripContext {
    /// Construct a context with trip-start defaults: nothing elapsed, a
    /// full tank estimate, no position fix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total driving time so far, minutes.
    #[must_use]
    pub const fn elapsed_driving_minutes(&self) -> f64 {
        self.elapsed_driving_minutes
    }

    /// Fuel remaining as a fraction of a full tank.
    #[must_use]
    pub const fn estimated_fuel_remaining(&self) -> f64 {
        self.estimated_fuel_remaining
    }

    /// Route distance still ahead, miles.
    #[must_use]
    pub const fn estimated_miles_remaining(&self) -> f64 {
        self.estimated_miles_remaining
    }

    /// Distance covered so far, miles.
    #[must_use]
    pub const fn distance_traveled_miles(&self) -> f64 {
        self.distance_traveled_miles
    }

    /// Latest position fix, if any.
    #[must_use]
    pub const fn current_position(&self) -> Option<Coord<f64>> {
        self.current_position
    }

    /// Index of the route segment the vehicle is on.
    #[must_use]
    pub const fn current_segment_index(&self) -> usize {
        self.current_segment_index
    }

    /// Current wall-clock bucket.
    #[must_use]
    pub const fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    /// When the traveler last stopped, if they have.
    #[must_use]
    pub const fn last_stop_time(&self) -> Option<NaiveDateTime> {
        self.last_stop_time
    }

    /// Minutes since the last committed stop.
    #[must_use]
    pub const fn minutes_since_last_stop(&self) -> f64 {
        self.minutes_since_last_stop
    }

    /// Record a new position fix.
    pub const fn set_position(&mut self, position: Coord<f64>) {
        self.current_position = Some(position);
    }

    /// Record a new fuel estimate, clamped into `0.0..=1.0`.
    pub fn set_fuel_level(&mut self, level: f64) {
        self.estimated_fuel_remaining = level.clamp(0.0, 1.0);
    }

    /// Apply a partial batch update.
    ///
    /// Elapsed minutes and distance traveled only move forward; a
    /// regressing estimate is logged and ignored. The fuel fraction is
    /// clamped into `0.0..=1.0`.
    pub fn apply(&mut self, update: ContextUpdate) {
        if let Some(minutes) = update.elapsed_driving_minutes {
            if minutes < self.elapsed_driving_minutes {
                warn!(
                    "ignoring elapsed-driving regression from {} to {minutes} minutes",
                    self.elapsed_driving_minutes
                );
            } else {
                self.elapsed_driving_minutes = minutes;
            }
        }
        if let Some(miles) = update.distance_traveled_miles {
            if miles < self.distance_traveled_miles {
                warn!(
                    "ignoring distance-traveled regression from {} to {miles} miles",
                    self.distance_traveled_miles
                );
            } else {
                self.distance_traveled_miles = miles;
            }
        }
        if let Some(level) = update.estimated_fuel_remaining {
            self.set_fuel_level(level);
        }
        if let Some(miles) = update.estimated_miles_remaining {
            self.estimated_miles_remaining = miles;
        }
        if let Some(position) = update.current_position {
            self.current_position = Some(position);
        }
        if let Some(index) = update.current_segment_index {
            self.current_segment_index = index;
        }
        if let Some(bucket) = update.time_of_day {
            self.time_of_day = bucket;
        }
        if let Some(minutes) = update.minutes_since_last_stop {
            self.minutes_since_last_stop = minutes;
        }
    }

    /// Record that the traveler stopped at `now`.
    pub const fn record_stop(&mut self, now: NaiveDateTime) {
        self.last_stop_time = Some(now);
        self.minutes_since_last_stop = 0.0;
    }

    /// Re-derive the time-of-day bucket from the wall clock.
    pub fn refresh_time_of_day(&mut self, now: NaiveDateTime) {
        self.time_of_day = TimeOfDay::from_hour(chrono::Timelike::hour(&now));
    }

    /// Reset every field to trip-start defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for TripContext {
    fn default() -> Self {
        Self {
            elapsed_driving_minutes: 0.0,
            estimated_fuel_remaining: 1.0,
            estimated_miles_remaining: 0.0,
            distance_traveled_miles: 0.0,
            current_position: None,
            current_segment_index: 0,
            time_of_day: TimeOfDay::default(),
            last_stop_time: None,
            minutes_since_last_stop: 0.0,
        }
    }
}
