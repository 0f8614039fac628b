//! Vehicle fuel and range modelling.
//!
//! A [`VehicleProfile`] converts tank capacity, the current fuel fraction,
//! and efficiency into a remaining-range estimate, and evaluates the
//! low-fuel condition against the driver's safety buffer. Construction
//! validates the numeric contract; later fuel-level updates clamp instead,
//! since they arrive from a telemetry stream that may overshoot slightly.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Propulsion type of the vehicle.
///
/// # Examples
/// ```
/// use roadside_core::FuelType;
///
/// assert_eq!(FuelType::Diesel.as_str(), "diesel");
/// assert_eq!(FuelType::Gasoline.to_string(), "gasoline");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FuelType {
    /// Petrol engine.
    #[default]
    Gasoline,
    /// Diesel engine.
    Diesel,
    /// Battery-electric; "fuel" fields model charge instead.
    Electric,
    /// Combined combustion and electric drive.
    Hybrid,
}

impl FuelType {
    /// Return the fuel type as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gasoline => "gasoline",
            Self::Diesel => "diesel",
            Self::Electric => "electric",
            Self::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gasoline" => Ok(Self::Gasoline),
            "diesel" => Ok(Self::Diesel),
            "electric" => Ok(Self::Electric),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(format!("unknown fuel type '{s}'")),
        }
    }
}

/// Errors returned by [`VehicleProfile::new`].
#[derive(Debug, Error, PartialEq)]
pub enum VehicleProfileError {
    /// Tank capacity must be a positive number of gallons.
    #[error("tank capacity must be positive, got {0}")]
    NonPositiveCapacity(f64),
    /// Fuel efficiency must be a positive miles-per-gallon figure.
    #[error("fuel efficiency must be positive, got {0}")]
    NonPositiveEfficiency(f64),
    /// The current fuel level is a fraction of a full tank.
    #[error("fuel level must be within 0.0..=1.0, got {0}")]
    FuelLevelOutOfRange(f64),
    /// The safety buffer is a fraction of a full tank.
    #[error("safety buffer must be within 0.0..=1.0, got {0}")]
    SafetyBufferOutOfRange(f64),
}

/// A driver's vehicle, as read from their profile.
///
/// Read-only to the trip core apart from [`set_fuel_level`], which the
/// telemetry driver calls as consumption estimates arrive.
///
/// # Examples
/// ```
/// use roadside_core::{FuelType, VehicleProfile};
///
/// let vehicle = VehicleProfile::new("Wagon", FuelType::Gasoline, 14.0, 30.0, 0.1, 0.2)?;
/// assert!((vehicle.remaining_range_miles() - 42.0).abs() < 1e-9);
/// assert!(vehicle.is_fuel_low());
/// # Ok::<(), roadside_core::VehicleProfileError>(())
/// ```
///
/// [`set_fuel_level`]: VehicleProfile::set_fuel_level
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehicleProfile {
    name: String,
    fuel_type: FuelType,
    tank_capacity_gallons: f64,
    fuel_efficiency_mpg: f64,
    current_fuel_level: f64,
    safety_buffer: f64,
}

impl VehicleProfile {
    /// Validate and construct a [`VehicleProfile`].
    ///
    /// `current_fuel_level` and `safety_buffer` are fractions of a full
    /// tank in `0.0..=1.0`.
    ///
    /// # Errors
    /// Returns [`VehicleProfileError`] when capacity or efficiency is not
    /// positive, or when either fraction falls outside `0.0..=1.0`.
    pub fn new(
        name: impl Into<String>,
        fuel_type: FuelType,
        tank_capacity_gallons: f64,
        fuel_efficiency_mpg: f64,
        current_fuel_level: f64,
        safety_buffer: f64,
    ) -> Result<Self, VehicleProfileError> {
        if !tank_capacity_gallons.is_finite() || tank_capacity_gallons <= 0.0 {
            return Err(VehicleProfileError::NonPositiveCapacity(
                tank_capacity_gallons,
            ));
        }
        if !fuel_efficiency_mpg.is_finite() || fuel_efficiency_mpg <= 0.0 {
            return Err(VehicleProfileError::NonPositiveEfficiency(
                fuel_efficiency_mpg,
            ));
        }
        if !(0.0..=1.0).contains(&current_fuel_level) {
            return Err(VehicleProfileError::FuelLevelOutOfRange(current_fuel_level));
        }
        if !(0.0..=1.0).contains(&safety_buffer) {
            return Err(VehicleProfileError::SafetyBufferOutOfRange(safety_buffer));
        }
        Ok(Self {
            name: name.into(),
            fuel_type,
            tank_capacity_gallons,
            fuel_efficiency_mpg,
            current_fuel_level,
            safety_buffer,
        })
    }

    /// Display name of the vehicle.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Propulsion type.
    #[must_use]
    pub const fn fuel_type(&self) -> FuelType {
        self.fuel_type
    }

    /// Tank capacity in gallons.
    #[must_use]
    pub const fn tank_capacity_gallons(&self) -> f64 {
        self.tank_capacity_gallons
    }

    /// Rated efficiency in miles per gallon.
    #[must_use]
    pub const fn fuel_efficiency_mpg(&self) -> f64 {
        self.fuel_efficiency_mpg
    }

    /// Current fuel level as a fraction of a full tank.
    #[must_use]
    pub const fn current_fuel_level(&self) -> f64 {
        self.current_fuel_level
    }

    /// Safety buffer as a fraction of a full tank.
    #[must_use]
    pub const fn safety_buffer(&self) -> f64 {
        self.safety_buffer
    }

    /// Replace the current fuel level, clamping into `0.0..=1.0`.
    ///
    /// Telemetry estimates may drift slightly past the tank bounds; the
    /// clamp keeps the stored fraction valid without failing the stream.
    pub fn set_fuel_level(&mut self, level: f64) {
        self.current_fuel_level = level.clamp(0.0, 1.0);
    }

    /// Estimated remaining range in statute miles.
    ///
    /// Capacity times fuel fraction times efficiency; no rounding, the
    /// caller formats for display.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "range estimation is a floating-point product"
    )]
    pub fn remaining_range_miles(&self) -> f64 {
        self.tank_capacity_gallons * self.current_fuel_level * self.fuel_efficiency_mpg
    }

    /// Whether the fuel level has reached the safety buffer.
    ///
    /// Inclusive comparison: a level exactly at the buffer counts as low.
    #[must_use]
    pub fn is_fuel_low(&self) -> bool {
        self.current_fuel_level <= self.safety_buffer
    }
}

impl Default for VehicleProfile {
    /// A full 14-gallon, 30 mpg gasoline vehicle with a 20% buffer.
    fn default() -> Self {
        Self {
            name: String::new(),
            fuel_type: FuelType::Gasoline,
            tank_capacity_gallons: 14.0,
            fuel_efficiency_mpg: 30.0,
            current_fuel_level: 1.0,
            safety_buffer: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn vehicle(level: f64, buffer: f64) -> VehicleProfile {
        VehicleProfile::new("Test", FuelType::Gasoline, 14.0, 30.0, level, buffer)
            .expect("valid test vehicle")
    }

    #[test]
    fn range_is_capacity_times_level_times_efficiency() {
        assert!((vehicle(0.1, 0.2).remaining_range_miles() - 42.0).abs() < 1e-9);
        assert_eq!(vehicle(1.0, 0.2).remaining_range_miles(), 420.0);
    }

    #[rstest]
    #[case(0.1, 0.2, true)]
    #[case(0.2, 0.2, true)] // boundary is inclusive
    #[case(0.21, 0.2, false)]
    #[case(0.0, 0.0, true)]
    #[case(1.0, 0.2, false)]
    fn fuel_low_against_buffer(#[case] level: f64, #[case] buffer: f64, #[case] expected: bool) {
        assert_eq!(vehicle(level, buffer).is_fuel_low(), expected);
    }

    #[rstest]
    #[case(0.0, 30.0, 0.5, 0.2)]
    #[case(-1.0, 30.0, 0.5, 0.2)]
    #[case(14.0, 0.0, 0.5, 0.2)]
    #[case(14.0, 30.0, 1.5, 0.2)]
    #[case(14.0, 30.0, -0.1, 0.2)]
    #[case(14.0, 30.0, 0.5, 1.2)]
    fn constructor_rejects_invalid_numbers(
        #[case] capacity: f64,
        #[case] mpg: f64,
        #[case] level: f64,
        #[case] buffer: f64,
    ) {
        let result = VehicleProfile::new("Bad", FuelType::Gasoline, capacity, mpg, level, buffer);
        assert!(result.is_err());
    }

    #[test]
    fn set_fuel_level_clamps() {
        let mut v = vehicle(0.5, 0.2);
        v.set_fuel_level(1.4);
        assert_eq!(v.current_fuel_level(), 1.0);
        v.set_fuel_level(-0.3);
        assert_eq!(v.current_fuel_level(), 0.0);
    }

    #[test]
    fn default_matches_profile_defaults() {
        let v = VehicleProfile::default();
        assert_eq!(v.tank_capacity_gallons(), 14.0);
        assert_eq!(v.fuel_efficiency_mpg(), 30.0);
        assert_eq!(v.current_fuel_level(), 1.0);
        assert_eq!(v.safety_buffer(), 0.2);
        assert!(!v.is_fuel_low());
    }

    #[test]
    fn fuel_type_parsing_rejects_unknown() {
        let err = FuelType::from_str("steam").expect_err("unknown fuel type");
        assert!(err.contains("unknown fuel type"));
    }
}
