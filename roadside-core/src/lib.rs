//! Core domain types for the Roadside trip engine.
//!
//! The crate models one road trip in progress: the vehicle and its fuel
//! range, the traveler's preferences, candidate stops from a places
//! provider, the planned route geometry, and the continuously updated
//! [`TripContext`] snapshot. Everything here is pure data and pure
//! functions; the decision logic lives in `roadside-advisor`.
//!
//! Constructors validate their numeric contracts and return `Result` to
//! surface invalid input early; streaming mutations clamp or ignore
//! out-of-contract values instead, so a noisy telemetry feed degrades
//! gracefully rather than failing the trip.

#![forbid(unsafe_code)]

pub mod context;
pub mod geo;
pub mod polyline;
pub mod preferences;
pub mod route;
pub mod stop;
pub mod vehicle;

pub use context::{ContextUpdate, TimeOfDay, TripContext};
pub use polyline::PolylineError;
pub use preferences::{BudgetLevel, DiningPreferences, LodgingPreferences, UserPreferences};
pub use route::RoutePlan;
pub use stop::{Stop, StopAttributes, StopCategory};
pub use vehicle::{FuelType, VehicleProfile, VehicleProfileError};
