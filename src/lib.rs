//! Facade crate for the Roadside trip engine.
//!
//! This crate re-exports the core domain types alongside the trigger
//! engine and the trip-session lifecycle so applications depend on one
//! crate.

#![forbid(unsafe_code)]

pub use roadside_core::{
    BudgetLevel, ContextUpdate, DiningPreferences, FuelType, LodgingPreferences, PolylineError,
    RoutePlan, Stop, StopAttributes, StopCategory, TimeOfDay, TripContext, UserPreferences,
    VehicleProfile, VehicleProfileError, geo, polyline,
};

pub use roadside_advisor::{
    CandidatePools, DEFAULT_REFIRE_WINDOW_MINUTES, EVENING_LODGING_HOUR, EvaluationInput,
    FUEL_WARNING_THRESHOLD, Proposal, RECOMMENDATIONS_PER_CATEGORY, RankedStop, Recommendation,
    RecommendationId, SessionError, Trigger, TripSession, TripStatus, evaluate, is_night,
};
