//! Trip advisor for the Roadside engine.
//!
//! The crate provides two complementary capabilities:
//! - **Trigger evaluation** ([`evaluate`]) is a pure decision function
//!   that checks each stop category's gate (fuel range, rest cadence,
//!   nightfall) against the current [`TripContext`](roadside_core::TripContext)
//!   and ranks surviving candidates by great-circle distance.
//! - **Lifecycle management** ([`TripSession`]) owns the trip's status
//!   machine, context, recommendation history, and the scheduled-stop
//!   list, applying accept/dismiss transitions and suppressing proposals
//!   that would re-fire inside the configured window.
//!
//! The crate has no clock and no I/O: wall-clock instants, telemetry,
//! and candidate pools are all inputs, so every operation is
//! deterministic and synchronous.

#![forbid(unsafe_code)]

pub mod engine;
pub mod session;

pub use engine::{
    CandidatePools, EVENING_LODGING_HOUR, EvaluationInput, FUEL_WARNING_THRESHOLD, Proposal,
    RECOMMENDATIONS_PER_CATEGORY, RankedStop, Trigger, evaluate, is_night,
};
pub use session::{
    DEFAULT_REFIRE_WINDOW_MINUTES, Recommendation, RecommendationId, SessionError, TripSession,
    TripStatus,
};
