//! Trip session: status machine, context ownership, and the
//! recommendation and scheduled-stop lifecycle.
//!
//! A [`TripSession`] is an explicitly owned value passed by reference to
//! whoever drives the trip; there is no ambient shared store. It owns
//! the [`TripContext`], the planned route, the append-only
//! recommendation history, and the ordered list of stops the traveler
//! has committed to.
//!
//! Recommendation records are never deleted. Dismissal is a one-way
//! flag, and acceptance records the chosen stop id while the record
//! itself stays in the history.

use chrono::{NaiveDateTime, TimeDelta};
use geo::Coord;
use log::{debug, warn};
use thiserror::Error;

use roadside_core::{
    ContextUpdate, RoutePlan, Stop, StopCategory, TripContext, UserPreferences, VehicleProfile,
};

use crate::engine::{CandidatePools, EvaluationInput, Proposal, RankedStop, Trigger, evaluate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minutes during which a (category, trigger) pair will not re-fire.
pub const DEFAULT_REFIRE_WINDOW_MINUTES: u32 = 15;

/// Lifecycle state of the trip.
///
/// # Examples
/// ```
/// use roadside_advisor::TripStatus;
///
/// assert_eq!(TripStatus::Planning.as_str(), "planning");
/// assert_eq!(TripStatus::Paused.to_string(), "paused");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TripStatus {
    /// Route and profile are being set up.
    #[default]
    Planning,
    /// The vehicle is underway; telemetry updates apply.
    Active,
    /// Underway but frozen; values are preserved, updates ignored.
    Paused,
    /// The trip has ended.
    Completed,
}

impl TripStatus {
    /// Return the status as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a recommendation, unique within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RecommendationId(u64);

impl std::fmt::Display for RecommendationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A generated recommendation and its lifecycle flags.
///
/// Constructed by the session when a proposal survives the refire
/// window; mutated only through [`TripSession::dismiss`] and
/// [`TripSession::accept`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Recommendation {
    id: RecommendationId,
    category: StopCategory,
    trigger: Trigger,
    reason: String,
    stops: Vec<RankedStop>,
    created_at: NaiveDateTime,
    dismissed: bool,
    accepted_stop_id: Option<String>,
}

impl Recommendation {
    /// Session-unique identifier.
    #[must_use]
    pub const fn id(&self) -> RecommendationId {
        self.id
    }

    /// Category this recommendation covers.
    #[must_use]
    pub const fn category(&self) -> StopCategory {
        self.category
    }

    /// Condition that fired.
    #[must_use]
    pub const fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// Human-readable justification.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Ranked candidates, nearest first.
    #[must_use]
    pub fn stops(&self) -> &[RankedStop] {
        &self.stops
    }

    /// When this recommendation was generated.
    #[must_use]
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Whether the traveler dismissed it.
    #[must_use]
    pub const fn dismissed(&self) -> bool {
        self.dismissed
    }

    /// The accepted candidate's stop id, once accepted.
    #[must_use]
    pub fn accepted_stop_id(&self) -> Option<&str> {
        self.accepted_stop_id.as_deref()
    }
}

/// Errors returned by [`TripSession`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The requested status transition is not part of the lifecycle.
    #[error("cannot {action} while trip is {status}")]
    InvalidTransition {
        /// The attempted operation.
        action: &'static str,
        /// Status at the time of the attempt.
        status: TripStatus,
    },
    /// No recommendation carries the given id.
    #[error("unknown recommendation {0}")]
    UnknownRecommendation(RecommendationId),
    /// The stop id is not among the recommendation's candidates.
    #[error("stop {stop_id} is not a candidate of recommendation {id}")]
    UnknownStop {
        /// The recommendation that was addressed.
        id: RecommendationId,
        /// The stale or foreign stop id.
        stop_id: String,
    },
    /// The proposed order is not a permutation of the scheduled stops.
    #[error("reorder must be a permutation of the scheduled stops")]
    InvalidReorder,
}

/// One trip's owned state and the operations that mutate it.
///
/// All operations are plain synchronous calls; the caller serialises
/// access (one active trip per session, no internal locking).
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use roadside_advisor::{TripSession, TripStatus};
///
/// let mut session = TripSession::new();
/// let depart = NaiveDate::from_ymd_opt(2024, 6, 15)
///     .and_then(|d| d.and_hms_opt(9, 0, 0))
///     .expect("valid timestamp");
/// session.start(depart)?;
/// assert_eq!(session.status(), TripStatus::Active);
/// # Ok::<(), roadside_advisor::SessionError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TripSession {
    status: TripStatus,
    context: TripContext,
    route: Option<RoutePlan>,
    recommendations: Vec<Recommendation>,
    scheduled_stops: Vec<Stop>,
    next_recommendation_id: u64,
    refire_window_minutes: u32,
}

impl TripSession {
    /// Construct a session in the planning state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the refire-suppression window while returning `self`.
    #[must_use]
    pub const fn with_refire_window(mut self, minutes: u32) -> Self {
        self.refire_window_minutes = minutes;
        self
    }

    /// Current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TripStatus {
        self.status
    }

    /// The current trip snapshot.
    #[must_use]
    pub const fn context(&self) -> &TripContext {
        &self.context
    }

    /// The planned route, once set.
    #[must_use]
    pub const fn route(&self) -> Option<&RoutePlan> {
        self.route.as_ref()
    }

    /// Full recommendation history, oldest first.
    #[must_use]
    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Recommendations the traveler has not dismissed.
    pub fn active_recommendations(&self) -> impl Iterator<Item = &Recommendation> {
        self.recommendations.iter().filter(|r| !r.dismissed)
    }

    /// Look up one recommendation by id.
    #[must_use]
    pub fn recommendation(&self, id: RecommendationId) -> Option<&Recommendation> {
        self.recommendations.iter().find(|r| r.id == id)
    }

    /// Stops the traveler has committed to, in visiting order.
    #[must_use]
    pub fn scheduled_stops(&self) -> &[Stop] {
        &self.scheduled_stops
    }

    /// Begin the trip.
    ///
    /// Re-derives the context's time-of-day bucket from `now`.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidTransition`] unless the trip is in
    /// planning.
    pub fn start(&mut self, now: NaiveDateTime) -> Result<(), SessionError> {
        if self.status != TripStatus::Planning {
            return Err(SessionError::InvalidTransition {
                action: "start",
                status: self.status,
            });
        }
        self.status = TripStatus::Active;
        self.context.refresh_time_of_day(now);
        debug!("trip started");
        Ok(())
    }

    /// Freeze telemetry updates without losing state.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidTransition`] unless the trip is
    /// active.
    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.status != TripStatus::Active {
            return Err(SessionError::InvalidTransition {
                action: "pause",
                status: self.status,
            });
        }
        self.status = TripStatus::Paused;
        Ok(())
    }

    /// Resume a paused trip.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidTransition`] unless the trip is
    /// paused.
    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.status != TripStatus::Paused {
            return Err(SessionError::InvalidTransition {
                action: "resume",
                status: self.status,
            });
        }
        self.status = TripStatus::Active;
        Ok(())
    }

    /// End the trip, resetting the context to defaults.
    ///
    /// The recommendation history and scheduled stops are kept for
    /// review until [`reset`](Self::reset).
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidTransition`] unless the trip is
    /// active or paused.
    pub fn end(&mut self) -> Result<(), SessionError> {
        if !matches!(self.status, TripStatus::Active | TripStatus::Paused) {
            return Err(SessionError::InvalidTransition {
                action: "end",
                status: self.status,
            });
        }
        self.status = TripStatus::Completed;
        self.context.reset();
        debug!("trip ended");
        Ok(())
    }

    /// Return to planning, clearing every piece of trip state.
    ///
    /// The identifier counter deliberately survives, so recommendation
    /// ids stay unique across resets of one session.
    pub fn reset(&mut self) {
        self.status = TripStatus::Planning;
        self.context.reset();
        self.route = None;
        self.recommendations.clear();
        self.scheduled_stops.clear();
    }

    /// Store the planned route and seed the miles-remaining estimate.
    pub fn set_route(&mut self, plan: RoutePlan) {
        self.context.apply(ContextUpdate {
            estimated_miles_remaining: Some(plan.total_distance_miles),
            ..ContextUpdate::default()
        });
        self.route = Some(plan);
    }

    /// Record a position fix; applies only while active.
    pub fn update_position(&mut self, position: Coord<f64>) {
        if self.telemetry_applies("position update") {
            self.context.set_position(position);
        }
    }

    /// Record a fuel estimate; applies only while active.
    pub fn update_fuel_level(&mut self, level: f64) {
        if self.telemetry_applies("fuel update") {
            self.context.set_fuel_level(level);
        }
    }

    /// Apply a partial context update; applies only while active.
    pub fn update_context(&mut self, update: ContextUpdate) {
        if self.telemetry_applies("context update") {
            self.context.apply(update);
        }
    }

    /// Record that the traveler stopped; applies only while active.
    pub fn record_stop(&mut self, now: NaiveDateTime) {
        if self.telemetry_applies("stop bookkeeping") {
            self.context.record_stop(now);
        }
    }

    /// Evaluate the trigger engine and merge surviving proposals.
    ///
    /// Runs only while the trip is active. A proposal whose (category,
    /// trigger) pair matches any recommendation created within the
    /// refire window is suppressed, dismissed or not, so a freshly
    /// dismissed proposal does not immediately reappear. Returns the
    /// number of recommendations added.
    pub fn refresh_recommendations(
        &mut self,
        vehicle: &VehicleProfile,
        preferences: &UserPreferences,
        pools: &CandidatePools,
        now: NaiveDateTime,
    ) -> usize {
        if self.status != TripStatus::Active {
            debug!("skipping evaluation while trip is {}", self.status);
            return 0;
        }

        let proposals = evaluate(&EvaluationInput {
            fuel_range_miles: vehicle.remaining_range_miles(),
            context: &self.context,
            preferences,
            pools,
            now,
        });

        let mut added = 0;
        for proposal in proposals {
            if self.within_refire_window(&proposal, now) {
                debug!(
                    "suppressing {}/{} inside the refire window",
                    proposal.category, proposal.trigger
                );
                continue;
            }
            let id = self.mint_id();
            debug!(
                "recommendation {id}: {}/{} with {} stops",
                proposal.category,
                proposal.trigger,
                proposal.stops.len()
            );
            self.recommendations.push(Recommendation {
                id,
                category: proposal.category,
                trigger: proposal.trigger,
                reason: proposal.reason,
                stops: proposal.stops,
                created_at: now,
                dismissed: false,
                accepted_stop_id: None,
            });
            added += 1;
        }
        added
    }

    /// Flag a recommendation as dismissed.
    ///
    /// Idempotent: dismissing an already dismissed recommendation is a
    /// no-op.
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownRecommendation`] for an id this
    /// session never produced.
    pub fn dismiss(&mut self, id: RecommendationId) -> Result<(), SessionError> {
        let rec = self
            .recommendations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(SessionError::UnknownRecommendation(id))?;
        rec.dismissed = true;
        Ok(())
    }

    /// Accept one of a recommendation's candidates, scheduling the stop.
    ///
    /// Appends the chosen stop to the scheduled list and records its id
    /// on the recommendation. Accepting the same recommendation again
    /// with a different stop overwrites the recorded id and schedules
    /// the new stop as well; the earlier stop stays scheduled until
    /// removed explicitly.
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownRecommendation`] for an unknown
    /// id, and [`SessionError::UnknownStop`] when `stop_id` is not among
    /// the recommendation's candidates; in both cases the scheduled list
    /// is untouched.
    pub fn accept(&mut self, id: RecommendationId, stop_id: &str) -> Result<(), SessionError> {
        let rec = self
            .recommendations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(SessionError::UnknownRecommendation(id))?;
        let stop = rec
            .stops
            .iter()
            .find(|ranked| ranked.stop.id == stop_id)
            .map(|ranked| ranked.stop.clone())
            .ok_or_else(|| {
                warn!("accept of {id} referenced unknown stop {stop_id}");
                SessionError::UnknownStop {
                    id,
                    stop_id: stop_id.to_owned(),
                }
            })?;
        rec.accepted_stop_id = Some(stop_id.to_owned());
        self.scheduled_stops.push(stop);
        Ok(())
    }

    /// Remove the first scheduled stop with the given id.
    ///
    /// Returns whether a stop was removed; an absent id is a no-op.
    pub fn remove_scheduled_stop(&mut self, stop_id: &str) -> bool {
        let position = self.scheduled_stops.iter().position(|s| s.id == stop_id);
        position.map(|index| self.scheduled_stops.remove(index)).is_some()
    }

    /// Replace the scheduled list with a caller-supplied order.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidReorder`] unless `new_order`
    /// carries exactly the current stop ids (as a multiset); the list is
    /// untouched on failure.
    pub fn reorder_scheduled_stops(&mut self, new_order: Vec<Stop>) -> Result<(), SessionError> {
        let mut current: Vec<&str> = self.scheduled_stops.iter().map(|s| s.id.as_str()).collect();
        let mut proposed: Vec<&str> = new_order.iter().map(|s| s.id.as_str()).collect();
        current.sort_unstable();
        proposed.sort_unstable();
        if current != proposed {
            return Err(SessionError::InvalidReorder);
        }
        self.scheduled_stops = new_order;
        Ok(())
    }

    /// Drop the whole recommendation history.
    pub fn clear_recommendations(&mut self) {
        self.recommendations.clear();
    }

    /// Whether telemetry mutations currently apply.
    fn telemetry_applies(&self, what: &str) -> bool {
        if self.status == TripStatus::Active {
            true
        } else {
            debug!("ignoring {what} while trip is {}", self.status);
            false
        }
    }

    /// Whether a matching recommendation was created inside the window.
    fn within_refire_window(&self, proposal: &Proposal, now: NaiveDateTime) -> bool {
        let window = TimeDelta::minutes(i64::from(self.refire_window_minutes));
        self.recommendations.iter().any(|r| {
            r.category == proposal.category
                && r.trigger == proposal.trigger
                && now.signed_duration_since(r.created_at) < window
        })
    }

    fn mint_id(&mut self) -> RecommendationId {
        let id = RecommendationId(self.next_recommendation_id);
        self.next_recommendation_id += 1;
        id
    }
}

impl Default for TripSession {
    fn default() -> Self {
        Self {
            status: TripStatus::Planning,
            context: TripContext::new(),
            route: None,
            recommendations: Vec::new(),
            scheduled_stops: Vec::new(),
            next_recommendation_id: 0,
            refire_window_minutes: DEFAULT_REFIRE_WINDOW_MINUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RECOMMENDATIONS_PER_CATEGORY;
    use chrono::NaiveDate;
    use roadside_core::{FuelType, StopAttributes};
    use rstest::{fixture, rstest};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .expect("valid date")
            .and_hms_opt(hour, minute, 0)
            .expect("valid time")
    }

    fn fuel_stop(id: &str, x: f64) -> Stop {
        Stop::new(
            id,
            format!("Fuel {id}"),
            Coord { x, y: 0.0 },
            StopAttributes::Fuel {
                brand: "Shell".into(),
                fuel_price: None,
                amenities: Vec::new(),
            },
        )
    }

    fn low_fuel_vehicle() -> VehicleProfile {
        VehicleProfile::new("Wagon", FuelType::Gasoline, 14.0, 30.0, 0.1, 0.2)
            .expect("valid vehicle")
    }

    fn fuel_pools() -> CandidatePools {
        CandidatePools {
            fuel: vec![fuel_stop("f1", 0.05), fuel_stop("f2", 0.1)],
            ..CandidatePools::default()
        }
    }

    /// An active session positioned at the origin with a fuel
    /// recommendation already generated.
    #[fixture]
    fn session_with_recommendation() -> TripSession {
        let mut session = TripSession::new();
        session.start(at(9, 0)).expect("start from planning");
        session.update_position(Coord { x: 0.0, y: 0.0 });
        let added = session.refresh_recommendations(
            &low_fuel_vehicle(),
            &UserPreferences::default(),
            &fuel_pools(),
            at(9, 30),
        );
        assert_eq!(added, 1);
        session
    }

    fn first_recommendation_id(session: &TripSession) -> RecommendationId {
        session
            .recommendations()
            .first()
            .expect("one recommendation")
            .id()
    }

    #[test]
    fn lifecycle_transitions() {
        let mut session = TripSession::new();
        assert_eq!(session.status(), TripStatus::Planning);
        session.start(at(9, 0)).expect("start");
        session.pause().expect("pause");
        session.resume().expect("resume");
        session.end().expect("end");
        assert_eq!(session.status(), TripStatus::Completed);
    }

    #[rstest]
    #[case(TripStatus::Planning)]
    #[case(TripStatus::Completed)]
    fn pause_requires_active(#[case] status: TripStatus) {
        let mut session = TripSession::new();
        if status == TripStatus::Completed {
            session.start(at(9, 0)).expect("start");
            session.end().expect("end");
        }
        assert_eq!(
            session.pause().expect_err("invalid transition"),
            SessionError::InvalidTransition {
                action: "pause",
                status
            }
        );
    }

    #[test]
    fn start_twice_fails() {
        let mut session = TripSession::new();
        session.start(at(9, 0)).expect("start");
        assert!(matches!(
            session.start(at(9, 5)),
            Err(SessionError::InvalidTransition { action: "start", .. })
        ));
    }

    #[test]
    fn telemetry_is_frozen_while_paused() {
        let mut session = TripSession::new();
        session.start(at(9, 0)).expect("start");
        session.update_fuel_level(0.6);
        session.pause().expect("pause");
        session.update_fuel_level(0.1);
        session.update_position(Coord { x: 1.0, y: 1.0 });
        assert_eq!(session.context().estimated_fuel_remaining(), 0.6);
        assert!(session.context().current_position().is_none());
        session.resume().expect("resume");
        session.update_fuel_level(0.1);
        assert_eq!(session.context().estimated_fuel_remaining(), 0.1);
    }

    #[rstest]
    fn end_resets_context_but_keeps_history(session_with_recommendation: TripSession) {
        let mut session = session_with_recommendation;
        session.end().expect("end");
        assert_eq!(session.context(), &TripContext::new());
        assert_eq!(session.recommendations().len(), 1);
    }

    #[rstest]
    fn reset_clears_everything(session_with_recommendation: TripSession) {
        let mut session = session_with_recommendation;
        let id = first_recommendation_id(&session);
        session.accept(id, "f1").expect("accept");
        session.reset();
        assert_eq!(session.status(), TripStatus::Planning);
        assert!(session.recommendations().is_empty());
        assert!(session.scheduled_stops().is_empty());
        assert_eq!(session.context(), &TripContext::new());
    }

    #[test]
    fn set_route_seeds_miles_remaining() {
        let mut session = TripSession::new();
        session.set_route(RoutePlan::new(Vec::new(), 480.0, 510.0));
        assert_eq!(session.context().estimated_miles_remaining(), 480.0);
        assert!(session.route().is_some());
    }

    #[test]
    fn evaluation_requires_active_trip() {
        let mut session = TripSession::new();
        let added = session.refresh_recommendations(
            &low_fuel_vehicle(),
            &UserPreferences::default(),
            &fuel_pools(),
            at(9, 30),
        );
        assert_eq!(added, 0);
        assert!(session.recommendations().is_empty());
    }

    #[rstest]
    fn refire_window_suppresses_duplicates(session_with_recommendation: TripSession) {
        let mut session = session_with_recommendation;
        let added = session.refresh_recommendations(
            &low_fuel_vehicle(),
            &UserPreferences::default(),
            &fuel_pools(),
            at(9, 35),
        );
        assert_eq!(added, 0);
        assert_eq!(session.recommendations().len(), 1);
    }

    #[rstest]
    fn refire_window_expires(session_with_recommendation: TripSession) {
        let mut session = session_with_recommendation;
        let added = session.refresh_recommendations(
            &low_fuel_vehicle(),
            &UserPreferences::default(),
            &fuel_pools(),
            at(9, 50),
        );
        assert_eq!(added, 1);
        assert_eq!(session.recommendations().len(), 2);
    }

    #[rstest]
    fn dismissal_holds_for_the_window(session_with_recommendation: TripSession) {
        let mut session = session_with_recommendation;
        let id = first_recommendation_id(&session);
        session.dismiss(id).expect("dismiss");
        let added = session.refresh_recommendations(
            &low_fuel_vehicle(),
            &UserPreferences::default(),
            &fuel_pools(),
            at(9, 40),
        );
        assert_eq!(added, 0, "dismissal suppresses refiring inside the window");
    }

    #[rstest]
    fn dismiss_is_idempotent(session_with_recommendation: TripSession) {
        let mut session = session_with_recommendation;
        let id = first_recommendation_id(&session);
        session.dismiss(id).expect("first dismiss");
        session.dismiss(id).expect("second dismiss is a no-op");
        let rec = session.recommendation(id).expect("recommendation kept");
        assert!(rec.dismissed());
        assert_eq!(session.active_recommendations().count(), 0);
    }

    #[test]
    fn dismiss_unknown_id_errors() {
        let mut session = TripSession::new();
        let missing = RecommendationId(99);
        assert_eq!(
            session.dismiss(missing).expect_err("unknown id"),
            SessionError::UnknownRecommendation(missing)
        );
    }

    #[rstest]
    fn accept_schedules_the_chosen_stop(session_with_recommendation: TripSession) {
        let mut session = session_with_recommendation;
        let id = first_recommendation_id(&session);
        session.accept(id, "f1").expect("accept");
        let rec = session.recommendation(id).expect("recommendation kept");
        assert_eq!(rec.accepted_stop_id(), Some("f1"));
        let ids: Vec<&str> = session.scheduled_stops().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["f1"]);
    }

    #[rstest]
    fn accept_with_stale_stop_is_observable(session_with_recommendation: TripSession) {
        let mut session = session_with_recommendation;
        let id = first_recommendation_id(&session);
        let err = session.accept(id, "ghost").expect_err("stale stop id");
        assert_eq!(
            err,
            SessionError::UnknownStop {
                id,
                stop_id: "ghost".into()
            }
        );
        assert!(session.scheduled_stops().is_empty());
        let rec = session.recommendation(id).expect("recommendation kept");
        assert_eq!(rec.accepted_stop_id(), None);
    }

    #[rstest]
    fn second_accept_overwrites_without_unscheduling(session_with_recommendation: TripSession) {
        let mut session = session_with_recommendation;
        let id = first_recommendation_id(&session);
        session.accept(id, "f1").expect("first accept");
        session.accept(id, "f2").expect("second accept");
        let rec = session.recommendation(id).expect("recommendation kept");
        assert_eq!(rec.accepted_stop_id(), Some("f2"));
        let ids: Vec<&str> = session.scheduled_stops().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "f2"], "earlier stop stays scheduled");
    }

    #[rstest]
    fn remove_scheduled_stop_by_id(session_with_recommendation: TripSession) {
        let mut session = session_with_recommendation;
        let id = first_recommendation_id(&session);
        session.accept(id, "f1").expect("accept");
        assert!(session.remove_scheduled_stop("f1"));
        assert!(!session.remove_scheduled_stop("f1"), "absent id is a no-op");
        assert!(session.scheduled_stops().is_empty());
    }

    #[rstest]
    fn reorder_accepts_a_permutation(session_with_recommendation: TripSession) {
        let mut session = session_with_recommendation;
        let id = first_recommendation_id(&session);
        session.accept(id, "f1").expect("accept f1");
        session.accept(id, "f2").expect("accept f2");
        let mut reversed: Vec<Stop> = session.scheduled_stops().to_vec();
        reversed.reverse();
        session.reorder_scheduled_stops(reversed).expect("permutation");
        let ids: Vec<&str> = session.scheduled_stops().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["f2", "f1"]);
    }

    #[rstest]
    fn reorder_rejects_non_permutations(session_with_recommendation: TripSession) {
        let mut session = session_with_recommendation;
        let id = first_recommendation_id(&session);
        session.accept(id, "f1").expect("accept");
        let err = session
            .reorder_scheduled_stops(vec![fuel_stop("other", 0.2)])
            .expect_err("foreign stop");
        assert_eq!(err, SessionError::InvalidReorder);
        let ids: Vec<&str> = session.scheduled_stops().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["f1"], "list untouched on failure");
    }

    #[rstest]
    fn clear_recommendations_empties_history(session_with_recommendation: TripSession) {
        let mut session = session_with_recommendation;
        session.clear_recommendations();
        assert!(session.recommendations().is_empty());
    }

    #[test]
    fn recommendation_ids_stay_unique_across_resets() {
        let mut session = TripSession::new();
        session.start(at(9, 0)).expect("start");
        session.update_position(Coord { x: 0.0, y: 0.0 });
        session.refresh_recommendations(
            &low_fuel_vehicle(),
            &UserPreferences::default(),
            &fuel_pools(),
            at(9, 30),
        );
        let first = first_recommendation_id(&session);
        session.reset();
        session.start(at(10, 0)).expect("restart");
        session.update_position(Coord { x: 0.0, y: 0.0 });
        session.refresh_recommendations(
            &low_fuel_vehicle(),
            &UserPreferences::default(),
            &fuel_pools(),
            at(10, 30),
        );
        let second = first_recommendation_id(&session);
        assert_ne!(first, second);
    }

    #[test]
    fn truncation_cap_matches_engine_constant() {
        let mut session = TripSession::new();
        session.start(at(9, 0)).expect("start");
        session.update_position(Coord { x: 0.0, y: 0.0 });
        let pools = CandidatePools {
            fuel: (0..6)
                .map(|i| {
                    #[expect(
                        clippy::cast_precision_loss,
                        clippy::float_arithmetic,
                        reason = "tiny test offsets"
                    )]
                    let offset = 0.01 * f64::from(i + 1);
                    fuel_stop(&format!("f{i}"), offset)
                })
                .collect(),
            ..CandidatePools::default()
        };
        session.refresh_recommendations(
            &low_fuel_vehicle(),
            &UserPreferences::default(),
            &pools,
            at(9, 30),
        );
        let rec = session.recommendations().first().expect("one recommendation");
        assert_eq!(rec.stops().len(), RECOMMENDATIONS_PER_CATEGORY);
    }
}
