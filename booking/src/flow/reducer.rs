//! Reducer for the booking wizard.

use crate::error::BookingError;
use crate::flow::{FlowAction, FlowEnvironment, FlowState, ReservationDomain, Step};
use crate::gateway::BookingRequest;
use crate::types::{Booking, BookingStatus, ClockHour, ReservationKind, TimeSlot};
use courtside_core::async_effect;
use courtside_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::marker::PhantomData;
use std::sync::Arc;

type Effects<D> = SmallVec<[Effect<FlowAction<D>>; 4]>;

/// Drives one reservation wizard from selection to a confirmed booking
///
/// Steps only move forward when the selections they depend on are present.
/// Finding one missing sends the flow back to [`Step::Selection`]. While a
/// submit is in flight every command except `ClearError` and
/// `CancelBooking` is refused.
pub struct FlowReducer<D> {
    _domain: PhantomData<fn() -> D>,
}

impl<D: ReservationDomain> FlowReducer<D> {
    /// Create a new flow reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _domain: PhantomData,
        }
    }

    fn refuse(state: &FlowState<D>, action: &'static str, reason: &'static str) -> Effects<D> {
        tracing::warn!(
            kind = D::KIND.as_str(),
            step = ?state.step,
            action,
            reason,
            "Action refused"
        );
        SmallVec::new()
    }

    fn fail(state: &mut FlowState<D>, error: BookingError) -> Effects<D> {
        tracing::info!(
            kind = D::KIND.as_str(),
            step = ?state.step,
            error_kind = error.kind().as_str(),
            %error,
            "Flow error"
        );
        state.error = Some(error);
        SmallVec::new()
    }

    /// Fresh state that keeps history and any in-flight cancellation
    fn restarted(state: &mut FlowState<D>) -> FlowState<D> {
        FlowState {
            bookings: std::mem::take(&mut state.bookings),
            cancelling: state.cancelling.take(),
            ..FlowState::default()
        }
    }

    /// Move to `target`, or back to the start if a selection it needs is missing
    fn enter(state: &mut FlowState<D>, target: Step, env: &FlowEnvironment) -> Effects<D> {
        if let Some(missing) = state.missing_for(target) {
            tracing::warn!(
                kind = D::KIND.as_str(),
                from = ?state.step,
                to = ?target,
                missing,
                "Selection missing, restarting flow"
            );
            *state = Self::restarted(state);
            state.error = Some(BookingError::MissingInformation { missing });
            return SmallVec::new();
        }

        tracing::debug!(kind = D::KIND.as_str(), from = ?state.step, to = ?target, "Step changed");
        state.step = target;

        if target == Step::DateTime {
            if state.date.is_none() {
                state.date = Some(env.clock.today());
            }
            return Self::load_slots(state, env);
        }
        SmallVec::new()
    }

    fn load_slots(state: &mut FlowState<D>, env: &FlowEnvironment) -> Effects<D> {
        let Some(query) = state.slot_query() else {
            return SmallVec::new();
        };

        state.loading_slots = true;
        state.slots.clear();

        let gateway = Arc::clone(&env.gateway);
        smallvec![async_effect! {
            match gateway.available_slots(query.clone()).await {
                Ok(slots) => Some(FlowAction::SlotsLoaded { query, slots }),
                Err(error) => Some(FlowAction::SlotsFailed { query, error }),
            }
        }]
    }

    fn end_of(slot: &TimeSlot, state: &FlowState<D>) -> Result<ClockHour, BookingError> {
        slot.time
            .plus(state.duration)
            .ok_or_else(|| BookingError::PastMidnight {
                start: slot.time.to_string(),
                hours: state.duration.get(),
            })
    }

    fn submit(state: &mut FlowState<D>, env: &FlowEnvironment) -> Effects<D> {
        if let Some(missing) = state.missing_for(Step::Confirmation) {
            return Self::fail(state, BookingError::MissingInformation { missing });
        }
        if state.step != Step::Confirmation {
            return Self::fail(state, BookingError::NotReady);
        }

        let (Some(primary), Some(secondary), Some(date), Some(selected)) = (
            state.primary.as_ref(),
            state.secondary.as_ref(),
            state.date,
            state.selected_slot,
        ) else {
            return SmallVec::new();
        };

        // Availability may have changed since the slot was picked.
        let still_open = state
            .slots
            .iter()
            .any(|slot| slot.time == selected.time && slot.available);
        if !still_open {
            return Self::fail(
                state,
                BookingError::SlotUnavailable {
                    time: selected.time.to_string(),
                },
            );
        }
        if let Err(error) = Self::end_of(&selected, state) {
            return Self::fail(state, error);
        }

        let request = BookingRequest {
            venue_id: D::venue(primary, secondary),
            resource: D::resource(primary, secondary),
            date,
            start: selected.time,
            duration: state.duration,
            contact: state.contact.clone(),
        };

        tracing::info!(
            kind = D::KIND.as_str(),
            venue = %request.venue_id,
            resource = request.resource.id(),
            date = %date,
            start = %selected.time,
            hours = state.duration.get(),
            "Submitting booking"
        );

        state.submitting = true;
        state.error = None;

        let gateway = Arc::clone(&env.gateway);
        smallvec![async_effect! {
            match gateway.submit(request).await {
                Ok(confirmation) => Some(FlowAction::BookingConfirmed { confirmation }),
                Err(error) => Some(FlowAction::BookingRejected { error }),
            }
        }]
    }

    fn confirmed_booking(
        state: &FlowState<D>,
        confirmation: crate::gateway::Confirmation,
    ) -> Result<Booking, BookingError> {
        let missing = |missing| BookingError::MissingInformation { missing };
        let primary = state.primary.as_ref().ok_or_else(|| missing(D::PRIMARY))?;
        let secondary = state.secondary.as_ref().ok_or_else(|| missing(D::SECONDARY))?;
        let date = state.date.ok_or_else(|| missing("date"))?;
        let slot = state.selected_slot.ok_or_else(|| missing("time slot"))?;
        let end = Self::end_of(&slot, state)?;

        Ok(Booking {
            id: confirmation.booking_id,
            kind: D::KIND,
            venue_id: D::venue(primary, secondary),
            details: D::details(primary, secondary, &state.extras, confirmation.court_label),
            date,
            start: slot.time,
            end,
            duration: state.duration,
            total_price: slot.price.times(state.duration),
            status: BookingStatus::Confirmed,
            contact: state.contact.clone(),
            created_at: confirmation.created_at,
        })
    }
}

impl<D: ReservationDomain> Default for FlowReducer<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for FlowReducer<D> {
    fn clone(&self) -> Self {
        Self {
            _domain: PhantomData,
        }
    }
}

impl<D> std::fmt::Debug for FlowReducer<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FlowReducer")
    }
}

impl<D: ReservationDomain> Reducer for FlowReducer<D> {
    type State = FlowState<D>;
    type Action = FlowAction<D>;
    type Environment = FlowEnvironment;

    #[allow(clippy::too_many_lines)] // one arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let name = action.name();

        if state.submitting
            && action.is_command()
            && !matches!(action, FlowAction::ClearError | FlowAction::CancelBooking { .. })
        {
            return Self::refuse(state, name, "submit in flight");
        }

        match action {
            // ========== Selection ==========
            FlowAction::SelectPrimary { primary } => {
                if state.step != Step::Selection {
                    return Self::refuse(state, name, "not on the selection step");
                }
                if state.primary.as_ref() != Some(&primary) {
                    state.secondary = None;
                    state.slots.clear();
                    state.selected_slot = None;
                }
                state.primary = Some(primary);
                state.error = None;
                SmallVec::new()
            },

            FlowAction::SelectSecondary { secondary } => {
                if state.step != Step::ResourceSelection {
                    return Self::refuse(state, name, "not on the resource step");
                }
                if state.secondary.as_ref() != Some(&secondary) {
                    state.slots.clear();
                    state.selected_slot = None;
                }
                state.secondary = Some(secondary);
                state.error = None;
                SmallVec::new()
            },

            FlowAction::SelectDate { date } => {
                if state.step != Step::DateTime {
                    return Self::refuse(state, name, "not on the date step");
                }
                if date < env.clock.today() {
                    return Self::fail(
                        state,
                        BookingError::DateInPast {
                            date: date.to_string(),
                        },
                    );
                }
                if state.date == Some(date) {
                    // Same date: only a failed or empty answer is worth asking again
                    let retry = !state.loading_slots && (state.error.is_some() || state.slots.is_empty());
                    if !retry {
                        return SmallVec::new();
                    }
                }
                state.date = Some(date);
                state.selected_slot = None;
                state.error = None;
                Self::load_slots(state, env)
            },

            FlowAction::SelectSlot { time } => {
                if state.step != Step::DateTime {
                    return Self::refuse(state, name, "not on the date step");
                }
                match state.slots.iter().find(|slot| slot.time == time) {
                    Some(slot) if slot.available => {
                        state.selected_slot = Some(*slot);
                        state.error = None;
                        SmallVec::new()
                    },
                    _ => Self::fail(
                        state,
                        BookingError::SlotUnavailable {
                            time: time.to_string(),
                        },
                    ),
                }
            },

            FlowAction::SetDuration { hours } => {
                if !matches!(state.step, Step::DateTime | Step::Confirmation) {
                    return Self::refuse(state, name, "duration is chosen with the time");
                }
                state.duration = hours;
                SmallVec::new()
            },

            FlowAction::SetExtras { extras } => {
                state.extras = extras;
                SmallVec::new()
            },

            FlowAction::SetContact { contact } => {
                state.contact = contact;
                SmallVec::new()
            },

            // ========== Navigation ==========
            FlowAction::Proceed => match state.step.next() {
                Some(Step::Confirmation) if state.loading_slots => {
                    Self::refuse(state, name, "slots still loading")
                },
                Some(Step::Confirmation) => {
                    if state.missing_for(Step::Confirmation).is_none() {
                        if let Some(slot) = state.selected_slot {
                            if let Err(error) = Self::end_of(&slot, state) {
                                return Self::fail(state, error);
                            }
                        }
                    }
                    Self::enter(state, Step::Confirmation, env)
                },
                Some(next) => Self::enter(state, next, env),
                None => Self::refuse(state, name, "no next step"),
            },

            FlowAction::Back => match state.step.previous() {
                Some(Step::DateTime) => Self::enter(state, Step::DateTime, env),
                Some(previous) => {
                    tracing::debug!(kind = D::KIND.as_str(), from = ?state.step, to = ?previous, "Step changed");
                    state.step = previous;
                    state.loading_slots = false;
                    SmallVec::new()
                },
                None => Self::refuse(state, name, "no previous step"),
            },

            FlowAction::Submit => Self::submit(state, env),

            FlowAction::CancelBooking { booking_id } => {
                if state.cancelling.is_some() {
                    return Self::refuse(state, name, "cancellation in flight");
                }
                let cancellable = state
                    .booking(&booking_id)
                    .is_some_and(|booking| booking.status == BookingStatus::Confirmed);
                if !cancellable {
                    return Self::fail(state, BookingError::not_found("booking", booking_id.as_str()));
                }

                state.cancelling = Some(booking_id.clone());
                let gateway = Arc::clone(&env.gateway);
                smallvec![async_effect! {
                    match gateway.cancel(booking_id.clone()).await {
                        Ok(()) => Some(FlowAction::BookingCancelled { booking_id }),
                        Err(error) => Some(FlowAction::CancellationFailed { booking_id, error }),
                    }
                }]
            },

            FlowAction::ClearError => {
                state.error = None;
                SmallVec::new()
            },

            FlowAction::Reset => {
                *state = Self::restarted(state);
                tracing::debug!(kind = D::KIND.as_str(), "Flow reset");
                SmallVec::new()
            },

            // ========== Gateway outcomes ==========
            FlowAction::SlotsLoaded { query, slots } => {
                if state.step != Step::DateTime || state.slot_query().as_ref() != Some(&query) {
                    tracing::debug!(kind = D::KIND.as_str(), date = %query.date, "Ignoring stale slots");
                    return SmallVec::new();
                }

                state.loading_slots = false;
                state.selected_slot = state.selected_slot.and_then(|selected| {
                    slots
                        .iter()
                        .find(|slot| slot.time == selected.time && slot.available)
                        .copied()
                });
                state.slots = slots;
                SmallVec::new()
            },

            FlowAction::SlotsFailed { query, error } => {
                if state.step != Step::DateTime || state.slot_query().as_ref() != Some(&query) {
                    return SmallVec::new();
                }
                state.loading_slots = false;
                state.slots.clear();
                state.selected_slot = None;
                Self::fail(state, error)
            },

            FlowAction::BookingConfirmed { confirmation } => {
                if !state.submitting {
                    return Self::refuse(state, name, "no submit in flight");
                }
                state.submitting = false;

                match Self::confirmed_booking(state, confirmation) {
                    Ok(booking) => {
                        tracing::info!(
                            kind = D::KIND.as_str(),
                            booking_id = %booking.id,
                            total = %booking.total_price,
                            "Booking confirmed"
                        );
                        if D::KIND == ReservationKind::Match {
                            tracing::debug!(details = ?booking.details, "Match court assigned");
                        }
                        state.bookings.push(booking.clone());
                        state.confirmed = Some(booking);
                        state.step = Step::Success;
                        SmallVec::new()
                    },
                    Err(error) => Self::fail(state, error),
                }
            },

            FlowAction::BookingRejected { error } => {
                if !state.submitting {
                    return Self::refuse(state, name, "no submit in flight");
                }
                state.submitting = false;

                if error == BookingError::SlotTaken {
                    if let Some(selected) = state.selected_slot {
                        for slot in state.slots.iter_mut().filter(|slot| slot.time == selected.time) {
                            slot.available = false;
                        }
                    }
                }
                Self::fail(state, error)
            },

            FlowAction::BookingCancelled { booking_id } => {
                for booking in state
                    .bookings
                    .iter_mut()
                    .chain(state.confirmed.iter_mut())
                    .filter(|booking| booking.id == booking_id)
                {
                    booking.status = BookingStatus::Cancelled;
                }
                if state.cancelling.as_ref() == Some(&booking_id) {
                    state.cancelling = None;
                }
                tracing::info!(kind = D::KIND.as_str(), booking_id = %booking_id, "Booking cancelled");
                SmallVec::new()
            },

            FlowAction::CancellationFailed { booking_id, error } => {
                if state.cancelling.as_ref() == Some(&booking_id) {
                    state.cancelling = None;
                }
                Self::fail(state, error)
            },
        }
    }
}
