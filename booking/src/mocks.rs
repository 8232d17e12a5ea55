//! Deterministic gateway for tests and demos.

use crate::catalog::Catalog;
use crate::error::BookingError;
use crate::gateway::{
    BookingGateway, BookingRequest, Confirmation, GatewayFuture, Resource, SlotQuery,
};
use crate::slots::{FixedAvailability, generate_slots};
use crate::types::{BookingId, Money, TimeSlot};
use courtside_core::environment::Clock;
use futures::FutureExt;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// A call the gateway received, in arrival order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayCall {
    #[allow(missing_docs)]
    Slots(SlotQuery),
    #[allow(missing_docs)]
    Submit(BookingRequest),
    #[allow(missing_docs)]
    Cancel(BookingId),
}

#[derive(Default)]
struct Script {
    slots: VecDeque<Result<Vec<TimeSlot>, BookingError>>,
    submits: VecDeque<Result<Option<String>, BookingError>>,
    cancels: VecDeque<Result<(), BookingError>>,
    calls: Vec<GatewayCall>,
    issued: u64,
}

/// Gateway that answers from a script and records every call
///
/// Unscripted slot queries generate the catalog's slots with every hour
/// available. Unscripted submits succeed, and matches get "Court 1".
/// Nothing sleeps.
#[derive(Clone)]
pub struct ScriptedGateway {
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    script: Arc<Mutex<Script>>,
}

impl ScriptedGateway {
    /// Gateway over the seeded catalog
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog: Arc::new(Catalog::seeded()),
            clock,
            script: Arc::new(Mutex::new(Script::default())),
        }
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Answer the next slot query with `slots`
    #[must_use]
    pub fn with_slots(self, slots: Vec<TimeSlot>) -> Self {
        self.script().slots.push_back(Ok(slots));
        self
    }

    /// Fail the next slot query
    #[must_use]
    pub fn with_slot_error(self, error: BookingError) -> Self {
        self.script().slots.push_back(Err(error));
        self
    }

    /// Reject the next submit
    #[must_use]
    pub fn rejecting(self, error: BookingError) -> Self {
        self.script().submits.push_back(Err(error));
        self
    }

    /// Confirm the next submit, assigning `court_label`
    #[must_use]
    pub fn confirming_on(self, court_label: &str) -> Self {
        self.script().submits.push_back(Ok(Some(court_label.to_string())));
        self
    }

    /// Fail the next cancellation
    #[must_use]
    pub fn failing_cancel(self, error: BookingError) -> Self {
        self.script().cancels.push_back(Err(error));
        self
    }

    /// Every call received so far
    #[must_use]
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.script().calls.clone()
    }

    /// Submitted requests only
    #[must_use]
    pub fn submits(&self) -> Vec<BookingRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Submit(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn default_slots(&self, query: &SlotQuery) -> Result<Vec<TimeSlot>, BookingError> {
        let all = FixedAvailability(true);
        let slots = match &query.resource {
            Resource::Court(court_id) => {
                let (club, court) = self.catalog.court(&query.venue_id, court_id)?;
                generate_slots(&club.opening_hours, query.date, court.hourly_rate, &all)
            },
            Resource::Trainer(trainer_id) => {
                let trainer = self.catalog.trainer(trainer_id)?;
                generate_slots(&trainer.availability, query.date, trainer.hourly_rate, &all)
            },
            Resource::Opponent(player_id) => {
                self.catalog.player(player_id)?;
                let venue = self.catalog.venue(&query.venue_id)?;
                generate_slots(&venue.opening_hours, query.date, Money::ZERO, &all)
            },
        };
        Ok(slots)
    }
}

impl std::fmt::Debug for ScriptedGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedGateway")
            .field("calls", &self.script().calls.len())
            .finish_non_exhaustive()
    }
}

impl BookingGateway for ScriptedGateway {
    fn available_slots(&self, query: SlotQuery) -> GatewayFuture<Vec<TimeSlot>> {
        let scripted = {
            let mut script = self.script();
            script.calls.push(GatewayCall::Slots(query.clone()));
            script.slots.pop_front()
        };
        let result = scripted.unwrap_or_else(|| self.default_slots(&query));
        async move { result }.boxed()
    }

    fn submit(&self, request: BookingRequest) -> GatewayFuture<Confirmation> {
        let created_at = self.clock.now();
        let kind = request.resource.kind();
        let result = {
            let mut script = self.script();
            script.calls.push(GatewayCall::Submit(request));
            let default_label = matches!(kind, crate::types::ReservationKind::Match)
                .then(|| "Court 1".to_string());
            script
                .submits
                .pop_front()
                .unwrap_or(Ok(default_label))
                .map(|court_label| {
                    script.issued += 1;
                    let millis = created_at
                        .timestamp_millis()
                        .saturating_add(i64::try_from(script.issued).unwrap_or(i64::MAX));
                    Confirmation {
                        booking_id: BookingId::generate(kind, millis),
                        created_at,
                        court_label,
                    }
                })
        };
        async move { result }.boxed()
    }

    fn cancel(&self, booking_id: BookingId) -> GatewayFuture<()> {
        let result = {
            let mut script = self.script();
            script.calls.push(GatewayCall::Cancel(booking_id));
            script.cancels.pop_front().unwrap_or(Ok(()))
        };
        async move { result }.boxed()
    }
}
