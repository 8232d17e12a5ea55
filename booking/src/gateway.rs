//! Booking gateway: the boundary where a real booking service would sit.
//!
//! Reducers never talk to the gateway directly. They return effects that
//! call it, and the results come back as actions. [`MockBookingGateway`]
//! simulates the service with latency and random conflicts; tests use
//! [`crate::mocks::ScriptedGateway`].

use crate::catalog::Catalog;
use crate::error::BookingError;
use crate::slots::{DEFAULT_AVAILABILITY_RATE, RandomAvailability, generate_slots};
use crate::types::{
    BookingHours, BookingId, ClockHour, ClubId, ContactDetails, CourtId, Money, PlayerId,
    ReservationKind, TimeSlot, TrainerId, WeeklySchedule,
};
use chrono::{DateTime, NaiveDate, Utc};
use courtside_core::environment::Clock;
use futures::FutureExt;
use futures::future::BoxFuture;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Future returned by every gateway call
pub type GatewayFuture<T> = BoxFuture<'static, Result<T, BookingError>>;

/// The bookable thing a slot or booking refers to
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "kebab-case")]
pub enum Resource {
    /// A court at a club
    Court(CourtId),
    /// A trainer's time
    Trainer(TrainerId),
    /// A match against this player
    Opponent(PlayerId),
}

impl Resource {
    /// Which flow books this resource
    #[must_use]
    pub const fn kind(&self) -> ReservationKind {
        match self {
            Self::Court(_) => ReservationKind::Court,
            Self::Trainer(_) => ReservationKind::Training,
            Self::Opponent(_) => ReservationKind::Match,
        }
    }

    /// The resource id
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Court(id) => id.as_str(),
            Self::Trainer(id) => id.as_str(),
            Self::Opponent(id) => id.as_str(),
        }
    }
}

/// Slots for one resource at one venue on one date
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotQuery {
    #[allow(missing_docs)]
    pub venue_id: ClubId,
    #[allow(missing_docs)]
    pub resource: Resource,
    #[allow(missing_docs)]
    pub date: NaiveDate,
}

/// A booking as submitted from the confirmation step
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    #[allow(missing_docs)]
    pub venue_id: ClubId,
    #[allow(missing_docs)]
    pub resource: Resource,
    #[allow(missing_docs)]
    pub date: NaiveDate,
    /// Start of the first booked hour
    pub start: ClockHour,
    #[allow(missing_docs)]
    pub duration: BookingHours,
    #[allow(missing_docs)]
    pub contact: ContactDetails,
}

/// What the service returns for an accepted booking
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    #[allow(missing_docs)]
    pub booking_id: BookingId,
    #[allow(missing_docs)]
    pub created_at: DateTime<Utc>,
    /// Court assigned by the venue, for bookings that don't name one
    pub court_label: Option<String>,
}

/// Booking service abstraction
///
/// All methods return owned `'static` futures so they can be moved into
/// effects.
pub trait BookingGateway: Send + Sync {
    /// Slots for a resource and date
    ///
    /// A closed day yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] for unknown ids and
    /// [`BookingError::NotOffered`] if the resource isn't available at the
    /// venue.
    fn available_slots(&self, query: SlotQuery) -> GatewayFuture<Vec<TimeSlot>>;

    /// Submit a booking
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::SlotTaken`] if a competing booking won the slot.
    fn submit(&self, request: BookingRequest) -> GatewayFuture<Confirmation>;

    /// Cancel a confirmed booking
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] for an id this service never issued.
    fn cancel(&self, booking_id: BookingId) -> GatewayFuture<()>;
}

/// Probability that a submit loses its slot to a competing booking
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FailureRates {
    #[allow(missing_docs)]
    pub court: f64,
    #[allow(missing_docs)]
    pub training: f64,
    #[allow(missing_docs)]
    pub matches: f64,
}

impl FailureRates {
    /// Rate for one reservation kind
    #[must_use]
    pub const fn for_kind(&self, kind: ReservationKind) -> f64 {
        match kind {
            ReservationKind::Court => self.court,
            ReservationKind::Training => self.training,
            ReservationKind::Match => self.matches,
        }
    }

    /// Never fail
    #[must_use]
    pub const fn none() -> Self {
        Self {
            court: 0.0,
            training: 0.0,
            matches: 0.0,
        }
    }
}

impl Default for FailureRates {
    fn default() -> Self {
        Self {
            court: 0.15,
            training: 0.10,
            matches: 0.20,
        }
    }
}

/// Tunables for [`MockBookingGateway`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Delay before slots are returned
    pub slot_latency: Duration,
    /// Delay before a submit resolves
    pub submit_latency: Duration,
    /// Delay before a cancellation resolves
    pub cancel_latency: Duration,
    /// Share of generated slots reported available
    pub availability_rate: f64,
    #[allow(missing_docs)]
    pub failure_rates: FailureRates,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl GatewaySettings {
    /// No latency, no random failures, every slot available
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            slot_latency: Duration::ZERO,
            submit_latency: Duration::ZERO,
            cancel_latency: Duration::ZERO,
            availability_rate: 1.0,
            failure_rates: FailureRates::none(),
            seed: None,
        }
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            slot_latency: Duration::from_millis(1000),
            submit_latency: Duration::from_millis(2000),
            cancel_latency: Duration::from_millis(1000),
            availability_rate: DEFAULT_AVAILABILITY_RATE,
            failure_rates: FailureRates::default(),
            seed: None,
        }
    }
}

struct MockState {
    rng: StdRng,
    issued: HashSet<BookingId>,
    last_millis: i64,
}

struct MockInner {
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    settings: GatewaySettings,
    availability: RandomAvailability,
    state: Mutex<MockState>,
}

impl MockInner {
    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Schedule and rate backing a slot query
    fn schedule_for(&self, query: &SlotQuery) -> Result<(WeeklySchedule, Money), BookingError> {
        match &query.resource {
            Resource::Court(court_id) => {
                let (club, court) = self.catalog.court(&query.venue_id, court_id)?;
                Ok((club.opening_hours.clone(), court.hourly_rate))
            },
            Resource::Trainer(trainer_id) => {
                let trainer = self.catalog.trainer(trainer_id)?;
                self.catalog.venue(&query.venue_id)?;
                if !trainer.clubs.contains(&query.venue_id) {
                    return Err(BookingError::NotOffered {
                        resource: trainer_id.to_string(),
                        venue: query.venue_id.to_string(),
                    });
                }
                Ok((trainer.availability.clone(), trainer.hourly_rate))
            },
            Resource::Opponent(player_id) => {
                self.catalog.player(player_id)?;
                let venue = self.catalog.venue(&query.venue_id)?;
                Ok((venue.opening_hours.clone(), Money::ZERO))
            },
        }
    }

    /// Court count at the venue of a match, or `None` for other kinds
    fn match_courts(&self, request: &BookingRequest) -> Result<Option<u8>, BookingError> {
        match &request.resource {
            Resource::Court(court_id) => {
                self.catalog.court(&request.venue_id, court_id)?;
                Ok(None)
            },
            Resource::Trainer(trainer_id) => {
                self.catalog.trainer(trainer_id)?;
                self.catalog.venue(&request.venue_id)?;
                Ok(None)
            },
            Resource::Opponent(player_id) => {
                self.catalog.player(player_id)?;
                Ok(Some(self.catalog.venue(&request.venue_id)?.courts))
            },
        }
    }

    fn confirm(&self, request: &BookingRequest) -> Result<Confirmation, BookingError> {
        let kind = request.resource.kind();
        let courts = self.match_courts(request)?;
        let created_at = self.clock.now();
        let mut state = self.state();

        if state.rng.gen_bool(self.settings.failure_rates.for_kind(kind).clamp(0.0, 1.0)) {
            return Err(BookingError::SlotTaken);
        }

        // Ids are millisecond timestamps; keep them unique within one gateway.
        let millis = created_at.timestamp_millis().max(state.last_millis + 1);
        state.last_millis = millis;
        let booking_id = BookingId::generate(kind, millis);
        state.issued.insert(booking_id.clone());

        let court_label = courts.map(|count| {
            let number = state.rng.gen_range(1..=count.max(1));
            format!("Court {number}")
        });

        Ok(Confirmation {
            booking_id,
            created_at,
            court_label,
        })
    }
}

/// Simulated booking service backed by the static catalog
///
/// Every call sleeps for its configured latency. Slot availability is
/// re-rolled on every request, and submits fail with
/// [`BookingError::SlotTaken`] at the per-kind failure rate.
#[derive(Clone)]
pub struct MockBookingGateway {
    inner: Arc<MockInner>,
}

impl MockBookingGateway {
    /// Create a gateway over `catalog`
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, clock: Arc<dyn Clock>, settings: GatewaySettings) -> Self {
        let rng = settings
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let rate = settings.availability_rate;
        let availability = settings.seed.map_or_else(
            || RandomAvailability::new(rate),
            |seed| RandomAvailability::seeded(rate, seed),
        );

        Self {
            inner: Arc::new(MockInner {
                catalog,
                clock,
                settings,
                availability,
                state: Mutex::new(MockState {
                    rng,
                    issued: HashSet::new(),
                    last_millis: 0,
                }),
            }),
        }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(
        catalog: Arc<Catalog>,
        clock: Arc<dyn Clock>,
        settings: GatewaySettings,
    ) -> Arc<dyn BookingGateway> {
        Arc::new(Self::new(catalog, clock, settings))
    }

    /// The settings this gateway runs with
    #[must_use]
    pub fn settings(&self) -> &GatewaySettings {
        &self.inner.settings
    }
}

impl std::fmt::Debug for MockBookingGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBookingGateway")
            .field("settings", &self.inner.settings)
            .finish_non_exhaustive()
    }
}

impl BookingGateway for MockBookingGateway {
    fn available_slots(&self, query: SlotQuery) -> GatewayFuture<Vec<TimeSlot>> {
        let inner = Arc::clone(&self.inner);
        async move {
            tokio::time::sleep(inner.settings.slot_latency).await;

            let (schedule, rate) = inner.schedule_for(&query)?;
            let slots = generate_slots(&schedule, query.date, rate, &inner.availability);

            tracing::debug!(
                kind = query.resource.kind().as_str(),
                venue = %query.venue_id,
                resource = query.resource.id(),
                date = %query.date,
                slots = slots.len(),
                available = slots.iter().filter(|s| s.available).count(),
                "Mock slots generated"
            );
            metrics::counter!("booking.gateway.slot_queries", "kind" => query.resource.kind().as_str())
                .increment(1);

            Ok(slots)
        }
        .boxed()
    }

    fn submit(&self, request: BookingRequest) -> GatewayFuture<Confirmation> {
        let inner = Arc::clone(&self.inner);
        async move {
            tokio::time::sleep(inner.settings.submit_latency).await;

            let kind = request.resource.kind();
            match inner.confirm(&request) {
                Ok(confirmation) => {
                    tracing::info!(
                        kind = kind.as_str(),
                        booking_id = %confirmation.booking_id,
                        venue = %request.venue_id,
                        date = %request.date,
                        start = %request.start,
                        "Mock booking confirmed"
                    );
                    metrics::counter!("booking.gateway.submits", "kind" => kind.as_str(), "outcome" => "confirmed")
                        .increment(1);
                    Ok(confirmation)
                },
                Err(error) => {
                    tracing::info!(
                        kind = kind.as_str(),
                        error_kind = error.kind().as_str(),
                        %error,
                        "Mock booking rejected"
                    );
                    metrics::counter!("booking.gateway.submits", "kind" => kind.as_str(), "outcome" => "rejected")
                        .increment(1);
                    Err(error)
                },
            }
        }
        .boxed()
    }

    fn cancel(&self, booking_id: BookingId) -> GatewayFuture<()> {
        let inner = Arc::clone(&self.inner);
        async move {
            tokio::time::sleep(inner.settings.cancel_latency).await;

            if !inner.state().issued.remove(&booking_id) {
                return Err(BookingError::not_found("booking", booking_id.as_str()));
            }

            tracing::info!(booking_id = %booking_id, "Mock booking cancelled");
            metrics::counter!("booking.gateway.cancellations").increment(1);
            Ok(())
        }
        .boxed()
    }
}
