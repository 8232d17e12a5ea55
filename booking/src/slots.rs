//! Hourly slot generation.

use crate::types::{Money, TimeSlot, WeeklySchedule};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Default share of slots reported as available
pub const DEFAULT_AVAILABILITY_RATE: f64 = 0.7;

/// Decides whether a generated slot is available
///
/// Implementations may be random. Callers must not assume two calls for the
/// same hour agree.
pub trait Availability: Send + Sync {
    /// Roll availability for one slot
    fn roll(&self) -> bool;
}

/// Every slot available (or none)
#[derive(Clone, Copy, Debug)]
pub struct FixedAvailability(pub bool);

impl Availability for FixedAvailability {
    fn roll(&self) -> bool {
        self.0
    }
}

/// Independent coin flip per slot
#[derive(Debug)]
pub struct RandomAvailability {
    rate: f64,
    rng: Mutex<StdRng>,
}

impl RandomAvailability {
    /// Slots available with probability `rate`, seeded from the OS
    #[must_use]
    pub fn new(rate: f64) -> Self {
        Self {
            rate: rate.clamp(0.0, 1.0),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible rolls for a given seed
    #[must_use]
    pub fn seeded(rate: f64, seed: u64) -> Self {
        Self {
            rate: rate.clamp(0.0, 1.0),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomAvailability {
    fn default() -> Self {
        Self::new(DEFAULT_AVAILABILITY_RATE)
    }
}

impl Availability for RandomAvailability {
    fn roll(&self) -> bool {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_bool(self.rate),
            Err(poisoned) => poisoned.into_inner().gen_bool(self.rate),
        }
    }
}

/// One slot per whole hour the schedule is open on `date`
///
/// Each slot costs `rate` and is independently rolled for availability. A
/// closed day yields no slots.
pub fn generate_slots(
    schedule: &WeeklySchedule,
    date: NaiveDate,
    rate: Money,
    availability: &dyn Availability,
) -> Vec<TimeSlot> {
    let Some(hours) = schedule.open_hours_on(date) else {
        return Vec::new();
    };

    hours
        .slot_starts()
        .map(|time| TimeSlot {
            time,
            available: availability.roll(),
            price: rate,
        })
        .collect()
}
