//! # Courtside Testing
//!
//! Testing utilities for Courtside reducers and stores.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness that runs a reducer without a runtime
//! - [`assertions`]: Effect shape assertions
//! - [`FixedClock`]: Deterministic time, so "today" is stable across runs
//! - [`init_test_tracing`]: Opt-in log output while debugging a test
//!
//! ## Example
//!
//! ```ignore
//! use courtside_testing::{test_clock, ReducerTest, assertions};
//!
//! ReducerTest::new(BrowseReducer::new())
//!     .with_env(BrowseEnvironment::new(catalog, Arc::new(test_clock())))
//!     .given_state(BrowseState::default())
//!     .when_action(BrowseAction::SetQuery { query: "clay".into() })
//!     .then_state(|s| assert_eq!(s.trainers.len(), 2))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use courtside_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, NaiveDate, TimeZone, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use courtside_testing::mocks::FixedClock;
    /// use courtside_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }

        /// Clock pinned to 09:00 UTC on the given date
        ///
        /// Returns `None` for an impossible calendar date.
        #[must_use]
        pub fn on(year: i32, month: u32, day: u32) -> Option<Self> {
            Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
                .single()
                .map(Self::new)
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Default fixed clock for tests: Monday 2025-06-02 09:00 UTC
    ///
    /// # Panics
    ///
    /// Never in practice; the date is hardcoded and valid.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::on(2025, 6, 2).expect("hardcoded date is valid")
    }

    /// A date in the week of [`test_clock`], by day offset from its Monday
    ///
    /// # Panics
    ///
    /// Panics if the offset overflows the calendar.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_date(days_after_monday: u64) -> NaiveDate {
        test_clock()
            .today()
            .checked_add_days(chrono::Days::new(days_after_monday))
            .expect("test date within calendar range")
    }
}

/// Install a `fmt` subscriber honouring `RUST_LOG`, once per test binary
///
/// Output goes through the test writer so it is captured unless
/// `--nocapture` is passed.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub use mocks::{FixedClock, test_clock, test_date};
