//! # Courtside Core
//!
//! Core traits and types behind every Courtside booking flow.
//!
//! A flow is described by a reducer: a pure function that takes the current
//! state, an action and the injected environment, mutates the state in place
//! and returns descriptions of the side effects it wants performed. The
//! runtime crate executes those effects and feeds any resulting actions back
//! into the reducer.
//!
//! ## Core Concepts
//!
//! - **State**: Owned, cloneable data for one feature (a browse screen, a booking wizard)
//! - **Action**: Every input a reducer handles (user commands and gateway results)
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: A value describing work to do later (a gateway call, a delay)
//! - **Environment**: Injected dependencies such as the clock and booking gateway
//!
//! ## Example
//!
//! ```ignore
//! use courtside_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! impl Reducer for WizardReducer {
//!     type State = WizardState;
//!     type Action = WizardAction;
//!     type Environment = WizardEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut WizardState,
//!         action: WizardAction,
//!         env: &WizardEnvironment,
//!     ) -> SmallVec<[Effect<WizardAction>; 4]> {
//!         match action {
//!             WizardAction::Next => {
//!                 state.step += 1;
//!                 SmallVec::new()
//!             }
//!         }
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, NaiveDate, Utc};
pub use smallvec::{smallvec, SmallVec};

mod effect_macros;

/// Reducer module - the trait every flow implements
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for flow logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// Reducers must not perform I/O, sleep, or roll dice. Anything
    /// non-deterministic is either read from the environment (the clock) or
    /// returned as an [`Effect`] for the runtime to execute.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// The effects to be executed by the runtime. Most actions return
        /// none; an empty vector does not allocate.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution), so reducer tests can inspect them
/// without running anything.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Dispatch an action after a delay (simulated latency, timeouts)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation, usually a gateway call
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Returns true for `Effect::None` and for empty compositions
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    effects.iter().all(Effect::is_none)
                },
                Effect::Delay { .. } | Effect::Future(_) => false,
            }
        }
    }
}

/// Environment module - dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, NaiveDate, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use courtside_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// assert_eq!(clock.today(), clock.now().date_naive());
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;

        /// Today's calendar date (UTC)
        fn today(&self) -> NaiveDate {
            self.now().date_naive()
        }
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
