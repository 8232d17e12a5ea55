//! Declarative macros for ergonomic effect construction
//!
//! Flow reducers build most of their effects from these two shapes: an async
//! gateway call whose result is mapped back into an action, and a delayed
//! action standing in for network latency.

/// Create an `Effect::Future` from an async block
///
/// The block evaluates to `Option<Action>`; `Some` is fed back into the store.
///
/// # Example
///
/// ```rust,ignore
/// use courtside_core::async_effect;
///
/// let gateway = Arc::clone(&env.gateway);
/// async_effect! {
///     match gateway.available_slots(query).await {
///         Ok(slots) => Some(FlowAction::SlotsLoaded { date, slots }),
///         Err(error) => Some(FlowAction::SlotsFailed { message: error.to_string() }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use courtside_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_millis(1500),
///     action: BrowseAction::PlayersFound { players }
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}
