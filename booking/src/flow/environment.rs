//! Dependencies injected into the booking flow.

use crate::gateway::BookingGateway;
use courtside_core::environment::Clock;
use std::sync::Arc;

/// Clock for "today" and booking timestamps, gateway for slots and submits
#[derive(Clone)]
pub struct FlowEnvironment {
    /// Source of "today"
    pub clock: Arc<dyn Clock>,
    /// Booking service
    pub gateway: Arc<dyn BookingGateway>,
}

impl FlowEnvironment {
    /// Creates a new `FlowEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, gateway: Arc<dyn BookingGateway>) -> Self {
        Self { clock, gateway }
    }
}

impl std::fmt::Debug for FlowEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowEnvironment")
            .field("now", &self.clock.now())
            .finish_non_exhaustive()
    }
}
