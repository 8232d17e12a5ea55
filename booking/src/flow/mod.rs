//! The booking wizard, generic over what is being booked.
//!
//! One reducer drives all three flows:
//!
//! ```text
//! Selection → ResourceSelection → DateTime → Confirmation → Success
//!  club         court               date + slot   review        booking
//!  trainer      venue               + duration    + submit
//!  opponent     venue
//! ```
//!
//! Entering `DateTime` (forward or back) requests slots from the
//! [`crate::gateway::BookingGateway`]. `Success` is only reachable through a
//! submit the gateway accepts. Gateway results come back as `#[event]`
//! actions.

pub mod actions;
pub mod domain;
pub mod environment;
pub mod reducer;
pub mod state;

pub use actions::FlowAction;
pub use domain::{
    CourtReservation, FlowValue, MatchExtras, MatchReservation, ReservationDomain,
    TrainingExtras, TrainingReservation,
};
pub use environment::FlowEnvironment;
pub use reducer::FlowReducer;
pub use state::{FlowState, Step};

/// Court booking wizard
pub type CourtFlow = FlowReducer<CourtReservation>;
/// Training booking wizard
pub type TrainingFlow = FlowReducer<TrainingReservation>;
/// Match booking wizard
pub type MatchFlow = FlowReducer<MatchReservation>;
