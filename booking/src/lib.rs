//! # Courtside Booking
//!
//! Court rental, training sessions and match-making for Belgrade tennis
//! clubs, built as reducers on the Courtside runtime.
//!
//! - **Catalog**: static clubs, courts, trainers, players and venues
//! - **Browse**: free-text and facet filtering over the catalog
//! - **Flow**: one booking wizard, generic over what is being booked
//! - **Gateway**: the booking service boundary, with a simulated service
//!
//! # Architecture
//!
//! ```text
//!  BrowseReducer                FlowReducer<D>
//!   query + facets ─► filter     Selection → Resource → DateTime → Confirmation → Success
//!   search ─► Delay(PlayersFound)             │             │
//!                                             ▼             ▼
//!                                  BookingGateway::available_slots / submit / cancel
//!                                             │
//!                               MockBookingGateway (latency, random conflicts)
//!                               ScriptedGateway    (tests)
//! ```
//!
//! Reducers stay pure: they read "today" from an injected clock and leave
//! every gateway call and random roll to effects.

#![forbid(unsafe_code)]

pub mod browse;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod flow;
pub mod gateway;
pub mod mocks;
pub mod slots;
pub mod types;

pub use browse::{BrowseAction, BrowseEnvironment, BrowseReducer, BrowseState};
pub use catalog::Catalog;
pub use config::{Config, ConfigError};
pub use error::{BookingError, ErrorKind};
pub use flow::{
    CourtFlow, CourtReservation, FlowAction, FlowEnvironment, FlowReducer, FlowState,
    MatchFlow, MatchReservation, ReservationDomain, Step, TrainingFlow, TrainingReservation,
};
pub use gateway::{BookingGateway, GatewaySettings, MockBookingGateway};
