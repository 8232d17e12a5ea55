//! Actions for the booking flow.

use crate::error::BookingError;
use crate::flow::domain::ReservationDomain;
use crate::gateway::{Confirmation, SlotQuery};
use crate::types::{BookingHours, BookingId, ClockHour, ContactDetails, TimeSlot};
use chrono::NaiveDate;
use courtside_macros::Action;

/// Everything the booking flow reacts to
///
/// Commands come from the user. Events are gateway outcomes fed back by
/// effects.
#[derive(Action, Clone, Debug, PartialEq)]
pub enum FlowAction<D: ReservationDomain> {
    // ========== Selection ==========
    /// Pick the first-step selection (club, trainer or opponent)
    #[command]
    SelectPrimary {
        /// The selection
        primary: D::Primary,
    },

    /// Pick the second-step selection (court or venue)
    #[command]
    SelectSecondary {
        /// The selection
        secondary: D::Secondary,
    },

    /// Pick the booking date; reloads slots
    #[command]
    SelectDate {
        #[allow(missing_docs)]
        date: NaiveDate,
    },

    /// Pick a start hour from the loaded slots
    #[command]
    SelectSlot {
        #[allow(missing_docs)]
        time: ClockHour,
    },

    /// Change the booking length
    #[command]
    SetDuration {
        #[allow(missing_docs)]
        hours: BookingHours,
    },

    /// Replace the domain preferences
    #[command]
    SetExtras {
        #[allow(missing_docs)]
        extras: D::Extras,
    },

    /// Replace the contact details
    #[command]
    SetContact {
        #[allow(missing_docs)]
        contact: ContactDetails,
    },

    // ========== Navigation ==========
    /// Go to the next step
    #[command]
    Proceed,

    /// Go to the previous step
    #[command]
    Back,

    /// Submit the booking from the confirmation step
    #[command]
    Submit,

    /// Cancel a confirmed booking from this flow's history
    #[command]
    CancelBooking {
        #[allow(missing_docs)]
        booking_id: BookingId,
    },

    /// Dismiss the current error message
    #[command]
    ClearError,

    /// Start over, keeping booking history
    #[command]
    Reset,

    // ========== Gateway outcomes ==========
    /// Slots arrived for `query`
    #[event]
    SlotsLoaded {
        /// The query these slots answer
        query: SlotQuery,
        #[allow(missing_docs)]
        slots: Vec<TimeSlot>,
    },

    /// Slot loading failed for `query`
    #[event]
    SlotsFailed {
        /// The query that failed
        query: SlotQuery,
        #[allow(missing_docs)]
        error: BookingError,
    },

    /// The gateway accepted the submitted booking
    #[event]
    BookingConfirmed {
        #[allow(missing_docs)]
        confirmation: Confirmation,
    },

    /// The gateway refused the submitted booking
    #[event]
    BookingRejected {
        #[allow(missing_docs)]
        error: BookingError,
    },

    /// The gateway cancelled a booking
    #[event]
    BookingCancelled {
        #[allow(missing_docs)]
        booking_id: BookingId,
    },

    /// The gateway refused a cancellation
    #[event]
    CancellationFailed {
        #[allow(missing_docs)]
        booking_id: BookingId,
        #[allow(missing_docs)]
        error: BookingError,
    },
}
