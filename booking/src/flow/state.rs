//! Booking flow state.

use crate::error::BookingError;
use crate::flow::domain::ReservationDomain;
use crate::gateway::SlotQuery;
use crate::types::{Booking, BookingHours, BookingId, ContactDetails, TimeSlot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Wizard steps, in order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    /// Pick a club, trainer or opponent
    #[default]
    Selection,
    /// Pick a court or venue
    ResourceSelection,
    /// Pick a date, a start hour and a duration
    DateTime,
    /// Review and submit
    Confirmation,
    /// Booking confirmed
    Success,
}

impl Step {
    /// The step `Proceed` leads to; `Success` is reached by submitting only
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Selection => Some(Self::ResourceSelection),
            Self::ResourceSelection => Some(Self::DateTime),
            Self::DateTime => Some(Self::Confirmation),
            Self::Confirmation | Self::Success => None,
        }
    }

    /// The step `Back` leads to; none from the ends
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Selection | Self::Success => None,
            Self::ResourceSelection => Some(Self::Selection),
            Self::DateTime => Some(Self::ResourceSelection),
            Self::Confirmation => Some(Self::DateTime),
        }
    }
}

/// State of one booking wizard
#[derive(Clone, Debug, PartialEq)]
pub struct FlowState<D: ReservationDomain> {
    /// Current step
    pub step: Step,
    /// First-step selection
    pub primary: Option<D::Primary>,
    /// Second-step selection
    pub secondary: Option<D::Secondary>,
    /// Booking date; set to today on entering [`Step::DateTime`]
    pub date: Option<NaiveDate>,
    /// Slots for the current selection and date
    pub slots: Vec<TimeSlot>,
    /// Chosen start slot
    pub selected_slot: Option<TimeSlot>,
    #[allow(missing_docs)]
    pub duration: BookingHours,
    /// Domain preferences
    pub extras: D::Extras,
    #[allow(missing_docs)]
    pub contact: ContactDetails,
    /// A slot request is in flight
    pub loading_slots: bool,
    /// A submit is in flight
    pub submitting: bool,
    /// A cancellation is in flight for this booking
    pub cancelling: Option<BookingId>,
    /// Last error, shown to the user until cleared
    pub error: Option<BookingError>,
    /// The booking made by the last successful submit
    pub confirmed: Option<Booking>,
    /// Every booking made through this flow
    pub bookings: Vec<Booking>,
}

impl<D: ReservationDomain> Default for FlowState<D> {
    fn default() -> Self {
        Self {
            step: Step::Selection,
            primary: None,
            secondary: None,
            date: None,
            slots: Vec::new(),
            selected_slot: None,
            duration: BookingHours::ONE,
            extras: D::Extras::default(),
            contact: ContactDetails::default(),
            loading_slots: false,
            submitting: false,
            cancelling: None,
            error: None,
            confirmed: None,
            bookings: Vec::new(),
        }
    }
}

impl<D: ReservationDomain> FlowState<D> {
    /// Fresh state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot query for the current selection, once resource and date are set
    #[must_use]
    pub fn slot_query(&self) -> Option<SlotQuery> {
        let (primary, secondary, date) = (self.primary.as_ref()?, self.secondary.as_ref()?, self.date?);
        Some(SlotQuery {
            venue_id: D::venue(primary, secondary),
            resource: D::resource(primary, secondary),
            date,
        })
    }

    /// Label of the first missing selection needed to stand on `step`
    #[must_use]
    pub fn missing_for(&self, step: Step) -> Option<&'static str> {
        if step >= Step::ResourceSelection && self.primary.is_none() {
            return Some(D::PRIMARY);
        }
        if step >= Step::DateTime && self.secondary.is_none() {
            return Some(D::SECONDARY);
        }
        if step >= Step::Confirmation {
            if self.date.is_none() {
                return Some("date");
            }
            if self.selected_slot.is_none() {
                return Some("time slot");
            }
        }
        None
    }

    /// Price of the selected slot over the chosen duration
    #[must_use]
    pub fn total_price(&self) -> Option<crate::types::Money> {
        self.selected_slot.map(|slot| slot.price.times(self.duration))
    }

    /// Booking from history by id
    #[must_use]
    pub fn booking(&self, id: &BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|booking| &booking.id == id)
    }
}
