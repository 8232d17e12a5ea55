//! Booking errors.
//!
//! Reducers never return these. They are rendered into the user-facing
//! message fields of flow state, and their [`ErrorKind`] is attached to log
//! events.

use thiserror::Error;

/// Everything that can go wrong while browsing or booking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// A required upstream selection is absent
    #[error("Please complete all booking information (missing {missing})")]
    MissingInformation {
        /// What is missing, e.g. "date" or "time slot"
        missing: &'static str,
    },

    /// Submit was requested outside the confirmation step
    #[error("Booking can only be submitted from the confirmation step")]
    NotReady,

    /// The slot was booked by someone else between selection and submit
    #[error("This slot was just booked by someone else. Please choose another.")]
    SlotTaken,

    /// The selected slot is not (or no longer) offered as available
    #[error("The {time} slot is not available")]
    SlotUnavailable {
        /// Slot start, formatted as `HH:00`
        time: String,
    },

    /// Start plus duration ends after midnight
    #[error("A {hours}h booking starting at {start} would end after midnight")]
    PastMidnight {
        /// Slot start, formatted as `HH:00`
        start: String,
        /// Requested duration in hours
        hours: u8,
    },

    /// The chosen date is before today
    #[error("{date} is in the past")]
    DateInPast {
        /// The rejected date, `YYYY-MM-DD`
        date: String,
    },

    /// Duration outside 1..=3 hours
    #[error("Booking duration must be between 1 and 3 hours, got {0}")]
    InvalidDuration(u8),

    /// Text that is not a whole hour between `00:00` and `24:00`
    #[error("'{0}' is not a clock hour (expected HH:00)")]
    InvalidClockHour(String),

    /// A referenced catalog entry does not exist
    #[error("{what} '{id}' was not found")]
    NotFound {
        /// Entity kind, e.g. "club" or "trainer"
        what: &'static str,
        /// The id that was looked up
        id: String,
    },

    /// The selected resource is not offered at the selected venue
    #[error("{resource} is not offered at {venue}")]
    NotOffered {
        /// Resource id
        resource: String,
        /// Venue id
        venue: String,
    },

    /// Gateway failure not covered above
    #[error("Booking service error: {0}")]
    Gateway(String),
}

/// Coarse error classes, used as a log field only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required data was absent or malformed when an action ran
    MissingSelection,
    /// A competing booking won the slot
    Conflict,
    /// A catalog reference could not be resolved
    NotFound,
}

impl ErrorKind {
    /// Lowercase label for log fields
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingSelection => "missing_selection",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
        }
    }
}

impl BookingError {
    /// Shorthand for [`BookingError::NotFound`]
    pub fn not_found(what: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            id: id.into(),
        }
    }

    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingInformation { .. }
            | Self::NotReady
            | Self::PastMidnight { .. }
            | Self::DateInPast { .. }
            | Self::InvalidDuration(_)
            | Self::InvalidClockHour(_) => ErrorKind::MissingSelection,
            Self::SlotTaken | Self::SlotUnavailable { .. } | Self::Gateway(_) => {
                ErrorKind::Conflict
            },
            Self::NotFound { .. } | Self::NotOffered { .. } => ErrorKind::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            BookingError::not_found("trainer", "trainer9").to_string(),
            "trainer 'trainer9' was not found"
        );
        assert_eq!(
            BookingError::PastMidnight {
                start: "23:00".into(),
                hours: 2
            }
            .to_string(),
            "A 2h booking starting at 23:00 would end after midnight"
        );
    }

    #[test]
    fn kinds_follow_the_three_way_taxonomy() {
        assert_eq!(
            BookingError::MissingInformation { missing: "date" }.kind(),
            ErrorKind::MissingSelection
        );
        assert_eq!(BookingError::SlotTaken.kind(), ErrorKind::Conflict);
        assert_eq!(
            BookingError::not_found("club", "nowhere").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            BookingError::InvalidClockHour("9am".into()).kind(),
            ErrorKind::MissingSelection
        );
        assert_eq!(ErrorKind::Conflict.as_str(), "conflict");
    }
}
