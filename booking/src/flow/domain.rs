//! The three reservation domains the generic flow is instantiated with.

use crate::gateway::Resource;
use crate::types::{
    BookingDetails, ClubId, CourtId, MatchType, PlayerId, PlayerLevel, ReservationKind,
    SessionType, TrainerId,
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Bounds shared by every selection and extras type
pub trait FlowValue: Clone + Debug + PartialEq + Send + Sync + 'static {}

impl<T> FlowValue for T where T: Clone + Debug + PartialEq + Send + Sync + 'static {}

/// What differs between booking a court, a trainer and a match
///
/// The flow asks for a primary selection on the first step and a secondary
/// one on the second. Together they name the venue and the bookable
/// resource. Extras are free-form preferences that ride along to the
/// booking.
pub trait ReservationDomain: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Booking kind this flow produces
    const KIND: ReservationKind;
    /// What the user picks first, for messages
    const PRIMARY: &'static str;
    /// What the user picks second, for messages
    const SECONDARY: &'static str;

    /// First-step selection
    type Primary: FlowValue;
    /// Second-step selection
    type Secondary: FlowValue;
    /// Preferences collected along the way
    type Extras: FlowValue + Default;

    /// Venue where the booking takes place
    fn venue(primary: &Self::Primary, secondary: &Self::Secondary) -> ClubId;

    /// The resource whose slots are offered
    fn resource(primary: &Self::Primary, secondary: &Self::Secondary) -> Resource;

    /// Booking details for a confirmed booking
    fn details(
        primary: &Self::Primary,
        secondary: &Self::Secondary,
        extras: &Self::Extras,
        court_label: Option<String>,
    ) -> BookingDetails;
}

/// Club first, then one of its courts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CourtReservation;

impl ReservationDomain for CourtReservation {
    const KIND: ReservationKind = ReservationKind::Court;
    const PRIMARY: &'static str = "club";
    const SECONDARY: &'static str = "court";

    type Primary = ClubId;
    type Secondary = CourtId;
    type Extras = ();

    fn venue(club: &ClubId, _court: &CourtId) -> ClubId {
        club.clone()
    }

    fn resource(_club: &ClubId, court: &CourtId) -> Resource {
        Resource::Court(court.clone())
    }

    fn details(_club: &ClubId, court: &CourtId, _extras: &(), _court_label: Option<String>) -> BookingDetails {
        BookingDetails::Court {
            court_id: court.clone(),
        }
    }
}

/// Session preferences for a training booking
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExtras {
    #[allow(missing_docs)]
    pub session_type: SessionType,
    /// Focus areas, see [`crate::catalog::Catalog::focus_areas`]
    pub focus: Vec<String>,
    #[allow(missing_docs)]
    pub player_level: PlayerLevel,
}

/// Trainer first, then one of the venues they coach at
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrainingReservation;

impl ReservationDomain for TrainingReservation {
    const KIND: ReservationKind = ReservationKind::Training;
    const PRIMARY: &'static str = "trainer";
    const SECONDARY: &'static str = "venue";

    type Primary = TrainerId;
    type Secondary = ClubId;
    type Extras = TrainingExtras;

    fn venue(_trainer: &TrainerId, venue: &ClubId) -> ClubId {
        venue.clone()
    }

    fn resource(trainer: &TrainerId, _venue: &ClubId) -> Resource {
        Resource::Trainer(trainer.clone())
    }

    fn details(
        trainer: &TrainerId,
        _venue: &ClubId,
        extras: &TrainingExtras,
        _court_label: Option<String>,
    ) -> BookingDetails {
        BookingDetails::Training {
            trainer_id: trainer.clone(),
            session_type: extras.session_type,
            focus: extras.focus.clone(),
            player_level: extras.player_level,
        }
    }
}

/// Match preferences
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchExtras {
    #[allow(missing_docs)]
    pub match_type: MatchType,
}

/// Opponent first, then a venue
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchReservation;

impl ReservationDomain for MatchReservation {
    const KIND: ReservationKind = ReservationKind::Match;
    const PRIMARY: &'static str = "opponent";
    const SECONDARY: &'static str = "venue";

    type Primary = PlayerId;
    type Secondary = ClubId;
    type Extras = MatchExtras;

    fn venue(_opponent: &PlayerId, venue: &ClubId) -> ClubId {
        venue.clone()
    }

    fn resource(opponent: &PlayerId, _venue: &ClubId) -> Resource {
        Resource::Opponent(opponent.clone())
    }

    fn details(
        opponent: &PlayerId,
        _venue: &ClubId,
        extras: &MatchExtras,
        court_label: Option<String>,
    ) -> BookingDetails {
        BookingDetails::Match {
            opponent_id: opponent.clone(),
            match_type: extras.match_type,
            court_label,
        }
    }
}
