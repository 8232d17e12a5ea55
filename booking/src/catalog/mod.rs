//! The static catalog: clubs with their courts, trainers, players and match
//! venues.
//!
//! The catalog is built once at startup ([`Catalog::seeded`]) and shared
//! behind an `Arc`; nothing mutates it afterwards.

mod seed;

use crate::error::BookingError;
use crate::types::{
    ClubId, CourtId, Money, PlayerId, PriceRange, SessionType, SkillLevel, Surface, TrainerId,
    WeeklySchedule,
};
use serde::{Deserialize, Serialize};

/// A tennis club with bookable courts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    /// City district, e.g. "Vračar"
    pub location: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Average review score out of 5
    pub rating: f64,
    pub review_count: u32,
    pub description: String,
    pub amenities: Vec<String>,
    pub courts: Vec<Court>,
    pub opening_hours: WeeklySchedule,
    /// Cheapest and most expensive court rate
    pub price_range: PriceRange,
}

impl Club {
    /// Court by id, if this club has it
    #[must_use]
    pub fn court(&self, id: &CourtId) -> Option<&Court> {
        self.courts.iter().find(|court| &court.id == id)
    }
}

/// A court at a club
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Court {
    pub id: CourtId,
    pub club_id: ClubId,
    pub name: String,
    pub surface: Surface,
    /// Floodlights for evening play
    pub lighting: bool,
    pub covered: bool,
    pub hourly_rate: Money,
    pub features: Vec<String>,
}

/// A tennis coach
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Trainer {
    pub id: TrainerId,
    pub name: String,
    pub bio: String,
    /// Years of coaching
    pub experience: u8,
    pub specialties: Vec<String>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub rating: f64,
    pub review_count: u32,
    pub hourly_rate: Money,
    /// Weekly hours; days marked closed take no sessions
    pub availability: WeeklySchedule,
    pub location: String,
    /// Clubs the trainer coaches at, primary club first
    pub clubs: Vec<ClubId>,
    pub online: bool,
    pub response_time: String,
    pub cancellation_policy: String,
}

/// A player looking for opponents
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub skill_level: SkillLevel,
    /// Ladder rating, e.g. 1450
    pub rating: u32,
    pub location: String,
    pub preferred_clubs: Vec<ClubId>,
    pub online: bool,
    pub last_active: String,
    pub matches_played: u32,
    /// Fraction of matches won, `0.0..=1.0`
    pub win_rate: f64,
}

/// A venue where matches and training sessions take place
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Venue {
    pub id: ClubId,
    pub name: String,
    pub location: String,
    /// Number of courts; a match is assigned one of them
    pub courts: u8,
    pub rating: f64,
    pub opening_hours: WeeklySchedule,
}

/// Everything the platform can show or book
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Catalog {
    pub clubs: Vec<Club>,
    pub trainers: Vec<Trainer>,
    pub players: Vec<Player>,
    pub venues: Vec<Venue>,
}

impl Catalog {
    /// The catalog the platform ships with
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            clubs: seed::clubs(),
            trainers: seed::trainers(),
            players: seed::players(),
            venues: seed::venues(),
        }
    }

    /// Club by id
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] for an unknown id.
    pub fn club(&self, id: &ClubId) -> Result<&Club, BookingError> {
        self.clubs
            .iter()
            .find(|club| &club.id == id)
            .ok_or_else(|| BookingError::not_found("club", id.as_str()))
    }

    /// Court by club and court id
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] if either id is unknown or the
    /// court belongs to another club.
    pub fn court(&self, club_id: &ClubId, court_id: &CourtId) -> Result<(&Club, &Court), BookingError> {
        let club = self.club(club_id)?;
        let court = club
            .court(court_id)
            .ok_or_else(|| BookingError::not_found("court", court_id.as_str()))?;
        Ok((club, court))
    }

    /// Trainer by id
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] for an unknown id.
    pub fn trainer(&self, id: &TrainerId) -> Result<&Trainer, BookingError> {
        self.trainers
            .iter()
            .find(|trainer| &trainer.id == id)
            .ok_or_else(|| BookingError::not_found("trainer", id.as_str()))
    }

    /// Player by id
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] for an unknown id.
    pub fn player(&self, id: &PlayerId) -> Result<&Player, BookingError> {
        self.players
            .iter()
            .find(|player| &player.id == id)
            .ok_or_else(|| BookingError::not_found("player", id.as_str()))
    }

    /// Match or training venue by id
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] for an unknown id.
    pub fn venue(&self, id: &ClubId) -> Result<&Venue, BookingError> {
        self.venues
            .iter()
            .find(|venue| &venue.id == id)
            .ok_or_else(|| BookingError::not_found("venue", id.as_str()))
    }

    /// Specialties trainers can be filtered by
    #[must_use]
    pub const fn specialties() -> &'static [&'static str] {
        seed::SPECIALTIES
    }

    /// Focus areas a player can pick for a training session
    #[must_use]
    pub const fn focus_areas() -> &'static [&'static str] {
        seed::FOCUS_AREAS
    }

    /// Session types with their labels, in display order
    pub fn session_types() -> impl Iterator<Item = (SessionType, &'static str)> {
        SessionType::ALL.into_iter().map(|t| (t, t.label()))
    }

    /// Skill levels with their labels, lowest first
    pub fn skill_levels() -> impl Iterator<Item = (SkillLevel, &'static str)> {
        SkillLevel::ALL.into_iter().map(|l| (l, l.label()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}
