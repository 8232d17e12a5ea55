//! Domain types shared by the catalog, the filters and the booking flows.
//!
//! Value objects here validate on construction (`ClockHour`, `BookingHours`)
//! so the flow reducer can rely on them without re-checking ranges.

use crate::error::BookingError;
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an id string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The id as a string slice
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

string_id!(
    /// Club or venue slug, e.g. `baseline`
    ClubId
);
string_id!(
    /// Court slug, e.g. `baseline-1`
    CourtId
);
string_id!(
    /// Trainer slug, e.g. `trainer2`
    TrainerId
);
string_id!(
    /// Player slug, e.g. `player4`
    PlayerId
);
string_id!(
    /// Booking id, `<prefix>-<unix millis>`
    BookingId
);

impl BookingId {
    /// Timestamp-based id for a booking of the given kind
    #[must_use]
    pub fn generate(kind: ReservationKind, millis: i64) -> Self {
        Self(format!("{}-{millis}", kind.id_prefix()))
    }
}

// ============================================================================
// Money and time
// ============================================================================

/// Whole Serbian dinars
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero dinars
    pub const ZERO: Self = Self(0);

    /// Amount in dinars
    #[must_use]
    pub const fn dinars(amount: u64) -> Self {
        Self(amount)
    }

    /// The amount in dinars
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Price of `hours` consecutive hours at this hourly rate
    #[must_use]
    pub fn times(self, hours: BookingHours) -> Self {
        Self(self.0.saturating_mul(u64::from(hours.get())))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} RSD", self.0)
    }
}

/// A whole hour on the clock, `0..=24`
///
/// 24 is only meaningful as a closing time or a booking end ("24:00").
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockHour(u8);

impl ClockHour {
    /// Midnight at the end of the day
    pub const END_OF_DAY: Self = Self(24);

    /// Hour if it lies within `0..=24`
    #[must_use]
    pub const fn new(hour: u8) -> Option<Self> {
        if hour <= 24 { Some(Self(hour)) } else { None }
    }

    /// The hour number
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// End of a booking starting at this hour, if it ends by 24:00
    #[must_use]
    pub const fn plus(self, hours: BookingHours) -> Option<Self> {
        Self::new(self.0 + hours.get())
    }
}

impl fmt::Display for ClockHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for ClockHour {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BookingError::InvalidClockHour(s.to_string());
        let (hour, minutes) = s.split_once(':').ok_or_else(invalid)?;
        if minutes != "00" {
            return Err(invalid());
        }
        hour.parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for ClockHour {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockHour> for String {
    fn from(hour: ClockHour) -> Self {
        hour.to_string()
    }
}

/// Booking length in whole hours, `1..=3`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BookingHours(u8);

impl BookingHours {
    /// One hour, the default
    pub const ONE: Self = Self(1);
    /// Longest bookable duration
    pub const MAX: Self = Self(3);

    /// Validate a duration
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidDuration`] outside `1..=3`.
    pub fn new(hours: u8) -> Result<Self, BookingError> {
        if (1..=Self::MAX.0).contains(&hours) {
            Ok(Self(hours))
        } else {
            Err(BookingError::InvalidDuration(hours))
        }
    }

    /// Hours as a number
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// All valid durations, shortest first
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=Self::MAX.0).map(Self)
    }
}

impl Default for BookingHours {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u8> for BookingHours {
    type Error = BookingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BookingHours> for u8 {
    fn from(hours: BookingHours) -> Self {
        hours.0
    }
}

/// Opening and closing hour for one day, closing exclusive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    /// First bookable hour
    pub open: ClockHour,
    /// Hour at which the last slot ends
    pub close: ClockHour,
}

impl DayHours {
    /// Hours from `open` to `close`; `None` if either is out of range
    #[must_use]
    pub const fn new(open: u8, close: u8) -> Option<Self> {
        match (ClockHour::new(open), ClockHour::new(close)) {
            (Some(open), Some(close)) => Some(Self { open, close }),
            _ => None,
        }
    }

    /// Start hour of every slot in the day
    pub fn slot_starts(self) -> impl Iterator<Item = ClockHour> {
        (self.open.get()..self.close.get()).map(ClockHour)
    }

    /// Number of one-hour slots in the day
    #[must_use]
    pub const fn slot_count(self) -> usize {
        self.close.get().saturating_sub(self.open.get()) as usize
    }
}

/// One weekday in a schedule
///
/// A day can carry hours and still be marked closed; trainers publish their
/// usual hours for days they are not taking sessions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDay {
    /// Usual hours
    pub hours: DayHours,
    /// Closed or unavailable that day
    pub closed: bool,
}

/// Opening hours per weekday
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    days: [Option<ScheduleDay>; 7],
}

impl WeeklySchedule {
    /// Schedule closed every day
    #[must_use]
    pub fn closed() -> Self {
        Self::default()
    }

    /// Set hours for one weekday
    #[must_use]
    pub fn with_day(mut self, weekday: Weekday, hours: DayHours) -> Self {
        self.days[weekday.num_days_from_monday() as usize] = Some(ScheduleDay {
            hours,
            closed: false,
        });
        self
    }

    /// Set the same hours for every weekday in `days`
    #[must_use]
    pub fn with_days(self, days: &[Weekday], hours: DayHours) -> Self {
        days.iter()
            .fold(self, |schedule, &day| schedule.with_day(day, hours))
    }

    /// Mark a weekday closed, keeping any published hours
    #[must_use]
    pub fn closed_on(mut self, weekday: Weekday) -> Self {
        if let Some(day) = &mut self.days[weekday.num_days_from_monday() as usize] {
            day.closed = true;
        }
        self
    }

    /// The schedule entry for a weekday
    #[must_use]
    pub fn day(&self, weekday: Weekday) -> Option<&ScheduleDay> {
        self.days[weekday.num_days_from_monday() as usize].as_ref()
    }

    /// Bookable hours on a weekday, `None` when closed
    #[must_use]
    pub fn open_hours(&self, weekday: Weekday) -> Option<DayHours> {
        self.day(weekday)
            .filter(|day| !day.closed)
            .map(|day| day.hours)
    }

    /// Bookable hours on a calendar date
    #[must_use]
    pub fn open_hours_on(&self, date: NaiveDate) -> Option<DayHours> {
        self.open_hours(date.weekday())
    }

    /// True if the schedule is open on the weekday
    #[must_use]
    pub fn is_open_on(&self, weekday: Weekday) -> bool {
        self.open_hours(weekday).is_some()
    }
}

/// Inclusive price range
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lowest price
    pub min: Money,
    /// Highest price
    pub max: Money,
}

impl PriceRange {
    /// Range between two amounts in dinars, in either order
    #[must_use]
    pub const fn dinars(a: u64, b: u64) -> Self {
        if a <= b {
            Self { min: Money(a), max: Money(b) }
        } else {
            Self { min: Money(b), max: Money(a) }
        }
    }

    /// True if the two ranges share at least one price
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// True if `price` lies within the range
    #[must_use]
    pub fn contains(&self, price: Money) -> bool {
        self.min <= price && price <= self.max
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Court surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Surface {
    /// Red clay
    Clay,
    /// Hard court
    Hard,
    /// Grass
    Grass,
    /// Indoor carpet
    Indoor,
}

/// Player skill level used in match-making
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillLevel {
    #[allow(missing_docs)]
    Beginner,
    #[allow(missing_docs)]
    Intermediate,
    #[allow(missing_docs)]
    Advanced,
    #[allow(missing_docs)]
    Expert,
    #[allow(missing_docs)]
    Pro,
}

impl SkillLevel {
    /// Every level, lowest first
    pub const ALL: [Self; 5] = [
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
        Self::Pro,
    ];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Početnik",
            Self::Intermediate => "Srednji",
            Self::Advanced => "Napredni",
            Self::Expert => "Ekspert",
            Self::Pro => "Profesionalac",
        }
    }
}

/// Level a player declares when booking a training session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerLevel {
    #[allow(missing_docs)]
    Beginner,
    #[allow(missing_docs)]
    #[default]
    Intermediate,
    #[allow(missing_docs)]
    Advanced,
    #[allow(missing_docs)]
    Expert,
}

/// Casual or competitive match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    #[allow(missing_docs)]
    #[default]
    Casual,
    #[allow(missing_docs)]
    Competitive,
}

/// Kind of training session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionType {
    /// One-on-one
    #[default]
    Individual,
    /// Two to four players
    Group,
    /// Technique review with recommendations
    Assessment,
    /// Simulated match with tactical coaching
    MatchPlay,
}

impl SessionType {
    /// Every session type in display order
    pub const ALL: [Self; 4] = [
        Self::Individual,
        Self::Group,
        Self::Assessment,
        Self::MatchPlay,
    ];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Individual => "Individualni trening",
            Self::Group => "Grupni trening",
            Self::Assessment => "Procena igre",
            Self::MatchPlay => "Match play",
        }
    }

    /// One-line description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Individual => "Personalizovani jedan-na-jedan trening",
            Self::Group => "Trening u maloj grupi (2-4 igrača)",
            Self::Assessment => "Analiza tehnike i preporuke za napredovanje",
            Self::MatchPlay => "Simulacija meča sa strategijskim savjetima",
        }
    }
}

/// Which booking flow produced a booking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationKind {
    /// Court rental at a club
    Court,
    /// Session with a trainer
    Training,
    /// Match against another player
    Match,
}

impl ReservationKind {
    /// Prefix of booking ids for this kind
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Court => "booking",
            Self::Training => "session",
            Self::Match => "match",
        }
    }

    /// Lowercase label for log fields
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Court => "court",
            Self::Training => "training",
            Self::Match => "match",
        }
    }
}

/// Lifecycle status of a booking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    #[allow(missing_docs)]
    Confirmed,
    #[allow(missing_docs)]
    Pending,
    #[allow(missing_docs)]
    Cancelled,
}

// ============================================================================
// Slots and bookings
// ============================================================================

/// One bookable hour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Start of the hour
    pub time: ClockHour,
    /// Whether the slot can be booked right now
    pub available: bool,
    /// Price for this hour
    pub price: Money,
}

/// Contact fields collected on the confirmation step
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    pub email: String,
    #[allow(missing_docs)]
    pub phone: String,
    /// Free-text note to the venue or trainer
    pub special_requests: Option<String>,
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self {
            name: "Marko Petrović".to_string(),
            email: "marko@example.com".to_string(),
            phone: "+381 64 123-4567".to_string(),
            special_requests: None,
        }
    }
}

/// What was booked at the venue
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BookingDetails {
    /// A court rental
    Court {
        #[allow(missing_docs)]
        court_id: CourtId,
    },
    /// A training session
    Training {
        #[allow(missing_docs)]
        trainer_id: TrainerId,
        #[allow(missing_docs)]
        session_type: SessionType,
        /// Focus areas the player asked for
        focus: Vec<String>,
        #[allow(missing_docs)]
        player_level: PlayerLevel,
    },
    /// A match against another player
    Match {
        /// Opponent
        opponent_id: PlayerId,
        #[allow(missing_docs)]
        match_type: MatchType,
        /// Court assigned by the venue, e.g. "Court 3"
        court_label: Option<String>,
    },
}

/// A confirmed (or later cancelled) reservation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    #[allow(missing_docs)]
    pub id: BookingId,
    #[allow(missing_docs)]
    pub kind: ReservationKind,
    /// Club or venue where it takes place
    pub venue_id: ClubId,
    #[allow(missing_docs)]
    pub details: BookingDetails,
    #[allow(missing_docs)]
    pub date: NaiveDate,
    #[allow(missing_docs)]
    pub start: ClockHour,
    /// Always `start + duration`
    pub end: ClockHour,
    #[allow(missing_docs)]
    pub duration: BookingHours,
    /// Always `slot price × duration`
    pub total_price: Money,
    #[allow(missing_docs)]
    pub status: BookingStatus,
    #[allow(missing_docs)]
    pub contact: ContactDetails,
    #[allow(missing_docs)]
    pub created_at: DateTime<Utc>,
}
