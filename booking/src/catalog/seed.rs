//! Seed data for Belgrade clubs, trainers and players.

use super::{Club, Court, Player, Trainer, Venue};
use crate::types::{
    ClockHour, ClubId, CourtId, DayHours, Money, PlayerId, PriceRange, SkillLevel, Surface, TrainerId,
    WeeklySchedule,
};
use chrono::Weekday::{self, Fri, Mon, Sat, Sun, Thu, Tue, Wed};

const WEEKDAYS: &[Weekday] = &[Mon, Tue, Wed, Thu, Fri];
const MON_TO_THU: &[Weekday] = &[Mon, Tue, Wed, Thu];

pub(super) const SPECIALTIES: &[&str] = &[
    "Forhend",
    "Bekhend",
    "Servis",
    "Vole",
    "Strategija",
    "Mentalna priprema",
    "Brzina",
    "Izdržljivost",
    "Tehnička analiza",
    "Taktika",
    "Match play",
];

pub(super) const FOCUS_AREAS: &[&str] = &[
    "Forhend",
    "Bekhend",
    "Servis",
    "Return servisa",
    "Vole",
    "Smash",
    "Drop shot",
    "Lob",
    "Strategija",
    "Mentalna igra",
    "Fizička priprema",
    "Footwork",
    "Taktika",
    "Match play",
    "Defensiva",
    "Agresivna igra",
];

/// Out-of-range literals collapse to a day without slots.
fn hours(open: u8, close: u8) -> DayHours {
    DayHours::new(open, close).unwrap_or(DayHours {
        open: ClockHour::END_OF_DAY,
        close: ClockHour::END_OF_DAY,
    })
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn ids(items: &[&str]) -> Vec<ClubId> {
    items.iter().map(|s| ClubId::from(*s)).collect()
}

#[allow(clippy::too_many_arguments)]
fn court(
    id: &str,
    club: &str,
    name: &str,
    surface: Surface,
    lighting: bool,
    covered: bool,
    rate: u64,
    features: &[&str],
) -> Court {
    Court {
        id: CourtId::from(id),
        club_id: ClubId::from(club),
        name: name.to_string(),
        surface,
        lighting,
        covered,
        hourly_rate: Money::dinars(rate),
        features: strings(features),
    }
}

#[allow(clippy::too_many_lines)]
pub(super) fn clubs() -> Vec<Club> {
    vec![
        Club {
            id: "baseline".into(),
            name: "Baseline Tennis Club".to_string(),
            location: "Novi Beograd".to_string(),
            address: "Bulevar Mihajla Pupina 10, Novi Beograd".to_string(),
            phone: "+381 11 123-4567".to_string(),
            email: "info@baseline.rs".to_string(),
            rating: 4.8,
            review_count: 156,
            description: "Moderni teniski klub sa vrhunskim terenima i kompletnim sadržajima."
                .to_string(),
            amenities: strings(&[
                "Parking",
                "Kafić",
                "Svlačionice",
                "Tuševi",
                "Wi-Fi",
                "Prodavnica opreme",
            ]),
            courts: vec![
                court(
                    "baseline-1",
                    "baseline",
                    "Teren 1",
                    Surface::Clay,
                    true,
                    false,
                    3000,
                    &["Rasveta", "Crven šljak", "Profesionalne mreže"],
                ),
                court(
                    "baseline-2",
                    "baseline",
                    "Teren 2",
                    Surface::Hard,
                    true,
                    true,
                    4000,
                    &["Rasveta", "Pokriveno", "Tvrda podloga", "Klima"],
                ),
            ],
            opening_hours: WeeklySchedule::closed()
                .with_days(WEEKDAYS, hours(7, 23))
                .with_days(&[Sat, Sun], hours(8, 22)),
            price_range: PriceRange::dinars(2000, 4000),
        },
        Club {
            id: "ace".into(),
            name: "Ace Tennis Center".to_string(),
            location: "Vračar".to_string(),
            address: "Kneza Miloša 25, Vračar".to_string(),
            phone: "+381 11 234-5678".to_string(),
            email: "rezervacije@ace.rs".to_string(),
            rating: 4.6,
            review_count: 89,
            description: "Ekskluzivni teniski centar u srcu Beograda sa premium uslugama."
                .to_string(),
            amenities: strings(&[
                "Valet parking",
                "Restoran",
                "Spa",
                "Svlačionice",
                "Sauna",
                "Masaža",
            ]),
            courts: vec![
                court(
                    "ace-1",
                    "ace",
                    "Center Court",
                    Surface::Hard,
                    true,
                    true,
                    6000,
                    &["Premium teren", "Pokriveno", "LED rasveta", "Tribine"],
                ),
                court(
                    "ace-2",
                    "ace",
                    "Court 2",
                    Surface::Clay,
                    true,
                    false,
                    4500,
                    &["Crven šljak", "Rasveta", "Profesionalne linije"],
                ),
            ],
            opening_hours: WeeklySchedule::closed()
                .with_days(WEEKDAYS, hours(6, 24))
                .with_day(Sat, hours(7, 24))
                .with_day(Sun, hours(7, 23)),
            price_range: PriceRange::dinars(3500, 6000),
        },
        Club {
            id: "match-point".into(),
            name: "Match Point".to_string(),
            location: "Zemun".to_string(),
            address: "Glavna 15, Zemun".to_string(),
            phone: "+381 11 345-6789".to_string(),
            email: "info@matchpoint.rs".to_string(),
            rating: 4.7,
            review_count: 67,
            description: "Prijatna atmosfera i kvalitetni tereni za sve nivoe igrača.".to_string(),
            amenities: strings(&["Parking", "Kafić", "Svlačionice", "Iznajmljivanje opreme"]),
            courts: vec![court(
                "match-1",
                "match-point",
                "Teren A",
                Surface::Hard,
                true,
                false,
                3500,
                &["Rasveta", "Tvrda podloga"],
            )],
            opening_hours: WeeklySchedule::closed()
                .with_days(MON_TO_THU, hours(8, 22))
                .with_day(Fri, hours(8, 23))
                .with_day(Sat, hours(9, 23))
                .with_day(Sun, hours(9, 21)),
            price_range: PriceRange::dinars(2500, 3500),
        },
    ]
}

#[allow(clippy::too_many_lines)]
pub(super) fn trainers() -> Vec<Trainer> {
    vec![
        Trainer {
            id: TrainerId::from("trainer1"),
            name: "Marija Jovanović".to_string(),
            bio: "Profesionalna teniska trenerka sa 8 godina iskustva. Specijalizovana za rad sa početnicima i srednjim igračima.".to_string(),
            experience: 8,
            specialties: strings(&["Forhend", "Bekhend", "Strategija"]),
            certifications: strings(&["PTR Certified", "ITF Level 2", "Mental Coaching"]),
            languages: strings(&["Srpski", "Engleski"]),
            rating: 4.9,
            review_count: 127,
            hourly_rate: Money::dinars(4500),
            availability: WeeklySchedule::closed()
                .with_days(WEEKDAYS, hours(9, 18))
                .with_day(Sat, hours(8, 16))
                .with_day(Sun, hours(10, 15))
                .closed_on(Sun),
            location: "Novi Beograd".to_string(),
            clubs: ids(&["baseline", "ace"]),
            online: true,
            response_time: "Obično odgovara za 2 sata".to_string(),
            cancellation_policy: "Otkazivanje 24h unapred bez naknade".to_string(),
        },
        Trainer {
            id: TrainerId::from("trainer2"),
            name: "Stefan Milošević".to_string(),
            bio: "Bivši profesionalni igrač i sadašnji trener. Fokus na naprednim tehnikama i mentalnu pripremu.".to_string(),
            experience: 12,
            specialties: strings(&["Servis", "Mentalna priprema", "Match play"]),
            certifications: strings(&["ITF Level 3", "Mental Performance Coach", "USPTA Elite"]),
            languages: strings(&["Srpski", "Engleski", "Italijanski"]),
            rating: 4.8,
            review_count: 89,
            hourly_rate: Money::dinars(6000),
            availability: WeeklySchedule::closed()
                .with_days(WEEKDAYS, hours(8, 20))
                .with_days(&[Sat, Sun], hours(9, 17)),
            location: "Vračar".to_string(),
            clubs: ids(&["ace", "match-point"]),
            online: true,
            response_time: "Obično odgovara za 1 sat".to_string(),
            cancellation_policy: "Otkazivanje 48h unapred bez naknade".to_string(),
        },
        Trainer {
            id: TrainerId::from("trainer3"),
            name: "Nikola Petrović".to_string(),
            bio: "Mladi i energičan trener specijalizovan za rad sa decom i mladima.".to_string(),
            experience: 4,
            specialties: strings(&["Brzina", "Footwork", "Tehnička analiza"]),
            certifications: strings(&["ITF Level 1", "Youth Tennis Coach"]),
            languages: strings(&["Srpski", "Engleski"]),
            rating: 4.7,
            review_count: 45,
            hourly_rate: Money::dinars(3500),
            availability: WeeklySchedule::closed()
                .with_days(WEEKDAYS, hours(15, 21))
                .with_days(&[Sat, Sun], hours(9, 18))
                .closed_on(Sun),
            location: "Zemun".to_string(),
            clubs: ids(&["match-point", "tennis-plus"]),
            online: false,
            response_time: "Obično odgovara za 4 sata".to_string(),
            cancellation_policy: "Otkazivanje 12h unapred bez naknade".to_string(),
        },
        Trainer {
            id: TrainerId::from("trainer4"),
            name: "Jelena Stojanović".to_string(),
            bio: "Iskusna trenerka sa fokusom na ženski tenis i strategiju igre.".to_string(),
            experience: 10,
            specialties: strings(&["Strategija", "Vole", "Taktika"]),
            certifications: strings(&["WTA Coaching", "ITF Level 2", "Fitness for Tennis"]),
            languages: strings(&["Srpski", "Nemački", "Engleski"]),
            rating: 4.9,
            review_count: 76,
            hourly_rate: Money::dinars(5200),
            availability: WeeklySchedule::closed()
                .with_days(WEEKDAYS, hours(10, 19))
                .closed_on(Wed)
                .with_days(&[Sat, Sun], hours(9, 15)),
            location: "Novi Beograd".to_string(),
            clubs: ids(&["baseline", "tennis-plus"]),
            online: true,
            response_time: "Obično odgovara za 3 sata".to_string(),
            cancellation_policy: "Otkazivanje 24h unapred bez naknade".to_string(),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn player(
    id: &str,
    name: &str,
    skill_level: SkillLevel,
    rating: u32,
    location: &str,
    preferred_clubs: &[&str],
    online: bool,
    last_active: &str,
    matches_played: u32,
    win_rate: f64,
) -> Player {
    Player {
        id: PlayerId::from(id),
        name: name.to_string(),
        skill_level,
        rating,
        location: location.to_string(),
        preferred_clubs: ids(preferred_clubs),
        online,
        last_active: last_active.to_string(),
        matches_played,
        win_rate,
    }
}

pub(super) fn players() -> Vec<Player> {
    vec![
        player(
            "player1",
            "Ana Jovanović",
            SkillLevel::Intermediate,
            1450,
            "Novi Beograd",
            &["baseline", "ace"],
            true,
            "2 min ago",
            47,
            0.68,
        ),
        player(
            "player2",
            "Marko Nikolić",
            SkillLevel::Advanced,
            1680,
            "Vračar",
            &["ace", "match-point"],
            true,
            "5 min ago",
            89,
            0.72,
        ),
        player(
            "player3",
            "Milica Petrović",
            SkillLevel::Intermediate,
            1380,
            "Zemun",
            &["match-point", "tennis-plus"],
            false,
            "1 hour ago",
            32,
            0.65,
        ),
        player(
            "player4",
            "Stefan Milošević",
            SkillLevel::Expert,
            1820,
            "Novi Beograd",
            &["baseline"],
            true,
            "now",
            156,
            0.78,
        ),
    ]
}

/// Match venues reuse the club hours; Tennis Plus has no court listing.
pub(super) fn venues() -> Vec<Venue> {
    let clubs = clubs();
    let hours_of = |id: &str| {
        clubs
            .iter()
            .find(|club| club.id.as_str() == id)
            .map(|club| club.opening_hours.clone())
            .unwrap_or_default()
    };

    vec![
        Venue {
            id: "baseline".into(),
            name: "Baseline Tennis Club".to_string(),
            location: "Novi Beograd".to_string(),
            courts: 8,
            rating: 4.8,
            opening_hours: hours_of("baseline"),
        },
        Venue {
            id: "ace".into(),
            name: "Ace Tennis Center".to_string(),
            location: "Vračar".to_string(),
            courts: 6,
            rating: 4.6,
            opening_hours: hours_of("ace"),
        },
        Venue {
            id: "match-point".into(),
            name: "Match Point".to_string(),
            location: "Zemun".to_string(),
            courts: 4,
            rating: 4.7,
            opening_hours: hours_of("match-point"),
        },
        Venue {
            id: "tennis-plus".into(),
            name: "Tennis Plus".to_string(),
            location: "Zvezdara".to_string(),
            courts: 5,
            rating: 4.5,
            opening_hours: WeeklySchedule::closed()
                .with_days(WEEKDAYS, hours(8, 22))
                .with_days(&[Sat, Sun], hours(9, 20)),
        },
    ]
}
