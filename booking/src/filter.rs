//! Free-text and facet filtering over the catalog.
//!
//! All functions are pure and return references into the catalog. Facets
//! combine with AND; within a list-valued facet any listed value matches.
//! A facet left at `None` or empty excludes nothing.

use crate::catalog::{Catalog, Club, Player, Trainer};
use crate::types::{ClockHour, ClubId, MatchType, PriceRange, SkillLevel, Surface};
use chrono::{Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Facets for court browsing
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClubFilters {
    /// At least one court with this surface
    pub surface: Option<Surface>,
    /// At least one court with (or without) lighting
    pub lighting: Option<bool>,
    /// At least one court that is (or is not) covered
    pub covered: Option<bool>,
    /// Club price range must intersect this range
    pub price_range: Option<PriceRange>,
    /// District, compared case-insensitively
    pub location: Option<String>,
    /// Any of these amenities
    pub amenities: Vec<String>,
}

impl ClubFilters {
    /// True when no facet is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Facets for trainer browsing
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainerFilters {
    /// Any of these specialties
    pub specialties: Vec<String>,
    /// Hourly rate must fall inside this range
    pub price_range: Option<PriceRange>,
    /// Minimum review score
    pub min_rating: Option<f64>,
    /// Minimum years of coaching
    pub min_experience: Option<u8>,
    /// District, compared case-insensitively
    pub location: Option<String>,
    /// Coaches at any of these clubs
    pub clubs: Vec<ClubId>,
    /// Takes sessions on this weekday
    pub available_on: Option<Weekday>,
}

impl TrainerFilters {
    /// True when no facet is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Inclusive date window for match-making
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[allow(missing_docs)]
    pub start: NaiveDate,
    #[allow(missing_docs)]
    pub end: NaiveDate,
}

impl DateRange {
    /// From `start` to one week later, both ends included
    #[must_use]
    pub fn week_from(start: NaiveDate) -> Self {
        Self {
            start,
            end: start.checked_add_days(Days::new(7)).unwrap_or(start),
        }
    }

    /// True if `date` lies inside the window
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// What a player is looking for in an opponent
///
/// Only `clubs`, `skill_levels` and `only_online` narrow the player search.
/// The rest travel with the search into the match booking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchPreferences {
    /// Opponent prefers any of these clubs
    pub clubs: Vec<ClubId>,
    /// Opponent plays at any of these levels
    pub skill_levels: Vec<SkillLevel>,
    #[allow(missing_docs)]
    pub match_type: MatchType,
    /// When the match may be played
    pub date_range: Option<DateRange>,
    /// Preferred start hours
    pub time_slots: Vec<ClockHour>,
    /// Farthest acceptable travel, in km
    pub max_distance_km: u32,
    /// Skip players who are offline
    pub only_online: bool,
}

impl MatchPreferences {
    /// Default preferences for a search made on `today`
    #[must_use]
    pub fn starting(today: NaiveDate) -> Self {
        Self {
            date_range: Some(DateRange::week_from(today)),
            ..Self::default()
        }
    }
}

impl Default for MatchPreferences {
    fn default() -> Self {
        Self {
            clubs: Vec::new(),
            skill_levels: Vec::new(),
            match_type: MatchType::Casual,
            date_range: None,
            time_slots: Vec::new(),
            max_distance_km: 10,
            only_online: false,
        }
    }
}

/// Case-insensitive substring match against any field; empty query matches
fn matches_query<'a>(query: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || fields
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
}

fn same_location(filter: Option<&String>, location: &str) -> bool {
    filter.is_none_or(|wanted| wanted.to_lowercase() == location.to_lowercase())
}

fn any_shared<T: PartialEq>(wanted: &[T], have: &[T]) -> bool {
    wanted.is_empty() || have.iter().any(|item| wanted.contains(item))
}

/// Online first, then higher rating first
fn online_then_rating(a_online: bool, b_online: bool, rating: Ordering) -> Ordering {
    b_online.cmp(&a_online).then(rating)
}

/// Clubs matching the query and facets, in catalog order
#[must_use]
pub fn filter_clubs<'a>(catalog: &'a Catalog, query: &str, filters: &ClubFilters) -> Vec<&'a Club> {
    catalog
        .clubs
        .iter()
        .filter(|club| matches_query(query, [club.name.as_str(), club.location.as_str()]))
        .filter(|club| {
            filters
                .surface
                .is_none_or(|surface| club.courts.iter().any(|c| c.surface == surface))
        })
        .filter(|club| {
            filters
                .lighting
                .is_none_or(|lit| club.courts.iter().any(|c| c.lighting == lit))
        })
        .filter(|club| {
            filters
                .covered
                .is_none_or(|covered| club.courts.iter().any(|c| c.covered == covered))
        })
        .filter(|club| {
            filters
                .price_range
                .is_none_or(|range| club.price_range.intersects(&range))
        })
        .filter(|club| same_location(filters.location.as_ref(), &club.location))
        .filter(|club| any_shared(&filters.amenities, &club.amenities))
        .collect()
}

/// Trainers matching the query and facets, online first then by rating
///
/// The query also matches specialties, so "servis" finds serve coaches.
#[must_use]
pub fn filter_trainers<'a>(
    catalog: &'a Catalog,
    query: &str,
    filters: &TrainerFilters,
) -> Vec<&'a Trainer> {
    let mut trainers: Vec<&Trainer> = catalog
        .trainers
        .iter()
        .filter(|t| {
            let fields = [t.name.as_str(), t.location.as_str()]
                .into_iter()
                .chain(t.specialties.iter().map(String::as_str));
            matches_query(query, fields)
        })
        .filter(|t| any_shared(&filters.specialties, &t.specialties))
        .filter(|t| filters.price_range.is_none_or(|range| range.contains(t.hourly_rate)))
        .filter(|t| filters.min_rating.is_none_or(|min| t.rating >= min))
        .filter(|t| filters.min_experience.is_none_or(|min| t.experience >= min))
        .filter(|t| same_location(filters.location.as_ref(), &t.location))
        .filter(|t| any_shared(&filters.clubs, &t.clubs))
        .filter(|t| filters.available_on.is_none_or(|day| t.availability.is_open_on(day)))
        .collect();

    trainers.sort_by(|a, b| online_then_rating(a.online, b.online, b.rating.total_cmp(&a.rating)));
    trainers
}

/// Players matching the query and preferences, online first then by rating
#[must_use]
pub fn search_players<'a>(
    catalog: &'a Catalog,
    query: &str,
    preferences: &MatchPreferences,
) -> Vec<&'a Player> {
    let mut players: Vec<&Player> = catalog
        .players
        .iter()
        .filter(|p| matches_query(query, [p.name.as_str(), p.location.as_str()]))
        .filter(|p| preferences.skill_levels.is_empty() || preferences.skill_levels.contains(&p.skill_level))
        .filter(|p| any_shared(&preferences.clubs, &p.preferred_clubs))
        .filter(|p| !preferences.only_online || p.online)
        .collect();

    players.sort_by(|a, b| online_then_rating(a.online, b.online, b.rating.cmp(&a.rating)));
    players
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn club_ids(clubs: &[&Club]) -> Vec<String> {
        clubs.iter().map(|c| c.id.to_string()).collect()
    }

    #[test]
    fn clay_surface_keeps_two_of_three_clubs() {
        let catalog = Catalog::seeded();
        let filters = ClubFilters {
            surface: Some(Surface::Clay),
            ..ClubFilters::default()
        };
        assert_eq!(club_ids(&filter_clubs(&catalog, "", &filters)), ["baseline", "ace"]);
    }

    #[test]
    fn text_search_is_case_insensitive_over_name_and_location() {
        let catalog = Catalog::seeded();
        let none = ClubFilters::default();
        assert_eq!(club_ids(&filter_clubs(&catalog, "ZEMUN", &none)), ["match-point"]);
        assert_eq!(club_ids(&filter_clubs(&catalog, "ace", &none)), ["ace"]);
        assert!(filter_clubs(&catalog, "wimbledon", &none).is_empty());
    }

    #[test]
    fn price_facet_uses_range_intersection() {
        let catalog = Catalog::seeded();
        let filters = ClubFilters {
            price_range: Some(PriceRange::dinars(5000, 8000)),
            ..ClubFilters::default()
        };
        assert_eq!(club_ids(&filter_clubs(&catalog, "", &filters)), ["ace"]);
    }

    #[test]
    fn amenities_match_any_listed_value() {
        let catalog = Catalog::seeded();
        let filters = ClubFilters {
            amenities: vec!["Spa".into(), "Wi-Fi".into()],
            ..ClubFilters::default()
        };
        assert_eq!(club_ids(&filter_clubs(&catalog, "", &filters)), ["baseline", "ace"]);
    }

    #[test]
    fn trainers_sort_online_first_then_by_rating() {
        let catalog = Catalog::seeded();
        let names: Vec<_> = filter_trainers(&catalog, "", &TrainerFilters::default())
            .iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(names, ["trainer1", "trainer4", "trainer2", "trainer3"]);
    }

    #[test]
    fn trainer_query_matches_specialties() {
        let catalog = Catalog::seeded();
        let found = filter_trainers(&catalog, "strategija", &TrainerFilters::default());
        let ids: Vec<_> = found.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["trainer1", "trainer4"]);
    }

    #[test]
    fn trainer_weekday_facet_skips_days_off() {
        let catalog = Catalog::seeded();
        let filters = TrainerFilters {
            available_on: Some(Weekday::Wed),
            ..TrainerFilters::default()
        };
        let ids: Vec<_> = filter_trainers(&catalog, "", &filters)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert!(!ids.contains(&"trainer4"));
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn trainer_price_facet_checks_the_hourly_rate() {
        let catalog = Catalog::seeded();
        let filters = TrainerFilters {
            price_range: Some(PriceRange::dinars(3000, 5000)),
            min_experience: Some(5),
            ..TrainerFilters::default()
        };
        let ids: Vec<_> = filter_trainers(&catalog, "", &filters)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["trainer1"]);
    }

    #[test]
    fn player_search_applies_levels_clubs_and_online() {
        let catalog = Catalog::seeded();
        let preferences = MatchPreferences {
            skill_levels: vec![SkillLevel::Intermediate],
            clubs: vec!["tennis-plus".into(), "baseline".into()],
            ..MatchPreferences::default()
        };
        let ids: Vec<_> = search_players(&catalog, "", &preferences)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["player1", "player3"]);

        let online_only = MatchPreferences {
            only_online: true,
            ..preferences
        };
        assert_eq!(search_players(&catalog, "", &online_only).len(), 1);
    }

    #[test]
    fn players_sort_online_first_then_by_rating() {
        let catalog = Catalog::seeded();
        let ids: Vec<_> = search_players(&catalog, "", &MatchPreferences::default())
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["player4", "player2", "player1", "player3"]);
    }

    #[test]
    fn week_window_includes_both_ends() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap_or_default();
        let window = DateRange::week_from(start);
        assert!(window.contains(start));
        assert!(window.contains(NaiveDate::from_ymd_opt(2025, 6, 9).unwrap_or_default()));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap_or_default()));
    }

    fn surface() -> impl Strategy<Value = Surface> {
        prop_oneof![
            Just(Surface::Clay),
            Just(Surface::Hard),
            Just(Surface::Grass),
            Just(Surface::Indoor),
        ]
    }

    fn club_filters() -> impl Strategy<Value = ClubFilters> {
        (
            proptest::option::of(surface()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of((0_u64..8000, 0_u64..8000)),
            proptest::option::of(prop_oneof![Just("Vračar"), Just("Zemun"), Just("Novi Sad")]),
            proptest::collection::vec(prop_oneof![Just("Parking"), Just("Spa"), Just("Bazen")], 0..3),
        )
            .prop_map(|(surface, lighting, covered, price, location, amenities)| ClubFilters {
                surface,
                lighting,
                covered,
                price_range: price.map(|(a, b)| PriceRange::dinars(a, b)),
                location: location.map(str::to_string),
                amenities: amenities.into_iter().map(str::to_string).collect(),
            })
    }

    fn trainer_filters() -> impl Strategy<Value = TrainerFilters> {
        (
            proptest::collection::vec(prop_oneof![Just("Servis"), Just("Taktika"), Just("Vole")], 0..3),
            proptest::option::of((0_u64..8000, 0_u64..8000)),
            proptest::option::of(4.0_f64..5.0),
            proptest::option::of(0_u8..15),
            proptest::option::of(prop_oneof![Just("Novi Beograd"), Just("Zemun")]),
            proptest::option::of(prop_oneof![Just(Weekday::Wed), Just(Weekday::Sun)]),
        )
            .prop_map(|(specialties, price, min_rating, min_experience, location, available_on)| {
                TrainerFilters {
                    specialties: specialties.into_iter().map(str::to_string).collect(),
                    price_range: price.map(|(a, b)| PriceRange::dinars(a, b)),
                    min_rating,
                    min_experience,
                    location: location.map(str::to_string),
                    clubs: Vec::new(),
                    available_on,
                }
            })
    }

    proptest! {
        #[test]
        fn club_results_are_a_subset_and_widen_when_a_facet_is_dropped(
            filters in club_filters(),
            query in prop_oneof![Just(""), Just("a"), Just("beograd")],
        ) {
            let catalog = Catalog::seeded();
            let narrow = club_ids(&filter_clubs(&catalog, query, &filters));
            let all = club_ids(&catalog.clubs.iter().collect::<Vec<_>>());
            prop_assert!(narrow.iter().all(|id| all.contains(id)));

            let widened = [
                ClubFilters { surface: None, ..filters.clone() },
                ClubFilters { lighting: None, ..filters.clone() },
                ClubFilters { covered: None, ..filters.clone() },
                ClubFilters { price_range: None, ..filters.clone() },
                ClubFilters { location: None, ..filters.clone() },
                ClubFilters { amenities: Vec::new(), ..filters.clone() },
            ];
            for wider in widened {
                let wide = club_ids(&filter_clubs(&catalog, query, &wider));
                prop_assert!(narrow.iter().all(|id| wide.contains(id)));
            }
            let unfiltered = club_ids(&filter_clubs(&catalog, "", &filters));
            prop_assert!(narrow.iter().all(|id| unfiltered.contains(id)));
        }

        #[test]
        fn trainer_results_widen_when_a_facet_is_dropped(filters in trainer_filters()) {
            let catalog = Catalog::seeded();
            let ids = |f: &TrainerFilters| -> Vec<String> {
                filter_trainers(&catalog, "", f).iter().map(|t| t.id.to_string()).collect()
            };
            let narrow = ids(&filters);
            prop_assert!(narrow.len() <= catalog.trainers.len());

            let widened = [
                TrainerFilters { specialties: Vec::new(), ..filters.clone() },
                TrainerFilters { price_range: None, ..filters.clone() },
                TrainerFilters { min_rating: None, ..filters.clone() },
                TrainerFilters { min_experience: None, ..filters.clone() },
                TrainerFilters { location: None, ..filters.clone() },
                TrainerFilters { available_on: None, ..filters.clone() },
            ];
            for wider in &widened {
                let wide = ids(wider);
                prop_assert!(narrow.iter().all(|id| wide.contains(id)));
            }
        }
    }
}
