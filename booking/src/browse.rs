//! Browse screens: club and trainer listings, and the opponent search.
//!
//! Listings are recomputed synchronously whenever the query or a facet
//! changes. The player search answers after a simulated latency, so its
//! results arrive as a delayed [`BrowseAction::PlayersFound`].

use crate::catalog::Catalog;
use crate::filter::{
    ClubFilters, MatchPreferences, TrainerFilters, filter_clubs, filter_trainers, search_players,
};
use crate::types::{ClubId, PlayerId, TrainerId};
use courtside_core::environment::Clock;
use courtside_core::{SmallVec, delay, effect::Effect, reducer::Reducer, smallvec};
use courtside_macros::Action;
use std::sync::Arc;
use std::time::Duration;

/// Listing and search state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BrowseState {
    /// Free text shared by the club and trainer listings
    pub query: String,
    #[allow(missing_docs)]
    pub club_filters: ClubFilters,
    #[allow(missing_docs)]
    pub trainer_filters: TrainerFilters,
    /// Matching clubs, catalog order
    pub clubs: Vec<ClubId>,
    /// Matching trainers, online first then by rating
    pub trainers: Vec<TrainerId>,
    /// Free text for the opponent search
    pub player_query: String,
    #[allow(missing_docs)]
    pub preferences: MatchPreferences,
    /// Results of the last completed search
    pub players: Vec<PlayerId>,
    /// A search is in flight
    pub searching: bool,
    /// Bumped on every search; results for older searches are dropped
    pub search_generation: u64,
}

/// Browse actions
#[derive(Action, Clone, Debug, PartialEq)]
pub enum BrowseAction {
    /// Recompute both listings from the current query and facets
    #[command]
    Refresh,

    /// Change the listing query
    #[command]
    SetQuery {
        #[allow(missing_docs)]
        query: String,
    },

    /// Replace the club facets
    #[command]
    SetClubFilters {
        #[allow(missing_docs)]
        filters: ClubFilters,
    },

    /// Replace the trainer facets
    #[command]
    SetTrainerFilters {
        #[allow(missing_docs)]
        filters: TrainerFilters,
    },

    /// Drop the query and every facet
    #[command]
    ClearFilters,

    /// Search for opponents
    #[command]
    SearchPlayers {
        #[allow(missing_docs)]
        query: String,
        #[allow(missing_docs)]
        preferences: MatchPreferences,
    },

    /// Search results arrived
    #[event]
    PlayersFound {
        /// Generation of the search these results answer
        generation: u64,
        #[allow(missing_docs)]
        players: Vec<PlayerId>,
    },

    /// Forget the search and restore default preferences
    #[command]
    ResetSearch,
}

/// Dependencies for browsing
#[derive(Clone)]
pub struct BrowseEnvironment {
    /// The catalog being browsed
    pub catalog: Arc<Catalog>,
    /// Source of "today" for default match preferences
    pub clock: Arc<dyn Clock>,
    /// How long a player search takes
    pub search_latency: Duration,
}

impl BrowseEnvironment {
    /// Creates a new `BrowseEnvironment`
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, clock: Arc<dyn Clock>, search_latency: Duration) -> Self {
        Self {
            catalog,
            clock,
            search_latency,
        }
    }
}

/// Reducer for the browse screens
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowseReducer;

impl BrowseReducer {
    /// Create a new browse reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn refresh_clubs(state: &mut BrowseState, catalog: &Catalog) {
        state.clubs = filter_clubs(catalog, &state.query, &state.club_filters)
            .into_iter()
            .map(|club| club.id.clone())
            .collect();
    }

    fn refresh_trainers(state: &mut BrowseState, catalog: &Catalog) {
        state.trainers = filter_trainers(catalog, &state.query, &state.trainer_filters)
            .into_iter()
            .map(|trainer| trainer.id.clone())
            .collect();
    }
}

impl Reducer for BrowseReducer {
    type State = BrowseState;
    type Action = BrowseAction;
    type Environment = BrowseEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            BrowseAction::Refresh => {
                Self::refresh_clubs(state, &env.catalog);
                Self::refresh_trainers(state, &env.catalog);
            },
            BrowseAction::SetQuery { query } => {
                state.query = query;
                Self::refresh_clubs(state, &env.catalog);
                Self::refresh_trainers(state, &env.catalog);
            },
            BrowseAction::SetClubFilters { filters } => {
                state.club_filters = filters;
                Self::refresh_clubs(state, &env.catalog);
            },
            BrowseAction::SetTrainerFilters { filters } => {
                state.trainer_filters = filters;
                Self::refresh_trainers(state, &env.catalog);
            },
            BrowseAction::ClearFilters => {
                state.query.clear();
                state.club_filters = ClubFilters::default();
                state.trainer_filters = TrainerFilters::default();
                Self::refresh_clubs(state, &env.catalog);
                Self::refresh_trainers(state, &env.catalog);
            },
            BrowseAction::SearchPlayers { query, preferences } => {
                let players = search_players(&env.catalog, &query, &preferences)
                    .into_iter()
                    .map(|player| player.id.clone())
                    .collect();

                state.search_generation += 1;
                state.searching = true;
                state.player_query = query;
                state.preferences = preferences;

                tracing::debug!(
                    generation = state.search_generation,
                    query = %state.player_query,
                    "Player search started"
                );

                return smallvec![delay! {
                    duration: env.search_latency,
                    action: BrowseAction::PlayersFound {
                        generation: state.search_generation,
                        players,
                    }
                }];
            },
            BrowseAction::PlayersFound {
                generation,
                players,
            } => {
                if generation != state.search_generation {
                    tracing::debug!(generation, "Dropping superseded search results");
                    return SmallVec::new();
                }
                tracing::debug!(generation, found = players.len(), "Player search finished");
                state.players = players;
                state.searching = false;
            },
            BrowseAction::ResetSearch => {
                state.search_generation += 1;
                state.searching = false;
                state.player_query.clear();
                state.players.clear();
                state.preferences = MatchPreferences::starting(env.clock.today());
            },
        }
        SmallVec::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{SkillLevel, Surface};
    use courtside_testing::{ReducerTest, assertions, test_clock, test_date};

    fn env() -> BrowseEnvironment {
        BrowseEnvironment::new(
            Arc::new(Catalog::seeded()),
            Arc::new(test_clock()),
            Duration::from_millis(1500),
        )
    }

    fn ids<T: std::fmt::Display>(items: &[T]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn refresh_lists_everything() {
        ReducerTest::new(BrowseReducer::new())
            .with_env(env())
            .given_state(BrowseState::default())
            .when_action(BrowseAction::Refresh)
            .then_state(|state| {
                assert_eq!(state.clubs.len(), 3);
                assert_eq!(state.trainers.len(), 4);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn facets_narrow_only_their_listing() {
        ReducerTest::new(BrowseReducer::new())
            .with_env(env())
            .given_state(BrowseState::default())
            .when_action(BrowseAction::Refresh)
            .when_action(BrowseAction::SetClubFilters {
                filters: ClubFilters {
                    surface: Some(Surface::Clay),
                    ..ClubFilters::default()
                },
            })
            .then_state(|state| {
                assert_eq!(ids(&state.clubs), ["baseline", "ace"]);
                assert_eq!(state.trainers.len(), 4);
            })
            .run();
    }

    #[test]
    fn query_applies_to_both_listings_until_cleared() {
        ReducerTest::new(BrowseReducer::new())
            .with_env(env())
            .given_state(BrowseState::default())
            .when_action(BrowseAction::SetQuery {
                query: "zemun".into(),
            })
            .then_state(|state| {
                assert_eq!(ids(&state.clubs), ["match-point"]);
                assert_eq!(ids(&state.trainers), ["trainer3"]);
            })
            .run();

        ReducerTest::new(BrowseReducer::new())
            .with_env(env())
            .given_state(BrowseState::default())
            .when_actions([
                BrowseAction::SetQuery {
                    query: "zemun".into(),
                },
                BrowseAction::ClearFilters,
            ])
            .then_state(|state| {
                assert!(state.query.is_empty());
                assert_eq!(state.clubs.len(), 3);
            })
            .run();
    }

    #[test]
    fn player_search_answers_after_the_latency() {
        ReducerTest::new(BrowseReducer::new())
            .with_env(env())
            .given_state(BrowseState::default())
            .when_action(BrowseAction::SearchPlayers {
                query: String::new(),
                preferences: MatchPreferences {
                    skill_levels: vec![SkillLevel::Advanced],
                    ..MatchPreferences::default()
                },
            })
            .then_state(|state| {
                assert!(state.searching);
                assert!(state.players.is_empty());
                assert_eq!(state.search_generation, 1);
            })
            .then_effects(|effects| {
                assertions::assert_has_delay_effect(effects);
                let Effect::Delay { duration, action } = &effects[0] else {
                    unreachable!("search returns a delay");
                };
                assert_eq!(*duration, Duration::from_millis(1500));
                assert_eq!(
                    **action,
                    BrowseAction::PlayersFound {
                        generation: 1,
                        players: vec!["player2".into()],
                    }
                );
            })
            .run();
    }

    #[test]
    fn superseded_results_are_dropped() {
        ReducerTest::new(BrowseReducer::new())
            .with_env(env())
            .given_state(BrowseState {
                search_generation: 2,
                searching: true,
                ..BrowseState::default()
            })
            .when_action(BrowseAction::PlayersFound {
                generation: 1,
                players: vec!["player1".into()],
            })
            .then_state(|state| {
                assert!(state.players.is_empty());
                assert!(state.searching);
            })
            .run();
    }

    #[test]
    fn reset_search_restores_default_preferences() {
        ReducerTest::new(BrowseReducer::new())
            .with_env(env())
            .given_state(BrowseState {
                player_query: "ana".into(),
                players: vec!["player4".into()],
                ..BrowseState::default()
            })
            .when_action(BrowseAction::ResetSearch)
            .then_state(|state| {
                assert!(state.players.is_empty());
                assert!(state.player_query.is_empty());
                let window = state.preferences.date_range.unwrap();
                assert_eq!(window.start, test_date(0));
                assert_eq!(window.end, test_date(7));
            })
            .run();
    }
}
