//! Integration tests for Store action broadcasting
//!
//! Covers the observation side of the store: subscribers see every action
//! produced by effects, and `send_and_wait_for` returns the first action
//! matching a predicate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use courtside_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use courtside_runtime::{Store, StoreError};
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

/// Points needed to take the tiebreak
const POINTS_TO_WIN: u32 = 7;

#[derive(Debug, Clone, PartialEq)]
enum TiebreakAction {
    /// Start a tiebreak on one court
    Start { court: u64 },
    /// One point played
    PointPlayed { court: u64, point: u32 },
    /// Tiebreak finished (terminal)
    Won { court: u64 },
    /// A player retired before the first point
    Retire { court: u64 },
    /// Tiebreak abandoned (terminal)
    Abandoned { court: u64, reason: String },
    /// Changeover with no follow-up action
    Changeover,
}

#[derive(Debug, Clone, Default)]
struct Scoreboard {
    points: Vec<(u64, u32)>,
    finished: Vec<u64>,
}

#[derive(Clone)]
struct TiebreakReducer;

impl Reducer for TiebreakReducer {
    type State = Scoreboard;
    type Action = TiebreakAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Scoreboard,
        action: TiebreakAction,
        (): &(),
    ) -> SmallVec<[Effect<TiebreakAction>; 4]> {
        match action {
            TiebreakAction::Start { court } => smallvec![Effect::Future(Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Some(TiebreakAction::PointPlayed { court, point: 1 })
            }))],
            TiebreakAction::PointPlayed { court, point } => {
                state.points.push((court, point));
                let next = if point < POINTS_TO_WIN {
                    TiebreakAction::PointPlayed {
                        court,
                        point: point + 1,
                    }
                } else {
                    TiebreakAction::Won { court }
                };
                smallvec![Effect::Future(Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(2)).await;
                    Some(next)
                }))]
            },
            TiebreakAction::Won { court } | TiebreakAction::Abandoned { court, .. } => {
                state.finished.push(court);
                SmallVec::new()
            },
            TiebreakAction::Retire { court } => smallvec![Effect::Future(Box::pin(async move {
                Some(TiebreakAction::Abandoned {
                    court,
                    reason: "injury".to_string(),
                })
            }))],
            TiebreakAction::Changeover => smallvec![Effect::Future(Box::pin(async { None }))],
        }
    }
}

fn store() -> Store<Scoreboard, TiebreakAction, (), TiebreakReducer> {
    Store::with_broadcast_capacity(Scoreboard::default(), TiebreakReducer, (), 64)
}

fn finished(court: u64) -> impl Fn(&TiebreakAction) -> bool {
    move |action| {
        matches!(
            action,
            TiebreakAction::Won { court: c } | TiebreakAction::Abandoned { court: c, .. } if *c == court
        )
    }
}

// ============================================================================
// send_and_wait_for
// ============================================================================

#[tokio::test]
async fn waits_through_a_chain_of_effects() {
    let store = store();

    let result = store
        .send_and_wait_for(
            TiebreakAction::Start { court: 1 },
            finished(1),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    assert_eq!(result, TiebreakAction::Won { court: 1 });
    let points = store.state(|s| s.points.clone()).await;
    assert_eq!(points.len(), POINTS_TO_WIN as usize);
    assert_eq!(points.last(), Some(&(1, POINTS_TO_WIN)));
    assert_eq!(store.state(|s| s.finished.clone()).await, vec![1]);
}

#[tokio::test]
async fn returns_the_failure_branch_when_it_matches() {
    let store = store();

    let result = store
        .send_and_wait_for(
            TiebreakAction::Retire { court: 4 },
            finished(4),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(
        result,
        TiebreakAction::Abandoned {
            court: 4,
            reason: "injury".to_string(),
        }
    );
}

#[tokio::test]
async fn times_out_when_nothing_matches() {
    let store = store();

    let result = store
        .send_and_wait_for(
            TiebreakAction::Changeover,
            |_| true,
            Duration::from_millis(50),
        )
        .await;

    assert!(matches!(result, Err(StoreError::Timeout)));
}

#[tokio::test]
async fn concurrent_waiters_get_their_own_court() {
    let store = store();

    let waits: Vec<_> = (1..=3)
        .map(|court| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .send_and_wait_for(
                        TiebreakAction::Start { court },
                        finished(court),
                        Duration::from_secs(2),
                    )
                    .await
            })
        })
        .collect();

    for (court, wait) in (1..=3).zip(waits) {
        let result = wait.await.unwrap().unwrap();
        assert_eq!(result, TiebreakAction::Won { court });
    }

    let mut done = store.state(|s| s.finished.clone()).await;
    done.sort_unstable();
    assert_eq!(done, vec![1, 2, 3]);
}

// ============================================================================
// subscribe_actions
// ============================================================================

#[tokio::test]
async fn subscribers_see_effect_actions_in_order() {
    let store = store();
    let mut first = store.subscribe_actions();
    let mut second = store.subscribe_actions();

    let mut handle = store.send(TiebreakAction::Retire { court: 2 }).await.unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    let expected = TiebreakAction::Abandoned {
        court: 2,
        reason: "injury".to_string(),
    };
    assert_eq!(first.recv().await.unwrap(), expected);
    assert_eq!(second.recv().await.unwrap(), expected);
}

#[tokio::test]
async fn commands_sent_directly_are_not_broadcast() {
    let store = store();
    let mut observer = store.subscribe_actions();

    store
        .send(TiebreakAction::PointPlayed {
            court: 9,
            point: POINTS_TO_WIN,
        })
        .await
        .unwrap();

    // Only the effect's `Won` reaches observers, not the command itself
    let observed = tokio::time::timeout(Duration::from_secs(1), observer.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(observed, TiebreakAction::Won { court: 9 });
}

#[tokio::test]
async fn shutdown_rejects_new_waits() {
    let store = store();
    store.shutdown(Duration::from_secs(1)).await.unwrap();

    let result = store
        .send_and_wait_for(
            TiebreakAction::Start { court: 1 },
            finished(1),
            Duration::from_millis(50),
        )
        .await;

    assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
}
