//! Booking wizard tests through the runtime store.
//!
//! Each test drives a `Store` the way a UI shell would: commands in,
//! gateway events observed through `send_and_wait_for`. The gateway is
//! scripted, so outcomes are deterministic.
//!
//! Run with: `cargo test --test booking_flow_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use courtside_booking::error::BookingError;
use courtside_booking::flow::{TrainingExtras, TrainingReservation};
use courtside_booking::gateway::Resource;
use courtside_booking::mocks::{GatewayCall, ScriptedGateway};
use courtside_booking::types::{
    BookingDetails, BookingHours, BookingStatus, ClockHour, ClubId, CourtId, Money, SessionType,
    TrainerId,
};
use courtside_booking::{
    CourtFlow, CourtReservation, FlowAction, FlowEnvironment, FlowState, Step, TrainingFlow,
};
use courtside_runtime::Store;
use courtside_testing::{init_test_tracing, test_clock, test_date};
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(2);

type CourtStore = Store<FlowState<CourtReservation>, FlowAction<CourtReservation>, FlowEnvironment, CourtFlow>;
type TrainingStore =
    Store<FlowState<TrainingReservation>, FlowAction<TrainingReservation>, FlowEnvironment, TrainingFlow>;

fn env(gateway: &ScriptedGateway) -> FlowEnvironment {
    FlowEnvironment::new(Arc::new(test_clock()), Arc::new(gateway.clone()))
}

fn hour(h: u8) -> ClockHour {
    ClockHour::new(h).unwrap()
}

fn slots_answered<D: courtside_booking::ReservationDomain>(action: &FlowAction<D>) -> bool {
    matches!(
        action,
        FlowAction::SlotsLoaded { .. } | FlowAction::SlotsFailed { .. }
    )
}

fn submit_answered<D: courtside_booking::ReservationDomain>(action: &FlowAction<D>) -> bool {
    matches!(
        action,
        FlowAction::BookingConfirmed { .. } | FlowAction::BookingRejected { .. }
    )
}

/// Walk a court store to the date step at Baseline court 1
async fn court_store_at_date_step(gateway: &ScriptedGateway) -> CourtStore {
    let store = Store::new(FlowState::new(), CourtFlow::new(), env(gateway));

    store
        .send(FlowAction::SelectPrimary {
            primary: ClubId::from("baseline"),
        })
        .await
        .unwrap();
    store.send(FlowAction::Proceed).await.unwrap();
    store
        .send(FlowAction::SelectSecondary {
            secondary: CourtId::from("baseline-1"),
        })
        .await
        .unwrap();
    let answer = store
        .send_and_wait_for(FlowAction::Proceed, slots_answered, WAIT)
        .await
        .unwrap();
    assert!(matches!(answer, FlowAction::SlotsLoaded { .. }));

    store
}

/// Complete court booking ending at midnight
#[tokio::test]
async fn test_court_booking_until_midnight() {
    init_test_tracing();
    let gateway = ScriptedGateway::new(Arc::new(test_clock()));
    let store = court_store_at_date_step(&gateway).await;

    let (step, date, slot_count) = store.state(|s| (s.step, s.date, s.slots.len())).await;
    assert_eq!(step, Step::DateTime);
    assert_eq!(date, Some(test_date(0)));
    // Baseline is open 07:00 to 23:00 on weekdays
    assert_eq!(slot_count, 16);

    store.send(FlowAction::SelectSlot { time: hour(22) }).await.unwrap();
    store
        .send(FlowAction::SetDuration {
            hours: BookingHours::new(2).unwrap(),
        })
        .await
        .unwrap();
    store.send(FlowAction::Proceed).await.unwrap();
    assert_eq!(store.state(|s| s.step).await, Step::Confirmation);

    let answer = store
        .send_and_wait_for(FlowAction::Submit, submit_answered, WAIT)
        .await
        .unwrap();
    assert!(matches!(answer, FlowAction::BookingConfirmed { .. }));

    let booking = store.state(|s| s.confirmed.clone()).await.unwrap();
    assert_eq!(booking.start, hour(22));
    assert_eq!(booking.end, ClockHour::END_OF_DAY);
    assert_eq!(booking.end.to_string(), "24:00");
    assert_eq!(booking.total_price, Money::dinars(6000));
    assert_eq!(
        booking.details,
        BookingDetails::Court {
            court_id: CourtId::from("baseline-1"),
        }
    );
    assert_eq!(store.state(|s| s.step).await, Step::Success);

    let submits = gateway.submits();
    assert_eq!(submits.len(), 1);
    assert_eq!(submits[0].start, hour(22));
    assert_eq!(submits[0].resource, Resource::Court(CourtId::from("baseline-1")));
}

/// A three hour booking from 22:00 never reaches confirmation
#[tokio::test]
async fn test_booking_past_midnight_is_refused() {
    let gateway = ScriptedGateway::new(Arc::new(test_clock()));
    let store = court_store_at_date_step(&gateway).await;

    store.send(FlowAction::SelectSlot { time: hour(22) }).await.unwrap();
    store
        .send(FlowAction::SetDuration {
            hours: BookingHours::MAX,
        })
        .await
        .unwrap();
    store.send(FlowAction::Proceed).await.unwrap();

    let (step, error) = store.state(|s| (s.step, s.error.clone())).await;
    assert_eq!(step, Step::DateTime);
    assert!(matches!(error, Some(BookingError::PastMidnight { hours: 3, .. })));
    assert!(gateway.submits().is_empty());
}

/// A conflicting submit keeps the user on confirmation with the slot marked taken
#[tokio::test]
async fn test_slot_taken_on_submit() {
    let gateway = ScriptedGateway::new(Arc::new(test_clock())).rejecting(BookingError::SlotTaken);
    let store = court_store_at_date_step(&gateway).await;

    store.send(FlowAction::SelectSlot { time: hour(18) }).await.unwrap();
    store.send(FlowAction::Proceed).await.unwrap();

    let answer = store
        .send_and_wait_for(FlowAction::Submit, submit_answered, WAIT)
        .await
        .unwrap();
    assert_eq!(
        answer,
        FlowAction::BookingRejected {
            error: BookingError::SlotTaken,
        }
    );

    store
        .state(|s| {
            assert_eq!(s.step, Step::Confirmation);
            assert!(!s.submitting);
            assert!(s.confirmed.is_none());
            assert!(s.bookings.is_empty());
            assert_eq!(s.error, Some(BookingError::SlotTaken));
            let taken = s.slots.iter().find(|slot| slot.time == hour(18)).unwrap();
            assert!(!taken.available);
        })
        .await;
}

/// Cancelling a confirmed booking goes through the gateway
#[tokio::test]
async fn test_cancel_confirmed_booking() {
    let gateway = ScriptedGateway::new(Arc::new(test_clock()));
    let store = court_store_at_date_step(&gateway).await;

    store.send(FlowAction::SelectSlot { time: hour(9) }).await.unwrap();
    store.send(FlowAction::Proceed).await.unwrap();
    store
        .send_and_wait_for(FlowAction::Submit, submit_answered, WAIT)
        .await
        .unwrap();
    let booking_id = store.state(|s| s.confirmed.as_ref().map(|b| b.id.clone())).await.unwrap();

    let answer = store
        .send_and_wait_for(
            FlowAction::CancelBooking {
                booking_id: booking_id.clone(),
            },
            |a| matches!(a, FlowAction::BookingCancelled { .. }),
            WAIT,
        )
        .await
        .unwrap();
    assert_eq!(
        answer,
        FlowAction::BookingCancelled {
            booking_id: booking_id.clone(),
        }
    );

    store
        .state(|s| {
            assert_eq!(s.booking(&booking_id).unwrap().status, BookingStatus::Cancelled);
            assert_eq!(s.confirmed.as_ref().unwrap().status, BookingStatus::Cancelled);
            assert!(s.cancelling.is_none());
        })
        .await;
    assert!(matches!(gateway.calls().last(), Some(GatewayCall::Cancel(id)) if *id == booking_id));
}

/// Submitting a training booking with no date fails and records nothing
#[tokio::test]
async fn test_training_submit_without_date() {
    let gateway = ScriptedGateway::new(Arc::new(test_clock()));
    let store: TrainingStore = Store::new(
        FlowState {
            step: Step::Confirmation,
            primary: Some(TrainerId::from("trainer1")),
            secondary: Some(ClubId::from("baseline")),
            date: None,
            ..FlowState::new()
        },
        TrainingFlow::new(),
        env(&gateway),
    );

    let mut handle = store.send(FlowAction::Submit).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    store
        .state(|s| {
            assert_eq!(s.step, Step::Confirmation);
            assert_eq!(
                s.error,
                Some(BookingError::MissingInformation { missing: "date" })
            );
            assert!(s.confirmed.is_none());
            assert!(s.bookings.is_empty());
            assert!(!s.submitting);
        })
        .await;
    assert!(gateway.submits().is_empty());
}

/// Training extras travel into the booking details
#[tokio::test]
async fn test_training_booking_carries_session_details() {
    let gateway = ScriptedGateway::new(Arc::new(test_clock()));
    let store: TrainingStore = Store::new(FlowState::new(), TrainingFlow::new(), env(&gateway));

    store
        .send(FlowAction::SelectPrimary {
            primary: TrainerId::from("trainer3"),
        })
        .await
        .unwrap();
    store.send(FlowAction::Proceed).await.unwrap();
    store
        .send(FlowAction::SelectSecondary {
            secondary: ClubId::from("match-point"),
        })
        .await
        .unwrap();
    store
        .send_and_wait_for(FlowAction::Proceed, slots_answered, WAIT)
        .await
        .unwrap();

    // trainer3 coaches 15:00 to 21:00 on weekdays
    let first = store.state(|s| s.slots.first().map(|slot| slot.time)).await;
    assert_eq!(first, Some(hour(15)));
    assert_eq!(store.state(|s| s.slots.len()).await, 6);

    store.send(FlowAction::SelectSlot { time: hour(15) }).await.unwrap();
    store
        .send(FlowAction::SetExtras {
            extras: TrainingExtras {
                session_type: SessionType::Group,
                focus: vec!["Volley".to_string()],
                ..TrainingExtras::default()
            },
        })
        .await
        .unwrap();
    store.send(FlowAction::Proceed).await.unwrap();
    store
        .send_and_wait_for(FlowAction::Submit, submit_answered, WAIT)
        .await
        .unwrap();

    let booking = store.state(|s| s.confirmed.clone()).await.unwrap();
    assert_eq!(booking.venue_id, ClubId::from("match-point"));
    match booking.details {
        BookingDetails::Training {
            trainer_id,
            session_type,
            focus,
            ..
        } => {
            assert_eq!(trainer_id, TrainerId::from("trainer3"));
            assert_eq!(session_type, SessionType::Group);
            assert_eq!(focus, ["Volley"]);
        },
        other => panic!("expected training details, got {other:?}"),
    }
}

/// Stores reject work after shutdown
#[tokio::test]
async fn test_store_rejects_actions_after_shutdown() {
    let gateway = ScriptedGateway::new(Arc::new(test_clock()));
    let store = court_store_at_date_step(&gateway).await;

    store.shutdown(WAIT).await.unwrap();
    assert!(store.send(FlowAction::Reset).await.is_err());
}
