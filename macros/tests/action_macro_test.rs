//! Tests for #[derive(Action)] macro

use courtside_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum CourtAction {
    #[command]
    PickCourt { court_id: String },

    #[command]
    Proceed,

    #[command]
    PickHour(u8),

    #[event]
    SlotsLoaded { count: usize },

    #[event]
    BookingRejected(String),

    Reset,
}

#[derive(Action, Clone, Debug)]
enum GenericAction<T: Clone> {
    #[command]
    Select { item: T },

    #[event]
    Loaded(Vec<T>),
}

#[test]
fn commands_are_identified() {
    let commands = vec![
        CourtAction::PickCourt {
            court_id: "baseline-1".to_string(),
        },
        CourtAction::Proceed,
        CourtAction::PickHour(18),
    ];

    for cmd in commands {
        assert!(cmd.is_command(), "Expected command: {cmd:?}");
        assert!(!cmd.is_event(), "Should not be event: {cmd:?}");
    }
}

#[test]
fn events_are_identified() {
    let events = vec![
        CourtAction::SlotsLoaded { count: 16 },
        CourtAction::BookingRejected("slot already taken".to_string()),
    ];

    for event in events {
        assert!(!event.is_command(), "Should not be command: {event:?}");
        assert!(event.is_event(), "Expected event: {event:?}");
    }
}

#[test]
fn unmarked_variant_is_neither() {
    let action = CourtAction::Reset;
    assert!(!action.is_command());
    assert!(!action.is_event());
}

#[test]
fn names_follow_variant_identifiers() {
    assert_eq!(CourtAction::Proceed.name(), "Proceed");
    assert_eq!(CourtAction::PickHour(9).name(), "PickHour");
    assert_eq!(CourtAction::SlotsLoaded { count: 0 }.name(), "SlotsLoaded");
    assert_eq!(CourtAction::Reset.name(), "Reset");
}

#[test]
fn generic_enums_are_supported() {
    let select = GenericAction::Select { item: 7_u32 };
    let loaded = GenericAction::Loaded(vec![1_u32, 2, 3]);

    assert!(select.is_command());
    assert!(loaded.is_event());
    assert_eq!(loaded.name(), "Loaded");
}
