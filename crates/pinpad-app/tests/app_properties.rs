//! Property-based tests for the App state machine.
//!
//! Tests verify that invariants hold under arbitrary event sequences.
//! This ensures behavioral correctness across all possible execution paths.

use pinpad_app::{App, AppAction, AppEvent, KeyInput, KeypadInput, Screen};
use pinpad_harness::SimEnv;
use pinpad_store::{MemoryLog, ResultLog, load_or_empty};
use proptest::prelude::*;

/// Generate random keyboard input.
fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        4 => prop::char::range('0', '9').prop_map(KeyInput::Char),
        2 => prop::char::range('a', 'c').prop_map(KeyInput::Char),
        1 => Just(KeyInput::Char(' ')),
        2 => Just(KeyInput::Enter),
        2 => Just(KeyInput::Backspace),
        1 => Just(KeyInput::Delete),
        1 => Just(KeyInput::Tab),
        1 => Just(KeyInput::Esc),
        1 => Just(KeyInput::Left),
        1 => Just(KeyInput::Home),
        1 => Just(KeyInput::F(12)),
    ]
}

/// Generate random app events.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        8 => key_strategy().prop_map(AppEvent::Key),
        4 => (0u8..12).prop_map(|p| AppEvent::Keypad(KeypadInput::Position(p))),
        1 => Just(AppEvent::Keypad(KeypadInput::Backspace)),
        2 => Just(AppEvent::Keypad(KeypadInput::Enter)),
        2 => Just(AppEvent::Tick),
        1 => (1u16..200, 1u16..100).prop_map(|(c, r)| AppEvent::Resize(c, r)),
        1 => any::<bool>().prop_map(|results| AppEvent::Navigate { results }),
    ]
}

/// Execute log actions the way the runtime does.
///
/// Returns the number of attempts recorded.
fn process_actions(app: &mut App<SimEnv>, log: &MemoryLog, actions: Vec<AppAction>) -> usize {
    let mut recorded = 0;
    let mut pending = actions;
    while !pending.is_empty() {
        for action in std::mem::take(&mut pending) {
            match action {
                AppAction::RecordAttempt(attempt) => {
                    log.append(&attempt).unwrap();
                    recorded += 1;
                },
                AppAction::LoadResults => {
                    pending.extend(app.handle(AppEvent::ResultsLoaded(load_or_empty(log))));
                },
                AppAction::Render | AppAction::Quit => {},
            }
        }
    }
    recorded
}

/// Structural invariants that must hold after every event.
fn check_invariants(app: &App<SimEnv>) {
    assert_eq!(app.session().is_some(), app.screen() == Screen::PinEntry);
    if let Some(session) = app.session() {
        assert!(session.pin().len() <= pinpad_core::PIN_LENGTH);
        assert!(session.code().is_in_alphabet());
        assert!(!session.name().is_empty());
        assert_eq!(session.name(), session.name().trim());
    }
    assert_eq!(app.start_enabled(), !app.name_input().trimmed().is_empty());
}

proptest! {
    #[test]
    fn prop_app_invariants_hold(seed in any::<u64>(), events in prop::collection::vec(event_strategy(), 0..80)) {
        let mut app = App::new(SimEnv::with_seed(seed));
        let log = MemoryLog::new();
        let mut expected_len = 0;

        for event in events {
            let screen_before = app.screen();
            let pin_before = app.session().map(|s| s.pin().len());
            let submits = matches!(
                event,
                AppEvent::Keypad(KeypadInput::Enter) | AppEvent::Key(KeyInput::Enter)
            );

            let actions = app.handle(event);
            let recorded = process_actions(&mut app, &log, actions);
            expected_len += recorded;

            check_invariants(&app);

            // Only a full buffer can produce a record, and only one.
            if recorded > 0 {
                prop_assert_eq!(recorded, 1);
                prop_assert!(submits);
                prop_assert_eq!(screen_before, Screen::PinEntry);
                prop_assert_eq!(pin_before, Some(4));
            }
            // An incomplete submit leaves the pin screen as it was.
            if submits && screen_before == Screen::PinEntry && pin_before.is_some_and(|n| n < 4) {
                prop_assert_eq!(recorded, 0);
                prop_assert_eq!(app.screen(), Screen::PinEntry);
                prop_assert_eq!(app.session().map(|s| s.pin().len()), pin_before);
            }
        }

        prop_assert_eq!(log.list_all().unwrap().len(), expected_len);
    }

    #[test]
    fn prop_results_view_mirrors_log(
        entries in prop::collection::vec(prop::collection::vec(0u8..10, 4), 0..12)
    ) {
        let mut app = App::new(SimEnv::with_seed(1));
        let log = MemoryLog::new();

        for (i, positions) in entries.iter().enumerate() {
            let _ = app.set_name(&format!("p{i}"));
            let actions = app.start();
            process_actions(&mut app, &log, actions);
            for &p in positions {
                let actions = app.press(p);
                process_actions(&mut app, &log, actions);
            }
            let actions = app.submit();
            prop_assert_eq!(process_actions(&mut app, &log, actions), 1);
        }

        let actions = app.navigate(true);
        process_actions(&mut app, &log, actions);

        let attempts = log.list_all().unwrap();
        let rows = app.results().rows();
        prop_assert_eq!(rows.len(), entries.len());
        for (row, attempt) in rows.iter().zip(&attempts) {
            prop_assert_eq!(row.entered, attempt.entered_code);
            prop_assert_eq!(row.expected, attempt.generated_code);
            prop_assert_eq!(
                row.outcome == pinpad_app::Outcome::Match,
                attempt.generated_code == attempt.entered_code
            );
        }
    }
}
