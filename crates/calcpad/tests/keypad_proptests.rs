//! Property-based tests for the keypad layout and input mapping

use std::collections::HashSet;

use calcpad::prelude::*;
use proptest::prelude::*;

// ===== Strategy definitions =====

/// Generate a valid grid position
fn grid_position_strategy() -> impl Strategy<Value = (usize, usize)> {
    (0usize..5usize, 0usize..4usize)
}

/// Generate any key the browser keyboard map understands
fn mapped_key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u8..=9).prop_map(|d| d.to_string()),
        Just(".".to_string()),
        Just("+".to_string()),
        Just("-".to_string()),
        Just("*".to_string()),
        Just("/".to_string()),
        Just("%".to_string()),
        Just("=".to_string()),
        Just("Enter".to_string()),
        Just("Backspace".to_string()),
        Just("Escape".to_string()),
    ]
}

// ===== Layout tests =====

#[test]
fn test_button_ids_unique() {
    let keypad = Keypad::new();
    let ids: HashSet<&str> = keypad.buttons().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids.len(), keypad.button_count());
}

#[test]
fn test_button_positions_unique_and_in_grid() {
    let keypad = Keypad::new();
    let (rows, cols) = keypad.dimensions();
    let positions: HashSet<(usize, usize)> =
        keypad.buttons().iter().map(|b| (b.row, b.col)).collect();
    assert_eq!(positions.len(), keypad.button_count());
    assert!(positions.iter().all(|(r, c)| *r < rows && *c < cols));
}

#[test]
fn test_button_events_unique() {
    let keypad = Keypad::new();
    let events: HashSet<InputEvent> = keypad.buttons().iter().map(|b| b.event).collect();
    assert_eq!(events.len(), keypad.button_count());
}

// ===== Property tests =====

proptest! {
    /// A position either holds exactly the button that reports it, or nothing
    #[test]
    fn prop_button_at_consistent((row, col) in grid_position_strategy()) {
        let keypad = Keypad::new();
        match keypad.button_at(row, col) {
            Some(button) => {
                prop_assert_eq!(button.row, row);
                prop_assert_eq!(button.col, col);
            }
            None => prop_assert_eq!((row, col), (4, 3)),
        }
    }

    /// Clicking a button produces the event its label maps to
    #[test]
    fn prop_click_matches_label(index in 0usize..19) {
        let keypad = Keypad::new();
        let button = &keypad.buttons()[index];
        prop_assert_eq!(keypad.handle_click(&button.id), Some(button.event));
        prop_assert_eq!(InputEvent::from_token(&button.label()), Some(button.event));
    }

    /// Every mapped keyboard key has a keypad button
    #[test]
    fn prop_mapped_key_has_button(key in mapped_key_strategy()) {
        let keypad = Keypad::new();
        let event = InputEvent::from_key(&key);
        prop_assert!(event.is_some());
        let button = keypad.find_by_key(&key);
        prop_assert_eq!(button.map(|b| b.event), event);
    }

    /// Pressing a button and pressing its key lead to the same display
    #[test]
    fn prop_button_and_key_agree(keys in prop::collection::vec(mapped_key_strategy(), 0..20)) {
        let mut by_key = Calculator::new();
        let mut by_button = Calculator::new();
        for key in &keys {
            prop_assert!(by_key.press_key(key));
            let id = by_button.keypad().find_by_key(key).map(|b| b.id.clone()).unwrap();
            prop_assert!(by_button.press_button(&id));
        }
        prop_assert_eq!(by_key.display(), by_button.display());
    }

    /// Unmapped keys never change the calculator
    #[test]
    fn prop_unmapped_keys_ignored(key in "[a-zA-Z(){}^&!]{1,3}") {
        let mut calc = Calculator::new();
        calc.press_sequence("12+3").unwrap();
        let before = calc.display().clone();
        prop_assert!(!calc.press_key(&key));
        prop_assert_eq!(calc.display(), &before);
    }
}
