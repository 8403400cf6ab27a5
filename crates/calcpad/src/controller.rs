//! Single owner of the calculator state
//!
//! Frontends talk to a [`Calculator`] rather than to the state machine so that
//! every input path goes through [`dispatch`] and the last display is cached.

use tracing::debug;

use crate::core::{CalcResult, CalculatorState, DisplayFormat, DisplayOutput};
use crate::input::{dispatch, InputEvent};
use crate::keypad::Keypad;

/// Calculator controller
#[derive(Debug, Clone)]
pub struct Calculator {
    state: CalculatorState,
    keypad: Keypad,
    display: DisplayOutput,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a calculator with the default display format
    #[must_use]
    pub fn new() -> Self {
        Self::with_format(DisplayFormat::default())
    }

    /// Creates a calculator with a custom display format
    #[must_use]
    pub fn with_format(format: DisplayFormat) -> Self {
        let state = CalculatorState::with_format(format);
        let display = state.display();
        Self {
            state,
            keypad: Keypad::new(),
            display,
        }
    }

    /// Applies one event
    pub fn apply(&mut self, event: InputEvent) -> &DisplayOutput {
        self.display = dispatch(&mut self.state, event);
        &self.display
    }

    /// Handles a keyboard key; returns false when the key is not mapped
    pub fn press_key(&mut self, key: &str) -> bool {
        match InputEvent::from_key(key) {
            Some(event) => {
                self.apply(event);
                true
            }
            None => {
                debug!(key, "unmapped key ignored");
                false
            }
        }
    }

    /// Handles a keypad button click by element ID; returns false for unknown IDs
    pub fn press_button(&mut self, id: &str) -> bool {
        match self.keypad.handle_click(id) {
            Some(event) => {
                self.apply(event);
                true
            }
            None => {
                debug!(id, "unknown button ignored");
                false
            }
        }
    }

    /// Replays a compact key sequence such as `"12+3="`.
    ///
    /// The whole sequence is parsed before any key is applied, so an unknown
    /// key leaves the calculator untouched.
    pub fn press_sequence(&mut self, sequence: &str) -> CalcResult<&DisplayOutput> {
        let events = InputEvent::parse_sequence(sequence)?;
        for event in events {
            self.apply(event);
        }
        Ok(&self.display)
    }

    /// Clears the calculator
    pub fn reset(&mut self) {
        self.apply(InputEvent::Clear);
    }

    /// Last display output
    #[must_use]
    pub const fn display(&self) -> &DisplayOutput {
        &self.display
    }

    /// Underlying state
    #[must_use]
    pub const fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Keypad layout
    #[must_use]
    pub const fn keypad(&self) -> &Keypad {
        &self.keypad
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CalcError;

    #[test]
    fn test_new_calculator_display() {
        let calc = Calculator::new();
        assert_eq!(calc.display(), &DisplayOutput::new("0", ""));
    }

    #[test]
    fn test_press_key() {
        let mut calc = Calculator::new();
        assert!(calc.press_key("7"));
        assert!(calc.press_key("*"));
        assert!(calc.press_key("6"));
        assert!(calc.press_key("Enter"));
        assert_eq!(calc.display().current, "42");
        assert!(!calc.press_key("Shift"));
    }

    #[test]
    fn test_press_key_escape_clears() {
        let mut calc = Calculator::new();
        calc.press_key("9");
        calc.press_key("Escape");
        assert_eq!(calc.display(), &DisplayOutput::new("0", ""));
    }

    #[test]
    fn test_press_button() {
        let mut calc = Calculator::new();
        for id in ["btn-1", "btn-2", "btn-divide", "btn-4", "btn-equals"] {
            assert!(calc.press_button(id));
        }
        assert_eq!(calc.display().current, "3");
        assert!(!calc.press_button("btn-sqrt"));
    }

    #[test]
    fn test_press_sequence() {
        let mut calc = Calculator::new();
        let display = calc.press_sequence("1234+1=").unwrap();
        assert_eq!(display, &DisplayOutput::new("1,235", ""));
    }

    #[test]
    fn test_press_sequence_unknown_key_is_atomic() {
        let mut calc = Calculator::new();
        calc.press_sequence("5").unwrap();
        let err = calc.press_sequence("+3?").unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
        assert_eq!(calc.display().current, "5");
        assert_eq!(calc.state().expression_history(), "");
    }

    #[test]
    fn test_reset() {
        let mut calc = Calculator::new();
        calc.press_sequence("4/0=").unwrap();
        assert_eq!(calc.display().current, "Error");
        calc.reset();
        assert_eq!(calc.display(), &DisplayOutput::new("0", ""));
    }

    #[test]
    fn test_with_format() {
        let mut calc = Calculator::with_format(DisplayFormat::new().with_group_separator("'"));
        calc.press_sequence("1000000").unwrap();
        assert_eq!(calc.display().current, "1'000'000");
    }

    #[test]
    fn test_keypad_accessor() {
        assert_eq!(Calculator::new().keypad().button_count(), 19);
    }
}
