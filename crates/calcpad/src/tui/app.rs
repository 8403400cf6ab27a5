//! Terminal application state

use crate::controller::Calculator;
use crate::core::{DisplayFormat, DisplayOutput};
use crate::keypad::Keypad;

use super::input::AppAction;

/// Calculator application state
#[derive(Debug, Clone)]
pub struct CalculatorApp {
    calculator: Calculator,
    /// Element ID of the button matching the last key press
    highlighted: Option<String>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a new app with the default display format
    #[must_use]
    pub fn new() -> Self {
        Self::with_format(DisplayFormat::default())
    }

    /// Creates a new app with a custom display format
    #[must_use]
    pub fn with_format(format: DisplayFormat) -> Self {
        Self {
            calculator: Calculator::with_format(format),
            highlighted: None,
            should_quit: false,
        }
    }

    /// Applies an action; returns true when the app should quit
    pub fn handle_action(&mut self, action: AppAction) -> bool {
        match action {
            AppAction::Input(event) => {
                self.highlighted = self
                    .calculator
                    .keypad()
                    .find_by_event(event)
                    .map(|b| b.id.clone());
                self.calculator.apply(event);
            }
            AppAction::Quit => self.should_quit = true,
            AppAction::None => {}
        }
        self.should_quit
    }

    /// Returns whether the app should quit
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current display
    #[must_use]
    pub const fn display(&self) -> &DisplayOutput {
        self.calculator.display()
    }

    /// Keypad layout
    #[must_use]
    pub const fn keypad(&self) -> &Keypad {
        self.calculator.keypad()
    }

    /// Highlighted button ID
    #[must_use]
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    /// Underlying calculator
    #[must_use]
    pub const fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Clears the calculator and the highlight
    pub fn reset(&mut self) {
        self.calculator.reset();
        self.highlighted = None;
    }
}
