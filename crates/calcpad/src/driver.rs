//! Unified calculator driver
//!
//! **Write the check once, run it against every frontend.** The `verify_*`
//! routines below only talk to [`CalculatorDriver`], so the controller and the
//! terminal app are held to exactly the same behaviour.

use crate::controller::Calculator;
use crate::core::CalcResult;

/// Abstract driver trait for calculator interactions
pub trait CalculatorDriver {
    /// Feeds a compact key sequence (`"12+3="`, `<` delete, `c` clear)
    fn press(&mut self, keys: &str) -> CalcResult<()>;

    /// Formatted current value
    fn current(&self) -> String;

    /// Formatted expression history
    fn history(&self) -> String;

    /// Clears the calculator
    fn reset(&mut self);
}

impl CalculatorDriver for Calculator {
    fn press(&mut self, keys: &str) -> CalcResult<()> {
        self.press_sequence(keys).map(|_| ())
    }

    fn current(&self) -> String {
        self.display().current.clone()
    }

    fn history(&self) -> String {
        self.display().history.clone()
    }

    fn reset(&mut self) {
        Calculator::reset(self);
    }
}

/// Terminal driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::CalculatorDriver;
    use crate::core::{CalcError, CalcResult};
    use crate::tui::{AppAction, CalculatorApp, InputHandler};

    /// Drives a [`CalculatorApp`] through synthesized key events
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
        handler: InputHandler,
    }

    impl TuiDriver {
        /// Creates a new terminal driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a driver around an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self {
                app,
                handler: InputHandler::new(),
            }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub const fn app(&self) -> &CalculatorApp {
            &self.app
        }

        fn key_code(c: char) -> KeyCode {
            match c {
                '=' => KeyCode::Enter,
                '<' => KeyCode::Backspace,
                'c' | 'C' => KeyCode::Esc,
                c => KeyCode::Char(c),
            }
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, keys: &str) -> CalcResult<()> {
            let mut actions = Vec::new();
            for c in keys.chars().filter(|c| !c.is_whitespace()) {
                let event = KeyEvent::new(Self::key_code(c), KeyModifiers::NONE);
                match self.handler.handle_key(event) {
                    action @ AppAction::Input(_) => actions.push(action),
                    _ => return Err(CalcError::invalid_input(format!("unknown key '{c}'"))),
                }
            }
            for action in actions {
                self.app.handle_action(action);
            }
            Ok(())
        }

        fn current(&self) -> String {
            self.app.display().current.clone()
        }

        fn history(&self) -> String {
            self.app.display().history.clone()
        }

        fn reset(&mut self) {
            self.app.reset();
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Shared verification routines =====
// These work with ANY CalculatorDriver implementation

/// Verifies the four basic operators and remainder
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    for (keys, expected) in [
        ("2+3=", "5"),
        ("10-4=", "6"),
        ("6*7=", "42"),
        ("20/4=", "5"),
        ("10%4=", "2"),
    ] {
        driver.reset();
        driver.press(keys).unwrap();
        assert_eq!(driver.current(), expected, "keys {keys}");
        assert_eq!(driver.history(), "", "keys {keys}");
    }
    driver.reset();
}

/// Verifies `* / %` bind tighter than `+ -`
pub fn verify_precedence<D: CalculatorDriver>(driver: &mut D) {
    for (keys, expected) in [("2+3*4=", "14"), ("20-6/3=", "18"), ("1+7%4*2=", "7")] {
        driver.reset();
        driver.press(keys).unwrap();
        assert_eq!(driver.current(), expected, "keys {keys}");
    }
    driver.reset();
}

/// Verifies operand entry: placeholder, decimal point, grouping and delete
pub fn verify_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press("1234567").unwrap();
    assert_eq!(driver.current(), "1,234,567");

    driver.reset();
    driver.press("12.").unwrap();
    assert_eq!(driver.current(), "12.");
    driver.press(".5").unwrap();
    assert_eq!(driver.current(), "12.5");

    driver.press("<<<<").unwrap();
    assert_eq!(driver.current(), "0");

    driver.reset();
    driver.press("5+").unwrap();
    assert_eq!(driver.current(), "0");
    assert_eq!(driver.history(), "5 + ");
    driver.reset();
}

/// Verifies the error state and recovery from it
pub fn verify_error_handling<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press("4/0=").unwrap();
    assert_eq!(driver.current(), "Error");
    assert_eq!(driver.history(), "");

    // Operators are ignored until recovery
    driver.press("+").unwrap();
    assert_eq!(driver.current(), "Error");

    // A digit starts over
    driver.press("7").unwrap();
    assert_eq!(driver.current(), "7");
    assert_eq!(driver.history(), "");

    driver.reset();
    driver.press("4%0=").unwrap();
    assert_eq!(driver.current(), "Error");
    driver.reset();
    assert_eq!(driver.current(), "0");
}

/// Verifies the dangling operator and repeated compute cases
pub fn verify_compute_edges<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press("1+=").unwrap();
    assert_eq!(driver.current(), "1");

    driver.reset();
    driver.press("5+3==").unwrap();
    assert_eq!(driver.current(), "8");

    driver.reset();
    driver.press("5+3=*2=").unwrap();
    assert_eq!(driver.current(), "16");
    driver.reset();
}

/// Runs every verification routine
pub fn run_full_verification<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_precedence(driver);
    verify_entry(driver);
    verify_error_handling(driver);
    verify_compute_edges(driver);
}
