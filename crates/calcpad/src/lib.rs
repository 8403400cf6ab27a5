//! calcpad - keypad calculator core
//!
//! A keypad calculator is a small state machine: keystrokes accumulate into an
//! operand, operators commit operands into a running expression, and `=`
//! evaluates it with the usual precedence. This crate holds that machine plus
//! the thin frontends that feed it.
//!
//! - [`core`]: state machine, restricted evaluator, display projection
//! - [`input`]: keyboard and keypad mapping to [`InputEvent`](input::InputEvent)
//! - [`controller`]: the single owner of the state
//! - [`keypad`]: the 5x4 button grid
//! - [`script`]: YAML-scripted sessions
//! - [`driver`]: one set of behaviour checks for every frontend
//! - `tui` (feature `tui`): crossterm terminal keypad
//! - `browser` (feature `wasm`): wasm-bindgen bindings
//!
//! # Example
//!
//! ```rust
//! use calcpad::prelude::*;
//!
//! let mut calc = Calculator::new();
//! calc.press_sequence("1200+34=").unwrap();
//! assert_eq!(calc.display().current, "1,234");
//!
//! calc.press_sequence("/0=").unwrap();
//! assert_eq!(calc.display().current, "Error");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod controller;
pub mod core;
pub mod driver;
pub mod input;
pub mod keypad;
pub mod script;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod browser;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::controller::Calculator;
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{
        CalcError, CalcResult, CalculatorState, ComputeOutcome, DisplayFormat, DisplayOutput,
        Operation, Phase,
    };
    pub use crate::driver::CalculatorDriver;
    pub use crate::input::{dispatch, InputEvent};
    pub use crate::keypad::{Keypad, KeypadButton};
    pub use crate::script::{Script, ScriptError, ScriptReport, ScriptRunner};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    // ===== Scenario tests =====

    #[test]
    fn test_five_plus_three() {
        let mut state = CalculatorState::new();
        dispatch(&mut state, InputEvent::Digit(5));
        dispatch(&mut state, InputEvent::Operator(Operation::Add));
        dispatch(&mut state, InputEvent::Digit(3));
        dispatch(&mut state, InputEvent::Compute);
        assert_eq!(state.current_input(), "8");
        assert_eq!(state.expression_history(), "");
    }

    #[test]
    fn test_four_divided_by_zero_then_clear() {
        let mut state = CalculatorState::new();
        for event in InputEvent::parse_sequence("4/0=").unwrap() {
            dispatch(&mut state, event);
        }
        assert_eq!(state.phase(), Phase::Error);
        assert_eq!(state.display(), DisplayOutput::new("Error", ""));

        dispatch(&mut state, InputEvent::Clear);
        assert_eq!(state, CalculatorState::new());
    }

    #[test]
    fn test_one_plus_equals() {
        let mut calc = Calculator::new();
        calc.press_sequence("1+=").unwrap();
        assert_eq!(calc.state().current_input(), "1");
    }

    #[test]
    fn test_grouping_and_trailing_point() {
        let mut calc = Calculator::new();
        calc.press_sequence("1234567").unwrap();
        assert_eq!(calc.display().current, "1,234,567");
        calc.press_sequence("c12.").unwrap();
        assert_eq!(calc.display().current, "12.");
    }

    #[test]
    fn test_double_compute() {
        let mut calc = Calculator::new();
        calc.press_sequence("5+3==").unwrap();
        assert_eq!(calc.display().current, "8");
        assert_eq!(calc.state().phase(), Phase::PendingOperand);
    }

    // ===== Prelude tests =====

    #[test]
    fn test_prelude_evaluator() {
        let ast = Parser::parse_str("1 + 2 * 3").unwrap();
        assert_eq!(Evaluator::new().evaluate(&ast), 7.0);
    }

    #[test]
    fn test_prelude_compute_outcome() {
        let mut state = CalculatorState::new();
        state.append_digit_or_decimal('6').unwrap();
        assert_eq!(state.compute(), ComputeOutcome::Computed(6.0));
    }

    #[test]
    fn test_prelude_script() {
        let script = Script::from_yaml("name: one\nsteps:\n  - keys: \"1\"\n").unwrap();
        let report: ScriptReport = ScriptRunner::new(script).run();
        assert!(report.passed);
    }
}
