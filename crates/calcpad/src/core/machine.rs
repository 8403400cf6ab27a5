//! Expression state machine
//!
//! Owns the operand being typed, the committed expression prefix and the two
//! flags that decide how the next keystroke is interpreted.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::evaluator::Evaluator;
use crate::core::format::{format_result, DisplayFormat};
use crate::core::{guard, CalcError, CalcResult, Operation};

/// Placeholder shown for an empty operand
pub const PLACEHOLDER: &str = "0";

/// Derived view of the machine flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Typing an operand (initial phase)
    Entering,
    /// An operator or a result was just committed; the next digit starts a
    /// fresh operand
    PendingOperand,
    /// A computation was rejected; only digits and clear recover
    Error,
}

/// The two strings a display renders
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayOutput {
    /// Formatted current operand, result or error sentinel
    pub current: String,
    /// Formatted expression history, empty when none or on error
    pub history: String,
}

impl DisplayOutput {
    /// Create a display output
    #[must_use]
    pub fn new(current: impl Into<String>, history: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            history: history.into(),
        }
    }
}

/// What a `compute` call did
#[derive(Debug, Clone, PartialEq)]
pub enum ComputeOutcome {
    /// The machine was in the error state; nothing changed
    Ignored,
    /// The expression evaluated to this value
    Computed(f64),
    /// The expression was rejected and the machine is now in the error state
    Rejected(CalcError),
}

impl ComputeOutcome {
    /// Returns the computed value, if any
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Computed(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the rejection reason, if any
    #[must_use]
    pub const fn error(&self) -> Option<&CalcError> {
        match self {
            Self::Rejected(e) => Some(e),
            _ => None,
        }
    }
}

/// Keypad calculator state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorState {
    current_input: String,
    expression_history: String,
    should_reset_screen: bool,
    has_error: bool,
    format: DisplayFormat,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Creates a cleared state with the default display format
    #[must_use]
    pub fn new() -> Self {
        Self::with_format(DisplayFormat::default())
    }

    /// Creates a cleared state with a custom display format
    #[must_use]
    pub fn with_format(format: DisplayFormat) -> Self {
        Self {
            current_input: PLACEHOLDER.to_string(),
            expression_history: String::new(),
            should_reset_screen: false,
            has_error: false,
            format,
        }
    }

    /// Operand being typed, last result, or the error sentinel
    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    /// Committed expression prefix
    #[must_use]
    pub fn expression_history(&self) -> &str {
        &self.expression_history
    }

    /// Whether the next digit starts a fresh operand
    #[must_use]
    pub const fn should_reset_screen(&self) -> bool {
        self.should_reset_screen
    }

    /// Whether the machine is in the error state
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.has_error
    }

    /// Display settings
    #[must_use]
    pub const fn format(&self) -> &DisplayFormat {
        &self.format
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.has_error {
            Phase::Error
        } else if self.should_reset_screen {
            Phase::PendingOperand
        } else {
            Phase::Entering
        }
    }

    /// Resets everything except the display format
    pub fn clear(&mut self) {
        self.current_input.clear();
        self.current_input.push_str(PLACEHOLDER);
        self.expression_history.clear();
        self.should_reset_screen = false;
        self.has_error = false;
        debug!("calculator cleared");
    }

    /// Appends a digit or the decimal point to the current operand.
    ///
    /// Any token other than `0`-`9` or `.` is rejected before the state is
    /// touched. A second decimal point in one operand is ignored.
    pub fn append_digit_or_decimal(&mut self, token: char) -> CalcResult<()> {
        if !(token.is_ascii_digit() || token == '.') {
            return Err(CalcError::invalid_input(format!(
                "'{token}' is not a digit or decimal point"
            )));
        }

        if self.has_error {
            self.clear();
        }
        if self.should_reset_screen {
            self.current_input.clear();
            self.should_reset_screen = false;
        }

        if token == '.' && self.current_input.contains('.') {
            debug!(current = %self.current_input, "second decimal point ignored");
            return Ok(());
        }

        if self.current_input == PLACEHOLDER && token != '.' {
            self.current_input.clear();
        }
        self.current_input.push(token);
        debug!(token = %token, current = %self.current_input, "operand extended");
        Ok(())
    }

    /// Commits the current operand followed by `op` to the history
    pub fn choose_operator(&mut self, op: Operation) {
        if self.has_error {
            debug!(op = %op, "operator ignored in error state");
            return;
        }

        self.expression_history.push_str(&self.current_input);
        self.expression_history.push(' ');
        self.expression_history.push_str(op.symbol());
        self.expression_history.push(' ');
        self.current_input.clear();
        self.current_input.push_str(PLACEHOLDER);
        self.should_reset_screen = true;
        debug!(history = %self.expression_history, "operator committed");
    }

    /// Removes the last character of the operand.
    ///
    /// Clears everything when in the error state or waiting for an operand.
    pub fn delete_last(&mut self) {
        if self.has_error || self.should_reset_screen {
            self.clear();
            return;
        }

        self.current_input.pop();
        if self.current_input.is_empty() {
            self.current_input.push_str(PLACEHOLDER);
        }
        debug!(current = %self.current_input, "last character deleted");
    }

    /// Builds the expression that `compute` would evaluate
    #[must_use]
    pub fn pending_expression(&self) -> String {
        if self.should_reset_screen && self.current_input == PLACEHOLDER {
            let trimmed = self.expression_history.trim();
            let stripped = match trimmed.chars().last() {
                Some(c) if Operation::from_char(c).is_some() => {
                    trimmed[..trimmed.len() - c.len_utf8()].trim_end()
                }
                _ => trimmed,
            };
            if stripped.is_empty() {
                self.current_input.clone()
            } else {
                stripped.to_string()
            }
        } else {
            format!("{}{}", self.expression_history, self.current_input)
        }
    }

    /// Evaluates the full expression.
    ///
    /// On success the result becomes the current operand and the history is
    /// cleared. On rejection the machine enters the error state.
    pub fn compute(&mut self) -> ComputeOutcome {
        if self.has_error {
            debug!("compute ignored in error state");
            return ComputeOutcome::Ignored;
        }

        let expression = self.pending_expression();
        match Self::evaluate(&expression) {
            Ok(value) => {
                self.current_input = format_result(value);
                self.expression_history.clear();
                self.should_reset_screen = true;
                debug!(expression = %expression, result = %self.current_input, "computed");
                ComputeOutcome::Computed(value)
            }
            Err(err) => {
                warn!(expression = %expression, error = %err, "computation rejected");
                self.enter_error();
                ComputeOutcome::Rejected(err)
            }
        }
    }

    fn evaluate(expression: &str) -> CalcResult<f64> {
        guard::validate(expression)?;
        let value = Evaluator::new().evaluate_str(expression)?;
        guard::check_finite(value)
    }

    fn enter_error(&mut self) {
        self.current_input.clone_from(&self.format.error_text);
        self.expression_history.clear();
        self.should_reset_screen = false;
        self.has_error = true;
    }

    /// Formats a numeral for display; returns the sentinel in error state
    #[must_use]
    pub fn format_for_display(&self, value: &str) -> String {
        if self.has_error {
            return self.format.error_text.clone();
        }
        self.format.format_numeral(value)
    }

    /// Projects the state onto the two display strings
    #[must_use]
    pub fn display(&self) -> DisplayOutput {
        let history = if self.has_error {
            String::new()
        } else {
            self.format.format_history(&self.expression_history)
        };
        DisplayOutput {
            current: self.format_for_display(&self.current_input),
            history,
        }
    }
}
