//! Input events and dispatch
//!
//! Every frontend (keyboard, keypad buttons, key sequences) is translated into
//! an [`InputEvent`], and [`dispatch`] applies one event to the state machine
//! as a single transition.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{CalcError, CalcResult, CalculatorState, DisplayOutput, Operation};

/// A single user input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    /// Digit 0-9
    Digit(u8),
    /// Decimal point
    Decimal,
    /// Binary operator
    Operator(Operation),
    /// Evaluate the expression
    Compute,
    /// Remove the last character of the operand
    DeleteLast,
    /// Reset everything
    Clear,
}

impl InputEvent {
    /// Maps a keyboard key name to an event.
    ///
    /// Digits and `.` enter the operand, `=` and `Enter` compute, `Backspace`
    /// deletes, `Escape` clears, and the five operator characters choose an
    /// operator.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(Self::Compute),
            "Backspace" => Some(Self::DeleteLast),
            "Escape" => Some(Self::Clear),
            "." => Some(Self::Decimal),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_char(c),
                    _ => None,
                }
            }
        }
    }

    /// Maps a keypad token such as `"7"`, `"+"`, `"="`, `"DEL"` or `"AC"`
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "AC" => Some(Self::Clear),
            "DEL" => Some(Self::DeleteLast),
            "=" => Some(Self::Compute),
            _ => Operation::from_symbol(token)
                .map(Self::Operator)
                .or_else(|| Self::from_key(token).filter(|e| e.is_entry())),
        }
    }

    /// Maps a character of a compact key sequence.
    ///
    /// On top of the keyboard characters, `<` deletes and `c`/`C` clear.
    #[must_use]
    pub fn from_sequence_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(Self::Compute),
            '<' => Some(Self::DeleteLast),
            'c' | 'C' => Some(Self::Clear),
            _ => Self::from_char(c),
        }
    }

    /// Parses a compact key sequence such as `"12+3*4="`; whitespace is skipped
    pub fn parse_sequence(sequence: &str) -> CalcResult<Vec<Self>> {
        sequence
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                Self::from_sequence_char(c)
                    .ok_or_else(|| CalcError::invalid_input(format!("unknown key '{c}'")))
            })
            .collect()
    }

    fn from_char(c: char) -> Option<Self> {
        if let Some(d) = c.to_digit(10) {
            return Some(Self::Digit(d as u8));
        }
        if c == '.' {
            return Some(Self::Decimal);
        }
        Operation::from_char(c).map(Self::Operator)
    }

    /// Returns true for digits and the decimal point
    #[must_use]
    pub const fn is_entry(&self) -> bool {
        matches!(self, Self::Digit(_) | Self::Decimal)
    }

    /// Returns the keypad label for this event
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Compute => "=".to_string(),
            Self::DeleteLast => "DEL".to_string(),
            Self::Clear => "AC".to_string(),
        }
    }
}

/// Applies one event and returns the refreshed display
pub fn dispatch(state: &mut CalculatorState, event: InputEvent) -> DisplayOutput {
    debug!(?event, phase = ?state.phase(), "dispatch");
    match event {
        InputEvent::Digit(d) => {
            let appended = char::from_digit(u32::from(d), 10)
                .ok_or_else(|| CalcError::invalid_input(format!("digit {d} out of range")))
                .and_then(|c| state.append_digit_or_decimal(c));
            if let Err(err) = appended {
                warn!(error = %err, "digit ignored");
            }
        }
        InputEvent::Decimal => {
            if let Err(err) = state.append_digit_or_decimal('.') {
                warn!(error = %err, "decimal point ignored");
            }
        }
        InputEvent::Operator(op) => state.choose_operator(op),
        InputEvent::Compute => {
            state.compute();
        }
        InputEvent::DeleteLast => state.delete_last(),
        InputEvent::Clear => state.clear(),
    }
    state.display()
}
