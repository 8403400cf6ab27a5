//! Pre- and post-evaluation checks on assembled expressions
//!
//! These run before anything reaches the parser so that obviously bad input
//! is rejected with a precise reason.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::{CalcError, CalcResult};

/// `/ 0` at the end of the expression or followed by anything but `.`
fn division_by_zero_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/ 0(?:[^.]|$)").expect("valid division pattern"))
}

fn forbidden_character_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^0-9.+\-*/% ]").expect("valid charset pattern"))
}

/// Rejects a `/` operator whose right operand is a bare zero.
///
/// `4 / 0.5` is allowed; `4 / 0` and `4 / 0 + 1` are not.
pub fn check_division_by_zero(expression: &str) -> CalcResult<()> {
    if division_by_zero_pattern().is_match(expression) {
        return Err(CalcError::DivisionByZero);
    }
    Ok(())
}

/// Rejects any character outside digits, `.`, the five operators and space
pub fn check_characters(expression: &str) -> CalcResult<()> {
    match forbidden_character_pattern().find(expression) {
        Some(m) => Err(CalcError::invalid_input(format!(
            "unexpected character '{}'",
            m.as_str()
        ))),
        None => Ok(()),
    }
}

/// Rejects infinite and NaN results
pub fn check_finite(value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFiniteResult)
    }
}

/// Runs the textual checks in order: division by zero, then character set
pub fn validate(expression: &str) -> CalcResult<()> {
    check_division_by_zero(expression)?;
    check_characters(expression)
}
