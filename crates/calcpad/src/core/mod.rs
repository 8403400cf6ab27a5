//! Calculator core: expression state machine, restricted evaluator and
//! display projection.
//!
//! Everything in here is free of terminal, browser and event-loop types so it
//! can be driven directly from tests.

pub mod evaluator;
pub mod format;
pub mod guard;
pub mod machine;
mod operations;
pub mod parser;

pub use format::DisplayFormat;
pub use machine::{CalculatorState, ComputeOutcome, DisplayOutput, Phase};
pub use operations::Operation;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Reasons a computation is rejected.
///
/// The state machine treats every variant the same way: it enters the
/// terminal error state and shows the error sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// A `/` operator is followed by a zero operand
    #[error("Division by zero")]
    DivisionByZero,
    /// The assembled expression contains a character or token the evaluator
    /// does not accept
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The evaluated value is infinite or NaN
    #[error("Result is not a finite number")]
    NonFiniteResult,
}

impl CalcError {
    /// Create an invalid input error
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
