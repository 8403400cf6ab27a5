//! Display projection for numerals and results

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Default thousands separator
pub const DEFAULT_GROUP_SEPARATOR: &str = ",";

/// Default text shown while the calculator is in the error state
pub const DEFAULT_ERROR_TEXT: &str = "Error";

/// How numerals are rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFormat {
    /// Inserted between groups of three integer digits
    pub group_separator: String,
    /// Error sentinel
    pub error_text: String,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            group_separator: DEFAULT_GROUP_SEPARATOR.to_string(),
            error_text: DEFAULT_ERROR_TEXT.to_string(),
        }
    }
}

impl DisplayFormat {
    /// Create the default format
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the thousands separator (empty disables grouping)
    #[must_use]
    pub fn with_group_separator(mut self, separator: impl Into<String>) -> Self {
        self.group_separator = separator.into();
        self
    }

    /// Set the error sentinel
    #[must_use]
    pub fn with_error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = text.into();
        self
    }

    /// Checks that grouped numerals stay unambiguous.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the separator contains a digit or `.`
    pub fn validate(&self) -> CalcResult<()> {
        if self
            .group_separator
            .chars()
            .any(|c| c.is_ascii_digit() || c == '.')
        {
            return Err(CalcError::invalid_input(format!(
                "group separator {:?} must not contain digits or '.'",
                self.group_separator
            )));
        }
        Ok(())
    }

    /// Groups an integer part in thousands, keeping a leading `-`.
    ///
    /// Returns an empty string when there are no digits, so a bare `-` or an
    /// empty part renders as nothing.
    #[must_use]
    pub fn group_integer(&self, integer: &str) -> String {
        let (sign, digits) = match integer.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", integer),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return String::new();
        }

        let mut grouped = String::with_capacity(integer.len() * 2);
        grouped.push_str(sign);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(&self.group_separator);
            }
            grouped.push(ch);
        }
        grouped
    }

    /// Formats a partial or complete numeral.
    ///
    /// The fractional part is reattached untouched, so `"12."` stays `"12."`
    /// while the user is still typing.
    #[must_use]
    pub fn format_numeral(&self, numeral: &str) -> String {
        match numeral.split_once('.') {
            Some((integer, fraction)) => format!("{}.{}", self.group_integer(integer), fraction),
            None => self.group_integer(numeral),
        }
    }

    /// Formats an expression history such as `"1234 + 5 * "`, grouping each
    /// operand and leaving operators and spacing alone
    #[must_use]
    pub fn format_history(&self, history: &str) -> String {
        history
            .split(' ')
            .map(|token| {
                if token.starts_with(|c: char| c.is_ascii_digit() || c == '.')
                    || (token.len() > 1 && token.starts_with('-'))
                {
                    self.format_numeral(token)
                } else {
                    token.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Renders a computed value as the shortest decimal that round-trips.
///
/// Never uses exponent notation; negative zero becomes `"0"`.
#[must_use]
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
