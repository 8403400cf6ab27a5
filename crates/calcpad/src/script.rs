//! Scripted calculator sessions.
//!
//! A script is a YAML document listing key sequences and the display expected
//! after each one:
//!
//! ```yaml
//! name: chained addition
//! steps:
//!   - keys: "5+3"
//!     expect:
//!       current: "3"
//!       history: "5 + "
//!   - keys: "="
//!     expect:
//!       current: "8"
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::controller::Calculator;
use crate::core::{DisplayFormat, DisplayOutput};
use crate::input::InputEvent;

/// Root script document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Script name
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Display format override for this script
    #[serde(default)]
    pub format: Option<DisplayFormat>,
    /// Steps in order
    pub steps: Vec<ScriptStep>,
}

/// One batch of keys followed by an optional check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Compact key sequence (`=` compute, `<` delete, `c` clear)
    pub keys: String,
    /// Expected display after the keys
    #[serde(default)]
    pub expect: Option<Expectation>,
}

/// Expected display; unset fields are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    /// Expected `display.current`
    #[serde(default)]
    pub current: Option<String>,
    /// Expected `display.history`
    #[serde(default)]
    pub history: Option<String>,
}

impl Expectation {
    /// Lists every mismatch against `display`
    #[must_use]
    pub fn check(&self, display: &DisplayOutput) -> Vec<String> {
        let mut failures = Vec::new();
        if let Some(expected) = &self.current {
            if *expected != display.current {
                failures.push(format!(
                    "current: expected '{expected}', got '{}'",
                    display.current
                ));
            }
        }
        if let Some(expected) = &self.history {
            if *expected != display.history {
                failures.push(format!(
                    "history: expected '{expected}', got '{}'",
                    display.history
                ));
            }
        }
        failures
    }
}

impl Script {
    /// Parse a script from a YAML string.
    ///
    /// # Errors
    /// Returns error if the YAML is invalid, there are no steps, or a step
    /// contains an unknown key.
    pub fn from_yaml(yaml: &str) -> Result<Self, ScriptError> {
        let script: Self =
            serde_yaml_ng::from_str(yaml).map_err(|e| ScriptError::ParseError(e.to_string()))?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<(), ScriptError> {
        if self.steps.is_empty() {
            return Err(ScriptError::EmptySteps);
        }
        for (index, step) in self.steps.iter().enumerate() {
            InputEvent::parse_sequence(&step.keys).map_err(|e| ScriptError::InvalidKeys {
                step: index + 1,
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String, ScriptError> {
        serde_yaml_ng::to_string(self).map_err(|e| ScriptError::ParseError(e.to_string()))
    }
}

/// Errors that can occur while loading a script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    /// Malformed YAML or wrong field types
    #[error("Failed to parse YAML: {0}")]
    ParseError(String),

    /// The `steps` list is empty
    #[error("Script has no steps")]
    EmptySteps,

    /// A step's key sequence contains an unknown key
    #[error("Step {step} has invalid keys: {message}")]
    InvalidKeys {
        /// 1-based step number
        step: usize,
        /// What was wrong
        message: String,
    },
}

/// Result of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// 1-based step number
    pub step: usize,
    /// Keys that were pressed
    pub keys: String,
    /// Whether every expectation held
    pub passed: bool,
    /// Display after the keys
    pub display: DisplayOutput,
    /// Mismatch descriptions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}

/// Result of a whole script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptReport {
    /// Script name
    pub name: String,
    /// Whether every step passed
    pub passed: bool,
    /// Per-step results
    pub steps: Vec<StepReport>,
}

impl ScriptReport {
    /// Number of failed steps
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.passed).count()
    }

    /// Export the report as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Replays a script against a fresh calculator.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    script: Script,
    format: DisplayFormat,
}

impl ScriptRunner {
    /// Creates a runner using the script's format, or the default one
    #[must_use]
    pub fn new(script: Script) -> Self {
        let format = script.format.clone().unwrap_or_default();
        Self { script, format }
    }

    /// Creates a runner with a fallback format for scripts that set none
    #[must_use]
    pub fn with_default_format(script: Script, format: DisplayFormat) -> Self {
        let format = script.format.clone().unwrap_or(format);
        Self { script, format }
    }

    /// The script being run
    #[must_use]
    pub const fn script(&self) -> &Script {
        &self.script
    }

    /// Runs every step, continuing past failures
    #[must_use]
    pub fn run(&self) -> ScriptReport {
        let mut calculator = Calculator::with_format(self.format.clone());
        let mut steps = Vec::with_capacity(self.script.steps.len());

        for (index, step) in self.script.steps.iter().enumerate() {
            let failures = match calculator.press_sequence(&step.keys) {
                Ok(display) => step
                    .expect
                    .as_ref()
                    .map(|expect| expect.check(display))
                    .unwrap_or_default(),
                Err(e) => vec![e.to_string()],
            };
            let report = StepReport {
                step: index + 1,
                keys: step.keys.clone(),
                passed: failures.is_empty(),
                display: calculator.display().clone(),
                failures,
            };
            debug!(step = report.step, passed = report.passed, "script step");
            steps.push(report);
        }

        let passed = steps.iter().all(|s| s.passed);
        info!(script = %self.script.name, passed, "script finished");
        ScriptReport {
            name: self.script.name.clone(),
            passed,
            steps,
        }
    }
}
