//! calcpad-cli: command line frontend for the calcpad keypad calculator
//!
//! ## Usage
//!
//! ```bash
//! calcpad keys "1200+34="             # Replay keys, print the display
//! calcpad keys "4/0=" --format json   # Same, as JSON
//! calcpad replay session.yaml         # Run a scripted session
//! calcpad tui                         # Interactive terminal keypad
//! calcpad config                      # Show effective configuration
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod commands;
mod config;
mod error;
mod logging;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, KeysArgs, OutputFormat, ReplayArgs};
pub use config::{CliConfig, ColorChoice, FileConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::{init_tracing, level_for};
pub use output::{render_display, render_report};
pub use runner::{run_config, run_keys, run_replay};
