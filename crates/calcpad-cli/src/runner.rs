//! Subcommand implementations

use std::io::Write;

use calcpad::controller::Calculator;
use calcpad::script::{Script, ScriptRunner};
use tracing::{debug, info};

use crate::commands::{KeysArgs, ReplayArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{render_display, render_report};

/// Press a key sequence on a fresh calculator and print the display
///
/// # Errors
/// Returns error if the sequence holds an unknown key or output fails
pub fn run_keys(config: &CliConfig, args: &KeysArgs, out: &mut impl Write) -> CliResult<()> {
    let mut calculator = Calculator::with_format(config.display.clone());
    let shown = calculator.press_sequence(&args.sequence)?;
    debug!(sequence = %args.sequence, current = %shown.current, "keys pressed");

    let rendered = render_display(shown, args.format, config.color.should_color())?;
    writeln!(out, "{rendered}")?;
    Ok(())
}

/// Run a script file and print its report
///
/// # Errors
/// Returns error if the script cannot be loaded, or `ScriptFailed` when any
/// step did not match
pub fn run_replay(config: &CliConfig, args: &ReplayArgs, out: &mut impl Write) -> CliResult<()> {
    let yaml = std::fs::read_to_string(&args.script)?;
    let script = Script::from_yaml(&yaml)?;
    info!(script = %script.name, steps = script.steps.len(), "replaying");

    let report = ScriptRunner::with_default_format(script, config.display.clone()).run();
    let rendered = render_report(&report, args.format, config.color.should_color())?;
    writeln!(out, "{rendered}")?;

    if report.passed {
        Ok(())
    } else {
        let failed = report.failed_count();
        Err(CliError::script_failed(report.name, failed))
    }
}

/// Print the effective configuration as YAML
///
/// # Errors
/// Returns error if serialization or output fails
pub fn run_config(config: &CliConfig, out: &mut impl Write) -> CliResult<()> {
    write!(out, "{}", config.to_yaml()?)?;
    Ok(())
}
