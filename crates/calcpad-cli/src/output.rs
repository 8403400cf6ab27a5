//! Output formatting for displays and script reports

use calcpad::core::DisplayOutput;
use calcpad::script::ScriptReport;
use console::style;

use crate::commands::OutputFormat;
use crate::error::CliResult;

/// Render a display as text (history line, then current line) or JSON
///
/// # Errors
/// Returns error if JSON serialization fails
pub fn render_display(
    display: &DisplayOutput,
    format: OutputFormat,
    use_color: bool,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(display)?),
        OutputFormat::Text => {
            let mut out = String::new();
            if !display.history.is_empty() {
                let history = style(display.history.trim_end())
                    .dim()
                    .force_styling(use_color);
                out.push_str(&format!("{history}\n"));
            }
            let current = style(&display.current).bold().force_styling(use_color);
            out.push_str(&current.to_string());
            Ok(out)
        }
    }
}

/// Render a script report as per-step lines or pretty JSON
///
/// # Errors
/// Returns error if JSON serialization fails
pub fn render_report(
    report: &ScriptReport,
    format: OutputFormat,
    use_color: bool,
) -> CliResult<String> {
    if format == OutputFormat::Json {
        return Ok(report.to_json()?);
    }

    let (pass, fail) = if use_color {
        (
            style("✓").green().bold().force_styling(true).to_string(),
            style("✗").red().bold().force_styling(true).to_string(),
        )
    } else {
        ("PASS".to_string(), "FAIL".to_string())
    };

    let mut lines = vec![style(&report.name)
        .bold()
        .underlined()
        .force_styling(use_color)
        .to_string()];
    for step in &report.steps {
        let prefix = if step.passed { &pass } else { &fail };
        lines.push(format!(
            "{prefix} step {}: {:?} -> {}",
            step.step, step.keys, step.display.current
        ));
        for failure in &step.failures {
            lines.push(format!("    {failure}"));
        }
    }
    let total = report.steps.len();
    let failed = report.failed_count();
    lines.push(format!("{} passed, {failed} failed", total - failed));
    Ok(lines.join("\n"))
}
