//! calcpad: keypad calculator CLI

use calcpad_cli::{
    init_tracing, run_config, run_keys, run_replay, Cli, CliConfig, CliResult, Commands,
    FileConfig, Verbosity,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli)?;
    init_tracing(config.verbosity);

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Keys(args) => run_keys(&config, &args, &mut stdout),
        Commands::Replay(args) => run_replay(&config, &args, &mut stdout),
        Commands::Tui => run_tui(&config),
        Commands::Config => run_config(&config, &mut stdout),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config = CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into());

    if let Some(path) = &cli.config {
        config = config.with_file(FileConfig::load(path)?);
    }

    if let Some(separator) = &cli.separator {
        config = config.with_separator(separator.as_str());
    }

    config.validate()?;
    Ok(config)
}

#[cfg(feature = "tui")]
fn run_tui(config: &CliConfig) -> CliResult<()> {
    calcpad::tui::run(config.display.clone())?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_tui(_config: &CliConfig) -> CliResult<()> {
    Err(calcpad_cli::CliError::invalid_argument(
        "calcpad was built without the `tui` feature",
    ))
}
