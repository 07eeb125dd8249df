//! Main application entry point.
//!
//! Parses the command line, loads the configuration for commands that need
//! it, and hands off to the command modules. Failures are reported through
//! the logger before exiting with a non-zero status.

use anyhow::Result;

use hospital_landing::args::{CliAction, ParsedArgs};
use hospital_landing::commands::{self, LoadedConfig};
use hospital_landing::constants::EXIT_FAILURE;
use hospital_landing::{log_end, log_error_exit, log_indented};

fn main() {
    if let Err(e) = run() {
        log_error_exit!("{}", e);
        for cause in e.chain().skip(1) {
            log_indented!("{}", cause);
        }
        log_end!();
        std::process::exit(EXIT_FAILURE);
    }
}

fn run() -> Result<()> {
    let parsed_args = ParsedArgs::from_env();

    match parsed_args.action {
        CliAction::ShowVersion => {
            commands::help::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            commands::help::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            commands::help::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::HelpCommand { command } => commands::help::run_help_command(command.as_deref()),
        CliAction::Run {
            debug_enabled,
            config_path,
        } => {
            let loaded = LoadedConfig::load(config_path)?;
            commands::run::handle_run_command(loaded, debug_enabled)
        }
        CliAction::Simulate {
            debug_enabled,
            config_path,
            duration_ms,
            toggle_at_ms,
        } => {
            let loaded = LoadedConfig::load(config_path)?;
            commands::simulate::handle_simulate_command(
                &loaded,
                duration_ms,
                &toggle_at_ms,
                debug_enabled,
            )?;
            Ok(())
        }
        CliAction::Snapshot { config_path, at_ms } => {
            let loaded = LoadedConfig::load(config_path)?;
            commands::snapshot::handle_snapshot_command(&loaded, at_ms)
        }
        CliAction::Check {
            debug_enabled,
            config_path,
        } => {
            let loaded = LoadedConfig::load(config_path)?;
            commands::check::handle_check_command(&loaded, debug_enabled)
        }
    }
}
