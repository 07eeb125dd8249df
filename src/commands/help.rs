//! Help command implementation.
//!
//! Dispatches to command-specific help or shows the general usage.

use anyhow::Result;

use crate::args::suggest_command;

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("run") => super::run::display_help(),
        Some("simulate") | Some("sim") => super::simulate::display_help(),
        Some("snapshot") => super::snapshot::display_help(),
        Some("check") => super::check::display_help(),
        Some("help") => display_help_help(),
        Some(unknown) => {
            log_warning!("Unknown command: {}", unknown);
            if let Some(suggestion) = suggest_command(unknown) {
                log_indented!("Did you mean '{}'?", suggestion);
            }
            display_general_help();
        }
    }
    Ok(())
}

/// Display the full usage, shown for `--help` and after argument errors.
pub fn display_help() {
    log_version!();
    log_block_start!("Usage: hospital-landing [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <path>  Use this configuration file");
    log_indented!("-d, --debug          Log animation requests and internals");
    log_indented!("-h, --help           Print help information");
    log_indented!("-V, --version        Print version information");
    display_command_list();
    log_end!();
}

/// Display the version line.
pub fn display_version_info() {
    log_version!();
    log_end!();
}

fn display_general_help() {
    log_version!();
    display_command_list();
    log_pipe!();
    log_info!("Use 'hospital-landing help <command>' for details on a command.");
    log_indented!("Use 'hospital-landing --help' to see all options.");
    log_end!();
}

fn display_command_list() {
    log_block_start!("Commands:");
    log_indented!("run                  Run the hero autoplay on the real clock (default)");
    log_indented!("simulate [OPTIONS]   Run on a virtual clock and log every change");
    log_indented!("snapshot [--at <ms>] Print the page state at a simulated time as JSON");
    log_indented!("check                Validate the configuration file");
    log_indented!("help [COMMAND]       Show detailed help for a command");
}

fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: hospital-landing help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_end!();
}
