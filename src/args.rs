//! Command-line argument parsing and processing.
//!
//! Arguments are parsed by hand into a [`CliAction`]. Global flags
//! (`--debug`, `--config`, `--help`, `--version`) may appear anywhere; the
//! first bare word selects the command and defaults to `run`.

use crate::constants::DEFAULT_SIMULATION_MS;

/// Commands understood by the binary, used for error suggestions.
const COMMANDS: [&str; 5] = ["run", "simulate", "snapshot", "check", "help"];

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the landing page against the real clock until interrupted
    Run {
        debug_enabled: bool,
        config_path: Option<String>,
    },
    /// Run the landing page against a virtual clock and log every change
    Simulate {
        debug_enabled: bool,
        config_path: Option<String>,
        duration_ms: u64,
        /// Simulated times at which the mobile menu button is pressed
        toggle_at_ms: Vec<u64>,
    },
    /// Print the page snapshot at a simulated time as JSON
    Snapshot {
        config_path: Option<String>,
        at_ms: u64,
    },
    /// Validate the configuration and exit
    Check {
        debug_enabled: bool,
        config_path: Option<String>,
    },
    /// Help command, optionally for one command
    HelpCommand { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped. Version takes
    /// precedence over help, and both take precedence over any command.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut invalid = false;
        let mut config_path: Option<String> = None;
        let mut command: Option<String> = None;
        let mut positional: Vec<String> = Vec::new();

        let mut duration_ms: Option<u64> = None;
        let mut toggle_at_ms: Vec<u64> = Vec::new();
        let mut at_ms: Option<u64> = None;

        let mut i = 0;
        while i < args_vec.len() {
            let arg = args_vec[i].as_str();
            match arg {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--config" | "-c" => {
                    // Parse: --config <path>
                    match args_vec.get(i + 1).filter(|value| !value.starts_with('-')) {
                        Some(value) => {
                            config_path = Some(value.clone());
                            i += 1;
                        }
                        None => {
                            log_warning!("Missing path for --config. Usage: --config <path>");
                            invalid = true;
                        }
                    }
                }
                "--for" | "--toggle-at" | "--at" => {
                    match parse_millis(arg, args_vec.get(i + 1)) {
                        Some(value) => {
                            match arg {
                                "--for" => duration_ms = Some(value),
                                "--toggle-at" => toggle_at_ms.push(value),
                                _ => at_ms = Some(value),
                            }
                            i += 1;
                        }
                        None => invalid = true,
                    }
                }
                _ if arg.starts_with('-') => {
                    log_warning!("Unknown option: {}", arg);
                    invalid = true;
                }
                _ => {
                    if command.is_none() {
                        command = Some(arg.to_string());
                    } else {
                        positional.push(arg.to_string());
                    }
                }
            }
            i += 1;
        }

        if display_version {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if display_help {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }
        if invalid {
            return ParsedArgs {
                action: CliAction::ShowHelpDueToError,
            };
        }

        let command = command.unwrap_or_else(|| "run".to_string());

        // Options that only make sense for one command
        let misplaced = match command.as_str() {
            "simulate" | "sim" => at_ms.map(|_| "--at"),
            "snapshot" => duration_ms
                .map(|_| "--for")
                .or((!toggle_at_ms.is_empty()).then_some("--toggle-at")),
            "help" => None,
            _ => at_ms
                .map(|_| "--at")
                .or(duration_ms.map(|_| "--for"))
                .or((!toggle_at_ms.is_empty()).then_some("--toggle-at")),
        };
        if let Some(option) = misplaced {
            log_warning!("Option {} cannot be used with '{}'", option, command);
            return ParsedArgs {
                action: CliAction::ShowHelpDueToError,
            };
        }

        if command != "help" && !positional.is_empty() {
            log_warning!(
                "Unexpected argument '{}' for command '{}'",
                positional[0],
                command
            );
            return ParsedArgs {
                action: CliAction::ShowHelpDueToError,
            };
        }

        let action = match command.as_str() {
            "run" => CliAction::Run {
                debug_enabled,
                config_path,
            },
            "simulate" | "sim" => {
                toggle_at_ms.sort_unstable();
                CliAction::Simulate {
                    debug_enabled,
                    config_path,
                    duration_ms: duration_ms.unwrap_or(DEFAULT_SIMULATION_MS),
                    toggle_at_ms,
                }
            }
            "snapshot" => CliAction::Snapshot {
                config_path,
                at_ms: at_ms.unwrap_or(0),
            },
            "check" => CliAction::Check {
                debug_enabled,
                config_path,
            },
            "help" => CliAction::HelpCommand {
                command: positional.into_iter().next(),
            },
            unknown => {
                log_warning!("Unknown command: {}", unknown);
                if let Some(suggestion) = suggest_command(unknown) {
                    log_indented!("Did you mean '{}'?", suggestion);
                }
                CliAction::ShowHelpDueToError
            }
        };

        ParsedArgs { action }
    }

    /// Parse the arguments of the current process.
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Parse the millisecond value following `flag`.
fn parse_millis(flag: &str, value: Option<&String>) -> Option<u64> {
    let Some(value) = value else {
        log_warning!("Missing value for {}. Usage: {} <milliseconds>", flag, flag);
        return None;
    };
    match value.parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(_) => {
            log_warning!("Invalid value for {}: {}", flag, value);
            None
        }
    }
}

/// Closest known command to a mistyped one, if any is close enough.
pub fn suggest_command(input: &str) -> Option<&'static str> {
    let input = input.to_lowercase();
    COMMANDS
        .iter()
        .map(|command| (*command, levenshtein_distance(&input, command)))
        .filter(|(_, distance)| *distance <= 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(command, _)| command)
}

/// Edit distance between two strings.
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    let mut previous: Vec<usize> = (0..=s2_chars.len()).collect();
    let mut current = vec![0; s2_chars.len() + 1];

    for (i, c1) in s1_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, c2) in s2_chars.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[s2_chars.len()]
}
