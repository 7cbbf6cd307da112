//! CLI command definitions for the `smart` binary.
//!
//! Uses clap derive macros. Commands follow a noun-verb pattern
//! (e.g., `smart profile submit`, `smart booking cancel`).

pub mod booking;
pub mod format;
pub mod profile;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Score seller profiles and manage marketplace bookings.
#[derive(Parser)]
#[command(name = "smart", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for info, -vv for debug, -vvv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seller profiles: score, submit, show, moderate.
    Profile {
        #[command(subcommand)]
        action: profile::ProfileCommand,
    },

    /// Bookings: create, inspect and drive through their lifecycle.
    Booking {
        #[command(subcommand)]
        action: booking::BookingCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Commands {
    /// Dotted command name recorded on the command span.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Profile { action } => action.name(),
            Commands::Booking { action } => action.name(),
            Commands::Completions { .. } => "completions",
        }
    }
}

/// How command results are printed.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    /// Print `value` as pretty JSON when `--json` is set. Returns whether
    /// the caller should skip its styled output.
    pub fn emit_json<T: serde::Serialize>(&self, value: &T) -> anyhow::Result<bool> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
            return Ok(true);
        }
        Ok(self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_booking_transition() {
        let cli = Cli::try_parse_from([
            "smart",
            "booking",
            "transition",
            "BK_1_ABC",
            "in-progress",
            "--as",
            "seller:s-1",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.command.name(), "booking.transition");
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        let result = Cli::try_parse_from([
            "smart",
            "booking",
            "transition",
            "BK_1_ABC",
            "finished",
            "--as",
            "seller:s-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_profile_moderate() {
        let cli =
            Cli::try_parse_from(["smart", "-vv", "profile", "moderate", "s-1", "suspend"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.command.name(), "profile.moderate");
    }
}
