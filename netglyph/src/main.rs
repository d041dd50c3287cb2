/*!
 * netglyph
 * WiFi status for desktop status bars
 */

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use netglyph_core::{Config, SystemRunner};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, warn};

mod app;
mod render;

use app::App;

/// Exit status for a missing or unknown command.
const USAGE_EXIT: u8 = 2;

#[derive(Parser)]
#[command(name = "netglyph", version)]
#[command(about = "WiFi status for desktop status bars")]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Bar colour (#rrggbb) for the current signal tier
    Color,
    /// SSID, or a short state label when not connected
    Text,
    /// Signal strength glyph
    Icon,
    /// true or false
    Connected,
    /// Detected backend: nm, iwctl or none
    Tool,
    /// Enable or disable the WiFi radio
    Toggle,
    /// Open the network picker in a new terminal window
    #[command(visible_alias = "tui")]
    Open,
    /// Human-readable report
    Status,
    /// Full state as one JSON object
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprint!("{e}");
            print_usage();
            return ExitCode::from(USAGE_EXIT);
        }
    };

    init_logging(cli.debug);

    let Some(command) = cli.command else {
        print_usage();
        return ExitCode::from(USAGE_EXIT);
    };

    let config = load_config(cli.config.as_deref());
    let runner = SystemRunner::new(config.query.timeout());
    let app = App::new(runner, config);

    match app.run(command).await {
        Ok(Some(output)) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    print!("{}", Cli::command().render_help());
}

fn init_logging(debug: bool) {
    // stdout belongs to the status bar
    let log_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("netglyph={log_level},netglyph_core={log_level}"))
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        warn!("{}, using defaults", e);
        Config::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_tui_is_open() {
        let cli = Cli::try_parse_from(["netglyph", "tui"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Open));
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("Usage:"));
        for token in [
            "color",
            "text",
            "icon",
            "connected",
            "tool",
            "toggle",
            "open",
            "tui",
            "status",
            "json",
        ] {
            assert!(help.contains(token), "help is missing {token}");
        }
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["netglyph", "bogus"]).is_err());
        assert!(Cli::try_parse_from(["netglyph"]).unwrap().command.is_none());
    }
}
