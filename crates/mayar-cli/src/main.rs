//! Mayar CLI - Command-line interface for the Mayar payment API
//!
//! This is the main entry point for the `mayar` binary, providing commands
//! for sending API requests, listing resources and managing configuration.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

/// Exit code for a response envelope that reports failure
const EXIT_ENVELOPE_FAILURE: i32 = 1;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(EXIT_ENVELOPE_FAILURE),
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
///
/// Returns whether the command succeeded.
#[instrument(skip(cli), fields(command = ?cli.command))]
async fn run(cli: Cli) -> Result<bool> {
    let _timer = Timer::new("cli_execution");

    let config = {
        let _config_timer = Timer::new("config_loading");
        tracing::info!("Loading configuration");
        Config::load_with_file(cli.config.as_deref())?
    };

    if !config.output.color {
        control::set_override(false);
    }
    let use_color = cli.use_color() && config.output.color;
    let mut output = OutputWriter::new(cli.output, use_color, cli.quiet);

    tracing::info!(
        verbosity = cli.verbosity_level(),
        sandbox = cli.sandbox,
        "Executing command"
    );

    match cli.command {
        Commands::Request(args) => {
            handlers::handle_request(args, &config, cli.sandbox, &mut output).await
        }
        Commands::Resources => handlers::handle_resources(&config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    logging_config.merge_with_env();

    // Quiet mode only logs errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
