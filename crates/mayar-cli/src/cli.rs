//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Mayar CLI - Send requests to the Mayar payment API
///
/// Every response, success or failure, is printed as the same normalized
/// envelope the library returns.
#[derive(Parser, Debug)]
#[command(
    name = "mayar",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "MAYAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Target the sandbox host instead of production
    #[arg(long, global = true)]
    pub sandbox: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one request and print the normalized envelope
    Request(RequestArgs),

    /// List the resources registered for the configured API version
    Resources,

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the request command
#[derive(Parser, Debug)]
pub struct RequestArgs {
    /// HTTP verb (get, post, put, patch or delete)
    #[arg(value_name = "METHOD")]
    pub method: String,

    /// Endpoint path relative to the API host, e.g. hl/v1/balance
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Payload as inline JSON, or @file to read it from a file
    #[arg(short, long, value_name = "JSON|@FILE")]
    pub data: Option<String>,

    /// Body encoding for the payload
    #[arg(short, long, value_enum, default_value = "form")]
    pub encoding: Encoding,
}

/// Body encodings accepted by the request command
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    /// URL-encoded form fields
    Form,
    /// JSON document
    Json,
    /// Multipart form parts
    Multipart,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration with secrets redacted
    Show,

    /// Write a default configuration file
    Init(ConfigInitArgs),
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,

    /// Target path (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// Pretty-printed JSON output
    JsonPretty,
    /// YAML output
    Yaml,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli::parse_from(["mayar", "-vv", "resources"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["mayar", "--quiet", "resources"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_request_arguments() {
        let cli = Cli::parse_from([
            "mayar",
            "--sandbox",
            "-o",
            "json-pretty",
            "request",
            "post",
            "hl/v1/coupon/create",
            "--data",
            r#"{"name":"LAUNCH"}"#,
            "--encoding",
            "json",
        ]);
        assert!(cli.sandbox);
        assert_eq!(cli.output, OutputFormat::JsonPretty);

        let Commands::Request(args) = cli.command else {
            panic!("expected request command");
        };
        assert_eq!(args.method, "post");
        assert_eq!(args.path, "hl/v1/coupon/create");
        assert_eq!(args.encoding, Encoding::Json);
        assert!(args.data.is_some());
    }

    #[test]
    fn test_request_defaults_to_form() {
        let cli = Cli::parse_from(["mayar", "request", "get", "hl/v1/balance"]);
        let Commands::Request(args) = cli.command else {
            panic!("expected request command");
        };
        assert_eq!(args.encoding, Encoding::Form);
        assert!(args.data.is_none());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["mayar", "-q", "-v", "resources"]).is_err());
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::parse_from(["mayar", "config", "init", "--force"]);
        let Commands::Config(ConfigArgs { action: ConfigAction::Init(args) }) = cli.command else {
            panic!("expected config init");
        };
        assert!(args.force);
        assert!(args.path.is_none());
    }
}
