//! Command handlers for CLI subcommands
//!
//! Each handler returns whether the command's result should count as a
//! success for the process exit code.

mod config;
mod request;
mod resources;
mod utils;

pub use config::handle_config;
pub use request::handle_request;
pub use resources::handle_resources;
