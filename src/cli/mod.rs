//! CLI command handling module
//!
//! Handles all CLI subcommands and their terminal output.

mod commands;
pub mod dashboard;
mod logging;
pub mod output;

pub use commands::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use output::{GraphFormat, TextRenderer};
