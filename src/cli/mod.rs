//! CLI module for folio
//!
//! Provides command-line interface for:
//! - init: Write a default config and content layout
//! - check: Validate all content
//! - serve: Load content and serve the site

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, init, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};

use crate::observability;

/// Parse arguments, install logging, run the command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    observability::init();
    run_command(cli.command)
}
