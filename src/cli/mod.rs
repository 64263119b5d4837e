//! CLI module for the catalog service
//!
//! Provides command-line interface for:
//! - serve: Prepare storage and run the HTTP API
//! - seed: Insert missing placeholder items and exit
//! - init-schema: Create the item table and exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init_schema, run, run_command, seed, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
