//! CLI argument definitions using clap
//!
//! Commands:
//! - catalog serve [--host H] [--port P] [--memory] [--skip-seed]
//! - catalog seed
//! - catalog init-schema

use clap::{Parser, Subcommand};

/// Item catalog service
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create the schema, seed placeholder items and serve the HTTP API
    Serve {
        /// Bind host (overrides CATALOG_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides CATALOG_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Keep items in process memory instead of a database
        #[arg(long)]
        memory: bool,

        /// Do not insert the placeholder items
        #[arg(long)]
        skip_seed: bool,
    },

    /// Create the schema and insert any missing placeholder items
    Seed,

    /// Create the item table if it does not exist
    InitSchema,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
