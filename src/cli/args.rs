//! CLI argument definitions using clap
//!
//! Commands:
//! - fipe serve [--config <path>]
//! - fipe query --where <clauses> --order <clauses> [--offset N] [--limit N]
//! - fipe seed <file> [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fipe - FIPE vehicle price query service
#[derive(Parser, Debug)]
#[command(name = "fipe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run a single query and print the matching vehicles as JSON
    Query {
        /// Filters, e.g. "fipe_code:111111-1,year:2021"
        #[arg(long = "where")]
        filters: String,

        /// Sort order, e.g. "year:asc,month:desc"
        #[arg(long)]
        order: String,

        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,

        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        limit: i64,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Load vehicle records from a JSON array file into the database
    Seed {
        /// JSON file holding an array of vehicle records
        file: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
