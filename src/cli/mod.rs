//! CLI module
//!
//! Provides the command-line interface:
//! - serve: start the HTTP server
//! - query: one-shot query execution
//! - seed: load fixture records

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{query_once, run, run_command, seed, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_vehicles, write_json, write_json_to};
