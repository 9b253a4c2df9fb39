//! fipe CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`. On failure the
//! error goes to stderr and the process exits non-zero.

use fipe::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
