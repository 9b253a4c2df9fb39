//! CLI I/O helpers
//!
//! Results go to stdout as a single JSON line. Logs go to stderr.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::vehicle::Vehicle;

use super::errors::{CliError, CliResult};

/// Writes a value as one JSON line to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    write_json_to(&mut stdout, value)
}

/// Writes a value as one JSON line to `writer`
pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Reads a JSON array of vehicle records
pub fn read_vehicles(path: &Path) -> CliResult<Vec<Vehicle>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&content)?)
}
