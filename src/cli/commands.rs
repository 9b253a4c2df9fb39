//! CLI command implementations
//!
//! Each command loads configuration, installs logging, opens the database
//! and then does one thing.

use std::path::Path;

use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::observability::init_tracing;
use crate::planner::RawQuery;
use crate::rest_api::{parse_order, parse_where, RestServer, VehicleResponse};
use crate::schema::{is_valid_fipe_code, is_valid_year_month, ReferencePeriod};
use crate::service::VehicleService;
use crate::storage::{SqlitePool, SqliteVehicleStore};
use crate::vehicle::Vehicle;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_vehicles, write_json};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config } => serve(&boot(config.as_deref())?),
        Command::Query {
            filters,
            order,
            offset,
            limit,
            config,
        } => {
            let query = RawQuery {
                filters: parse_where(&filters)?,
                order_by: parse_order(&order)?,
                offset,
                limit,
            };
            query_once(&boot(config.as_deref())?, &query)
        }
        Command::Seed { file, config } => seed(&boot(config.as_deref())?, &file),
    }
}

/// Loads configuration and installs the tracing subscriber
fn boot(config_path: Option<&Path>) -> CliResult<AppConfig> {
    let config = AppConfig::load(config_path)?;
    init_tracing(&config.log);
    Ok(config)
}

fn open_store(config: &AppConfig) -> CliResult<SqliteVehicleStore> {
    let pool = SqlitePool::open(&config.database)?;
    Ok(SqliteVehicleStore::new(pool))
}

/// Start the HTTP server and block until it stops
pub fn serve(config: &AppConfig) -> CliResult<()> {
    let service = VehicleService::new(open_store(config)?);
    let server = RestServer::new(service, config.server.clone());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .serve()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Run one query and print the matching vehicles
pub fn query_once(config: &AppConfig, query: &RawQuery) -> CliResult<()> {
    let service = VehicleService::new(open_store(config)?);
    let vehicles = service.get_vehicles(query)?;

    let response: Vec<VehicleResponse> = vehicles.into_iter().map(VehicleResponse::from).collect();
    write_json(&response)
}

/// Load fixture records into the configured database.
///
/// The whole file is refused if any record is malformed.
pub fn seed(config: &AppConfig, file: &Path) -> CliResult<()> {
    let vehicles = read_vehicles(file)?;
    check_records(&vehicles, SystemClock.current_period())?;
    let ids = open_store(config)?.insert(&vehicles)?;
    info!(count = ids.len(), file = %file.display(), "seeded vehicles");
    write_json(&serde_json::json!({ "inserted": ids.len() }))
}

/// Applies the filter rules for fipe code and reference period to each record
fn check_records(vehicles: &[Vehicle], now: ReferencePeriod) -> CliResult<()> {
    for (index, vehicle) in vehicles.iter().enumerate() {
        if !is_valid_fipe_code(&vehicle.fipe_code) {
            return Err(CliError::invalid_record(format!(
                "record {}: invalid fipe code {:?}",
                index, vehicle.fipe_code
            )));
        }
        if !is_valid_year_month(i64::from(vehicle.year), i64::from(vehicle.month), now) {
            return Err(CliError::invalid_record(format!(
                "record {}: invalid reference period {}-{:02}",
                index, vehicle.year, vehicle.month
            )));
        }
    }
    Ok(())
}
