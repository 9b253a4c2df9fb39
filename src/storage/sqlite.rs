//! SQLite backend
//!
//! Uses a single `Arc<Mutex<Connection>>` shared by all requests. The only
//! blocking point is the query itself, bounded by the configured busy
//! timeout.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rusqlite::types::ToSqlOutput;
use rusqlite::{params, params_from_iter, Connection, Row, ToSql};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::planner::QueryPlan;
use crate::schema::FieldValue;
use crate::vehicle::Vehicle;

use super::errors::{StorageError, StorageResult};
use super::record::VehicleRow;
use super::sql::SelectStatement;
use super::VehicleStore;

const CREATE_VEHICLES: &str = "
CREATE TABLE IF NOT EXISTS vehicles (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    year           INTEGER NOT NULL,
    month          INTEGER NOT NULL,
    fipe_code      TEXT    NOT NULL,
    brand          TEXT    NOT NULL,
    vehicle_model  TEXT    NOT NULL,
    year_model     TEXT    NOT NULL,
    authentication TEXT    NOT NULL,
    mean_value     REAL    NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_year ON vehicles (year);
CREATE INDEX IF NOT EXISTS idx_month ON vehicles (month);
CREATE INDEX IF NOT EXISTS idx_fipe_code ON vehicles (fipe_code);
";

const INSERT_VEHICLE: &str = "
INSERT INTO vehicles
    (year, month, fipe_code, brand, vehicle_model, year_model, authentication, mean_value)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
";

impl ToSql for FieldValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            FieldValue::Int(v) => ToSqlOutput::from(*v),
            FieldValue::Real(v) => ToSqlOutput::from(*v),
            FieldValue::Text(v) => ToSqlOutput::from(v.as_str()),
        })
    }
}

/// Thread-safe SQLite connection handle
#[derive(Clone)]
pub struct SqlitePool {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePool {
    /// Opens the configured database and bootstraps the `vehicles` table
    pub fn open(config: &DatabaseConfig) -> StorageResult<Self> {
        info!(path = %config.path, "opening SQLite database");

        let conn = if config.is_memory() {
            Connection::open_in_memory()?
        } else {
            let path = Path::new(&config.path);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Connection(format!("Failed to create directory: {}", e))
                })?;
            }
            Connection::open(path)?
        };

        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        conn.execute_batch(CREATE_VEHICLES)
            .map_err(|e| StorageError::Schema(e.to_string()))?;
        debug!("vehicles table ready");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens an in-memory database for testing
    pub fn memory() -> StorageResult<Self> {
        Self::open(&DatabaseConfig::memory())
    }

    /// Execute a closure with the connection
    pub fn with_connection<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Execute a closure with mutable access to the connection
    pub fn with_connection_mut<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&mut Connection) -> StorageResult<T>,
    {
        let mut conn = self.conn.lock();
        f(&mut conn)
    }
}

/// Vehicle store over a [`SqlitePool`]
#[derive(Clone)]
pub struct SqliteVehicleStore {
    pool: SqlitePool,
}

impl SqliteVehicleStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Loads fixture records, returning their assigned ids.
    ///
    /// Not reachable from the HTTP API; used for seeding and tests.
    pub fn insert(&self, vehicles: &[Vehicle]) -> StorageResult<Vec<i64>> {
        self.pool.with_connection_mut(|conn| {
            let tx = conn.transaction()?;
            let mut ids = Vec::with_capacity(vehicles.len());
            {
                let mut stmt = tx.prepare(INSERT_VEHICLE)?;
                for v in vehicles {
                    stmt.execute(params![
                        v.year,
                        v.month,
                        v.fipe_code,
                        v.brand,
                        v.model,
                        v.year_model,
                        v.authentication,
                        v.mean_value,
                    ])?;
                    ids.push(tx.last_insert_rowid());
                }
            }
            tx.commit()?;
            Ok(ids)
        })
    }
}

impl VehicleStore for SqliteVehicleStore {
    fn fetch(&self, plan: &QueryPlan) -> StorageResult<Vec<VehicleRow>> {
        let stmt = SelectStatement::from_plan(plan);
        debug!(sql = %stmt.sql, params = stmt.params.len(), "executing select");

        self.pool.with_connection(|conn| {
            let mut prepared = conn.prepare(&stmt.sql)?;
            let rows = prepared
                .query_map(params_from_iter(stmt.params.iter()), read_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<VehicleRow> {
    Ok(VehicleRow {
        id: row.get(0)?,
        year: row.get(1)?,
        month: row.get(2)?,
        fipe_code: row.get(3)?,
        brand: row.get(4)?,
        vehicle_model: row.get(5)?,
        year_model: row.get(6)?,
        authentication: row.get(7)?,
        mean_value: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{Filter, OrderDirective, PaginationWindow, QueryBuilder};
    use crate::schema::SchemaRegistry;
    use tempfile::TempDir;

    fn vehicle(fipe_code: &str, year: i32, month: i32, mean_value: f64) -> Vehicle {
        Vehicle {
            year,
            month,
            fipe_code: fipe_code.into(),
            brand: "Fiat".into(),
            model: "Uno".into(),
            year_model: "2014 Gasolina".into(),
            authentication: "auth".into(),
            mean_value,
        }
    }

    fn plan(filters: &[Filter], order: &[OrderDirective]) -> QueryPlan {
        QueryBuilder::new(SchemaRegistry::vehicles()).build(
            filters,
            order,
            PaginationWindow { offset: 0, limit: 10 },
        )
    }

    #[test]
    fn test_memory_pool() {
        let pool = SqlitePool::memory().expect("Failed to create memory pool");

        pool.with_connection(|conn| {
            let result: i64 = conn.query_row("SELECT 1 + 1", [], |row| row.get(0))?;
            assert_eq!(result, 2);
            Ok(())
        })
        .expect("Query failed");
    }

    #[test]
    fn test_table_bootstrap_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let config = DatabaseConfig::at(dir.path().join("nested/fipe.db"));

        let store = SqliteVehicleStore::new(SqlitePool::open(&config).unwrap());
        store.insert(&[vehicle("111111-1", 2021, 8, 700.0)]).unwrap();

        // Reopening keeps the data.
        let store = SqliteVehicleStore::new(SqlitePool::open(&config).unwrap());
        let rows = store
            .fetch(&plan(
                &[Filter::eq("fipe_code", FieldValue::Text("111111-1".into()))],
                &[],
            ))
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_insert_assigns_ids() {
        let store = SqliteVehicleStore::new(SqlitePool::memory().unwrap());
        let ids = store
            .insert(&[
                vehicle("111111-1", 2021, 8, 700.0),
                vehicle("222222-2", 2021, 7, 800.0),
            ])
            .unwrap();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_fetch_filters_and_orders() {
        let store = SqliteVehicleStore::new(SqlitePool::memory().unwrap());
        store
            .insert(&[
                vehicle("111111-1", 2021, 7, 500.0),
                vehicle("111111-1", 2021, 8, 600.0),
                vehicle("111111-1", 2020, 8, 400.0),
                vehicle("222222-2", 2021, 8, 900.0),
            ])
            .unwrap();

        let rows = store
            .fetch(&plan(
                &[Filter::eq("fipe_code", FieldValue::Text("111111-1".into()))],
                &[OrderDirective::asc("year"), OrderDirective::desc("month")],
            ))
            .unwrap();

        let periods: Vec<_> = rows.iter().map(|r| (r.year, r.month)).collect();
        assert_eq!(periods, vec![(2020, 8), (2021, 8), (2021, 7)]);
    }

    #[test]
    fn test_real_filter_matches_stored_value() {
        let store = SqliteVehicleStore::new(SqlitePool::memory().unwrap());
        store.insert(&[vehicle("111111-1", 2021, 8, 700.0)]).unwrap();

        let rows = store
            .fetch(&plan(&[Filter::eq("mean_value", FieldValue::Real(700.0))], &[]))
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_hostile_value_is_inert() {
        let store = SqliteVehicleStore::new(SqlitePool::memory().unwrap());
        store.insert(&[vehicle("111111-1", 2021, 8, 700.0)]).unwrap();

        let rows = store
            .fetch(&plan(
                &[Filter::eq(
                    "fipe_code",
                    FieldValue::Text("x' OR '1'='1".into()),
                )],
                &[],
            ))
            .unwrap();
        assert!(rows.is_empty());

        // Table still intact.
        let rows = store
            .fetch(&plan(&[Filter::eq("year", FieldValue::Int(2021))], &[]))
            .unwrap();
        assert_eq!(rows.len(), 1);
    }
}
