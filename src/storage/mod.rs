//! Vehicle storage subsystem
//!
//! Storage is a collaborator of the query executor: it receives a validated
//! plan and returns raw rows. Two backends are provided:
//!
//! - SQLite, rendering the plan as a parameterized SELECT
//! - In-memory, evaluating the plan in process (tests and demos)
//!
//! # Design Principles
//!
//! - Read-only surface: no write path is reachable from the API
//! - Parameterized: client values are bound, never interpolated
//! - Total order: every read ends its ordering on `id`

mod errors;
mod memory;
mod record;
mod sql;
mod sqlite;

pub use errors::{StorageError, StorageResult};
pub use memory::MemoryVehicleStore;
pub use record::{VehicleRow, SELECT_COLUMNS, VEHICLES_TABLE};
pub use sql::SelectStatement;
pub use sqlite::{SqlitePool, SqliteVehicleStore};

use crate::planner::QueryPlan;

/// Backend that can execute a query plan
pub trait VehicleStore: Send + Sync {
    /// Returns the rows selected by the plan, in plan order
    fn fetch(&self, plan: &QueryPlan) -> StorageResult<Vec<VehicleRow>>;
}
