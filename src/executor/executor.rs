//! Query executor
//!
//! Runs a plan against a [`VehicleStore`] and maps the outcome into the
//! query error taxonomy.

use tracing::{debug, error};

use crate::error::{QueryError, QueryResult};
use crate::planner::QueryPlan;
use crate::storage::VehicleStore;
use crate::vehicle::Vehicle;

/// Executes query plans against one store
pub struct QueryExecutor<S: VehicleStore> {
    store: S,
}

impl<S: VehicleStore> QueryExecutor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Executes a plan.
    ///
    /// Returns `NotFound` when no row matches, and `Unexpected` on any
    /// storage failure. The storage detail goes to the log only.
    pub fn execute(&self, plan: &QueryPlan) -> QueryResult<Vec<Vehicle>> {
        let rows = self.store.fetch(plan).map_err(|e| {
            error!(error = %e, "storage failure while executing query");
            QueryError::unexpected()
        })?;

        if rows.is_empty() {
            debug!(predicates = plan.predicates.len(), "query matched no rows");
            return Err(QueryError::not_found());
        }

        debug!(rows = rows.len(), "query executed");
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }
}
