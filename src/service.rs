//! Vehicle query service
//!
//! Runs one request through the query pipeline:
//!
//! `Received → PaginationValidated → FiltersOrdersValidated → PlanBuilt →
//! Executed → Succeeded | Failed(kind)`
//!
//! The first failing stage ends the request. Nothing is retried.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{QueryErrorKind, QueryResult};
use crate::executor::QueryExecutor;
use crate::planner::{PaginationGuard, QueryBuilder, QueryValidator, RawQuery};
use crate::schema::SchemaRegistry;
use crate::storage::VehicleStore;
use crate::vehicle::Vehicle;

/// Stage reached by a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    PaginationValidated,
    FiltersOrdersValidated,
    PlanBuilt,
    Executed,
    Succeeded,
    Failed(QueryErrorKind),
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::PaginationValidated => "pagination_validated",
            Self::FiltersOrdersValidated => "filters_orders_validated",
            Self::PlanBuilt => "plan_built",
            Self::Executed => "executed",
            Self::Succeeded => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(kind) => write!(f, "failed({})", kind.code()),
            other => f.write_str(other.as_str()),
        }
    }
}

fn enter(stage: PipelineStage) {
    trace!(stage = %stage, "pipeline stage");
}

/// Read-only vehicle query service
pub struct VehicleService<S: VehicleStore> {
    executor: QueryExecutor<S>,
    registry: &'static SchemaRegistry,
    clock: Arc<dyn Clock>,
}

impl<S: VehicleStore> VehicleService<S> {
    /// Creates a service over `store`, using the wall clock
    pub fn new(store: S) -> Self {
        Self {
            executor: QueryExecutor::new(store),
            registry: SchemaRegistry::vehicles(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used for reference period checks
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Answers one vehicle query.
    ///
    /// # Errors
    ///
    /// The first failing stage decides the error: pagination, then filters,
    /// then order, then execution (`NotFound`, `Unexpected`).
    pub fn get_vehicles(&self, query: &RawQuery) -> QueryResult<Vec<Vehicle>> {
        info!(
            filters = ?query.filters,
            order = ?query.order_by,
            offset = query.offset,
            limit = query.limit,
            "get vehicles"
        );
        enter(PipelineStage::Received);

        let result = self.run(query);
        match &result {
            Ok(vehicles) => {
                enter(PipelineStage::Succeeded);
                debug!(count = vehicles.len(), "get vehicles succeeded");
            }
            Err(e) => {
                enter(PipelineStage::Failed(e.kind()));
                if e.kind().is_client_error() {
                    debug!(code = e.kind().code(), error = %e, "get vehicles rejected");
                } else {
                    warn!(code = e.kind().code(), error = %e, "get vehicles failed");
                }
            }
        }
        result
    }

    fn run(&self, query: &RawQuery) -> QueryResult<Vec<Vehicle>> {
        let window = PaginationGuard::validate(query.offset, query.limit)?;
        enter(PipelineStage::PaginationValidated);

        let validator = QueryValidator::new(self.registry, self.clock.current_period());
        let filters = validator.validate_filters(&query.filters)?;
        let order = validator.validate_order(&query.order_by)?;
        enter(PipelineStage::FiltersOrdersValidated);

        let plan = QueryBuilder::new(self.registry).build(&filters, &order, window);
        enter(PipelineStage::PlanBuilt);

        let vehicles = self.executor.execute(&plan)?;
        enter(PipelineStage::Executed);

        Ok(vehicles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::planner::SortDirection;
    use crate::storage::MemoryVehicleStore;
    use chrono::NaiveDate;

    fn vehicle(fipe_code: &str, year: i32, month: i32, mean_value: f64) -> Vehicle {
        Vehicle {
            year,
            month,
            fipe_code: fipe_code.into(),
            brand: "Honda".into(),
            model: "Civic".into(),
            year_model: "2018 Gasolina".into(),
            authentication: "k9".into(),
            mean_value,
        }
    }

    fn service() -> VehicleService<MemoryVehicleStore> {
        let store = MemoryVehicleStore::with_vehicles(&[
            vehicle("111111-1", 2021, 8, 700.0),
            vehicle("111111-1", 2021, 7, 650.0),
            vehicle("222222-2", 2024, 7, 900.0),
        ]);
        VehicleService::new(store)
            .with_clock(FixedClock(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()))
    }

    #[test]
    fn test_get_vehicles() {
        let query = RawQuery::new(0, 10)
            .with_filter("fipe_code", "111111-1")
            .with_order("month", SortDirection::Asc);

        let vehicles = service().get_vehicles(&query).unwrap();
        let months: Vec<_> = vehicles.iter().map(|v| v.month).collect();
        assert_eq!(months, vec![7, 8]);
    }

    #[test]
    fn test_pagination_checked_first() {
        let query = RawQuery::new(0, 0).with_filter("nope", "x");
        let err = service().get_vehicles(&query).unwrap_err();
        assert_eq!(err.kind(), QueryErrorKind::InvalidLimit);
    }

    #[test]
    fn test_filters_checked_before_order() {
        let query = RawQuery::new(0, 10)
            .with_filter("color", "red")
            .with_order("brand", SortDirection::Asc);

        let err = service().get_vehicles(&query).unwrap_err();
        assert_eq!(err.column(), Some("color"));
    }

    #[test]
    fn test_order_required() {
        let query = RawQuery::new(0, 10).with_filter("year", "2021");
        let err = service().get_vehicles(&query).unwrap_err();
        assert_eq!(err.kind(), QueryErrorKind::BadRequest);
    }

    #[test]
    fn test_current_period_allowed_future_rejected() {
        let current = RawQuery::new(0, 10)
            .with_filter("year", "2024")
            .with_filter("month", "7")
            .with_order("year", SortDirection::Asc);
        assert_eq!(service().get_vehicles(&current).unwrap().len(), 1);

        let future = RawQuery::new(0, 10)
            .with_filter("year", "2024")
            .with_filter("month", "8")
            .with_order("year", SortDirection::Asc);
        let err = service().get_vehicles(&future).unwrap_err();
        assert_eq!(err.kind(), QueryErrorKind::Validation);
        assert_eq!(err.column(), Some("month"));
        assert!(err.message().starts_with("Invalid reference period"));
    }

    #[test]
    fn test_no_match_is_not_found() {
        let query = RawQuery::new(0, 10)
            .with_filter("fipe_code", "999999-9")
            .with_order("year", SortDirection::Desc);
        let err = service().get_vehicles(&query).unwrap_err();
        assert_eq!(err.kind(), QueryErrorKind::NotFound);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(PipelineStage::PlanBuilt.to_string(), "plan_built");
        assert_eq!(
            PipelineStage::Failed(QueryErrorKind::NotFound).to_string(),
            "failed(FIPE_NOT_FOUND)"
        );
    }
}
