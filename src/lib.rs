//! fipe - read-only query API over FIPE vehicle price records
//!
//! A client request (filters, order directives, offset, limit) passes
//! through a fixed pipeline:
//!
//! 1. Pagination guard
//! 2. Filter/order validation against the schema registry
//! 3. Query building into an immutable plan
//! 4. Execution against a vehicle store
//!
//! Column identifiers only ever come from the compiled-in registry, and
//! every client value reaches the database as a bound parameter.

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod executor;
pub mod observability;
pub mod planner;
pub mod rest_api;
pub mod schema;
pub mod service;
pub mod storage;
pub mod vehicle;

pub use error::{QueryError, QueryErrorKind, QueryResult};
pub use service::VehicleService;
pub use vehicle::Vehicle;
