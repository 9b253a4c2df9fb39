//! # REST API Module
//!
//! HTTP surface of the vehicle query service:
//!
//! - `GET /vehicles?where=k:v,...&order=k:asc,...&offset=N&limit=N`
//! - `GET /health-check`
//!
//! The transport layer only parses parameters; all validation happens in
//! the query pipeline.

pub mod errors;
pub mod parser;
pub mod response;
pub mod server;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use parser::{parse_int, parse_order, parse_query, parse_where};
pub use response::VehicleResponse;
pub use server::RestServer;
