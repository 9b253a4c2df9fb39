//! Query executor subsystem
//!
//! Consumes a query plan and produces vehicle records from storage.
//!
//! # Execution Flow (strict order)
//!
//! 1. Hand the plan to the configured store
//! 2. Treat an empty result set as not found
//! 3. Map storage rows to vehicle records, preserving plan order
//!
//! # Design Principles
//!
//! - Deterministic: same plan + same data = same results
//! - Opaque failures: storage errors are logged, never echoed to clients

mod executor;

pub use executor::QueryExecutor;
