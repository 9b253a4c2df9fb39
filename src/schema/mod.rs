//! Schema subsystem
//!
//! Declares the fixed set of queryable columns of the vehicle price table,
//! their semantic types and the rule each filter value must satisfy.
//!
//! # Principles
//!
//! - Whitelist, not reflection: only declared columns exist
//! - Immutable: built at compile time, shared read-only
//! - Strict: no coercion between text and numbers

mod registry;
mod types;
mod validator;

pub use registry::{SchemaEntry, SchemaRegistry, VEHICLES};
pub use types::{ColumnType, FieldValue, ReferencePeriod};
pub use validator::{
    is_valid_fipe_code, is_valid_month, is_valid_year, is_valid_year_month, ValueValidator,
    MAX_TEXT_LEN, MIN_YEAR,
};
