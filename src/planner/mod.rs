//! Query planner subsystem
//!
//! Turns an untrusted raw request into a validated, schema-bound plan.
//!
//! # Pipeline (strict order)
//!
//! 1. Pagination guard
//! 2. Filter and order validation against the schema registry
//! 3. Plan construction
//!
//! # Design Principles
//!
//! - Whitelisted: only registry columns reach a plan
//! - Ordered: directives keep the order the client gave them
//! - Deterministic: same inputs produce the same plan

mod ast;
mod pagination;
mod planner;
mod validator;

pub use ast::{CompareOp, Filter, OrderDirective, PaginationWindow, RawQuery, SortDirection};
pub(crate) use ast::upsert;
pub use pagination::{PaginationGuard, MAX_LIMIT};
pub use planner::{Predicate, QueryBuilder, QueryPlan, SortKey};
pub use validator::{filter_value, QueryValidator};
