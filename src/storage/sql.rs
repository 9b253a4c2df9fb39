//! SQL rendering of query plans
//!
//! Identifiers come from the plan, which took them from the schema registry.
//! Values, limit and offset are always bound parameters (`?N`); nothing the
//! client sent is ever spliced into the statement text.

use crate::planner::QueryPlan;
use crate::schema::FieldValue;

use super::record::{SELECT_COLUMNS, VEHICLES_TABLE};

/// A parameterized SELECT statement
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub sql: String,
    pub params: Vec<FieldValue>,
}

impl SelectStatement {
    /// Renders a plan.
    ///
    /// The ordering always ends with `id ASC` so that rows equal on every
    /// requested key still come back in a fixed order.
    pub fn from_plan(plan: &QueryPlan) -> Self {
        let mut params = Vec::with_capacity(plan.predicates.len() + 2);
        let mut sql = format!(
            "SELECT {} FROM {}",
            SELECT_COLUMNS.join(", "),
            VEHICLES_TABLE
        );

        if !plan.predicates.is_empty() {
            let clauses: Vec<String> = plan
                .predicates
                .iter()
                .map(|pred| {
                    params.push(pred.value.clone());
                    format!("{} {} ?{}", pred.column, pred.op.as_sql(), params.len())
                })
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        let mut keys: Vec<String> = plan
            .orderings
            .iter()
            .map(|key| format!("{} {}", key.column, key.direction.as_sql()))
            .collect();
        keys.push("id ASC".to_string());
        sql.push_str(" ORDER BY ");
        sql.push_str(&keys.join(", "));

        params.push(FieldValue::Int(clamp_i64(plan.limit)));
        sql.push_str(&format!(" LIMIT ?{}", params.len()));
        params.push(FieldValue::Int(clamp_i64(plan.offset)));
        sql.push_str(&format!(" OFFSET ?{}", params.len()));

        Self { sql, params }
    }
}

fn clamp_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
