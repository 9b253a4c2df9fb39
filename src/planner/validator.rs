//! Filter and order validation
//!
//! Validation semantics:
//! - At least one filter and one order directive are required
//! - Every column must be registered and carry the matching flag
//! - Every filter value must satisfy its column's validator
//! - A (year, month) filter pair must not name a future period
//! - Insertion order is preserved in the output

use crate::error::{QueryError, QueryResult};
use crate::schema::{is_valid_year_month, FieldValue, ReferencePeriod, SchemaRegistry};

use super::ast::{Filter, OrderDirective, SortDirection};

/// Validates raw filter and order maps against a schema registry.
///
/// Validation is deterministic for a fixed `now`.
pub struct QueryValidator<'a> {
    registry: &'a SchemaRegistry,
    now: ReferencePeriod,
}

impl<'a> QueryValidator<'a> {
    /// Creates a validator checking periods against `now`
    pub fn new(registry: &'a SchemaRegistry, now: ReferencePeriod) -> Self {
        Self { registry, now }
    }

    /// Validates the raw filter map.
    ///
    /// # Errors
    ///
    /// - `BadRequest` if the map is empty
    /// - `Validation` naming the column if a column is not queryable or its
    ///   value is malformed
    pub fn validate_filters(&self, raw: &[(String, String)]) -> QueryResult<Vec<Filter>> {
        if raw.is_empty() {
            return Err(QueryError::bad_request("at least one filter required"));
        }

        let mut filters = Vec::with_capacity(raw.len());
        for (column, value) in raw {
            let validator = match self.registry.validator(column) {
                Some(validator) if self.registry.is_queryable(column) => validator,
                _ => return Err(QueryError::unknown_column(column)),
            };

            let typed = validator
                .check(value, self.now)
                .map_err(|reason| QueryError::validation(column, reason))?;

            filters.push(Filter::eq(column, typed));
        }

        self.check_period(&filters)?;
        Ok(filters)
    }

    /// Validates the raw order map (`true` = descending).
    ///
    /// # Errors
    ///
    /// - `BadRequest` if the map is empty
    /// - `Validation` naming the column if it is not orderable
    pub fn validate_order(&self, raw: &[(String, bool)]) -> QueryResult<Vec<OrderDirective>> {
        if raw.is_empty() {
            return Err(QueryError::bad_request("at least one order directive required"));
        }

        raw.iter()
            .map(|(column, is_desc)| {
                if !self.registry.is_orderable(column) {
                    return Err(QueryError::unknown_column(column));
                }
                Ok(OrderDirective {
                    field: column.clone(),
                    direction: SortDirection::from_desc(*is_desc),
                })
            })
            .collect()
    }

    /// Rejects a year/month filter pair that lies in the future
    fn check_period(&self, filters: &[Filter]) -> QueryResult<()> {
        let int_of = |name: &str| filter_value(filters, name).and_then(FieldValue::as_int);

        if let (Some(year), Some(month)) = (int_of("year"), int_of("month")) {
            if !is_valid_year_month(year, month, self.now) {
                // Both already range-checked by their validators.
                let period = ReferencePeriod::new(year as i32, month as u32);
                return Err(QueryError::future_period(period, self.now));
            }
        }
        Ok(())
    }
}

/// Returns the typed value of the filter on `field`, if present
pub fn filter_value<'f>(filters: &'f [Filter], field: &str) -> Option<&'f FieldValue> {
    filters.iter().find(|f| f.field == field).map(|f| &f.value)
}
