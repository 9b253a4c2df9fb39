//! Query builder
//!
//! Turns validated filters, order directives and a pagination window into a
//! backend-agnostic, immutable query plan.
//!
//! Every column is resolved against the schema registry again while
//! building. Anything that does not resolve is dropped from the plan.

use tracing::debug;

use crate::schema::{FieldValue, SchemaRegistry};

use super::ast::{CompareOp, Filter, OrderDirective, PaginationWindow, SortDirection};

/// A predicate bound to a storage column
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Public column name
    pub field: String,
    /// Storage column identifier (from the registry)
    pub column: &'static str,
    pub op: CompareOp,
    pub value: FieldValue,
}

/// A sort key bound to a storage column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Public column name
    pub field: String,
    /// Storage column identifier (from the registry)
    pub column: &'static str,
    pub direction: SortDirection,
}

/// Immutable query plan (no runtime state)
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    /// Predicates, all combined with AND
    pub predicates: Vec<Predicate>,
    /// Sort keys; the first is primary, later ones break ties
    pub orderings: Vec<SortKey>,
    pub offset: u64,
    pub limit: u64,
}

/// Builds query plans over one schema registry
pub struct QueryBuilder<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Builds a plan.
    ///
    /// Deterministic: same inputs produce the same plan.
    pub fn build(
        &self,
        filters: &[Filter],
        order: &[OrderDirective],
        window: PaginationWindow,
    ) -> QueryPlan {
        let predicates = filters
            .iter()
            .filter_map(|filter| match self.registry.entry(&filter.field) {
                Some(entry) if entry.filterable => Some(Predicate {
                    field: filter.field.clone(),
                    column: entry.column,
                    op: filter.op,
                    value: filter.value.clone(),
                }),
                _ => {
                    debug!(field = %filter.field, "dropping predicate on unregistered column");
                    None
                }
            })
            .collect();

        let orderings = order
            .iter()
            .filter_map(|directive| match self.registry.entry(&directive.field) {
                Some(entry) if entry.orderable => Some(SortKey {
                    field: directive.field.clone(),
                    column: entry.column,
                    direction: directive.direction,
                }),
                _ => {
                    debug!(field = %directive.field, "dropping ordering on unregistered column");
                    None
                }
            })
            .collect();

        QueryPlan {
            predicates,
            orderings,
            offset: window.offset,
            limit: window.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> PaginationWindow {
        PaginationWindow { offset: 0, limit: 10 }
    }

    #[test]
    fn test_build_resolves_storage_columns() {
        let builder = QueryBuilder::new(SchemaRegistry::vehicles());
        let plan = builder.build(
            &[Filter::eq("fipe_code", FieldValue::Text("111111-1".into()))],
            &[OrderDirective::asc("year")],
            window(),
        );

        assert_eq!(plan.predicates.len(), 1);
        assert_eq!(plan.predicates[0].column, "fipe_code");
        assert_eq!(plan.predicates[0].op, CompareOp::Eq);
        assert_eq!(plan.orderings[0].column, "year");
        assert_eq!(plan.limit, 10);
    }

    #[test]
    fn test_order_preserved() {
        let builder = QueryBuilder::new(SchemaRegistry::vehicles());
        let plan = builder.build(
            &[Filter::eq("year", FieldValue::Int(2021))],
            &[OrderDirective::asc("year"), OrderDirective::desc("month")],
            window(),
        );

        let keys: Vec<_> = plan
            .orderings
            .iter()
            .map(|k| (k.field.as_str(), k.direction))
            .collect();
        assert_eq!(
            keys,
            vec![("year", SortDirection::Asc), ("month", SortDirection::Desc)]
        );
    }

    #[test]
    fn test_unregistered_columns_dropped() {
        let builder = QueryBuilder::new(SchemaRegistry::vehicles());
        let plan = builder.build(
            &[
                Filter::eq("year", FieldValue::Int(2021)),
                Filter::eq("1=1; --", FieldValue::Int(1)),
                Filter::eq("authentication", FieldValue::Text("x".into())),
                Filter::eq("model", FieldValue::Text("Uno".into())),
            ],
            &[OrderDirective::asc("brand"), OrderDirective::desc("mean_value")],
            window(),
        );

        assert_eq!(plan.predicates.len(), 1);
        assert_eq!(plan.predicates[0].field, "year");
        assert_eq!(plan.orderings.len(), 1);
        assert_eq!(plan.orderings[0].field, "mean_value");
    }

    #[test]
    fn test_empty_order_allowed() {
        let builder = QueryBuilder::new(SchemaRegistry::vehicles());
        let plan = builder.build(&[], &[], window());
        assert!(plan.predicates.is_empty());
        assert!(plan.orderings.is_empty());
    }
}
