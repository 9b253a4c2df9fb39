//! Query AST structures
//!
//! Defines the raw client request and the validated, request-scoped value
//! objects the planner consumes.

use std::cmp::Ordering;

use crate::schema::FieldValue;

/// Comparison operators a predicate may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equality: field = value
    Eq,
    /// Inequality: field <> value
    Ne,
    /// Less than: field < value
    Lt,
    /// Less than or equal: field <= value
    Lte,
    /// Greater than: field > value
    Gt,
    /// Greater than or equal: field >= value
    Gte,
}

impl CompareOp {
    /// Returns the SQL operator
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
        }
    }

    /// Returns true if `actual <op> expected` holds for the given ordering
    /// of `actual` relative to `expected`
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Lte => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Gte => ordering != Ordering::Less,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Resolves a direction token (`asc` or `desc`, any case)
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    /// Maps the raw order flag (`true` = descending)
    pub fn from_desc(is_desc: bool) -> Self {
        if is_desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn is_desc(&self) -> bool {
        matches!(self, SortDirection::Desc)
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A validated filter
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Public column name
    pub field: String,
    /// Comparison operator
    pub op: CompareOp,
    /// Typed value
    pub value: FieldValue,
}

impl Filter {
    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: FieldValue) -> Self {
        Self {
            field: field.into(),
            op: CompareOp::Eq,
            value,
        }
    }
}

/// A validated order directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDirective {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderDirective {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// A validated offset/limit window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationWindow {
    pub offset: u64,
    pub limit: u64,
}

/// Raw client request as handed over by the transport layer.
///
/// Filter and order entries keep insertion order; a repeated key replaces
/// the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery {
    /// Column name to raw value
    pub filters: Vec<(String, String)>,
    /// Column name to descending flag
    pub order_by: Vec<(String, bool)>,
    pub offset: i64,
    pub limit: i64,
}

impl RawQuery {
    /// Creates an empty request with the given window
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset,
            limit,
            ..Default::default()
        }
    }

    /// Adds or replaces a filter entry
    pub fn with_filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        upsert(&mut self.filters, column.into(), value.into());
        self
    }

    /// Adds or replaces an order entry
    pub fn with_order(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        upsert(&mut self.order_by, column.into(), direction.is_desc());
        self
    }
}

/// Inserts `key` at the end, or overwrites its value where it already is
pub(crate) fn upsert<V>(entries: &mut Vec<(String, V)>, key: String, value: V) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_tokens() {
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("descending"), None);
        assert_eq!(SortDirection::parse(""), None);
        assert_eq!(SortDirection::from_desc(true), SortDirection::Desc);
        assert_eq!(SortDirection::from_desc(false), SortDirection::Asc);
    }

    #[test]
    fn test_compare_op_accepts() {
        assert!(CompareOp::Eq.accepts(Ordering::Equal));
        assert!(!CompareOp::Eq.accepts(Ordering::Less));
        assert!(CompareOp::Gte.accepts(Ordering::Equal));
        assert!(CompareOp::Gte.accepts(Ordering::Greater));
        assert!(!CompareOp::Lt.accepts(Ordering::Greater));
        assert!(CompareOp::Ne.accepts(Ordering::Less));
    }

    #[test]
    fn test_raw_query_keeps_insertion_order() {
        let raw = RawQuery::new(0, 10)
            .with_order("year", SortDirection::Asc)
            .with_order("month", SortDirection::Desc)
            .with_order("year", SortDirection::Desc);

        assert_eq!(
            raw.order_by,
            vec![("year".to_string(), true), ("month".to_string(), true)]
        );
    }
}
