//! Pagination guard
//!
//! Runs before any other validation. Checks, in order:
//! 1. Limit lies in `1..=MAX_LIMIT`
//! 2. Offset is non-negative
//! 3. Offset does not exceed limit
//!
//! Rule 3 rules out deep pages (offset 50 with limit 10 fails). It is kept
//! as the service has always enforced it.

use crate::error::{QueryError, QueryResult};

use super::ast::PaginationWindow;

/// Largest page a single request may ask for
pub const MAX_LIMIT: u64 = 100;

/// Validates offset/limit windows
pub struct PaginationGuard;

impl PaginationGuard {
    /// Validates a raw window and returns it in unsigned form.
    pub fn validate(offset: i64, limit: i64) -> QueryResult<PaginationWindow> {
        if limit < 1 || limit as u64 > MAX_LIMIT {
            return Err(QueryError::invalid_limit(MAX_LIMIT));
        }
        if offset < 0 {
            return Err(QueryError::invalid_offset());
        }
        if offset > limit {
            return Err(QueryError::invalid_range());
        }

        Ok(PaginationWindow {
            offset: offset as u64,
            limit: limit as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryErrorKind;

    fn kind(offset: i64, limit: i64) -> Option<QueryErrorKind> {
        PaginationGuard::validate(offset, limit).err().map(|e| e.kind())
    }

    #[test]
    fn test_limit_bounds() {
        assert_eq!(kind(0, 0), Some(QueryErrorKind::InvalidLimit));
        assert_eq!(kind(0, 101), Some(QueryErrorKind::InvalidLimit));
        assert_eq!(kind(0, -1), Some(QueryErrorKind::InvalidLimit));
        assert_eq!(kind(0, 1), None);
        assert_eq!(kind(0, 100), None);
    }

    #[test]
    fn test_negative_offset() {
        assert_eq!(kind(-1, 10), Some(QueryErrorKind::InvalidOffset));
    }

    #[test]
    fn test_offset_may_not_exceed_limit() {
        assert_eq!(kind(11, 10), Some(QueryErrorKind::InvalidRange));
        // Deep pages are rejected too.
        assert_eq!(kind(50, 10), Some(QueryErrorKind::InvalidRange));
        assert_eq!(kind(10, 10), None);
    }

    #[test]
    fn test_limit_checked_before_offset() {
        assert_eq!(kind(-5, 0), Some(QueryErrorKind::InvalidLimit));
        assert_eq!(kind(500, 101), Some(QueryErrorKind::InvalidLimit));
    }

    #[test]
    fn test_window_returned() {
        let window = PaginationGuard::validate(3, 20).unwrap();
        assert_eq!(window, PaginationWindow { offset: 3, limit: 20 });
    }
}
