//! # Query Parameter Parser
//!
//! Parses `/vehicles` query parameters into a [`RawQuery`].
//!
//! `where` and `order` are comma-separated `key:value` lists. Clauses are
//! trimmed; a repeated key replaces the earlier clause. Order values must
//! be `asc` or `desc`.

use std::collections::HashMap;

use crate::planner::{upsert, RawQuery, SortDirection};

use super::errors::{RestError, RestResult};

/// Parses the full parameter map.
///
/// `offset` and `limit` are required integers. Range checks are left to the
/// pagination guard.
pub fn parse_query(params: &HashMap<String, String>) -> RestResult<RawQuery> {
    let param = |name: &str| params.get(name).map(String::as_str).unwrap_or("");

    Ok(RawQuery {
        filters: parse_where(param("where"))?,
        order_by: parse_order(param("order"))?,
        offset: parse_int("offset", param("offset"))?,
        limit: parse_int("limit", param("limit"))?,
    })
}

/// Parses `where`, e.g. `fipe_code:111111-1,year:2021`
pub fn parse_where(value: &str) -> RestResult<Vec<(String, String)>> {
    let mut filters = Vec::new();
    for (key, value) in parse_pairs("where", value)? {
        upsert(&mut filters, key, value);
    }
    Ok(filters)
}

/// Parses `order`, e.g. `year:asc,month:desc`, into descending flags
pub fn parse_order(value: &str) -> RestResult<Vec<(String, bool)>> {
    let mut order = Vec::new();
    for (index, (key, token)) in parse_pairs("order", value)?.into_iter().enumerate() {
        let direction = SortDirection::parse(&token).ok_or_else(|| {
            RestError::BadRequest(format!(
                "order clause {}: direction must be asc or desc",
                index
            ))
        })?;
        upsert(&mut order, key, direction.is_desc());
    }
    Ok(order)
}

/// Parses a required integer parameter
pub fn parse_int(name: &str, value: &str) -> RestResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| RestError::BadRequest(format!("{} must be an integer", name)))
}

fn parse_pairs(param: &str, value: &str) -> RestResult<Vec<(String, String)>> {
    if value.trim().is_empty() {
        return Err(RestError::BadRequest(format!(
            "{} must have at least one clause",
            param
        )));
    }

    value
        .split(',')
        .enumerate()
        .map(|(index, clause)| {
            let malformed = || {
                RestError::BadRequest(format!(
                    "{} clause {} must be in the format 'key:value'",
                    param, index
                ))
            };

            let mut parts = clause.split(':');
            let (key, value) = match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => (key.trim(), value.trim()),
                _ => return Err(malformed()),
            };
            if key.is_empty() || value.is_empty() {
                return Err(malformed());
            }
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}
