//! Schema type definitions
//!
//! Supported column types:
//! - int: 64-bit signed integer
//! - real: 64-bit floating point
//! - text: UTF-8 string

use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Semantic type of a registered column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Real,
    /// UTF-8 string
    Text,
}

/// A typed value produced by validating a raw client string
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Real(f64),
    Text(String),
}

impl FieldValue {
    /// Returns the integer payload, if any
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Compares two values.
    ///
    /// Numbers compare numerically across int/real. Text compares
    /// lexicographically. Mixed text/number pairs are not comparable.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => Some(a.cmp(b)),
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Int(a), FieldValue::Real(b)) => (*a as f64).partial_cmp(b),
            (FieldValue::Real(a), FieldValue::Int(b)) => a.partial_cmp(&(*b as f64)),
            (FieldValue::Real(a), FieldValue::Real(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Real(v) => write!(f, "{}", v),
            FieldValue::Text(v) => write!(f, "{}", v),
        }
    }
}

/// The (year, month) pair a price record is valid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReferencePeriod {
    pub year: i32,
    pub month: u32,
}

impl ReferencePeriod {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Returns the period containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns true if `self` lies after `now`
    pub fn is_after(&self, now: ReferencePeriod) -> bool {
        *self > now
    }
}

impl fmt::Display for ReferencePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
