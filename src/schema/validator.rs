//! Column value validators
//!
//! Each registered column carries one validator. A validator turns the raw
//! client string into a typed [`FieldValue`] or rejects it.
//!
//! Forbidden behaviors:
//! - Implicit type coercion between text and numbers
//! - Trimming or normalizing the client value
//! - Non-finite numbers

use std::sync::OnceLock;

use regex::Regex;

use super::types::{FieldValue, ReferencePeriod};

/// Earliest year accepted for a reference period
pub const MIN_YEAR: i64 = 1900;

/// Longest text value accepted for free-text columns
pub const MAX_TEXT_LEN: usize = 128;

const FIPE_CODE_PATTERN: &str = r"^[0-9]{6}-[0-9]$";

fn fipe_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FIPE_CODE_PATTERN).expect("fipe code pattern is valid"))
}

/// Returns true if `code` is six digits, a hyphen and one digit
pub fn is_valid_fipe_code(code: &str) -> bool {
    fipe_code_regex().is_match(code)
}

/// Returns true if `year` lies in `[MIN_YEAR, now.year]`
pub fn is_valid_year(year: i64, now: ReferencePeriod) -> bool {
    (MIN_YEAR..=i64::from(now.year)).contains(&year)
}

/// Returns true if `month` lies in `[1, 12]`
pub fn is_valid_month(month: i64) -> bool {
    (1..=12).contains(&month)
}

/// Returns true if (year, month) is a valid, non-future reference period
pub fn is_valid_year_month(year: i64, month: i64, now: ReferencePeriod) -> bool {
    if !is_valid_year(year, now) || !is_valid_month(month) {
        return false;
    }
    // Both bounded above, the casts cannot truncate.
    !ReferencePeriod::new(year as i32, month as u32).is_after(now)
}

/// Value format rule attached to a schema entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueValidator {
    /// Six digits, hyphen, one digit
    FipeCode,
    /// Integer year in `[MIN_YEAR, current year]`
    Year,
    /// Integer month in `[1, 12]`
    Month,
    /// Finite decimal number
    Number,
    /// Non-blank text up to `MAX_TEXT_LEN` characters
    Text,
}

impl ValueValidator {
    /// Validates a raw value, returning the typed value or the reason it
    /// was rejected.
    pub fn check(&self, raw: &str, now: ReferencePeriod) -> Result<FieldValue, String> {
        match self {
            ValueValidator::FipeCode => {
                if is_valid_fipe_code(raw) {
                    Ok(FieldValue::Text(raw.to_string()))
                } else {
                    Err("Invalid fipe code".into())
                }
            }
            ValueValidator::Year => {
                let year: i64 = raw.parse().map_err(|_| "Invalid year".to_string())?;
                if !is_valid_year(year, now) {
                    return Err(format!(
                        "Invalid year. The year must be between {} and {}",
                        MIN_YEAR, now.year
                    ));
                }
                Ok(FieldValue::Int(year))
            }
            ValueValidator::Month => {
                let month: i64 = raw.parse().map_err(|_| "Invalid month".to_string())?;
                if !is_valid_month(month) {
                    return Err("Invalid month. The month must be between 1 and 12".into());
                }
                Ok(FieldValue::Int(month))
            }
            ValueValidator::Number => {
                let value: f64 = raw.parse().map_err(|_| "Invalid mean value".to_string())?;
                if !value.is_finite() {
                    return Err("Invalid mean value".into());
                }
                Ok(FieldValue::Real(value))
            }
            ValueValidator::Text => {
                if raw.trim().is_empty() {
                    return Err("Value must not be blank".into());
                }
                if raw.chars().count() > MAX_TEXT_LEN {
                    return Err(format!("Value must be at most {} characters", MAX_TEXT_LEN));
                }
                Ok(FieldValue::Text(raw.to_string()))
            }
        }
    }
}
