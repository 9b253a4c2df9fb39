//! The vehicle price record

use serde::{Deserialize, Serialize};

/// A FIPE price record for one vehicle model in one reference period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub year: i32,
    pub month: i32,
    /// Six digits, hyphen, one digit
    pub fipe_code: String,
    pub brand: String,
    pub model: String,
    /// Model-year label, e.g. "2014 Gasolina"
    pub year_model: String,
    pub authentication: String,
    pub mean_value: f64,
}
