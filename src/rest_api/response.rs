//! # Response Formatting
//!
//! Wire shape of vehicle records. Field names are part of the public API.

use serde::{Deserialize, Serialize};

use crate::vehicle::Vehicle;

/// A vehicle as returned by `GET /vehicles`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleResponse {
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "mes")]
    pub month: i32,
    pub fipe_code: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "ano_modelo")]
    pub year_model: String,
    #[serde(rename = "autenticacao")]
    pub authentication: String,
    #[serde(rename = "valor_medio")]
    pub mean_value: f64,
}

impl From<Vehicle> for VehicleResponse {
    fn from(v: Vehicle) -> Self {
        Self {
            year: v.year,
            month: v.month,
            fipe_code: v.fipe_code,
            brand: v.brand,
            model: v.model,
            year_model: v.year_model,
            authentication: v.authentication,
            mean_value: v.mean_value,
        }
    }
}
