//! Stored row shape of the `vehicles` table

use crate::schema::FieldValue;
use crate::vehicle::Vehicle;

/// Table name
pub const VEHICLES_TABLE: &str = "vehicles";

/// Columns selected for every read, in row order
pub const SELECT_COLUMNS: [&str; 9] = [
    "id",
    "year",
    "month",
    "fipe_code",
    "brand",
    "vehicle_model",
    "year_model",
    "authentication",
    "mean_value",
];

/// A row of the `vehicles` table
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRow {
    /// Surrogate key, also the final tie-breaker of every ordering
    pub id: i64,
    pub year: i32,
    pub month: i32,
    pub fipe_code: String,
    pub brand: String,
    pub vehicle_model: String,
    pub year_model: String,
    pub authentication: String,
    pub mean_value: f64,
}

impl VehicleRow {
    /// Builds a row from a record and its assigned id
    pub fn from_vehicle(id: i64, vehicle: &Vehicle) -> Self {
        Self {
            id,
            year: vehicle.year,
            month: vehicle.month,
            fipe_code: vehicle.fipe_code.clone(),
            brand: vehicle.brand.clone(),
            vehicle_model: vehicle.model.clone(),
            year_model: vehicle.year_model.clone(),
            authentication: vehicle.authentication.clone(),
            mean_value: vehicle.mean_value,
        }
    }

    /// Returns the value stored under a storage column name
    pub fn value(&self, column: &str) -> Option<FieldValue> {
        let value = match column {
            "id" => FieldValue::Int(self.id),
            "year" => FieldValue::Int(i64::from(self.year)),
            "month" => FieldValue::Int(i64::from(self.month)),
            "fipe_code" => FieldValue::Text(self.fipe_code.clone()),
            "brand" => FieldValue::Text(self.brand.clone()),
            "vehicle_model" => FieldValue::Text(self.vehicle_model.clone()),
            "year_model" => FieldValue::Text(self.year_model.clone()),
            "authentication" => FieldValue::Text(self.authentication.clone()),
            "mean_value" => FieldValue::Real(self.mean_value),
            _ => return None,
        };
        Some(value)
    }
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Vehicle {
            year: row.year,
            month: row.month,
            fipe_code: row.fipe_code,
            brand: row.brand,
            model: row.vehicle_model,
            year_model: row.year_model,
            authentication: row.authentication,
            mean_value: row.mean_value,
        }
    }
}
