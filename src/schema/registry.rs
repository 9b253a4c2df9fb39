//! Schema registry for the vehicle price table
//!
//! The registry is a compiled-in whitelist. A column is queryable only if it
//! is declared here and tagged as filterable; ordering has its own flag.
//! Storage identifiers are taken from the registry, never from client input.

use super::types::ColumnType;
use super::validator::ValueValidator;

/// A registered column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    /// Name clients use in filters and order directives
    pub name: &'static str,
    /// Column identifier in the backing table
    pub column: &'static str,
    /// Semantic type
    pub column_type: ColumnType,
    /// May appear in a filter
    pub filterable: bool,
    /// May appear in an order directive
    pub orderable: bool,
    /// Value format rule
    pub validator: ValueValidator,
}

impl SchemaEntry {
    const fn new(
        name: &'static str,
        column: &'static str,
        column_type: ColumnType,
        filterable: bool,
        orderable: bool,
        validator: ValueValidator,
    ) -> Self {
        Self {
            name,
            column,
            column_type,
            filterable,
            orderable,
            validator,
        }
    }
}

static VEHICLE_COLUMNS: [SchemaEntry; 8] = [
    SchemaEntry::new(
        "fipe_code",
        "fipe_code",
        ColumnType::Text,
        true,
        true,
        ValueValidator::FipeCode,
    ),
    SchemaEntry::new("year", "year", ColumnType::Int, true, true, ValueValidator::Year),
    SchemaEntry::new("month", "month", ColumnType::Int, true, true, ValueValidator::Month),
    SchemaEntry::new(
        "mean_value",
        "mean_value",
        ColumnType::Real,
        true,
        true,
        ValueValidator::Number,
    ),
    // Returned in every record, never filtered or ordered on
    SchemaEntry::new("brand", "brand", ColumnType::Text, false, false, ValueValidator::Text),
    SchemaEntry::new(
        "model",
        "vehicle_model",
        ColumnType::Text,
        false,
        false,
        ValueValidator::Text,
    ),
    SchemaEntry::new(
        "year_model",
        "year_model",
        ColumnType::Text,
        false,
        false,
        ValueValidator::Text,
    ),
    SchemaEntry::new(
        "authentication",
        "authentication",
        ColumnType::Text,
        false,
        false,
        ValueValidator::Text,
    ),
];

/// Registry of the vehicle price columns, shared read-only by every request
pub static VEHICLES: SchemaRegistry = SchemaRegistry::new(&VEHICLE_COLUMNS);

/// Read-only column whitelist
#[derive(Debug)]
pub struct SchemaRegistry {
    entries: &'static [SchemaEntry],
}

impl SchemaRegistry {
    /// Creates a registry over a static set of entries
    pub const fn new(entries: &'static [SchemaEntry]) -> Self {
        Self { entries }
    }

    /// Returns the registry for the vehicle price table
    pub fn vehicles() -> &'static SchemaRegistry {
        &VEHICLES
    }

    /// Looks up an entry by its public name
    pub fn entry(&self, name: &str) -> Option<&'static SchemaEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Returns true if the column may be filtered on
    pub fn is_queryable(&self, name: &str) -> bool {
        self.entry(name).is_some_and(|e| e.filterable)
    }

    /// Returns true if the column may be ordered by
    pub fn is_orderable(&self, name: &str) -> bool {
        self.entry(name).is_some_and(|e| e.orderable)
    }

    /// Returns the value validator of a registered column
    pub fn validator(&self, name: &str) -> Option<ValueValidator> {
        self.entry(name).map(|e| e.validator)
    }
}
