//! In-process vehicle store
//!
//! Evaluates a query plan over rows held in memory, with the same
//! semantics as the SQL backend: predicates combined with AND, stable sort
//! by each key in turn with `id` as the final key, then offset and limit.

use std::cmp::Ordering;

use parking_lot::RwLock;

use crate::planner::{Predicate, QueryPlan, SortDirection, SortKey};
use crate::vehicle::Vehicle;

use super::errors::StorageResult;
use super::record::VehicleRow;
use super::VehicleStore;

/// Vehicle store backed by a vector
#[derive(Default)]
pub struct MemoryVehicleStore {
    rows: RwLock<Vec<VehicleRow>>,
}

impl MemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records
    pub fn with_vehicles(vehicles: &[Vehicle]) -> Self {
        let store = Self::new();
        store.insert(vehicles);
        store
    }

    /// Appends records, returning their assigned ids
    pub fn insert(&self, vehicles: &[Vehicle]) -> Vec<i64> {
        let mut rows = self.rows.write();
        let mut next_id = rows.last().map_or(1, |r| r.id + 1);
        vehicles
            .iter()
            .map(|v| {
                let id = next_id;
                next_id += 1;
                rows.push(VehicleRow::from_vehicle(id, v));
                id
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl VehicleStore for MemoryVehicleStore {
    fn fetch(&self, plan: &QueryPlan) -> StorageResult<Vec<VehicleRow>> {
        let mut matched: Vec<VehicleRow> = self
            .rows
            .read()
            .iter()
            .filter(|row| plan.predicates.iter().all(|p| matches(row, p)))
            .cloned()
            .collect();

        matched.sort_by(|a, b| compare_rows(a, b, &plan.orderings));

        let offset = usize::try_from(plan.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(plan.limit).unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(offset).take(limit).collect())
    }
}

/// Checks a single predicate. Missing columns and incomparable values
/// never match.
fn matches(row: &VehicleRow, predicate: &Predicate) -> bool {
    row.value(predicate.column)
        .and_then(|actual| actual.compare(&predicate.value))
        .is_some_and(|ordering| predicate.op.accepts(ordering))
}

fn compare_rows(a: &VehicleRow, b: &VehicleRow, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ordering = match (a.value(key.column), b.value(key.column)) {
            (Some(x), Some(y)) => x.compare(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        };
        let ordering = match key.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.id.cmp(&b.id)
}
