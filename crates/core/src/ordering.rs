//! Position bookkeeping for modules (within a course) and contents (within a
//! module), including validation of bulk reorder requests.
//!
//! A reorder batch is planned completely before anything is written: every
//! id must belong to the target module, and the resulting positions must not
//! collide, otherwise the whole batch is rejected.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// An item positioned within a parent scope.
pub trait Sequenced {
    fn id(&self) -> DbId;
    /// Id of the scope the position is relative to.
    fn parent_id(&self) -> DbId;
    fn sort_order(&self) -> i32;
}

/// Position for a newly created item when the caller did not supply one.
///
/// One past the current maximum, or 1 in an empty scope. A scope whose last
/// item already sits at `i32::MAX` has no next position.
pub fn next_sort_order(current_max: Option<i32>) -> Result<i32, CoreError> {
    let max = current_max.unwrap_or(0);
    max.checked_add(1).ok_or_else(|| {
        CoreError::Conflict(format!(
            "No position left after order {max}; supply an explicit order"
        ))
    })
}

/// Highest position among `items`.
pub fn max_sort_order<'a, T: Sequenced + 'a>(
    items: impl IntoIterator<Item = &'a T>,
) -> Option<i32> {
    items.into_iter().map(Sequenced::sort_order).max()
}

/// Sort in presentation order: by position, ties broken by id.
pub fn sort_sequence<T: Sequenced>(items: &mut [T]) {
    items.sort_by_key(|item| (item.sort_order(), item.id()));
}

/// First item in presentation order.
pub fn first_in_sequence<'a, T: Sequenced + 'a>(
    items: impl IntoIterator<Item = &'a T>,
) -> Option<&'a T> {
    items
        .into_iter()
        .min_by_key(|item| (item.sort_order(), item.id()))
}

// ---------------------------------------------------------------------------
// Bulk reorder
// ---------------------------------------------------------------------------

/// One `(content id, new position)` pair of a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReorderItem {
    pub id: DbId,
    pub sort_order: i32,
}

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON data";
pub const MISSING_FIELD_MESSAGE: &str = "Missing ID or order in payload";

/// Decode a raw reorder body: a JSON array of `{"id": .., "order": ..}`.
pub fn parse_reorder_payload(body: &[u8]) -> Result<Vec<ReorderItem>, CoreError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|_| CoreError::Validation(INVALID_JSON_MESSAGE.into()))?;
    let entries = value
        .as_array()
        .ok_or_else(|| CoreError::Validation(INVALID_JSON_MESSAGE.into()))?;

    entries
        .iter()
        .map(|entry| {
            let id = entry.get("id").and_then(serde_json::Value::as_i64);
            let order = entry.get("order").and_then(serde_json::Value::as_i64);
            let (Some(id), Some(order)) = (id, order) else {
                return Err(CoreError::Validation(MISSING_FIELD_MESSAGE.into()));
            };
            let sort_order = i32::try_from(order).map_err(|_| {
                CoreError::Validation(format!("Order {order} is out of range"))
            })?;
            if sort_order < 0 {
                return Err(CoreError::Validation("Order cannot be negative.".into()));
            }
            Ok(ReorderItem { id, sort_order })
        })
        .collect()
}

/// Check a reorder batch against the current contents of one module.
///
/// `existing` must be every item currently in the module. Returns the batch
/// unchanged when it can be applied as a unit:
///
/// - each id appears at most once (otherwise `Validation`)
/// - each id belongs to the module (otherwise `NotFound`)
/// - after applying the batch no two items share a position (otherwise `Conflict`)
pub fn plan_reorder<T: Sequenced>(
    existing: &[T],
    batch: &[ReorderItem],
) -> Result<Vec<ReorderItem>, CoreError> {
    let mut seen = HashSet::with_capacity(batch.len());
    for item in batch {
        if !seen.insert(item.id) {
            return Err(CoreError::Validation(format!(
                "Content {} appears more than once in the request",
                item.id
            )));
        }
    }

    let mut positions: HashMap<DbId, i32> = existing
        .iter()
        .map(|item| (item.id(), item.sort_order()))
        .collect();

    for item in batch {
        match positions.get_mut(&item.id) {
            Some(position) => *position = item.sort_order,
            None => {
                return Err(CoreError::NotFound {
                    entity: "Content",
                    id: item.id,
                })
            }
        }
    }

    let mut taken: HashMap<i32, DbId> = HashMap::with_capacity(positions.len());
    let mut ordered: Vec<(DbId, i32)> = positions.into_iter().collect();
    ordered.sort_unstable();
    for (id, position) in ordered {
        if let Some(other) = taken.insert(position, id) {
            return Err(CoreError::Conflict(format!(
                "Contents {other} and {id} would both have order {position}"
            )));
        }
    }

    Ok(batch.to_vec())
}
