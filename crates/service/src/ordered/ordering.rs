//! Pure list arithmetic behind drag-and-drop reordering.

use std::collections::HashSet;

use uuid::Uuid;

use crate::errors::ServiceError;

/// Remove the item at `from` and re-insert it at `to` (the target's original index).
///
/// Moving forward lands the item right after the target, moving backward right
/// before it; items outside the span keep their positions. Out-of-range or
/// equal indices leave the list untouched.
///
/// ```
/// use service::ordered::ordering::move_item;
/// let mut v = vec!['A', 'B', 'C'];
/// move_item(&mut v, 2, 0);
/// assert_eq!(v, vec!['C', 'A', 'B']);
/// ```
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Ensure `ids` lists every id of `current` exactly once.
pub fn check_permutation(current: &[Uuid], ids: &[Uuid]) -> Result<(), ServiceError> {
    let known: HashSet<&Uuid> = current.iter().collect();
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !known.contains(id) {
            return Err(ServiceError::NotFound(format!("record {id} not found")));
        }
        if !seen.insert(id) {
            return Err(ServiceError::Validation(format!("record {id} listed twice")));
        }
    }
    if seen.len() != known.len() {
        return Err(ServiceError::Validation(format!(
            "reorder must list all {} records, got {}",
            known.len(),
            seen.len()
        )));
    }
    Ok(())
}
