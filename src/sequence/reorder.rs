//! Pure reordering of ordered lists.

use super::error::SequenceError;

/// Moves the element at `from` to `to`, returning a new list.
///
/// Elements between the two positions shift by one; everything else keeps
/// its place. The input is not modified, and `from == to` yields an equal
/// copy.
///
/// # Errors
///
/// Returns [`SequenceError::IndexOutOfRange`] when either index is not
/// below `items.len()`. Indices are never clamped.
///
/// # Example
///
/// ```
/// use signdesk::sequence::reorder;
///
/// let moved = reorder(&["a", "b", "c", "d"], 0, 2)?;
/// assert_eq!(moved, vec!["b", "c", "a", "d"]);
/// # Ok::<(), signdesk::sequence::SequenceError>(())
/// ```
pub fn reorder<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>, SequenceError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(SequenceError::IndexOutOfRange { index, len });
        }
    }

    let mut reordered = items.to_vec();
    let moved = reordered.remove(from);
    reordered.insert(to, moved);
    Ok(reordered)
}
