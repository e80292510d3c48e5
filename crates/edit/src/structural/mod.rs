//! Edits that change which children a composition holds.

mod fill;
mod insert;
mod overwrite;
mod remove;
mod slice;

pub use fill::fill;
pub use insert::insert;
pub use overwrite::overwrite;
pub use remove::{remove, remove_range};
pub use slice::slice;

use cl_timeline::{Composable, Composition};

use crate::error::{EditError, EditResult};

/// A fresh copy of `item` for placing into a composition.
pub(crate) fn placeable(item: &Composable, operation: &'static str) -> EditResult<Composable> {
    if !item.is_item() {
        return Err(EditError::NotAnItem {
            operation,
            name: item.name().to_string(),
        });
    }
    Ok(item.duplicate())
}

/// Insert `parts` in order starting at `index`.
pub(crate) fn insert_all<C>(
    comp: &mut C,
    index: usize,
    parts: impl IntoIterator<Item = Composable>,
) -> EditResult<()>
where
    C: Composition + ?Sized,
{
    for (offset, part) in parts.into_iter().enumerate() {
        comp.insert_child(index + offset, part)?;
    }
    Ok(())
}

/// Remove the children at `indices` (ascending) from the highest down.
pub(crate) fn remove_all<C>(comp: &mut C, indices: &[usize]) -> EditResult<()>
where
    C: Composition + ?Sized,
{
    for &index in indices.iter().rev() {
        comp.remove_child(index)?;
    }
    Ok(())
}
