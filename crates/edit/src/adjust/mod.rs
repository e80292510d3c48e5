//! Edit-point adjustments.
//!
//! `slip` and `ripple` touch only the item. `trim`, `roll` and `slide` move an
//! edit point between the item and its neighbors. Each of these computes every
//! new range first and mutates only once all of them are known to be valid.

mod ripple;
mod roll;
mod slide;
mod slip;
mod trim;

pub use ripple::ripple;
pub use roll::roll;
pub use slide::slide;
pub use slip::slip;
pub use trim::trim;

use cl_common::TimeRange;
use cl_timeline::{Composition, Item, NodeId};

use crate::error::{EditError, EditResult};

/// Index of `item` in `comp`, reported as `NotAChildOf` when absent.
pub(crate) fn locate<C>(comp: &C, item: NodeId, operation: &'static str) -> EditResult<usize>
where
    C: Composition + ?Sized,
{
    comp.index_of_child(item)
        .map_err(|_| EditError::NotAChildOf { operation, item })
}

pub(crate) fn item_at<'a, C>(
    comp: &'a C,
    index: usize,
    operation: &'static str,
) -> EditResult<&'a dyn Item>
where
    C: Composition + ?Sized,
{
    let child = comp.child(index)?;
    child.as_item().ok_or_else(|| EditError::NotAnItem {
        operation,
        name: child.name().to_string(),
    })
}

pub(crate) fn set_range_at<C>(
    comp: &mut C,
    index: usize,
    range: TimeRange,
    operation: &'static str,
) -> EditResult<()>
where
    C: Composition + ?Sized,
{
    let child = comp.child_mut(index)?;
    let name = child.name().to_string();
    let item = child
        .as_item_mut()
        .ok_or(EditError::NotAnItem { operation, name })?;
    item.set_source_range(Some(range));
    Ok(())
}
