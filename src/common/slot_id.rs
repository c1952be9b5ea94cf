//! Slot identifier type.

use std::fmt;

/// Identifies a slot in the buffer pool's slot table.
///
/// Using `usize` because slots live in a `Vec<Slot>` and are indexed
/// directly: `slots[slot_id.0]`.
///
/// # Example
/// ```
/// use scratchpool::SlotId;
///
/// let slot_id = SlotId::new(5);
/// assert_eq!(slot_id.0, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

impl SlotId {
    /// Create a new SlotId.
    #[inline]
    pub fn new(id: usize) -> Self {
        SlotId(id)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}
