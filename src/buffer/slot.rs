//! Slot - one position in the buffer pool's slot table.
//!
//! A [`Slot`] is either empty or holds a [`CachedEntry`]: the size of a
//! released buffer plus a weak handle to it. The strong reference lives in
//! the pool's retention queue, so a slot never keeps its buffer alive.

use std::sync::Weak;

/// A released buffer as the slot table sees it.
///
/// `size` is captured at insertion and never updated.
#[derive(Debug)]
pub struct CachedEntry {
    /// Byte length of the buffer when it was cached.
    size: usize,

    /// Non-owning handle; upgrades only while the buffer is retained.
    buffer: Weak<Vec<u8>>,
}

impl CachedEntry {
    /// Create an entry for a buffer of `size` bytes.
    pub fn new(size: usize, buffer: Weak<Vec<u8>>) -> Self {
        Self { size, buffer }
    }

    /// Cached byte length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The weak handle to the cached buffer.
    #[inline]
    pub fn buffer(&self) -> &Weak<Vec<u8>> {
        &self.buffer
    }

    /// Whether the buffer has not been reclaimed yet.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.buffer.strong_count() > 0
    }
}

/// What a scan observes when it looks at a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Nothing cached.
    Empty,
    /// A retained buffer of the given size.
    Live(usize),
    /// An entry whose buffer was reclaimed; treated as empty.
    Dead,
}

/// A slot in the buffer pool.
///
/// Slots carry no locking of their own; the whole table sits behind the
/// pool's mutex.
#[derive(Debug, Default)]
pub struct Slot {
    entry: Option<CachedEntry>,
}

impl Slot {
    /// Create a new empty slot.
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// Observe the slot without changing it.
    pub fn state(&self) -> SlotState {
        match &self.entry {
            None => SlotState::Empty,
            Some(entry) if entry.is_alive() => SlotState::Live(entry.size()),
            Some(_) => SlotState::Dead,
        }
    }

    /// Size of the cached buffer if the slot is live.
    #[inline]
    pub fn live_size(&self) -> Option<usize> {
        match self.state() {
            SlotState::Live(size) => Some(size),
            _ => None,
        }
    }

    /// Whether the slot holds a retained buffer.
    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self.state(), SlotState::Live(_))
    }

    /// Store `entry`, returning whatever the slot held before.
    pub fn put(&mut self, entry: CachedEntry) -> Option<CachedEntry> {
        self.entry.replace(entry)
    }

    /// Remove and return the entry, leaving the slot empty.
    pub fn take(&mut self) -> Option<CachedEntry> {
        self.entry.take()
    }

    /// Empty the slot if its buffer was reclaimed.
    ///
    /// Returns `true` if a dead entry was cleared.
    pub fn clear_if_dead(&mut self) -> bool {
        if self.state() == SlotState::Dead {
            self.entry = None;
            true
        } else {
            false
        }
    }

    /// Drop the entry unconditionally.
    pub fn reset(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn entry_for(buffer: &Arc<Vec<u8>>) -> CachedEntry {
        CachedEntry::new(buffer.len(), Arc::downgrade(buffer))
    }

    #[test]
    fn test_slot_new() {
        let slot = Slot::new();
        assert_eq!(slot.state(), SlotState::Empty);
        assert!(!slot.is_live());
        assert_eq!(slot.live_size(), None);
    }

    #[test]
    fn test_slot_live() {
        let buffer = Arc::new(vec![0u8; 64]);
        let mut slot = Slot::new();

        assert!(slot.put(entry_for(&buffer)).is_none());
        assert_eq!(slot.state(), SlotState::Live(64));
        assert_eq!(slot.live_size(), Some(64));
    }

    #[test]
    fn test_slot_dead_after_drop() {
        let buffer = Arc::new(vec![0u8; 64]);
        let mut slot = Slot::new();
        slot.put(entry_for(&buffer));

        drop(buffer);

        assert_eq!(slot.state(), SlotState::Dead);
        assert!(!slot.is_live());
        assert!(slot.clear_if_dead());
        assert_eq!(slot.state(), SlotState::Empty);
    }

    #[test]
    fn test_clear_if_dead_keeps_live() {
        let buffer = Arc::new(vec![0u8; 8]);
        let mut slot = Slot::new();
        slot.put(entry_for(&buffer));

        assert!(!slot.clear_if_dead());
        assert!(slot.is_live());
    }

    #[test]
    fn test_put_returns_previous() {
        let first = Arc::new(vec![0u8; 10]);
        let second = Arc::new(vec![0u8; 20]);
        let mut slot = Slot::new();

        slot.put(entry_for(&first));
        let previous = slot.put(entry_for(&second)).unwrap();

        assert_eq!(previous.size(), 10);
        assert_eq!(slot.live_size(), Some(20));
    }

    #[test]
    fn test_take_and_reset() {
        let buffer = Arc::new(vec![0u8; 16]);
        let mut slot = Slot::new();
        slot.put(entry_for(&buffer));

        let entry = slot.take().unwrap();
        assert_eq!(entry.size(), 16);
        assert!(entry.is_alive());
        assert_eq!(slot.state(), SlotState::Empty);

        slot.put(entry);
        slot.reset();
        assert_eq!(slot.state(), SlotState::Empty);
    }
}
