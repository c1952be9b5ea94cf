//! Retention queue - the owner of every cached buffer.
//!
//! Slots only hold `Weak` handles. The queue keeps the matching `Arc`s in
//! the order buffers were released and decides when to let them go:
//! - when the slot that points at a buffer is evicted or flushed
//! - on a full [`RetentionQueue::clear`]
//! - when the retained byte total goes over the configured ceiling
//!   (oldest first)
//!
//! Once the `Arc` is dropped the slot's handle stops upgrading and the slot
//! reads as dead.

use std::collections::VecDeque;
use std::sync::{Arc, Weak};

/// FIFO owner of cached buffers with an optional byte ceiling.
#[derive(Debug)]
pub struct RetentionQueue {
    /// Retained buffers in release order (front = oldest).
    queue: VecDeque<Arc<Vec<u8>>>,

    /// Sum of the lengths of everything in `queue`.
    retained_bytes: usize,

    /// Ceiling on `retained_bytes`, if any.
    max_retained_bytes: Option<usize>,
}

impl RetentionQueue {
    /// Create an empty queue.
    pub fn new(max_retained_bytes: Option<usize>) -> Self {
        Self {
            queue: VecDeque::new(),
            retained_bytes: 0,
            max_retained_bytes,
        }
    }

    /// Take ownership of `buffer` and hand back a non-owning handle.
    pub fn retain(&mut self, buffer: Vec<u8>) -> Weak<Vec<u8>> {
        self.retained_bytes += buffer.len();
        let strong = Arc::new(buffer);
        let weak = Arc::downgrade(&strong);
        self.queue.push_back(strong);
        weak
    }

    /// Give the buffer behind `handle` back to a caller.
    ///
    /// Returns `None` if the buffer was already reclaimed.
    pub fn take(&mut self, handle: &Weak<Vec<u8>>) -> Option<Vec<u8>> {
        let strong = self.remove(handle)?;
        // The queue held the only strong reference, so this never copies.
        Some(Arc::unwrap_or_clone(strong))
    }

    /// Drop the buffer behind `handle`.
    ///
    /// Returns `true` if it was still retained.
    pub fn forget(&mut self, handle: &Weak<Vec<u8>>) -> bool {
        self.remove(handle).is_some()
    }

    /// Reclaim the oldest buffers until the total fits under the ceiling.
    ///
    /// Returns the number of buffers reclaimed.
    pub fn trim(&mut self) -> usize {
        let Some(max) = self.max_retained_bytes else {
            return 0;
        };

        let mut reclaimed = 0;
        while self.retained_bytes > max {
            match self.queue.pop_front() {
                Some(strong) => {
                    self.retained_bytes -= strong.len();
                    reclaimed += 1;
                }
                None => break,
            }
        }
        reclaimed
    }

    /// Reclaim everything.
    ///
    /// Returns `(buffers, bytes)` released.
    pub fn clear(&mut self) -> (usize, usize) {
        let released = (self.queue.len(), self.retained_bytes);
        self.queue.clear();
        self.retained_bytes = 0;
        released
    }

    /// Number of retained buffers.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total bytes kept alive.
    pub fn retained_bytes(&self) -> usize {
        self.retained_bytes
    }

    fn remove(&mut self, handle: &Weak<Vec<u8>>) -> Option<Arc<Vec<u8>>> {
        // A Weak keeps its allocation reserved, so pointer identity is stable.
        let target = handle.as_ptr();
        let index = self
            .queue
            .iter()
            .position(|strong| Arc::as_ptr(strong) == target)?;
        let strong = self.queue.remove(index)?;
        self.retained_bytes -= strong.len();
        Some(strong)
    }
}

impl Default for RetentionQueue {
    fn default() -> Self {
        Self::new(None)
    }
}
