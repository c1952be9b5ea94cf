//! Buffer Pool - the scratch buffer cache.
//!
//! The [`BufferPool`] provides:
//! - Best-fit reuse of released byte buffers
//! - Smallest-entry eviction when the slot table is full
//! - Copy-and-swap growth of buffers that ran out of room
//! - Weakly held cache entries that can be reclaimed at any time

use std::sync::atomic::Ordering;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::buffer::retention::RetentionQueue;
use crate::buffer::slot::{CachedEntry, Slot, SlotState};
use crate::buffer::BufferPoolStats;
use crate::common::config::MAX_BUFFER_LEN;
use crate::common::{PoolConfig, Result, SlotId};

/// Slot table plus the retention queue that owns its buffers.
///
/// Both change together, so they share one lock.
#[derive(Debug)]
struct SlotTable {
    slots: Vec<Slot>,
    retention: RetentionQueue,
}

/// A fixed-size pool of reusable byte buffers.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────────┐
/// │                         BufferPool                           │
/// │  ┌────────────────────────────────────────────────────────┐  │
/// │  │            Mutex<SlotTable>                            │  │
/// │  │  slots:     [Slot0] [Slot1] [Slot2] ... (Weak)         │  │
/// │  │                │       │                               │  │
/// │  │  retention: [Arc]   [Arc]   ...  (FIFO, byte ceiling)  │  │
/// │  └────────────────────────────────────────────────────────┘  │
/// │  ┌──────────────┐  ┌──────────────┐                         │
/// │  │    config    │  │    stats     │                         │
/// │  │  PoolConfig  │  │   atomics    │                         │
/// │  └──────────────┘  └──────────────┘                         │
/// └──────────────────────────────────────────────────────────────┘
/// ```
///
/// # Thread Safety
/// - `table`: `Mutex` around every scan-and-mutate, so two threads never
///   pick the same slot
/// - `config`: immutable after construction
/// - `stats`: no lock, all atomic counters
///
/// # Usage
/// ```
/// use scratchpool::{BufferPool, PoolConfig};
///
/// let pool = BufferPool::new(PoolConfig::default())?;
///
/// let mut buf = pool.acquire(256);
/// buf[..5].copy_from_slice(b"hello");
///
/// // Out of room: grow, keeping the five live bytes.
/// pool.grow_and_copy(&mut buf, 4096, 0, 5);
/// assert!(buf.len() >= 4096);
/// assert_eq!(&buf[..5], b"hello");
///
/// pool.release(buf);
/// # Ok::<(), scratchpool::Error>(())
/// ```
pub struct BufferPool {
    /// Slots and the buffers they point at.
    table: Mutex<SlotTable>,

    /// Settings fixed at construction.
    config: PoolConfig,

    /// Performance statistics.
    stats: BufferPoolStats,
}

impl BufferPool {
    /// Create a new buffer pool.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` if the configuration does not validate.
    pub fn new(config: PoolConfig) -> Result<Self> {
        config.validate()?;

        debug!(
            pool_size = config.pool_size(),
            initial_buffer_size = config.initial_buffer_size(),
            max_retained_bytes = ?config.max_retained_bytes(),
            "buffer pool created"
        );

        Ok(Self::from_validated(config))
    }

    /// Create a pool with the default configuration (20 slots, 1KB buffers).
    pub fn with_defaults() -> Self {
        Self::from_validated(PoolConfig::default())
    }

    fn from_validated(config: PoolConfig) -> Self {
        // Allocate all slots upfront; the table never grows.
        let slots: Vec<Slot> = (0..config.pool_size()).map(|_| Slot::new()).collect();

        Self {
            table: Mutex::new(SlotTable {
                slots,
                retention: RetentionQueue::new(config.max_retained_bytes()),
            }),
            config,
            stats: BufferPoolStats::new(),
        }
    }

    // ========================================================================
    // Public API: Acquire and release
    // ========================================================================

    /// Get a buffer of at least `min_size` bytes.
    ///
    /// Returns the smallest cached buffer that fits, or a fresh zeroed
    /// buffer of exactly `min_size` bytes. A reused buffer keeps whatever
    /// bytes it held when it was released. The pool keeps no reference to
    /// the returned buffer.
    pub fn acquire(&self, min_size: usize) -> Vec<u8> {
        match self.take_cached(min_size) {
            Some(buffer) => buffer,
            None => vec![0u8; min_size],
        }
    }

    /// Get a buffer of at least the configured initial size.
    pub fn acquire_default(&self) -> Vec<u8> {
        self.acquire(self.config.initial_buffer_size())
    }

    /// Hand a buffer back to the pool.
    ///
    /// The buffer goes into the first empty or dead slot. When every slot
    /// is live, the entry with the smallest cached size is evicted, even
    /// if `buffer` is smaller still.
    pub fn release(&self, buffer: Vec<u8>) {
        let size = buffer.len();
        let mut table = self.table.lock();

        let mut free: Option<SlotId> = None;
        let mut smallest: Option<(SlotId, usize)> = None;
        let mut dead = 0;

        for (i, slot) in table.slots.iter_mut().enumerate() {
            match slot.state() {
                SlotState::Empty => {
                    free = Some(SlotId::new(i));
                    break;
                }
                SlotState::Dead => {
                    slot.reset();
                    dead += 1;
                    free = Some(SlotId::new(i));
                    break;
                }
                SlotState::Live(cached) => {
                    if smallest.map_or(true, |(_, min)| cached < min) {
                        smallest = Some((SlotId::new(i), cached));
                    }
                }
            }
        }

        // pool_size > 0, so one of the two is always set.
        let Some(target) = free.or(smallest.map(|(slot_id, _)| slot_id)) else {
            return;
        };

        let handle = table.retention.retain(buffer);
        let evicted = table.slots[target.0].put(CachedEntry::new(size, handle));
        if let Some(old) = &evicted {
            table.retention.forget(old.buffer());
        }
        let reclaimed = table.retention.trim();
        drop(table);

        self.stats.releases.fetch_add(1, Ordering::Relaxed);
        BufferPoolStats::add(&self.stats.dead_cleared, dead);
        BufferPoolStats::add(&self.stats.reclaimed, reclaimed);
        match evicted {
            Some(old) => {
                self.stats.evictions.fetch_add(1, Ordering::Relaxed);
                trace!(slot = %target, size, evicted = old.size(), "buffer released, evicted entry");
            }
            None => trace!(slot = %target, size, "buffer released"),
        }
    }

    /// Hand back a buffer that may be absent.
    ///
    /// No-op for `None`. Leaves `buffer` as `None` either way.
    pub fn release_opt(&self, buffer: &mut Option<Vec<u8>>) {
        if let Some(buffer) = buffer.take() {
            self.release(buffer);
        }
    }

    // ========================================================================
    // Public API: Growth
    // ========================================================================

    /// Replace `buffer` with a larger one, keeping a range of its bytes.
    ///
    /// Bytes `[copy_from_offset, copy_from_offset + copy_byte_count)` of the
    /// old buffer land at the start of the new one. The new buffer is at
    /// least `target_min_size` bytes long. A cached buffer is reused when
    /// one fits; otherwise the fresh allocation is the larger of double the
    /// old length and `target_min_size`. The old buffer goes back to the
    /// pool.
    ///
    /// # Panics
    /// Panics if `target_min_size` is not larger than `buffer.len()`, or if
    /// the copy range runs past the end of `buffer`.
    pub fn grow_and_copy(
        &self,
        buffer: &mut Vec<u8>,
        target_min_size: usize,
        copy_from_offset: usize,
        copy_byte_count: usize,
    ) {
        let old_len = buffer.len();
        assert!(
            target_min_size > old_len,
            "target size {} must exceed current length {}",
            target_min_size,
            old_len
        );
        let copy_end = copy_from_offset
            .checked_add(copy_byte_count)
            .filter(|&end| end <= old_len);
        assert!(
            copy_end.is_some(),
            "copy range {}+{} out of bounds for length {}",
            copy_from_offset,
            copy_byte_count,
            old_len
        );

        self.stats.grows.fetch_add(1, Ordering::Relaxed);
        let new_len = grown_len(old_len, target_min_size);
        let old = std::mem::take(buffer);

        // Nothing to carry over: the old buffer can go back first.
        let old = if copy_byte_count == 0 {
            self.release(old);
            None
        } else {
            Some(old)
        };

        let mut grown = match self.take_cached(target_min_size) {
            Some(cached) => cached,
            None => vec![0u8; new_len],
        };

        if let Some(old) = old {
            grown[..copy_byte_count]
                .copy_from_slice(&old[copy_from_offset..copy_from_offset + copy_byte_count]);
            self.release(old);
        }

        trace!(
            from = old_len,
            to = grown.len(),
            copied = copy_byte_count,
            "buffer grown"
        );
        *buffer = grown;
    }

    // ========================================================================
    // Public API: Maintenance
    // ========================================================================

    /// Empty every slot and drop every cached buffer.
    pub fn flush(&self) {
        let mut table = self.table.lock();
        for slot in table.slots.iter_mut() {
            slot.reset();
        }
        let (buffers, bytes) = table.retention.clear();
        drop(table);

        debug!(buffers, bytes, "buffer pool flushed");
    }

    /// Reclaim every cached buffer, as a full collection would.
    ///
    /// Slots keep their entries but read as dead from now on; the next
    /// scan that sees them clears them. Returns the bytes released.
    pub fn reclaim(&self) -> usize {
        let (buffers, bytes) = self.table.lock().retention.clear();
        BufferPoolStats::add(&self.stats.reclaimed, buffers);

        debug!(buffers, bytes, "cached buffers reclaimed");
        bytes
    }

    // ========================================================================
    // Public API: Stats and info
    // ========================================================================

    /// Cached size per slot, `None` for empty or dead slots.
    ///
    /// Dead slots seen here are cleared, the same as in any other scan.
    pub fn inspect(&self) -> Vec<Option<usize>> {
        let mut table = self.table.lock();
        let mut dead = 0;

        let sizes = table
            .slots
            .iter_mut()
            .map(|slot| {
                if slot.clear_if_dead() {
                    dead += 1;
                }
                slot.live_size()
            })
            .collect();
        drop(table);

        BufferPoolStats::add(&self.stats.dead_cleared, dead);
        sizes
    }

    /// Get buffer pool statistics.
    pub fn stats(&self) -> &BufferPoolStats {
        &self.stats
    }

    /// Get the configuration the pool was built with.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Get the number of slots.
    pub fn pool_size(&self) -> usize {
        self.config.pool_size()
    }

    /// Number of slots holding a retained buffer.
    pub fn live_count(&self) -> usize {
        self.table.lock().slots.iter().filter(|slot| slot.is_live()).count()
    }

    /// Bytes currently kept alive by cached buffers.
    pub fn retained_bytes(&self) -> usize {
        self.table.lock().retention.retained_bytes()
    }

    // ========================================================================
    // Internal: Best-fit lookup
    // ========================================================================

    /// Remove and return the tightest cached fit for `min_size`.
    ///
    /// Clears every dead slot it passes. Ties go to the lowest slot.
    fn take_cached(&self, min_size: usize) -> Option<Vec<u8>> {
        let mut table = self.table.lock();

        let mut best: Option<(SlotId, usize)> = None;
        let mut dead = 0;

        for (i, slot) in table.slots.iter_mut().enumerate() {
            match slot.state() {
                SlotState::Empty => {}
                SlotState::Dead => {
                    slot.reset();
                    dead += 1;
                }
                SlotState::Live(size) => {
                    if size >= min_size && best.map_or(true, |(_, fit)| size < fit) {
                        best = Some((SlotId::new(i), size));
                    }
                }
            }
        }

        let found = best.and_then(|(slot_id, _)| {
            let entry = table.slots[slot_id.0].take()?;
            table.retention.take(entry.buffer()).map(|buffer| (slot_id, buffer))
        });
        drop(table);

        BufferPoolStats::add(&self.stats.dead_cleared, dead);
        match found {
            Some((slot_id, buffer)) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                trace!(slot = %slot_id, min_size, size = buffer.len(), "buffer pool hit");
                Some(buffer)
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                trace!(min_size, "buffer pool miss");
                None
            }
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPool")
            .field("config", &self.config)
            .field("stats", &self.stats.snapshot())
            .finish_non_exhaustive()
    }
}

/// Length for a fresh allocation when growing past `target_min_size`.
///
/// Doubles the current length, saturating at [`MAX_BUFFER_LEN`], and never
/// returns less than the target.
fn grown_len(current_len: usize, target_min_size: usize) -> usize {
    let doubled = current_len
        .checked_mul(2)
        .map_or(MAX_BUFFER_LEN, |len| len.min(MAX_BUFFER_LEN));
    doubled.max(target_min_size)
}
