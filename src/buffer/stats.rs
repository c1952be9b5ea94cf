//! Buffer pool statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics tracked by the buffer pool.
///
/// All fields are atomic and updated outside the slot-table lock.
///
/// # Memory Ordering
/// We use `Ordering::Relaxed` for all operations because:
/// - We only need atomicity (no partial updates)
/// - We don't need synchronization between different counters
/// - Statistics are "eventually consistent"; exact ordering doesn't matter
///
/// # Example
/// ```
/// use scratchpool::BufferPoolStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = BufferPoolStats::new();
/// stats.hits.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.hits.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug)]
pub struct BufferPoolStats {
    /// Requests served from a cached buffer.
    pub hits: AtomicU64,

    /// Requests that had to allocate.
    pub misses: AtomicU64,

    /// Buffers handed back to the pool.
    pub releases: AtomicU64,

    /// Live entries displaced by a release into a full table.
    pub evictions: AtomicU64,

    /// Dead slots cleared by a scan.
    pub dead_cleared: AtomicU64,

    /// Calls to `grow_and_copy`.
    pub grows: AtomicU64,

    /// Cached buffers dropped by the retention queue.
    pub reclaimed: AtomicU64,
}

impl BufferPoolStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            releases: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            dead_cleared: AtomicU64::new(0),
            grows: AtomicU64::new(0),
            reclaimed: AtomicU64::new(0),
        }
    }

    /// Calculate cache hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        self.snapshot().hit_rate()
    }

    /// Get a snapshot of current statistics.
    ///
    /// This returns a non-atomic copy for display/logging.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            dead_cleared: self.dead_cleared.load(Ordering::Relaxed),
            grows: self.grows.load(Ordering::Relaxed),
            reclaimed: self.reclaimed.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.releases.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.dead_cleared.store(0, Ordering::Relaxed);
        self.grows.store(0, Ordering::Relaxed);
        self.reclaimed.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn add(counter: &AtomicU64, n: usize) {
        if n > 0 {
            counter.fetch_add(n as u64, Ordering::Relaxed);
        }
    }
}

impl Default for BufferPoolStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of buffer pool statistics.
///
/// Unlike `BufferPoolStats`, this is not atomic and can be safely
/// printed, compared, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub releases: u64,
    pub evictions: u64,
    pub dead_cleared: u64,
    pub grows: u64,
    pub reclaimed: u64,
}

impl StatsSnapshot {
    /// Calculate cache hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ hits: {}, misses: {}, releases: {}, evictions: {}, reclaimed: {}, hit_rate: {:.2}% }}",
            self.hits,
            self.misses,
            self.releases,
            self.evictions,
            self.reclaimed,
            self.hit_rate() * 100.0
        )
    }
}
