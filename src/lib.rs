//! scratchpool - a fixed-size pool of reusable scratch byte buffers.
//!
//! Serializers that build output in a growing byte array tend to allocate
//! and drop large buffers over and over. This crate keeps released buffers
//! in a small slot table and hands the tightest fit back out, so that after
//! warm-up most requests are served without allocating.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          scratchpool                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │          Callers (serializers, ScratchBuffer)           │   │
//! │  │        acquire → write → grow_and_copy → release        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              BufferPool (buffer/)                        │   │
//! │  │   slots: best-fit lookup, smallest-entry eviction        │   │
//! │  │   entries hold Weak handles only                         │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              RetentionQueue (buffer/)                    │   │
//! │  │   owns cached buffers; reclaims on evict, flush,         │   │
//! │  │   reclaim() or when over the byte ceiling                │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (SlotId, Error, config)
//! - [`buffer`] - The pool, its slots, retention and statistics
//! - [`global`] - Optional process-wide pool
//!
//! # Quick Start
//! ```
//! use scratchpool::{BufferPool, PoolConfig};
//!
//! let pool = BufferPool::new(PoolConfig::default().with_pool_size(8))?;
//!
//! let buf = pool.acquire(4096);
//! assert!(buf.len() >= 4096);
//! pool.release(buf);
//!
//! // The same buffer comes back for any request it can satisfy.
//! assert_eq!(pool.acquire(1000).len(), 4096);
//! # Ok::<(), scratchpool::Error>(())
//! ```

pub mod buffer;
pub mod common;
pub mod global;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_INITIAL_BUFFER_SIZE, DEFAULT_POOL_SIZE, MAX_BUFFER_LEN};
pub use common::{Error, PoolConfig, Result, SlotId};

pub use buffer::{BufferPool, BufferPoolStats, ScratchBuffer, StatsSnapshot};
