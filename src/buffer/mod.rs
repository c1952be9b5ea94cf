//! Buffer pool management.
//!
//! The buffer pool caches released byte buffers in a fixed table of slots
//! and hands them back out to callers that need scratch space.
//!
//! # Components
//! - [`BufferPool`] - The slot table with acquire/release/grow
//! - [`Slot`] / [`CachedEntry`] - One position in the table and its entry
//! - [`RetentionQueue`] - Owner of cached buffers; decides reclamation
//! - [`ScratchBuffer`] - RAII writer that grows through the pool
//! - [`BufferPoolStats`] - Performance statistics

mod buffer_pool;
mod retention;
mod scratch;
mod slot;
mod stats;

pub use buffer_pool::BufferPool;
pub use retention::RetentionQueue;
pub use scratch::ScratchBuffer;
pub use slot::{CachedEntry, Slot, SlotState};
pub use stats::{BufferPoolStats, StatsSnapshot};
