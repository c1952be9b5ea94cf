//! Configuration for scratchpool.
//!
//! Pool size and the default buffer size are fixed when a pool is built.
//! Nothing is tuned afterwards.
//!
//! # Example
//! ```
//! use scratchpool::PoolConfig;
//!
//! let config = PoolConfig::default()
//!     .with_pool_size(32)
//!     .with_initial_buffer_size(4096);
//! config.validate()?;
//! # Ok::<(), scratchpool::Error>(())
//! ```

use crate::common::{Error, Result};

/// Default number of slots in the pool.
pub const DEFAULT_POOL_SIZE: usize = 20;

/// Default buffer length handed out when a caller gives no minimum (1KB).
pub const DEFAULT_INITIAL_BUFFER_SIZE: usize = 1024;

/// Largest buffer length the pool will ever compute.
///
/// A `Vec<u8>` cannot hold more than `isize::MAX` bytes, so doubling
/// saturates here instead of overflowing.
pub const MAX_BUFFER_LEN: usize = isize::MAX as usize;

/// Construction-time settings for a [`BufferPool`](crate::BufferPool).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    /// Number of slots in the table.
    pool_size: usize,

    /// Length used by `acquire_default`.
    initial_buffer_size: usize,

    /// Ceiling on bytes kept alive by the retention queue.
    ///
    /// `None` means cached buffers are only reclaimed on eviction, flush
    /// or an explicit `reclaim`.
    max_retained_bytes: Option<usize>,
}

impl PoolConfig {
    /// Sets the number of slots.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PoolConfig::validate`] to check it.
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Sets the default buffer length.
    pub fn with_initial_buffer_size(mut self, size: usize) -> Self {
        self.initial_buffer_size = size;
        self
    }

    /// Caps the bytes kept alive by cached buffers.
    ///
    /// When a release pushes the total over the cap, the oldest cached
    /// buffers are reclaimed until it fits again.
    pub fn with_max_retained_bytes(mut self, max: usize) -> Self {
        self.max_retained_bytes = Some(max);
        self
    }

    /// Number of slots.
    #[inline]
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Default buffer length.
    #[inline]
    pub fn initial_buffer_size(&self) -> usize {
        self.initial_buffer_size
    }

    /// Retained byte ceiling, if any.
    #[inline]
    pub fn max_retained_bytes(&self) -> Option<usize> {
        self.max_retained_bytes
    }

    /// Checks that a pool can be built from this configuration.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] if:
    /// - `pool_size` is zero
    /// - `initial_buffer_size` exceeds [`MAX_BUFFER_LEN`]
    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(Error::InvalidConfig {
                message: "pool_size must be > 0",
            });
        }

        if self.initial_buffer_size > MAX_BUFFER_LEN {
            return Err(Error::InvalidConfig {
                message: "initial_buffer_size exceeds the maximum buffer length",
            });
        }

        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            initial_buffer_size: DEFAULT_INITIAL_BUFFER_SIZE,
            max_retained_bytes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PoolConfig::default();
        assert_eq!(config.pool_size(), 20);
        assert_eq!(config.initial_buffer_size(), 1024);
        assert_eq!(config.max_retained_bytes(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = PoolConfig::default()
            .with_pool_size(4)
            .with_initial_buffer_size(64)
            .with_max_retained_bytes(1 << 20);

        assert_eq!(config.pool_size(), 4);
        assert_eq!(config.initial_buffer_size(), 64);
        assert_eq!(config.max_retained_bytes(), Some(1 << 20));
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let err = PoolConfig::default().with_pool_size(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_oversized_initial_buffer_rejected() {
        let result = PoolConfig::default()
            .with_initial_buffer_size(usize::MAX)
            .validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_initial_buffer_allowed() {
        assert!(PoolConfig::default()
            .with_initial_buffer_size(0)
            .validate()
            .is_ok());
    }
}
