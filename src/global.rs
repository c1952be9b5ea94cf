//! Process-wide buffer pool.
//!
//! Most code should build a [`BufferPool`] and pass it where it is needed.
//! When a single shared pool is wanted, install it once with [`init`]
//! before first use; [`pool`] falls back to the default configuration.

use std::sync::OnceLock;

use tracing::debug;

use crate::buffer::BufferPool;
use crate::common::{Error, PoolConfig, Result};

static GLOBAL_POOL: OnceLock<BufferPool> = OnceLock::new();

/// Install the process-wide pool.
///
/// # Errors
/// - `Error::InvalidConfig` if `config` does not validate
/// - `Error::AlreadyInitialized` if a pool was installed (or created by
///   [`pool`]) earlier
pub fn init(config: PoolConfig) -> Result<&'static BufferPool> {
    let pool = BufferPool::new(config)?;
    GLOBAL_POOL
        .set(pool)
        .map_err(|_| Error::AlreadyInitialized)?;

    debug!(pool_size = config.pool_size(), "global buffer pool installed");
    Ok(self::pool())
}

/// Get the process-wide pool, creating a default one on first use.
pub fn pool() -> &'static BufferPool {
    GLOBAL_POOL.get_or_init(BufferPool::with_defaults)
}

/// Whether a process-wide pool exists yet.
pub fn is_initialized() -> bool {
    GLOBAL_POOL.get().is_some()
}
