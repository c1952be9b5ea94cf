//! Error types for scratchpool.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All recoverable errors in scratchpool.
///
/// Pool operations themselves never fail. Errors only come from setting a
/// pool up: rejected configuration, or installing the global pool twice.
/// Misuse of `grow_and_copy` is a caller bug and panics instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The supplied configuration cannot build a pool.
    #[error("invalid pool config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The process-wide pool was already installed.
    ///
    /// The global pool is configured once, before first use.
    #[error("global buffer pool is already initialized")]
    AlreadyInitialized,
}
