//! RAII scratch buffer backed by the pool.
//!
//! [`ScratchBuffer`] is how serialization code is expected to use the pool:
//! acquire up front, grow with the exact live range when a write would not
//! fit, and release when done. The release happens on drop.

use std::io;
use std::ops::Deref;

use super::buffer_pool::BufferPool;

/// An append-only byte buffer borrowed from a [`BufferPool`].
///
/// The underlying buffer's length is its capacity; `len()` counts the bytes
/// written so far.
///
/// # Example
/// ```
/// use std::io::Write;
/// use scratchpool::{BufferPool, ScratchBuffer};
///
/// let pool = BufferPool::with_defaults();
/// {
///     let mut scratch = ScratchBuffer::with_capacity(&pool, 4);
///     scratch.write_all(b"more than four bytes")?;
///     assert_eq!(&scratch[..], b"more than four bytes");
/// } // buffer goes back to the pool here
///
/// // Cached: the 4-byte buffer it outgrew and the 20-byte one it ended with.
/// assert_eq!(pool.inspect()[..2], [Some(4), Some(20)]);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct ScratchBuffer<'a> {
    /// Pool to grow through and release to.
    pool: &'a BufferPool,
    /// `None` only after `into_vec` detached it.
    buf: Option<Vec<u8>>,
    /// Number of bytes written.
    written: usize,
}

impl<'a> ScratchBuffer<'a> {
    /// Borrow a buffer of the pool's initial size.
    pub fn new(pool: &'a BufferPool) -> Self {
        Self {
            pool,
            buf: Some(pool.acquire_default()),
            written: 0,
        }
    }

    /// Borrow a buffer of at least `capacity` bytes.
    pub fn with_capacity(pool: &'a BufferPool, capacity: usize) -> Self {
        Self {
            pool,
            buf: Some(pool.acquire(capacity)),
            written: 0,
        }
    }

    /// Append `data`, growing through the pool when it does not fit.
    pub fn write_bytes(&mut self, data: &[u8]) {
        let Some(buf) = self.buf.as_mut() else {
            return;
        };

        let end = self.written + data.len();
        if end > buf.len() {
            self.pool.grow_and_copy(buf, end, 0, self.written);
        }
        buf[self.written..end].copy_from_slice(data);
        self.written = end;
    }

    /// The bytes written so far.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        match &self.buf {
            Some(buf) => &buf[..self.written],
            None => &[],
        }
    }

    /// Number of bytes written.
    #[inline]
    pub fn len(&self) -> usize {
        self.written
    }

    /// Whether nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Length of the underlying buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.as_ref().map_or(0, Vec::len)
    }

    /// Forget the written bytes but keep the buffer.
    pub fn clear(&mut self) {
        self.written = 0;
    }

    /// Keep the buffer instead of releasing it.
    ///
    /// The returned vector is truncated to the written bytes.
    pub fn into_vec(mut self) -> Vec<u8> {
        let mut buf = self.buf.take().unwrap_or_default();
        buf.truncate(self.written);
        buf
    }
}

impl Deref for ScratchBuffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl io::Write for ScratchBuffer<'_> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.write_bytes(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ScratchBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release_opt(&mut self.buf);
    }
}
