//! Buffered byte copy with a reusable intermediate buffer.
//!
//! One `CopyBuffer` is allocated per extraction run and reused for every
//! entry, so materializing thousands of small files does not allocate a
//! buffer each time. The copy is an exact byte-for-byte transfer regardless of
//! buffer size.

use std::io;
use std::io::Read;
use std::io::Write;

use thiserror::Error;

/// Default buffer size for I/O operations (64KB).
///
/// This matches typical filesystem block sizes and provides good balance
/// between memory usage and I/O performance.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Fixed-size buffer used as the staging area between reader and writer.
///
/// # Examples
///
/// ```no_run
/// # use jarex_core::copy::{CopyBuffer, copy_with_buffer};
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut buffer = CopyBuffer::new();
/// let mut input = std::fs::File::open("input.txt")?;
/// let mut output = std::fs::File::create("output.txt")?;
///
/// let bytes_copied = copy_with_buffer(&mut input, &mut output, &mut buffer)?;
/// println!("Copied {} bytes", bytes_copied);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a buffer of [`DEFAULT_BUFFER_SIZE`] bytes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_size(DEFAULT_BUFFER_SIZE)
    }

    /// Creates a buffer of `size` bytes. A size of zero is raised to one.
    #[must_use]
    pub fn with_size(size: usize) -> Self {
        Self {
            buf: vec![0u8; size.max(1)].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Which side of a copy failed.
///
/// A read failure means the source stream is broken; a write failure only
/// concerns the destination.
#[derive(Error, Debug)]
pub enum CopyError {
    /// Reading from the source failed.
    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    /// Writing to the destination failed.
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

/// Copies everything from `reader` to `writer` through `buffer`.
///
/// Interrupted reads are retried. Returns the number of bytes copied.
///
/// # Errors
///
/// Returns the first read or write error, tagged with its side. Bytes copied
/// before the error have already been handed to `writer`.
#[inline]
pub fn copy_with_buffer<R, W>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64, CopyError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };

        writer
            .write_all(&buffer.buf[..bytes_read])
            .map_err(CopyError::Write)?;

        total = total.checked_add(bytes_read as u64).ok_or_else(|| {
            CopyError::Read(io::Error::other("copied byte count overflowed u64"))
        })?;
    }

    Ok(total)
}
