//! Central-directory JAR/ZIP reader for seekable sources.
//!
//! The `jar` tool and `JarOutputStream` write each entry without knowing its
//! size up front and put the sizes in a data descriptor after the data. Such
//! an entry cannot be read from its local header alone, so a seekable source
//! is read through the central directory instead, where every size is known.

use std::io::Read;
use std::io::Seek;

use zip::ZipArchive;

use crate::Result;
use crate::types::ArchiveEntry;

use super::jar::stream_error;

/// Reader over the entries of a seekable JAR or ZIP archive, in central
/// directory order.
///
/// # Examples
///
/// ```no_run
/// use jarex_core::formats::IndexedJarReader;
/// use std::fs::File;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut reader = IndexedJarReader::new(File::open("robots/sample.jar")?)?;
///
/// while let Some(entry) = reader.next_entry()? {
///     println!("{} (dir: {})", entry.name, entry.is_dir);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct IndexedJarReader<R> {
    archive: ZipArchive<R>,
    next: usize,
}

impl<R: Read + Seek> IndexedJarReader<R> {
    /// Reads the central directory of `inner`.
    ///
    /// # Errors
    ///
    /// - `ExtractionError::InvalidArchive` if no valid central directory is
    ///   found, e.g. for a truncated archive
    /// - `ExtractionError::Source` if the underlying stream fails
    pub fn new(inner: R) -> Result<Self> {
        let archive = ZipArchive::new(inner).map_err(stream_error)?;
        Ok(Self { archive, next: 0 })
    }

    /// Returns the next entry, or `Ok(None)` after the last one.
    ///
    /// The entry borrows the reader, so it must be dropped before the next
    /// call.
    ///
    /// # Errors
    ///
    /// - `ExtractionError::InvalidArchive` for a malformed local header or an
    ///   unsupported compression method
    /// - `ExtractionError::Source` if the underlying stream fails
    pub fn next_entry(&mut self) -> Result<Option<ArchiveEntry<impl Read + '_>>> {
        if self.next >= self.archive.len() {
            return Ok(None);
        }

        let file = self.archive.by_index(self.next).map_err(stream_error)?;
        self.next += 1;

        let name = file.name().to_string();
        let is_dir = file.is_dir();
        Ok(Some(ArchiveEntry::new(name, is_dir, file)))
    }

    /// Returns the number of entries in the central directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// Returns the number of entries returned so far.
    #[must_use]
    pub fn entries_read(&self) -> usize {
        self.next
    }
}
