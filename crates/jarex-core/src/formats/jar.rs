//! Streaming JAR/ZIP reader.
//!
//! Entries are read front to back from local file headers, so the source
//! never needs to be seekable and a network stream works as well as a file.
//! The central directory at the end of the archive marks the end of the
//! entry sequence.

use std::io;
use std::io::Read;

use zip::result::ZipError;

use crate::ExtractionError;
use crate::Result;
use crate::types::ArchiveEntry;

/// Name of the JAR metadata directory entry.
pub const META_INF_DIR: &str = "META-INF/";

/// Name of the JAR manifest entry.
pub const MANIFEST_NAME: &str = "META-INF/MANIFEST.MF";

/// Sequential reader over the entries of a JAR or ZIP stream.
///
/// # Examples
///
/// ```no_run
/// use jarex_core::formats::JarReader;
/// use std::fs::File;
/// use std::io::BufReader;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let file = BufReader::new(File::open("robots/sample.jar")?);
/// let mut reader = JarReader::new(file);
///
/// while let Some(entry) = reader.next_entry()? {
///     println!("{} (dir: {})", entry.name, entry.is_dir);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct JarReader<R> {
    inner: R,
    entries_read: usize,
    finished: bool,
}

impl<R: Read> JarReader<R> {
    /// Creates a reader positioned at the first local file header.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            entries_read: 0,
            finished: false,
        }
    }

    /// Reads the next entry header.
    ///
    /// Returns `Ok(None)` once the central directory is reached. The entry
    /// borrows the reader, so it must be dropped before the next call. Any
    /// data left unread is skipped when it is dropped.
    ///
    /// # Errors
    ///
    /// - `ExtractionError::InvalidArchive` for a malformed or truncated
    ///   header, or an unsupported compression method
    /// - `ExtractionError::Source` if the underlying stream fails
    pub fn next_entry(&mut self) -> Result<Option<ArchiveEntry<impl Read + '_>>> {
        if self.finished {
            return Ok(None);
        }

        match zip::read::read_zipfile_from_stream(&mut self.inner).map_err(stream_error)? {
            Some(file) => {
                self.entries_read += 1;
                let name = file.name().to_string();
                let is_dir = file.is_dir();
                Ok(Some(ArchiveEntry::new(name, is_dir, file)))
            }
            None => {
                self.finished = true;
                Ok(None)
            }
        }
    }

    /// Returns the number of entry headers read so far.
    #[must_use]
    pub fn entries_read(&self) -> usize {
        self.entries_read
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Maps a zip error raised while reading the entry sequence.
///
/// Running out of bytes mid-header means the archive was truncated.
pub(crate) fn stream_error(err: ZipError) -> ExtractionError {
    match err {
        ZipError::Io(e) => read_error(e),
        other => other.into(),
    }
}

/// Maps an error raised while reading entry data from the stream.
pub(crate) fn read_error(err: io::Error) -> ExtractionError {
    match err.kind() {
        io::ErrorKind::UnexpectedEof => {
            ExtractionError::InvalidArchive(format!("truncated archive: {err}"))
        }
        io::ErrorKind::InvalidData => ExtractionError::InvalidArchive(err.to_string()),
        _ => ExtractionError::Source(err),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManifestState {
    Start,
    AfterMetaInf,
    Done,
}

/// Recognizes the JAR manifest at the head of the entry sequence.
///
/// A JAR stream may start with a `META-INF/` directory entry followed by
/// `META-INF/MANIFEST.MF`. Both are archive metadata rather than content.
/// Only these leading positions are considered; a manifest found later is
/// ordinary content. Names are compared ASCII case-insensitively.
#[derive(Debug, Clone)]
pub struct ManifestFilter {
    state: ManifestState,
}

impl ManifestFilter {
    /// Creates a filter. A disabled filter never consumes anything.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        let state = if enabled {
            ManifestState::Start
        } else {
            ManifestState::Done
        };
        Self { state }
    }

    /// Returns `true` if the entry named `name` is leading JAR metadata.
    ///
    /// Must be called once per entry, in archive order.
    pub fn consumes(&mut self, name: &str) -> bool {
        match self.state {
            ManifestState::Start if name.eq_ignore_ascii_case(META_INF_DIR) => {
                self.state = ManifestState::AfterMetaInf;
                true
            }
            ManifestState::Start | ManifestState::AfterMetaInf => {
                self.state = ManifestState::Done;
                name.eq_ignore_ascii_case(MANIFEST_NAME)
            }
            ManifestState::Done => false,
        }
    }
}
