//! Test utilities for in-memory archive creation.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

use zip::write::SimpleFileOptions;
use zip::write::ZipWriter;

/// Creates an in-memory ZIP archive from a list of entries.
///
/// Each entry is a tuple of (name, content). Files are stored uncompressed
/// and names are written verbatim, hostile ones included.
#[must_use]
pub fn create_test_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    entries
        .iter()
        .fold(ZipTestBuilder::new(), |builder, (name, data)| {
            builder.add_file(name, data.as_bytes())
        })
        .build()
}

/// Builder for ZIP test archives with files and directory entries.
pub struct ZipTestBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates an empty archive builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a stored file entry.
    #[must_use]
    pub fn add_file(self, name: &str, data: &[u8]) -> Self {
        self.add_with_method(name, data, zip::CompressionMethod::Stored)
    }

    /// Adds a deflated file entry.
    #[must_use]
    pub fn add_deflated_file(self, name: &str, data: &[u8]) -> Self {
        self.add_with_method(name, data, zip::CompressionMethod::Deflated)
    }

    fn add_with_method(mut self, name: &str, data: &[u8], method: zip::CompressionMethod) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(method)
            .unix_permissions(0o644);
        self.zip.start_file(name, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry. A trailing `/` is appended if missing.
    #[must_use]
    pub fn add_directory(mut self, name: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(name, options).unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates an archive the way `jar` and `JarOutputStream` write one.
///
/// The writer cannot seek, so every entry is deflated with its sizes and
/// CRC in a trailing data descriptor. Names ending in `/` become directory
/// entries.
#[must_use]
pub fn create_streamed_jar(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new_stream(Vec::new());
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, data) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data.as_bytes()).unwrap();
        }
    }

    zip.finish().unwrap().into_inner()
}

/// Returns `true` if the local header at the start of `archive` has the
/// data descriptor flag (general purpose bit 3) set.
#[must_use]
pub fn first_entry_uses_data_descriptor(archive: &[u8]) -> bool {
    archive.len() > 8 && archive[..4] == *b"PK\x03\x04" && archive[6] & 0x08 != 0
}
