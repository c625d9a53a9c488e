//! Archive entry yielded by the archive reader.

use std::io::Read;

/// One entry of an archive, borrowed from the reader for a single step.
///
/// `name` is attacker-controlled and must go through
/// [`ResolvedPath::resolve`](super::ResolvedPath::resolve) before it touches
/// the filesystem. `data` yields the entry's decompressed bytes; for
/// directory entries it is empty.
#[derive(Debug)]
pub struct ArchiveEntry<D> {
    /// Entry name exactly as stored in the archive.
    pub name: String,

    /// Whether this entry is a directory marker.
    pub is_dir: bool,

    /// Decompressed entry contents.
    pub data: D,
}

impl<D: Read> ArchiveEntry<D> {
    /// Creates an entry.
    pub fn new(name: impl Into<String>, is_dir: bool, data: D) -> Self {
        Self {
            name: name.into(),
            is_dir,
            data,
        }
    }
}
