//! Writing validated entries to disk.

use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::ExtractionError;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::CopyError;
use crate::copy::copy_with_buffer;
use crate::formats::jar::read_error;
use crate::security::resolve_entry_path;
use crate::types::ArchiveEntry;
use crate::types::DestDir;
use crate::types::ResolvedPath;

/// Creates `path` and all missing ancestors.
///
/// Succeeds without changes if `path` already is a directory. Ancestors
/// created before a failure are left in place.
///
/// # Errors
///
/// Returns `ExtractionError::Io` naming `path` if any component cannot be
/// created, including when an existing component is a regular file.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(ExtractionError::at(path))
}

/// Validates the entry name and creates the directory it names.
pub fn create_directory(dest: &DestDir, entry_name: &str) -> Result<ResolvedPath> {
    let resolved = resolve_entry_path(dest, entry_name)?;
    ensure_dir(resolved.as_path())?;
    Ok(resolved)
}

/// Validates the entry name and writes the entry's data to the file it names.
///
/// An existing file is truncated. Returns the resolved path together with the
/// number of bytes written. The output handle is closed on every exit path;
/// a failed write may leave a partial file behind.
///
/// # Errors
///
/// - `ExtractionError::PathTraversal` if the name escapes `dest`
/// - `ExtractionError::Io` if the parent directory or the file cannot be
///   created or written
/// - `ExtractionError::Source` or `ExtractionError::InvalidArchive` if the
///   entry data cannot be read from the archive stream
pub fn write_file<D: Read>(
    dest: &DestDir,
    entry: &mut ArchiveEntry<D>,
    buffer: &mut CopyBuffer,
) -> Result<(ResolvedPath, u64)> {
    let resolved = resolve_entry_path(dest, &entry.name)?;
    let path = resolved.as_path();

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let file = File::create(path).map_err(ExtractionError::at(path))?;
    let mut writer = BufWriter::new(file);

    let written = copy_with_buffer(&mut entry.data, &mut writer, buffer).map_err(|e| match e {
        CopyError::Read(source) => read_error(source),
        CopyError::Write(source) => ExtractionError::io(path, source),
    })?;

    writer.flush().map_err(ExtractionError::at(path))?;

    Ok((resolved, written))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_test_dest() -> (TempDir, DestDir) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::new(temp.path()).expect("failed to create dest");
        (temp, dest)
    }

    fn file_entry(name: &str, data: &[u8]) -> ArchiveEntry<Cursor<Vec<u8>>> {
        ArchiveEntry::new(name, false, Cursor::new(data.to_vec()))
    }

    #[test]
    fn test_ensure_dir_creates_ancestors() {
        let (temp, _dest) = create_test_dest();
        let path = temp.path().join("a/b/c");

        ensure_dir(&path).unwrap();
        assert!(path.is_dir());

        // Idempotent
        ensure_dir(&path).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn test_ensure_dir_over_file_fails() {
        let (temp, _dest) = create_test_dest();
        let file = temp.path().join("a");
        fs::write(&file, b"file").unwrap();

        let err = ensure_dir(&file.join("b")).unwrap_err();
        assert!(matches!(err, ExtractionError::Io { ref path, .. } if path.ends_with("a/b")));
    }

    #[test]
    fn test_create_directory() {
        let (_temp, dest) = create_test_dest();

        let resolved = create_directory(&dest, "sample/empty/").unwrap();
        assert!(resolved.as_path().is_dir());
        assert!(dest.as_path().join("sample/empty").is_dir());
    }

    #[test]
    fn test_create_directory_traversal() {
        let (temp, dest) = create_test_dest();

        let err = create_directory(&dest, "../escaped/").unwrap_err();
        assert!(err.is_security_violation());
        assert!(!temp.path().parent().unwrap().join("escaped").exists());
    }

    #[test]
    fn test_write_file_nested() {
        let (_temp, dest) = create_test_dest();
        let mut entry = file_entry("a/b/c.txt", b"nested content");

        let (resolved, written) = write_file(&dest, &mut entry, &mut CopyBuffer::new()).unwrap();
        assert_eq!(written, 14);
        assert_eq!(resolved.relative_to(&dest), Path::new("a/b/c.txt"));
        assert_eq!(fs::read(resolved.as_path()).unwrap(), b"nested content");
    }

    #[test]
    fn test_write_file_truncates_existing() {
        let (_temp, dest) = create_test_dest();
        let target = dest.as_path().join("a.txt");
        fs::write(&target, b"a much longer previous content").unwrap();

        write_file(&dest, &mut file_entry("a.txt", b"new"), &mut CopyBuffer::new()).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn test_write_file_empty_entry() {
        let (_temp, dest) = create_test_dest();

        let (resolved, written) =
            write_file(&dest, &mut file_entry("empty.txt", b""), &mut CopyBuffer::new()).unwrap();
        assert_eq!(written, 0);
        assert!(resolved.as_path().is_file());
    }

    #[test]
    fn test_write_file_traversal_leaves_data_unread() {
        let (temp, dest) = create_test_dest();
        let mut entry = file_entry("../evil.txt", b"payload");

        let err = write_file(&dest, &mut entry, &mut CopyBuffer::new()).unwrap_err();
        assert!(matches!(err, ExtractionError::PathTraversal { ref entry_name } if entry_name == "../evil.txt"));
        assert_eq!(entry.data.position(), 0);
        assert!(!temp.path().parent().unwrap().join("evil.txt").exists());
    }

    #[test]
    fn test_write_file_parent_is_file() {
        let (_temp, dest) = create_test_dest();
        fs::write(dest.as_path().join("a"), b"file").unwrap();

        let err = write_file(&dest, &mut file_entry("a/b.txt", b"x"), &mut CopyBuffer::new())
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Io { .. }), "{err:?}");
    }

    #[test]
    fn test_write_file_over_directory() {
        let (_temp, dest) = create_test_dest();
        fs::create_dir(dest.as_path().join("taken")).unwrap();

        let err = write_file(&dest, &mut file_entry("taken", b"x"), &mut CopyBuffer::new())
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Io { ref path, .. } if path.ends_with("taken")));
    }

    #[test]
    fn test_write_file_read_failure_is_stream_error() {
        struct BrokenReader;

        impl Read for BrokenReader {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::ConnectionAborted, "source closed"))
            }
        }

        let (_temp, dest) = create_test_dest();
        let mut entry = ArchiveEntry::new("a.txt", false, BrokenReader);

        let err = write_file(&dest, &mut entry, &mut CopyBuffer::new()).unwrap_err();
        assert!(matches!(err, ExtractionError::Source(_)), "{err:?}");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_write_file_single_byte_buffer() {
        let (_temp, dest) = create_test_dest();
        let data: Vec<u8> = (0..=255u8).cycle().take(5000).collect();

        let (resolved, written) =
            write_file(&dest, &mut file_entry("bin.dat", &data), &mut CopyBuffer::with_size(1))
                .unwrap();
        assert_eq!(written, 5000);
        assert_eq!(fs::read(resolved.as_path()).unwrap(), data);
    }
}
