//! Validated destination directory type.

use crate::ExtractionError;
use crate::Result;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

/// The destination root of an extraction.
///
/// A `DestDir` is an existing directory stored as an absolute canonical path.
/// Every path produced by the validator is checked against this canonical
/// form, so a destination reached through a symlink is compared by its real
/// location.
///
/// # Examples
///
/// ```no_run
/// use jarex_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("/home/user/robots")?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Wraps an existing directory.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` if the path does not exist, is not a
    /// directory or cannot be canonicalized.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let canonical = path.canonicalize().map_err(ExtractionError::at(&path))?;

        if !canonical.is_dir() {
            return Err(ExtractionError::io(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "path is not a directory"),
            ));
        }

        Ok(Self(canonical))
    }

    /// Creates the directory and its missing ancestors, then wraps it.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` if the directory cannot be created or a
    /// component of the path is not a directory.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path).map_err(ExtractionError::at(&path))?;
        Self::new(path)
    }

    /// Returns the canonical path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns `true` if `candidate` lies strictly inside this directory.
    ///
    /// The comparison is component-wise, so `/robots2` is not inside
    /// `/robots`, and the directory itself is not inside itself.
    #[must_use]
    pub fn strictly_contains(&self, candidate: &Path) -> bool {
        candidate != self.0 && candidate.starts_with(&self.0)
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}
