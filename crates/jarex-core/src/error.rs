//! Error types for archive extraction operations.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that can occur during archive extraction.
///
/// Variants fall into two levels:
///
/// - **Per-entry** errors (`PathTraversal`, `Io`) affect a single archive
///   entry. The extraction engine reports them and moves on to the next entry
///   unless the configuration asks for fail-fast behavior.
/// - **Stream-level** errors (`Source`, `InvalidArchive`) mean the entry
///   sequence itself can no longer be trusted. They abort the extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Entry name resolves outside the destination directory.
    #[error("path traversal detected: {entry_name}")]
    PathTraversal {
        /// The untrusted entry name as stored in the archive.
        entry_name: String,
    },

    /// Creating, opening or writing a path under the destination failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// The filesystem path the operation was acting on.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading the archive source stream failed.
    #[error("failed to read archive source: {0}")]
    Source(#[from] io::Error),

    /// Archive is corrupted or an entry header cannot be parsed.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// The archive locator uses a scheme this crate cannot open.
    #[error("unsupported archive locator: {locator}")]
    UnsupportedLocator {
        /// The locator as given by the caller.
        locator: String,
    },

    /// Extraction configuration is not usable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ExtractionError {
    /// Builds an [`ExtractionError::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns a closure that wraps an `io::Error` with `path`.
    ///
    /// Meant for `map_err` chains:
    ///
    /// ```no_run
    /// use jarex_core::ExtractionError;
    /// use std::path::Path;
    ///
    /// # fn main() -> Result<(), ExtractionError> {
    /// let path = Path::new("/tmp/out/a.txt");
    /// std::fs::File::create(path).map_err(ExtractionError::at(path))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn at(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::io(path, source)
    }

    /// Returns `true` if this error represents a security violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use jarex_core::ExtractionError;
    ///
    /// let err = ExtractionError::PathTraversal {
    ///     entry_name: "../etc/passwd".to_string(),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = ExtractionError::InvalidArchive("bad header".to_string());
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::PathTraversal { .. })
    }

    /// Returns `true` if extraction can continue with the next entry.
    ///
    /// Per-entry errors are recoverable. Errors on the source stream, broken
    /// entry framing and setup errors are not.
    ///
    /// # Examples
    ///
    /// ```
    /// use jarex_core::ExtractionError;
    ///
    /// let err = ExtractionError::PathTraversal {
    ///     entry_name: "../evil".to_string(),
    /// };
    /// assert!(err.is_recoverable()); // Skip this entry
    ///
    /// let err = ExtractionError::InvalidArchive("truncated header".to_string());
    /// assert!(!err.is_recoverable()); // Cannot continue
    /// ```
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::PathTraversal { .. } | Self::Io { .. })
    }

    /// Returns a context string for this error, if available.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) | Self::InvalidConfig(msg) => Some(msg),
            Self::PathTraversal { entry_name } => Some(entry_name),
            Self::UnsupportedLocator { locator } => Some(locator),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for ExtractionError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Self::Source(e),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_traversal_error() {
        let err = ExtractionError::PathTraversal {
            entry_name: "../etc/passwd".to_string(),
        };
        assert!(err.to_string().contains("path traversal"));
        assert!(err.to_string().contains("../etc/passwd"));
    }

    #[test]
    fn test_io_error_display_names_path() {
        let err = ExtractionError::io(
            "/robots/sample/a.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let display = err.to_string();
        assert!(display.contains("/robots/sample/a.txt"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn test_io_error_source_chain() {
        use std::error::Error;

        let err = ExtractionError::io("out", io::Error::other("inner error"));
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("inner error"));
    }

    #[test]
    fn test_source_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        let err: ExtractionError = io_err.into();
        assert!(matches!(err, ExtractionError::Source(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_zip_error_conversion() {
        let err: ExtractionError =
            zip::result::ZipError::Io(io::Error::from(io::ErrorKind::BrokenPipe)).into();
        assert!(matches!(err, ExtractionError::Source(_)));

        let err: ExtractionError = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, ExtractionError::InvalidArchive(_)));
    }

    #[test]
    fn test_is_recoverable() {
        let err = ExtractionError::PathTraversal {
            entry_name: "../evil".into(),
        };
        assert!(err.is_recoverable());

        let err = ExtractionError::io("x", io::Error::other("disk full"));
        assert!(err.is_recoverable());

        let err = ExtractionError::InvalidArchive("corrupted".into());
        assert!(!err.is_recoverable());

        let err = ExtractionError::Source(io::Error::other("closed"));
        assert!(!err.is_recoverable());

        let err = ExtractionError::UnsupportedLocator {
            locator: "ftp://host/a.jar".into(),
        };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_is_security_violation() {
        let err = ExtractionError::PathTraversal {
            entry_name: "/etc/passwd".into(),
        };
        assert!(err.is_security_violation());

        let err = ExtractionError::io("x", io::Error::other("disk full"));
        assert!(!err.is_security_violation());
    }

    #[test]
    fn test_context() {
        let err = ExtractionError::InvalidArchive("bad header".into());
        assert_eq!(err.context(), Some("bad header"));

        let err = ExtractionError::PathTraversal {
            entry_name: "../a".into(),
        };
        assert_eq!(err.context(), Some("../a"));

        let err = ExtractionError::Source(io::Error::other("x"));
        assert_eq!(err.context(), None);
    }
}
