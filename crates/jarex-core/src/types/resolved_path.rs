//! Canonical extraction target resolved from an untrusted entry name.

use crate::ExtractionError;
use crate::Result;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use super::DestDir;

/// An absolute, canonical path strictly inside a destination directory.
///
/// # Security Properties
///
/// - Can ONLY be constructed through [`ResolvedPath::resolve`]
/// - NO `From<PathBuf>` implementation (security critical)
/// - Symlinks that already exist under the destination are followed before
///   the containment check, so a planted link cannot redirect a write
/// - Never equal to the destination itself
///
/// # Examples
///
/// ```no_run
/// use jarex_core::types::DestDir;
/// use jarex_core::types::ResolvedPath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/home/user/robots")?;
///
/// let resolved = ResolvedPath::resolve(&dest, "sample/MyFirstRobot.class")?;
/// assert!(resolved.as_path().starts_with(dest.as_path()));
///
/// // Path traversal is rejected
/// assert!(ResolvedPath::resolve(&dest, "../../etc/passwd").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(PathBuf);

impl ResolvedPath {
    /// Resolves `entry_name` against `dest` and checks containment.
    ///
    /// # Resolution Steps
    ///
    /// 1. Reject empty names and names containing NUL bytes
    /// 2. Treat `\` as a separator
    /// 3. Join with the destination (an absolute name replaces it)
    /// 4. Walk the components against the filesystem: existing symlinks are
    ///    canonicalized, `.` is dropped, `..` pops one level, components that
    ///    do not exist yet are appended as-is
    /// 5. Require the result to be strictly inside the destination
    ///
    /// No filesystem mutation happens here.
    ///
    /// # Errors
    ///
    /// - `ExtractionError::PathTraversal` if the name escapes the destination,
    ///   names the destination itself, is empty, contains NUL, or passes
    ///   through a dangling symlink
    /// - `ExtractionError::Io` if probing an existing component fails for a
    ///   reason other than absence
    pub fn resolve(dest: &DestDir, entry_name: &str) -> Result<Self> {
        let reject = || ExtractionError::PathTraversal {
            entry_name: entry_name.to_string(),
        };

        if entry_name.is_empty() || entry_name.contains('\0') {
            return Err(reject());
        }

        let normalized = if entry_name.contains('\\') {
            Cow::Owned(entry_name.replace('\\', "/"))
        } else {
            Cow::Borrowed(entry_name)
        };

        let joined = dest.as_path().join(normalized.as_ref());
        let resolved = match resolve_on_disk(&joined) {
            Ok(resolved) => resolved,
            Err(Unresolved::Dangling) => return Err(reject()),
            Err(Unresolved::Io(path, source)) => return Err(ExtractionError::io(path, source)),
        };

        if !dest.strictly_contains(&resolved) {
            return Err(reject());
        }

        Ok(Self(resolved))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns the path relative to `dest`.
    #[must_use]
    pub fn relative_to<'a>(&'a self, dest: &DestDir) -> &'a Path {
        self.0.strip_prefix(dest.as_path()).unwrap_or(&self.0)
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

enum Unresolved {
    Dangling,
    Io(PathBuf, io::Error),
}

/// Canonicalizes the existing prefix of `path` and appends the rest.
///
/// `path` must be absolute. Every prefix kept in `resolved` is canonical, so
/// popping on `..` is exact.
fn resolve_on_disk(path: &Path) -> std::result::Result<PathBuf, Unresolved> {
    let mut resolved = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                let next = resolved.join(name);
                match fs::symlink_metadata(&next) {
                    Ok(meta) if meta.file_type().is_symlink() => {
                        resolved = match next.canonicalize() {
                            Ok(target) => target,
                            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                                return Err(Unresolved::Dangling);
                            }
                            Err(e) => return Err(Unresolved::Io(next, e)),
                        };
                    }
                    Ok(_) => resolved = next,
                    Err(e)
                        if matches!(
                            e.kind(),
                            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                        ) =>
                    {
                        resolved = next;
                    }
                    Err(e) => return Err(Unresolved::Io(next, e)),
                }
            }
        }
    }

    Ok(resolved)
}
