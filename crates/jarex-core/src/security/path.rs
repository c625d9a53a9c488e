//! Zip-slip (path traversal) validation.

use crate::Result;
use crate::types::DestDir;
use crate::types::ResolvedPath;

/// Resolves an untrusted entry name to a path strictly inside `dest`.
///
/// This function delegates to `ResolvedPath::resolve()`, which canonicalizes
/// the joined path against the real filesystem before the containment check.
///
/// # Errors
///
/// - `ExtractionError::PathTraversal` when the name escapes `dest`, names
///   `dest` itself, or is empty
/// - `ExtractionError::Io` when probing an existing component fails
///
/// # Examples
///
/// ```no_run
/// use jarex_core::security::resolve_entry_path;
/// use jarex_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/home/user/robots")?;
///
/// let resolved = resolve_entry_path(&dest, "sample/Walls.properties")?;
/// assert!(resolve_entry_path(&dest, "../../etc/passwd").is_err());
/// # Ok(())
/// # }
/// ```
pub fn resolve_entry_path(dest: &DestDir, entry_name: &str) -> Result<ResolvedPath> {
    ResolvedPath::resolve(dest, entry_name)
}
