//! Type-safe wrappers for archive extraction operations.
//!
//! `DestDir` and `ResolvedPath` enforce the containment invariant at the type
//! level: a `ResolvedPath` cannot be built from a raw path, only by resolving
//! an entry name against a `DestDir`.

pub mod dest_dir;
pub mod entry;
pub mod resolved_path;

pub use dest_dir::DestDir;
pub use entry::ArchiveEntry;
pub use resolved_path::ResolvedPath;
