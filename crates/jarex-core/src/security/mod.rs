//! Security validation modules.

pub mod path;

// Re-export public types and functions
pub use path::resolve_entry_path;
