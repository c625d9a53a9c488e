//! Archive format implementations.

pub mod indexed;
pub mod jar;

// Re-export main types for convenience
pub use indexed::IndexedJarReader;
pub use jar::JarReader;
pub use jar::ManifestFilter;
