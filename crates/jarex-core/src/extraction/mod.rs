//! Extraction pipeline: entry materialization and the engine driving it.

pub mod engine;
pub mod materialize;

pub use engine::ExtractionEngine;
pub use materialize::ensure_dir;
pub use materialize::write_file;
