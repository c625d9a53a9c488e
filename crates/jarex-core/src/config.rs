//! Extraction configuration.

use crate::ExtractionError;
use crate::Result;
use crate::copy::DEFAULT_BUFFER_SIZE;

/// What to do when a single entry fails validation or materialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Report the failure, skip the entry and continue with the next one.
    #[default]
    Continue,

    /// Stop at the first failing entry and return its error.
    Abort,
}

/// Configuration for an extraction run.
///
/// # Examples
///
/// ```
/// use jarex_core::ErrorPolicy;
/// use jarex_core::ExtractionConfig;
///
/// // Log-and-continue with a 64 KB copy buffer
/// let config = ExtractionConfig::default();
/// assert_eq!(config.error_policy, ErrorPolicy::Continue);
///
/// // Fail fast with a small buffer
/// let strict = ExtractionConfig::strict().with_buffer_size(4096);
/// assert_eq!(strict.error_policy, ErrorPolicy::Abort);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Policy for per-entry errors.
    pub error_policy: ErrorPolicy,

    /// Size in bytes of the intermediate copy buffer. Must be at least 1.
    pub buffer_size: usize,

    /// Create the destination directory (and its ancestors) when missing.
    pub create_destination: bool,

    /// Materialize a leading `META-INF/MANIFEST.MF` like any other entry.
    ///
    /// When false, the manifest (and a `META-INF/` directory entry in front
    /// of it) is consumed by the reader as JAR metadata.
    pub extract_manifest: bool,
}

impl Default for ExtractionConfig {
    /// Default values:
    /// - `error_policy`: `Continue`
    /// - `buffer_size`: 64 KB
    /// - `create_destination`: true
    /// - `extract_manifest`: false
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::Continue,
            buffer_size: DEFAULT_BUFFER_SIZE,
            create_destination: true,
            extract_manifest: false,
        }
    }
}

impl ExtractionConfig {
    /// Creates a fail-fast configuration.
    ///
    /// The first rejected or failed entry aborts the extraction.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            error_policy: ErrorPolicy::Abort,
            ..Default::default()
        }
    }

    /// Sets the per-entry error policy.
    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Sets the copy buffer size in bytes.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets whether a missing destination directory is created.
    #[must_use]
    pub fn with_create_destination(mut self, create: bool) -> Self {
        self.create_destination = create;
        self
    }

    /// Sets whether the leading JAR manifest is extracted.
    #[must_use]
    pub fn with_extract_manifest(mut self, extract: bool) -> Self {
        self.extract_manifest = extract;
        self
    }

    /// Returns `true` when the first per-entry error must abort extraction.
    #[must_use]
    pub fn is_fail_fast(&self) -> bool {
        self.error_policy == ErrorPolicy::Abort
    }

    /// Checks that the configuration can be used.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidConfig` if `buffer_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(ExtractionError::InvalidConfig(
                "buffer_size must be at least 1 byte".to_string(),
            ));
        }
        Ok(())
    }
}
