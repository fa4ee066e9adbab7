//! Payload writer trait
//!
//! Defines the interface for materializing recovered payloads.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when writing recovered payloads
#[derive(Error, Debug)]
pub enum FileWriterError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Where the recovered payload should be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSpec {
    /// `<stem>_recovered.<ext>`, in `dir` or the current directory
    Auto { dir: Option<PathBuf> },
    /// A file path, or an existing directory to place the default name in
    Explicit(PathBuf),
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self::Auto { dir: None }
    }
}

/// Result of writing a single payload
#[derive(Debug, Clone)]
pub struct WriteResult {
    /// Path where the payload was saved
    pub saved_path: PathBuf,
    /// Size in bytes of the saved payload
    pub saved_size: u64,
    /// Lowercase hex SHA-256 of the saved bytes
    pub sha256: String,
}

/// Trait for writing recovered payloads to storage
///
/// # Example
///
/// ```ignore
/// let writer = LocalFileWriter::new();
/// let path = writer.output_path(Path::new("duck.png"), "mp4", &OutputSpec::default())?;
/// let result = writer.write(&path, &bytes)?;
/// println!("Saved to: {}", result.saved_path.display());
/// ```
pub trait RecoveredFileWriter: Send + Sync {
    /// Resolves the destination for a payload recovered from `carrier`
    fn output_path(
        &self,
        carrier: &Path,
        extension: &str,
        spec: &OutputSpec,
    ) -> Result<PathBuf, FileWriterError>;

    /// Writes the payload bytes to `path`
    fn write(&self, path: &Path, data: &[u8]) -> Result<WriteResult, FileWriterError>;
}
