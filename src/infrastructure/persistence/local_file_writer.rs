//! Local file writer implementation
//!
//! Resolves output names next to the carrier (or in a chosen directory) and
//! writes recovered payloads to the local filesystem.

use crate::domain::repositories::{
    FileWriterError, OutputSpec, RecoveredFileWriter, WriteResult,
};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const RECOVERED_SUFFIX: &str = "_recovered";

/// Local file system writer
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileWriter;

impl LocalFileWriter {
    pub fn new() -> Self {
        Self
    }
}

/// `<stem>_recovered.<ext>`, without a trailing dot when `ext` is empty
pub fn default_file_name(carrier: &Path, extension: &str) -> String {
    let stem = carrier
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("payload");

    if extension.is_empty() {
        format!("{}{}", stem, RECOVERED_SUFFIX)
    } else {
        format!("{}{}.{}", stem, RECOVERED_SUFFIX, extension)
    }
}

/// Forces the extension of an explicit output path to match the payload
fn with_payload_extension(path: &Path, extension: &str) -> PathBuf {
    if extension.is_empty() {
        return path.to_path_buf();
    }

    let suffix = format!(".{}", extension.to_ascii_lowercase());
    let matches = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_ascii_lowercase().ends_with(&suffix))
        .unwrap_or(false);

    if matches {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}

fn create_dir(dir: &Path) -> Result<(), FileWriterError> {
    fs::create_dir_all(dir).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            FileWriterError::PermissionDenied(dir.display().to_string())
        } else {
            FileWriterError::IoError(e)
        }
    })
}

impl RecoveredFileWriter for LocalFileWriter {
    fn output_path(
        &self,
        carrier: &Path,
        extension: &str,
        spec: &OutputSpec,
    ) -> Result<PathBuf, FileWriterError> {
        let path = match spec {
            OutputSpec::Explicit(target) if target.is_dir() => {
                target.join(default_file_name(carrier, extension))
            }
            OutputSpec::Explicit(target) => with_payload_extension(target, extension),
            OutputSpec::Auto { dir: Some(dir) } => {
                create_dir(dir)?;
                dir.join(default_file_name(carrier, extension))
            }
            OutputSpec::Auto { dir: None } => PathBuf::from(default_file_name(carrier, extension)),
        };

        Ok(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<WriteResult, FileWriterError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(data)?;
        writer.flush()?;

        let sha256 = hex::encode(Sha256::digest(data));
        tracing::info!("Saved {} bytes to {}", data.len(), path.display());

        Ok(WriteResult {
            saved_path: path.to_path_buf(),
            saved_size: data.len() as u64,
            sha256,
        })
    }
}
