use crate::domain::repositories::FileWriterError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while recovering a payload from a carrier image
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Carrier image not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Path is not a file: {0}")]
    NotAFile(PathBuf),

    #[error("Unsupported carrier format: {0}")]
    UnsupportedFormat(String),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Insufficient image data: {bits} bits available, 32 required")]
    InsufficientData { bits: usize },

    #[error("Payload length invalid: declared {declared} bytes, {available_bits} bits available")]
    InvalidLength { declared: u32, available_bits: usize },

    #[error("Header corrupted: {field} needs {needed} bytes at offset {offset}, blob is {len} bytes")]
    HeaderCorrupt {
        field: &'static str,
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("Data length mismatch: header declares {declared} bytes, found {actual}")]
    LengthMismatch { declared: u32, actual: usize },

    #[error("Password required")]
    PasswordRequired,

    #[error("Wrong password")]
    WrongPassword,

    #[error("Failed to extract data")]
    ExtractionExhausted,

    #[error("Failed to convert binary PNG to video: {0}")]
    VideoReconstruction(String),

    #[error("Failed to save extracted data: {0}")]
    Output(#[from] FileWriterError),

    #[error("Extraction failed for {} (password supplied: {password_supplied}): {source}", path.display())]
    Extraction {
        path: PathBuf,
        password_supplied: bool,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Strips the path annotation added by the fallback controller.
    pub fn root(&self) -> &DecodeError {
        match self {
            Self::Extraction { source, .. } => source.root(),
            other => other,
        }
    }

    /// True for failures that a different password could fix.
    pub fn is_password_error(&self) -> bool {
        matches!(self.root(), Self::PasswordRequired | Self::WrongPassword)
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_unwraps_annotation() {
        let err = DecodeError::Extraction {
            path: PathBuf::from("duck.png"),
            password_supplied: true,
            source: Box::new(DecodeError::WrongPassword),
        };
        assert!(matches!(err.root(), DecodeError::WrongPassword));
        assert!(err.is_password_error());
    }

    #[test]
    fn test_annotation_message() {
        let err = DecodeError::Extraction {
            path: PathBuf::from("duck.png"),
            password_supplied: false,
            source: Box::new(DecodeError::ExtractionExhausted),
        };
        assert_eq!(
            err.to_string(),
            "Extraction failed for duck.png (password supplied: false): Failed to extract data"
        );
    }
}
