//! Decode report DTO

use crate::core::DecodeError;
use crate::domain::repositories::WriteResult;
use crate::types::DecodedPayload;
use serde::Serialize;
use std::path::PathBuf;

/// Result of decoding one carrier
#[derive(Debug, Clone, Default, Serialize)]
pub struct DecodeReport {
    /// Whether a payload was recovered and written
    pub success: bool,
    /// Where the payload was written
    pub output_path: Option<PathBuf>,
    /// Extension stored in the carrier header
    pub file_type: Option<String>,
    /// Decoded payload size in bytes
    pub data_size: usize,
    /// Bits per channel of the successful attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    /// Bytes written after video reconstruction
    pub bytes_written: u64,
    /// Hex SHA-256 of the bytes written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    /// Error message, present only on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DecodeReport {
    /// Creates a successful report
    pub fn success(payload: &DecodedPayload, written: WriteResult) -> Self {
        Self {
            success: true,
            output_path: Some(written.saved_path),
            file_type: Some(payload.extension.clone()),
            data_size: payload.data.len(),
            depth: Some(payload.depth.bits()),
            bytes_written: written.saved_size,
            sha256: Some(written.sha256),
            error: None,
        }
    }

    /// Creates a failed report
    pub fn failure(error: &DecodeError) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Default::default()
        }
    }

    /// Returns a summary string
    pub fn summary(&self) -> String {
        match (&self.error, &self.output_path) {
            (Some(error), _) => format!("Failed to decode carrier: {}", error),
            (None, Some(path)) => format!(
                "Output file: {}\nFile type: {}\nData size: {} bytes",
                path.display(),
                self.file_type.as_deref().unwrap_or(""),
                self.data_size
            ),
            (None, None) => "Nothing decoded".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_serializes_error_only_when_present() {
        let report = DecodeReport::failure(&DecodeError::WrongPassword);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Wrong password");
        assert!(json["output_path"].is_null());

        let ok = serde_json::to_value(DecodeReport {
            success: true,
            ..Default::default()
        })
        .unwrap();
        assert!(ok.get("error").is_none());
    }

    #[test]
    fn test_summary() {
        let report = DecodeReport::failure(&DecodeError::PasswordRequired);
        assert_eq!(report.summary(), "Failed to decode carrier: Password required");
    }
}
