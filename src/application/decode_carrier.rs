//! Decode carrier use case
//!
//! Loads a carrier, runs the depth fallback, rebuilds video payloads and
//! hands the result to a writer.

use crate::application::dto::{DecodeOptions, DecodeReport};
use crate::core::Result;
use crate::domain::repositories::{OutputSpec, RecoveredFileWriter};
use crate::fallback;
use crate::infrastructure::persistence::LocalFileWriter;
use crate::video;
use std::path::Path;

/// Decode carrier use case
pub struct DecodeCarrierUseCase<W: RecoveredFileWriter> {
    writer: W,
}

impl DecodeCarrierUseCase<LocalFileWriter> {
    /// Creates a use case that writes to the local filesystem
    pub fn local() -> Self {
        Self::new(LocalFileWriter::new())
    }
}

impl<W: RecoveredFileWriter> DecodeCarrierUseCase<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Executes the decode, failing on the first error
    pub fn execute(&self, options: &DecodeOptions) -> Result<DecodeReport> {
        let image_path = options.image_path.as_path();
        tracing::info!("Loading carrier image: {}", image_path.display());

        let payload = fallback::extract_with_fallback(image_path, &options.password)?;
        tracing::info!(
            "Extracted file type: {} ({} bytes)",
            payload.extension,
            payload.data.len()
        );

        let (bytes, extension) = video::reconstruct(&payload)?;
        let output_path = self
            .writer
            .output_path(image_path, &extension, &options.output)?;
        let written = self.writer.write(&output_path, &bytes)?;

        Ok(DecodeReport::success(&payload, written))
    }

    /// Executes the decode, folding any error into a failed report
    pub fn execute_to_report(&self, options: &DecodeOptions) -> DecodeReport {
        match self.execute(options) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("{}", e);
                DecodeReport::failure(&e)
            }
        }
    }
}

/// Decodes `image_path` and writes the recovered file per `output`
pub fn decode(image_path: &Path, password: &str, output: &OutputSpec) -> Result<DecodeReport> {
    DecodeCarrierUseCase::local().execute(&options_for(image_path, password, output))
}

/// Like [`decode`], but never fails: errors land in the report
pub fn decode_to_report(image_path: &Path, password: &str, output: &OutputSpec) -> DecodeReport {
    DecodeCarrierUseCase::local().execute_to_report(&options_for(image_path, password, output))
}

fn options_for(image_path: &Path, password: &str, output: &OutputSpec) -> DecodeOptions {
    DecodeOptions {
        image_path: image_path.to_path_buf(),
        password: password.to_string(),
        output: output.clone(),
    }
}
