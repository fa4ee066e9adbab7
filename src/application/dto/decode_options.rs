//! Decode options DTO

use crate::domain::repositories::OutputSpec;
use std::fmt;
use std::path::{Path, PathBuf};

/// Options for decoding one carrier image
#[derive(Clone, Default)]
pub struct DecodeOptions {
    /// Path to the carrier image
    pub image_path: PathBuf,
    /// Password for protected payloads (empty = none supplied)
    pub password: String,
    /// Where to write the recovered file
    pub output: OutputSpec,
}

impl DecodeOptions {
    /// Creates new decode options for the given carrier
    pub fn new(image_path: impl AsRef<Path>) -> Self {
        Self {
            image_path: image_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Sets the decryption password
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    /// Writes to an explicit file path or existing directory
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = OutputSpec::Explicit(output.into());
        self
    }

    /// Writes the default file name into `dir`
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output = OutputSpec::Auto {
            dir: Some(dir.into()),
        };
        self
    }

    pub fn password_supplied(&self) -> bool {
        !self.password.is_empty()
    }
}

impl fmt::Debug for DecodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeOptions")
            .field("image_path", &self.image_path)
            .field("password_supplied", &self.password_supplied())
            .field("output", &self.output)
            .finish()
    }
}
