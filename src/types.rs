use std::fmt;

/// Extension suffix marking a video that was re-encoded as a PNG before embedding.
pub const VIDEO_MARKER: &str = ".binpng";

/// Number of low bits read from every channel value in one extraction attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionDepth {
    Two,
    Six,
    Eight,
}

impl ExtractionDepth {
    /// Fallback order. There is no in-band depth indicator, so every carrier
    /// is tried against this list.
    pub const FALLBACK_ORDER: [ExtractionDepth; 3] = [Self::Two, Self::Six, Self::Eight];

    #[must_use]
    pub const fn bits(&self) -> u32 {
        match self {
            Self::Two => 2,
            Self::Six => 6,
            Self::Eight => 8,
        }
    }

    #[must_use]
    pub const fn mask(&self) -> u8 {
        ((1u16 << self.bits()) - 1) as u8
    }
}

impl fmt::Display for ExtractionDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k={}", self.bits())
    }
}

/// Structured header recovered from the length-prefixed blob.
#[derive(Clone, PartialEq, Eq)]
pub struct Header {
    pub protection: Protection,
    pub extension: String,
    pub payload_length: u32,
    pub payload: Vec<u8>,
}

/// Password material stored in a protected header.
#[derive(Clone, PartialEq, Eq)]
pub enum Protection {
    None,
    Password {
        password_hash: [u8; 32],
        salt: [u8; 16],
    },
}

impl Header {
    #[must_use]
    pub fn has_password(&self) -> bool {
        matches!(self.protection, Protection::Password { .. })
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Header")
            .field("has_password", &self.has_password())
            .field("extension", &self.extension)
            .field("payload_length", &self.payload_length)
            .finish_non_exhaustive()
    }
}

/// Plaintext payload and the extension it was stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    pub data: Vec<u8>,
    pub extension: String,
    pub depth: ExtractionDepth,
}

impl DecodedPayload {
    #[must_use]
    pub fn is_video(&self) -> bool {
        is_video_extension(&self.extension)
    }

    /// Extension with the video marker removed.
    #[must_use]
    pub fn clean_extension(&self) -> &str {
        clean_extension(&self.extension)
    }
}

#[must_use]
pub fn is_video_extension(extension: &str) -> bool {
    extension.ends_with(VIDEO_MARKER)
}

#[must_use]
pub fn clean_extension(extension: &str) -> &str {
    extension.strip_suffix(VIDEO_MARKER).unwrap_or(extension)
}
