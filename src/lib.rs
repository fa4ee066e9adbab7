//! Recovery of files hidden in carrier images with LSB steganography.
//!
//! A carrier stores a length-prefixed header in the low bits of its RGB
//! channels, skipping a watermark rectangle in the top-left corner. The
//! payload may be password protected and may be a video re-encoded as PNG.

pub mod application;
pub mod carrier;
pub mod core;
pub mod crypto;
pub mod domain;
pub mod extraction;
pub mod fallback;
pub mod header;
pub mod infrastructure;
pub mod mask;
pub mod types;
pub mod video;

pub use application::dto::{DecodeOptions, DecodeReport};
pub use application::{DecodeCarrierUseCase, decode, decode_to_report};
pub use crate::core::{DecodeError, Result};
pub use domain::repositories::OutputSpec;
pub use fallback::extract_with_fallback;
pub use types::{DecodedPayload, ExtractionDepth, Header};
