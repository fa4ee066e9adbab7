//! Depth fallback controller
//!
//! Runs extraction, header parsing and decryption as one attempt per depth,
//! in the fixed order 2, 6, 8, and stops at the first attempt that succeeds.

use crate::carrier::CoverImage;
use crate::core::{DecodeError, Result};
use crate::crypto;
use crate::extraction;
use crate::header;
use crate::types::{DecodedPayload, ExtractionDepth};
use std::path::Path;

/// Record of a single depth attempt
#[derive(Debug)]
pub struct DepthAttempt {
    pub depth: ExtractionDepth,
    /// `None` when the attempt produced the returned payload
    pub error: Option<DecodeError>,
}

impl DepthAttempt {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of running the fallback over every depth
#[derive(Debug)]
pub struct FallbackOutcome {
    pub attempts: Vec<DepthAttempt>,
    pub payload: Option<DecodedPayload>,
}

impl FallbackOutcome {
    pub fn attempted_depths(&self) -> Vec<ExtractionDepth> {
        self.attempts.iter().map(|a| a.depth).collect()
    }

    /// True when some depth parsed a protected header and then failed on the
    /// password, even if a later depth surfaced a different error
    pub fn password_rejected(&self) -> bool {
        self.attempts
            .iter()
            .any(|a| a.error.as_ref().is_some_and(DecodeError::is_password_error))
    }

    /// Converts into the payload, or the last recorded error annotated with
    /// the carrier path
    pub fn into_result(self, image_path: &Path, password_supplied: bool) -> Result<DecodedPayload> {
        if let Some(payload) = self.payload {
            return Ok(payload);
        }

        let last = self
            .attempts
            .into_iter()
            .rev()
            .find_map(|a| a.error)
            .unwrap_or(DecodeError::ExtractionExhausted);

        Err(DecodeError::Extraction {
            path: image_path.to_path_buf(),
            password_supplied,
            source: Box::new(last),
        })
    }
}

/// Runs one extraction attempt at a single depth
pub fn attempt_depth(
    cover: &CoverImage,
    depth: ExtractionDepth,
    password: &str,
) -> Result<DecodedPayload> {
    let stream = extraction::extract_bits(cover, depth)?;
    let header = header::parse_stream(&stream)?;
    let extension = header.extension.clone();
    let data = crypto::decrypt_payload(header, password)?;

    Ok(DecodedPayload {
        data,
        extension,
        depth,
    })
}

/// Tries every depth in fallback order against an already decoded carrier
pub fn run_fallback(cover: &CoverImage, password: &str) -> FallbackOutcome {
    run_depths(cover, password, &ExtractionDepth::FALLBACK_ORDER)
}

pub fn run_depths(cover: &CoverImage, password: &str, depths: &[ExtractionDepth]) -> FallbackOutcome {
    let mut attempts = Vec::with_capacity(depths.len());

    for &depth in depths {
        match attempt_depth(cover, depth, password) {
            Ok(payload) => {
                tracing::info!(
                    "Extracted {} bytes (.{}) at {}",
                    payload.data.len(),
                    payload.extension,
                    depth
                );
                attempts.push(DepthAttempt { depth, error: None });
                return FallbackOutcome {
                    attempts,
                    payload: Some(payload),
                };
            }
            Err(e) => {
                tracing::debug!("Extraction at {} failed: {}", depth, e);
                attempts.push(DepthAttempt {
                    depth,
                    error: Some(e),
                });
            }
        }
    }

    FallbackOutcome {
        attempts,
        payload: None,
    }
}

/// Loads a carrier and extracts its payload, trying every depth
pub fn extract_with_fallback(image_path: &Path, password: &str) -> Result<DecodedPayload> {
    let cover = CoverImage::open(image_path)?;
    let outcome = run_fallback(&cover, password);
    if outcome.payload.is_none() && outcome.password_rejected() {
        tracing::warn!("Carrier is password protected, re-run with the correct password");
    }
    outcome.into_result(image_path, !password.is_empty())
}
