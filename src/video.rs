//! Video payload reconstruction.
//!
//! Videos are embedded as a small PNG whose RGB bytes are the raw video
//! stream, zero-padded to fill the rectangle. Reconstruction decodes that
//! PNG, flattens its pixels and drops the trailing zero run.
//!
//! A video whose real content ends in zero bytes loses them here; the
//! format has no length field to tell padding from data.

use crate::core::{DecodeError, Result};
use crate::types::DecodedPayload;

/// Recovers raw video bytes from a PNG-wrapped payload
pub fn binpng_to_video_bytes(png_bytes: &[u8]) -> Result<Vec<u8>> {
    let img = image::load_from_memory(png_bytes)
        .map_err(|e| DecodeError::VideoReconstruction(e.to_string()))?
        .to_rgb8();

    let mut bytes = img.into_raw();
    strip_trailing_zeros(&mut bytes);
    Ok(bytes)
}

/// Removes the trailing run of zero bytes, keeping interior zeros
pub fn strip_trailing_zeros(bytes: &mut Vec<u8>) {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    bytes.truncate(end);
}

/// Returns the bytes to materialize and their final extension
pub fn reconstruct(payload: &DecodedPayload) -> Result<(Vec<u8>, String)> {
    if !payload.is_video() {
        return Ok((payload.data.clone(), payload.extension.clone()));
    }

    tracing::info!("Converting binary PNG to video data");
    let video = binpng_to_video_bytes(&payload.data)?;
    Ok((video, payload.clean_extension().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtractionDepth;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn wrap_as_png(data: &[u8], width: u32, height: u32) -> Vec<u8> {
        let mut raw = data.to_vec();
        raw.resize((width * height * 3) as usize, 0);
        let img = RgbImage::from_raw(width, height, raw).unwrap();
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn test_strip_keeps_interior_zeros() {
        let mut bytes = vec![1, 0, 0, 2, 0, 3, 0, 0, 0];
        strip_trailing_zeros(&mut bytes);
        assert_eq!(bytes, vec![1, 0, 0, 2, 0, 3]);
    }

    #[test]
    fn test_strip_all_zeros() {
        let mut bytes = vec![0; 12];
        strip_trailing_zeros(&mut bytes);
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_binpng_round_trip() {
        let video = b"\x00\x00\x00\x18ftypmp42\x00\x00\x00\x00isom\x07";
        let png = wrap_as_png(video, 4, 4);
        assert_eq!(binpng_to_video_bytes(&png).unwrap(), video);
    }

    #[test]
    fn test_reconstruct_strips_marker() {
        let payload = DecodedPayload {
            data: wrap_as_png(b"\x01\x02\x03", 2, 2),
            extension: "mp4.binpng".to_string(),
            depth: ExtractionDepth::Two,
        };
        let (bytes, ext) = reconstruct(&payload).unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
        assert_eq!(ext, "mp4");
    }

    #[test]
    fn test_reconstruct_passes_through_other_files() {
        let payload = DecodedPayload {
            data: vec![0, 1, 0, 0],
            extension: "bin".to_string(),
            depth: ExtractionDepth::Eight,
        };
        let (bytes, ext) = reconstruct(&payload).unwrap();
        assert_eq!(bytes, vec![0, 1, 0, 0]);
        assert_eq!(ext, "bin");
    }

    #[test]
    fn test_invalid_png_is_reported() {
        let err = binpng_to_video_bytes(b"not a png").unwrap_err();
        assert!(matches!(err, DecodeError::VideoReconstruction(_)));
    }
}
