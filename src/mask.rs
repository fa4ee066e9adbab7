//! Watermark exclusion region.
//!
//! The top-left corner of every carrier is reserved for a visible watermark
//! and never carries payload bits. Extraction must skip exactly the same
//! rectangle the embedder skipped or every later bit offset shifts.

pub const WATERMARK_SKIP_W_RATIO: f64 = 0.40;
pub const WATERMARK_SKIP_H_RATIO: f64 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionMask {
    width: u32,
    height: u32,
    skip_w: u32,
    skip_h: u32,
}

impl RegionMask {
    pub fn new(width: u32, height: u32) -> Self {
        let skip_w = (f64::from(width) * WATERMARK_SKIP_W_RATIO) as u32;
        let skip_h = (f64::from(height) * WATERMARK_SKIP_H_RATIO) as u32;

        // Degenerate images too small for a watermark keep every pixel.
        let (skip_w, skip_h) = if skip_w > 0 && skip_h > 0 {
            (skip_w, skip_h)
        } else {
            (0, 0)
        };

        Self {
            width,
            height,
            skip_w,
            skip_h,
        }
    }

    #[inline]
    pub fn is_excluded(&self, x: u32, y: u32) -> bool {
        y < self.skip_h && x < self.skip_w
    }

    /// Width and height of the excluded rectangle, `(0, 0)` when inactive.
    pub fn excluded_rect(&self) -> (u32, u32) {
        (self.skip_w, self.skip_h)
    }

    pub fn is_active(&self) -> bool {
        self.skip_w > 0
    }

    pub fn eligible_pixels(&self) -> usize {
        let total = self.width as usize * self.height as usize;
        total - self.skip_w as usize * self.skip_h as usize
    }
}
