//! Grayscale conversion filter.
//!
//! Uses the classic luma weights R 0.30, G 0.59, B 0.11 and rounds to the
//! nearest byte. The weights sum to 1.0, so the result never exceeds 255.

use tracing::debug;

use crate::buffer::RgbaBuffer;
use crate::error::FilterResult;
use crate::filters::core::round_to_u8;

const GRAY_R: f32 = 0.3;
const GRAY_G: f32 = 0.59;
const GRAY_B: f32 = 0.11;

/// Gray level of one pixel.
#[inline]
pub fn gray_level(r: u8, g: u8, b: u8) -> u8 {
    round_to_u8(r as f32 * GRAY_R + g as f32 * GRAY_G + b as f32 * GRAY_B)
}

/// Convert an RGBA buffer to grayscale in place.
///
/// Output has R=G=B=gray, alpha preserved.
///
/// # Arguments
/// * `data` - Flat RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
pub fn grayscale(data: &mut [u8], width: usize, height: usize) -> FilterResult<()> {
    let mut buffer = RgbaBuffer::new(data, width, height)?;
    debug!(width, height, "grayscale");

    buffer.map_rgb(|[r, g, b]| {
        let gray = gray_level(r, g, b);
        [gray, gray, gray]
    });
    Ok(())
}
