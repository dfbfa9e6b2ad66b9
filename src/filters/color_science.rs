//! Color science filters: Sepia, Hue Rotation.
//!
//! Both mix channels, so intermediate values routinely leave the byte
//! range. Everything is computed in f32 and clamped on the way out.

use tracing::debug;

use crate::buffer::RgbaBuffer;
use crate::error::{FilterError, FilterResult};
use crate::filters::core::{clamp_u8, hsv_to_rgb, normalize_hue, rgb_to_hsv, round_to_u8};

// ============================================================================
// Sepia
// ============================================================================

/// Sepia tone matrix, one row per output channel.
const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Apply a sepia tone in place.
///
/// Weighted sums are truncated toward zero; they can reach ~345 for white
/// input and saturate at 255.
pub fn sepia(data: &mut [u8], width: usize, height: usize) -> FilterResult<()> {
    let mut buffer = RgbaBuffer::new(data, width, height)?;
    debug!(width, height, "sepia");

    buffer.map_rgb(|[r, g, b]| {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        SEPIA.map(|[wr, wg, wb]| clamp_u8((r * wr + g * wg + b * wb) as i32))
    });
    Ok(())
}

// ============================================================================
// Hue Rotation
// ============================================================================

/// Rotate image hue in place.
///
/// Pixels go through HSV; the hue is shifted and wrapped into 0-360 and
/// the result scaled back to 0-255 before rounding.
///
/// # Arguments
/// * `data` - Flat RGBA bytes (length = width * height * 4)
/// * `width`, `height` - Image dimensions in pixels
/// * `degrees` - Hue shift in degrees, any finite value (wraps around)
pub fn hue_rotation(data: &mut [u8], width: usize, height: usize, degrees: f32) -> FilterResult<()> {
    let mut buffer = RgbaBuffer::new(data, width, height)?;
    if !degrees.is_finite() {
        return Err(FilterError::InvalidParameter(format!(
            "hue angle must be finite, got {}",
            degrees
        )));
    }
    let shift = normalize_hue(degrees);
    debug!(width, height, degrees, shift, "hue rotation");

    buffer.map_rgb(|[r, g, b]| {
        let (h, s, v) = rgb_to_hsv(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        let (nr, ng, nb) = hsv_to_rgb(normalize_hue(h + shift), s, v);
        [
            round_to_u8(nr * 255.0),
            round_to_u8(ng * 255.0),
            round_to_u8(nb * 255.0),
        ]
    });
    Ok(())
}
