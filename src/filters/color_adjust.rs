//! Color adjustment filters: Brightness, Saturation, Invert.
//!
//! These are pixel-wise operations that don't require spatial context.
//! Alpha is always preserved unchanged.

use tracing::debug;

use crate::buffer::RgbaBuffer;
use crate::error::{FilterError, FilterResult};
use crate::filters::core::{clamp_u8, luminance, round_to_u8};

// ============================================================================
// Brightness
// ============================================================================

/// Adjust image brightness in place.
///
/// # Arguments
/// * `data` - Flat RGBA bytes (length = width * height * 4)
/// * `width`, `height` - Image dimensions in pixels
/// * `amount` - Offset added to every color channel; results saturate at 0 and 255
pub fn brightness(data: &mut [u8], width: usize, height: usize, amount: i32) -> FilterResult<()> {
    let mut buffer = RgbaBuffer::new(data, width, height)?;
    debug!(width, height, amount, "brightness");

    buffer.map_rgb(|rgb| rgb.map(|c| clamp_u8((c as i32).saturating_add(amount))));
    Ok(())
}

// ============================================================================
// Saturation
// ============================================================================

/// Scale each pixel's distance from its BT.709 luminance.
///
/// # Arguments
/// * `data` - Flat RGBA bytes (length = width * height * 4)
/// * `width`, `height` - Image dimensions in pixels
/// * `factor` - 0.0 = grayscale, 1.0 = no change, >1.0 = oversaturated
pub fn saturation(data: &mut [u8], width: usize, height: usize, factor: f32) -> FilterResult<()> {
    let mut buffer = RgbaBuffer::new(data, width, height)?;
    if !factor.is_finite() {
        return Err(FilterError::InvalidParameter(format!(
            "saturation factor must be finite, got {}",
            factor
        )));
    }
    debug!(width, height, factor, "saturation");

    buffer.map_rgb(|[r, g, b]| {
        let rgb = [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0];
        let lum = luminance(rgb[0], rgb[1], rgb[2]);
        rgb.map(|c| round_to_u8((lum + factor * (c - lum)) * 255.0))
    });
    Ok(())
}

// ============================================================================
// Invert
// ============================================================================

/// Invert image colors in place (255 - value for R, G, B).
pub fn invert(data: &mut [u8], width: usize, height: usize) -> FilterResult<()> {
    let mut buffer = RgbaBuffer::new(data, width, height)?;
    debug!(width, height, "invert");

    buffer.map_rgb(|rgb| rgb.map(|c| 255 - c));
    Ok(())
}
