//! Core numeric utilities shared by the filters.
//!
//! - Byte clamping and float-to-byte rounding
//! - Gaussian kernel generation
//! - RGB <-> HSV conversion
//! - BT.709 luminance

use std::f32::consts::PI;

use ndarray::Array2;
use tracing::trace;

use crate::error::{FilterError, FilterResult};

/// ITU-R BT.709 luminance coefficients.
pub const LUMA_R: f32 = 0.2126;
pub const LUMA_G: f32 = 0.7152;
pub const LUMA_B: f32 = 0.0722;

/// Saturate an integer into a byte.
#[inline]
pub fn clamp_u8(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Round a value expressed on the 0-255 scale to the nearest byte.
///
/// Scaling from 0.0-1.0 must happen before this call.
#[inline]
pub fn round_to_u8(value: f32) -> u8 {
    // NaN casts to 0
    value.round().clamp(0.0, 255.0) as u8
}

/// BT.709 luminance of normalized (0.0-1.0) RGB.
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Generate a normalized 2D Gaussian kernel of `size x size` weights.
///
/// Cell `i` sits at offset `i - size / 2` from the center, so even sizes
/// lean one cell towards negative offsets. The weights sum to 1.0.
///
/// # Arguments
/// * `size` - Kernel width and height in cells (at least 1)
/// * `sigma` - Standard deviation of the Gaussian (positive)
pub fn gaussian_kernel_2d(size: usize, sigma: f32) -> FilterResult<Array2<f32>> {
    if size == 0 {
        return Err(FilterError::InvalidParameter(
            "kernel size must be positive".into(),
        ));
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FilterError::InvalidParameter(format!(
            "sigma must be positive and finite, got {}",
            sigma
        )));
    }

    let half = (size / 2) as f32;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let coefficient = 1.0 / (PI * two_sigma_sq);

    let mut kernel = Array2::<f32>::from_shape_fn((size, size), |(y, x)| {
        let dy = y as f32 - half;
        let dx = x as f32 - half;
        coefficient * (-(dx * dx + dy * dy) / two_sigma_sq).exp()
    });

    let sum = kernel.sum();
    if !sum.is_finite() || sum <= 0.0 {
        // sigma so small that sigma^2 underflows: the kernel is a single tap.
        kernel.fill(0.0);
        let center = size / 2;
        kernel[[center, center]] = 1.0;
    } else {
        kernel.mapv_inplace(|w| w / sum);
    }

    trace!(size, sigma, "generated gaussian kernel");
    Ok(kernel)
}

/// Convert RGB to HSV.
/// Input: r, g, b in 0.0-1.0
/// Output: (h, s, v) where h is 0.0-360.0, s and v are 0.0-1.0
#[inline]
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    if delta == 0.0 {
        return (0.0, s, v);
    }

    let h = if max == r {
        (g - b) / delta
    } else if max == g {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };

    (normalize_hue(h * 60.0), s, v)
}

/// Convert HSV to RGB.
/// Input: h in degrees (any value, wrapped into 0.0-360.0), s and v in 0.0-1.0
/// Output: (r, g, b) in 0.0-1.0
#[inline]
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let h = normalize_hue(h);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

/// Wrap an angle in degrees into [0, 360).
#[inline]
pub fn normalize_hue(degrees: f32) -> f32 {
    let h = degrees % 360.0;
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}
