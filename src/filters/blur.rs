//! Gaussian blur for RGBA buffers.
//!
//! The blur convolves R, G and B with a full 2D kernel. Input pixels are
//! read from a snapshot, so results never depend on pixels already
//! written in the same pass.
//!
//! ## Edge Handling
//!
//! Kernel taps that fall outside the image are skipped and the remaining
//! weights renormalized. Border pixels are therefore averaged over fewer
//! samples instead of being darkened by implicit black padding.

use ndarray::{Array2, Array3};
use tracing::debug;

use crate::buffer::RgbaBuffer;
use crate::error::{FilterError, FilterResult};
use crate::filters::core::{gaussian_kernel_2d, round_to_u8};

/// Apply Gaussian blur in place.
///
/// # Arguments
/// * `data` - Flat RGBA bytes (length = width * height * 4)
/// * `width`, `height` - Image dimensions in pixels
/// * `kernel_size` - Kernel width and height in pixels (even sizes allowed)
/// * `sigma` - Standard deviation of the Gaussian
///
/// Kernels wider than `2 * max(width, height) + 1` reach no additional
/// pixels and are shrunk to that size before they are built.
pub fn gaussian_blur(
    data: &mut [u8],
    width: usize,
    height: usize,
    kernel_size: usize,
    sigma: f32,
) -> FilterResult<()> {
    let mut buffer = RgbaBuffer::new(data, width, height)?;
    let effective_size = kernel_size.min(max_useful_kernel(width, height));
    let kernel = gaussian_kernel_2d(effective_size, sigma)?;
    debug!(width, height, kernel_size, effective_size, sigma, "gaussian blur");

    let source = buffer.snapshot()?;
    let output = convolve_rgb(&source, &kernel)?;
    buffer.commit(&output)
}

/// Largest kernel whose taps can still land inside a `width x height` image.
fn max_useful_kernel(width: usize, height: usize) -> usize {
    width.max(height).saturating_mul(2).saturating_add(1)
}

/// Convolve the color channels of `source` with `kernel`.
///
/// Returns a new image; alpha is copied from `source`. Fails if the
/// in-bounds weights around some pixel sum to zero.
pub fn convolve_rgb(source: &Array3<u8>, kernel: &Array2<f32>) -> FilterResult<Array3<u8>> {
    let (height, width, _) = source.dim();
    let (kernel_h, kernel_w) = kernel.dim();
    let half_y = (kernel_h / 2) as isize;
    let half_x = (kernel_w / 2) as isize;

    let mut output = source.clone();

    for y in 0..height {
        for x in 0..width {
            let mut sum = [0.0f32; 3];
            let mut weight_sum = 0.0f32;

            for ((ky, kx), &weight) in kernel.indexed_iter() {
                let sy = y as isize + ky as isize - half_y;
                let sx = x as isize + kx as isize - half_x;
                if sy < 0 || sy >= height as isize || sx < 0 || sx >= width as isize {
                    continue;
                }

                for (c, acc) in sum.iter_mut().enumerate() {
                    let value = source
                        .get([sy as usize, sx as usize, c])
                        .ok_or(FilterError::OutOfBounds {
                            x: sx as i64,
                            y: sy as i64,
                            width,
                            height,
                        })?;
                    *acc += *value as f32 * weight;
                }
                weight_sum += weight;
            }

            if weight_sum == 0.0 {
                return Err(FilterError::InvalidParameter(format!(
                    "kernel weights around ({}, {}) sum to zero",
                    x, y
                )));
            }
            for (c, acc) in sum.iter().enumerate() {
                output[[y, x, c]] = round_to_u8(acc / weight_sum);
            }
        }
    }

    Ok(output)
}
