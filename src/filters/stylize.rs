//! Stylize filters: Mosaic, Emboss.
//!
//! Both need neighboring pixels, so they read from a snapshot of the
//! buffer and commit a complete result at the end.

use ndarray::{s, Array3};
use tracing::debug;

use crate::buffer::RgbaBuffer;
use crate::error::{FilterError, FilterResult};
use crate::filters::core::round_to_u8;

// ============================================================================
// Mosaic
// ============================================================================

/// Pixelate the image into `block_size x block_size` blocks.
///
/// Each block is filled with the truncated integer mean of its R, G and B
/// values. Blocks along the right and bottom edges are clipped to the
/// image rather than padded.
///
/// # Arguments
/// * `data` - Flat RGBA bytes (length = width * height * 4)
/// * `width`, `height` - Image dimensions in pixels
/// * `block_size` - Block edge length in pixels (at least 1)
pub fn mosaic(data: &mut [u8], width: usize, height: usize, block_size: usize) -> FilterResult<()> {
    let mut buffer = RgbaBuffer::new(data, width, height)?;
    if block_size == 0 {
        return Err(FilterError::InvalidParameter(
            "block size must be positive".into(),
        ));
    }
    debug!(width, height, block_size, "mosaic");

    let source = buffer.snapshot()?;
    let output = mosaic_blocks(&source, block_size);
    buffer.commit(&output)
}

fn mosaic_blocks(source: &Array3<u8>, block_size: usize) -> Array3<u8> {
    let (height, width, _) = source.dim();
    let mut output = source.clone();

    for by in (0..height).step_by(block_size) {
        let y_end = by.saturating_add(block_size).min(height);
        for bx in (0..width).step_by(block_size) {
            let x_end = bx.saturating_add(block_size).min(width);

            let block = source.slice(s![by..y_end, bx..x_end, 0..3]);
            let count = ((y_end - by) * (x_end - bx)) as u64;

            let mut sums = [0u64; 3];
            for ((_, _, c), &v) in block.indexed_iter() {
                sums[c] += v as u64;
            }

            for (c, sum) in sums.iter().enumerate() {
                output
                    .slice_mut(s![by..y_end, bx..x_end, c])
                    .fill((sum / count) as u8);
            }
        }
    }

    output
}

// ============================================================================
// Emboss
// ============================================================================

/// Apply an emboss (relief) effect in place.
///
/// Each color channel becomes a directional derivative along the light
/// direction, offset to mid-gray: flat areas turn 128, edges facing the
/// light turn brighter and edges facing away darker. Neighbors beyond the
/// border repeat the edge pixel.
///
/// # Arguments
/// * `data` - Flat RGBA bytes (length = width * height * 4)
/// * `width`, `height` - Image dimensions in pixels
/// * `angle` - Light source angle in degrees (0 = from the right, 90 = from below)
/// * `depth` - Effect strength (typically 0.5-5.0)
pub fn emboss(
    data: &mut [u8],
    width: usize,
    height: usize,
    angle: f32,
    depth: f32,
) -> FilterResult<()> {
    let mut buffer = RgbaBuffer::new(data, width, height)?;
    if !angle.is_finite() || !depth.is_finite() {
        return Err(FilterError::InvalidParameter(format!(
            "emboss angle and depth must be finite, got {} and {}",
            angle, depth
        )));
    }
    debug!(width, height, angle, depth, "emboss");

    let kernel = emboss_kernel(angle, depth);
    let source = buffer.snapshot()?;
    let mut output = source.clone();

    for y in 0..height {
        for x in 0..width {
            for c in 0..3 {
                let mut sum = 0.0f32;
                for (ky, row) in kernel.iter().enumerate() {
                    let py = (y + ky).saturating_sub(1).min(height - 1);
                    for (kx, &weight) in row.iter().enumerate() {
                        let px = (x + kx).saturating_sub(1).min(width - 1);
                        sum += source[[py, px, c]] as f32 * weight;
                    }
                }
                output[[y, x, c]] = round_to_u8(sum + 128.0);
            }
        }
    }

    buffer.commit(&output)
}

/// 3x3 directional derivative kernel; weights sum to zero.
fn emboss_kernel(angle: f32, depth: f32) -> [[f32; 3]; 3] {
    let (dy, dx) = angle.to_radians().sin_cos();
    let mut kernel = [[0.0f32; 3]; 3];
    for (ky, row) in kernel.iter_mut().enumerate() {
        for (kx, weight) in row.iter_mut().enumerate() {
            let ox = kx as f32 - 1.0;
            let oy = ky as f32 - 1.0;
            *weight = depth * (ox * dx + oy * dy);
        }
    }
    kernel
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(data: &[u8], width: usize, x: usize, y: usize) -> &[u8] {
        let i = (y * width + x) * 4;
        &data[i..i + 4]
    }

    // ========================================================================
    // Mosaic
    // ========================================================================

    #[test]
    fn test_mosaic_4x4_block_means() {
        // Top-left block:     (10,20,30) (20,30,40) / (30,40,50) (41,50,60)
        // Top-right block:    (100,0,0) x4 with one (103,1,2)
        // Bottom-left block:  (0,0,0) (255,255,255) / (0,0,0) (0,0,0)
        // Bottom-right block: (7,8,9) x4
        let rows: [[[u8; 3]; 4]; 4] = [
            [[10, 20, 30], [20, 30, 40], [100, 0, 0], [100, 0, 0]],
            [[30, 40, 50], [41, 50, 60], [100, 0, 0], [103, 1, 2]],
            [[0, 0, 0], [255, 255, 255], [7, 8, 9], [7, 8, 9]],
            [[0, 0, 0], [0, 0, 0], [7, 8, 9], [7, 8, 9]],
        ];
        let mut img: Vec<u8> = rows
            .iter()
            .flatten()
            .enumerate()
            .flat_map(|(i, rgb)| [rgb[0], rgb[1], rgb[2], i as u8 * 10])
            .collect();

        mosaic(&mut img, 4, 4, 2).unwrap();

        let expect = |x: usize, y: usize, rgb: [u8; 3]| {
            let p = pixel(&img, 4, x, y);
            assert_eq!(&p[0..3], &rgb, "pixel ({}, {})", x, y);
            assert_eq!(p[3], (y * 4 + x) as u8 * 10);
        };

        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            // (101/4, 140/4, 180/4)
            expect(x, y, [25, 35, 45]);
        }
        for (x, y) in [(2, 0), (3, 0), (2, 1), (3, 1)] {
            expect(x, y, [100, 0, 0]);
        }
        for (x, y) in [(0, 2), (1, 2), (0, 3), (1, 3)] {
            expect(x, y, [63, 63, 63]);
        }
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            expect(x, y, [7, 8, 9]);
        }
    }

    #[test]
    fn test_mosaic_clips_partial_blocks() {
        // 3x1 image, block size 2: blocks are [0..2) and [2..3)
        let mut img = vec![10, 0, 0, 255, 20, 0, 0, 255, 99, 0, 0, 255];
        mosaic(&mut img, 3, 1, 2).unwrap();
        assert_eq!(img, vec![15, 0, 0, 255, 15, 0, 0, 255, 99, 0, 0, 255]);
    }

    #[test]
    fn test_mosaic_block_invariant() {
        let (width, height, block) = (7, 5, 3);
        let original: Vec<u8> = (0..width * height)
            .flat_map(|i| [(i * 13 % 256) as u8, (i * 29 % 256) as u8, (i * 71 % 256) as u8, 200])
            .collect();
        let mut img = original.clone();

        mosaic(&mut img, width, height, block).unwrap();

        for by in (0..height).step_by(block) {
            for bx in (0..width).step_by(block) {
                let coords: Vec<(usize, usize)> = (by..(by + block).min(height))
                    .flat_map(|y| (bx..(bx + block).min(width)).map(move |x| (x, y)))
                    .collect();
                let first = pixel(&img, width, bx, by)[0..3].to_vec();
                for c in 0..3 {
                    let values: Vec<u8> = coords
                        .iter()
                        .map(|&(x, y)| pixel(&original, width, x, y)[c])
                        .collect();
                    let min = *values.iter().min().unwrap();
                    let max = *values.iter().max().unwrap();
                    assert!(first[c] >= min && first[c] <= max);
                }
                for &(x, y) in &coords {
                    assert_eq!(&pixel(&img, width, x, y)[0..3], &first[..]);
                }
            }
        }
    }

    #[test]
    fn test_mosaic_block_larger_than_image() {
        let mut img = vec![0, 0, 0, 1, 100, 50, 25, 2];
        mosaic(&mut img, 2, 1, 64).unwrap();
        assert_eq!(img, vec![50, 25, 12, 1, 50, 25, 12, 2]);
    }

    #[test]
    fn test_mosaic_rejects_zero_block() {
        let mut img = vec![1, 2, 3, 4];
        assert!(matches!(
            mosaic(&mut img, 1, 1, 0),
            Err(FilterError::InvalidParameter(_))
        ));
        assert_eq!(img, vec![1, 2, 3, 4]);
    }

    // ========================================================================
    // Emboss
    // ========================================================================

    #[test]
    fn test_emboss_kernel_sums_to_zero() {
        for angle in [0.0f32, 45.0, 135.0, 270.0] {
            let kernel = emboss_kernel(angle, 2.0);
            let sum: f32 = kernel.iter().flatten().sum();
            assert!(sum.abs() < 1e-5);
            assert_eq!(kernel[1][1], 0.0);
        }
    }

    #[test]
    fn test_emboss_flat_is_mid_gray() {
        let mut img = [37u8, 190, 64, 77].repeat(9);
        emboss(&mut img, 3, 3, 45.0, 1.0).unwrap();
        for p in img.chunks(4) {
            assert_eq!(p, &[128, 128, 128, 77]);
        }
    }

    #[test]
    fn test_emboss_vertical_edge() {
        // columns: 0, 0, 200, 200
        let mut img: Vec<u8> = (0..4 * 3)
            .flat_map(|i| {
                let v = if i % 4 >= 2 { 200 } else { 0 };
                [v, v, v, 255]
            })
            .collect();

        emboss(&mut img, 4, 3, 0.0, 1.0).unwrap();

        for y in 0..3 {
            assert_eq!(pixel(&img, 4, 0, y)[0], 128);
            assert_eq!(pixel(&img, 4, 1, y)[0], 255);
            assert_eq!(pixel(&img, 4, 2, y)[0], 255);
            assert_eq!(pixel(&img, 4, 3, y)[0], 128);
        }
    }

    #[test]
    fn test_emboss_rejects_nan_depth() {
        let mut img = vec![1, 2, 3, 4];
        assert!(emboss(&mut img, 1, 1, 0.0, f32::NAN).is_err());
        assert_eq!(img, vec![1, 2, 3, 4]);
    }
}
