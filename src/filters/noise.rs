//! Noise reduction: Kuwahara smoothing.
//!
//! Kuwahara flattens texture while keeping edges sharp: every pixel takes
//! the mean color of whichever of its four surrounding quadrants is the
//! most uniform.

use ndarray::{Array2, Array3};
use tracing::debug;

use crate::buffer::RgbaBuffer;
use crate::error::{FilterError, FilterResult};
use crate::filters::core::{luminance, round_to_u8};

/// Mean color and luminance variance of one quadrant.
#[derive(Debug, Clone, Copy)]
struct RegionStats {
    mean: [f64; 3],
    variance: f64,
}

/// Apply the Kuwahara filter in place.
///
/// For each pixel the four `(radius + 1) x (radius + 1)` quadrants that
/// share the pixel as a corner are clipped to the image. The quadrant with
/// the lowest luminance variance wins (top-left, top-right, bottom-left,
/// bottom-right on ties) and its rounded mean RGB is written.
///
/// # Arguments
/// * `data` - Flat RGBA bytes (length = width * height * 4)
/// * `width`, `height` - Image dimensions in pixels
/// * `radius` - Quadrant radius in pixels (at least 1)
pub fn kuwahara(data: &mut [u8], width: usize, height: usize, radius: usize) -> FilterResult<()> {
    let mut buffer = RgbaBuffer::new(data, width, height)?;
    if radius == 0 {
        return Err(FilterError::InvalidParameter(
            "kuwahara radius must be positive".into(),
        ));
    }
    debug!(width, height, radius, "kuwahara");

    let source = buffer.snapshot()?;
    let luma = Array2::from_shape_fn((height, width), |(y, x)| {
        luminance(
            source[[y, x, 0]] as f32,
            source[[y, x, 1]] as f32,
            source[[y, x, 2]] as f32,
        ) as f64
    });

    let mut output = source.clone();
    for y in 0..height {
        let top = y.saturating_sub(radius);
        let bottom = y.saturating_add(radius).min(height - 1);
        for x in 0..width {
            let left = x.saturating_sub(radius);
            let right = x.saturating_add(radius).min(width - 1);

            let quadrants = [
                (top, y, left, x),
                (top, y, x, right),
                (y, bottom, left, x),
                (y, bottom, x, right),
            ];

            let mut best: Option<RegionStats> = None;
            for (y0, y1, x0, x1) in quadrants {
                let stats = region_stats(&source, &luma, (y0, y1), (x0, x1))?;
                if best.map_or(true, |b| stats.variance < b.variance) {
                    best = Some(stats);
                }
            }

            if let Some(stats) = best {
                for (c, &mean) in stats.mean.iter().enumerate() {
                    output[[y, x, c]] = round_to_u8(mean as f32);
                }
            }
        }
    }

    buffer.commit(&output)
}

/// Statistics over the inclusive row range `rows` and column range `cols`.
fn region_stats(
    source: &Array3<u8>,
    luma: &Array2<f64>,
    rows: (usize, usize),
    cols: (usize, usize),
) -> FilterResult<RegionStats> {
    let (height, width, _) = source.dim();
    let out_of_bounds = |x: usize, y: usize| FilterError::OutOfBounds {
        x: x as i64,
        y: y as i64,
        width,
        height,
    };

    let mut sums = [0.0f64; 3];
    let mut luma_sum = 0.0f64;
    let mut count = 0.0f64;
    for y in rows.0..=rows.1 {
        for x in cols.0..=cols.1 {
            for (c, sum) in sums.iter_mut().enumerate() {
                *sum += *source.get([y, x, c]).ok_or_else(|| out_of_bounds(x, y))? as f64;
            }
            luma_sum += *luma.get([y, x]).ok_or_else(|| out_of_bounds(x, y))?;
            count += 1.0;
        }
    }

    let luma_mean = luma_sum / count;
    let mut variance = 0.0f64;
    for y in rows.0..=rows.1 {
        for x in cols.0..=cols.1 {
            let d = luma[[y, x]] - luma_mean;
            variance += d * d;
        }
    }

    Ok(RegionStats {
        mean: sums.map(|s| s / count),
        variance: variance / count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kuwahara_uniform_unchanged() {
        let original = [12u8, 99, 240, 60].repeat(5 * 4);
        let mut img = original.clone();

        kuwahara(&mut img, 5, 4, 2).unwrap();

        assert_eq!(img, original);
    }

    #[test]
    fn test_kuwahara_preserves_step_edge() {
        let (width, height) = (8, 6);
        let original: Vec<u8> = (0..width * height)
            .flat_map(|i| {
                let v = if i % width < width / 2 { 10 } else { 230 };
                [v, v, v, 255]
            })
            .collect();
        let mut img = original.clone();

        kuwahara(&mut img, width, height, 2).unwrap();

        assert_eq!(img, original);
    }

    #[test]
    fn test_kuwahara_removes_isolated_speck() {
        let (width, height) = (5, 5);
        let mut img = [50u8, 50, 50, 255].repeat(width * height);
        let center = (2 * width + 2) * 4;
        img[center..center + 3].copy_from_slice(&[250, 250, 250]);

        kuwahara(&mut img, width, height, 1).unwrap();

        // every quadrant of the speck contains it once among 4 pixels
        // and they tie, so the top-left mean (3*50 + 250) / 4 wins
        assert_eq!(&img[center..center + 4], &[100, 100, 100, 255]);
        // a pixel two steps away has a quadrant free of the speck
        assert_eq!(&img[0..4], &[50, 50, 50, 255]);
    }

    #[test]
    fn test_kuwahara_rejects_zero_radius() {
        let mut img = vec![1, 2, 3, 4];
        assert!(matches!(
            kuwahara(&mut img, 1, 1, 0),
            Err(FilterError::InvalidParameter(_))
        ));
        assert_eq!(img, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_region_stats() {
        let mut source = Array3::<u8>::zeros((2, 2, 4));
        source[[0, 0, 0]] = 100;
        source[[1, 1, 0]] = 20;
        let luma = Array2::from_shape_fn((2, 2), |(y, x)| source[[y, x, 0]] as f64);

        let stats = region_stats(&source, &luma, (0, 1), (0, 1)).unwrap();

        assert!((stats.mean[0] - 30.0).abs() < 1e-9);
        assert_eq!(stats.mean[1], 0.0);
        // values 100, 0, 0, 20 around mean 30
        assert!((stats.variance - 1700.0).abs() < 1e-9);
    }
}
