//! Validated view over a caller-owned RGBA byte buffer.
//!
//! The buffer is flat, row-major, top-to-bottom, 4 bytes per pixel.
//! [`RgbaBuffer::new`] checks `len == width * height * 4` once so the
//! filters can index freely afterwards. Writes go through either
//! [`RgbaBuffer::map_rgb`] (per-pixel filters) or [`RgbaBuffer::commit`]
//! (neighborhood filters); neither ever writes the alpha byte.

use ndarray::{s, Array3, ArrayView3, ArrayViewMut3};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use crate::error::{FilterError, FilterResult};

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Mutable RGBA pixel buffer borrowed from the caller for one filter call.
#[derive(Debug)]
pub struct RgbaBuffer<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> RgbaBuffer<'a> {
    /// Wrap `data` as a `width x height` RGBA image.
    ///
    /// Fails with [`FilterError::InvalidDimensions`] for a zero width or
    /// height and with [`FilterError::InvalidParameter`] when the length
    /// does not match the dimensions.
    pub fn new(data: &'a mut [u8], width: usize, height: usize) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            });
        }

        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .ok_or_else(|| {
                FilterError::InvalidParameter(format!(
                    "{}x{} image is too large to address",
                    width, height
                ))
            })?;

        if data.len() != expected {
            return Err(FilterError::InvalidParameter(format!(
                "buffer length {} doesn't match {}x{}x{} = {}",
                data.len(),
                width,
                height,
                CHANNELS,
                expected
            )));
        }

        Ok(Self { data, width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw bytes, row-major RGBA.
    pub fn as_bytes(&self) -> &[u8] {
        &*self.data
    }

    /// Read-only `(height, width, 4)` view of the pixels.
    pub fn view(&self) -> FilterResult<ArrayView3<'_, u8>> {
        Ok(ArrayView3::from_shape(
            (self.height, self.width, CHANNELS),
            &*self.data,
        )?)
    }

    /// Owned copy of the current pixels.
    ///
    /// Neighborhood filters read from this snapshot while building their
    /// output so that no freshly written pixel is ever read back as input.
    pub fn snapshot(&self) -> FilterResult<Array3<u8>> {
        Ok(self.view()?.to_owned())
    }

    /// Copy the RGB channels of `output` into the buffer. Alpha is kept.
    pub fn commit(&mut self, output: &Array3<u8>) -> FilterResult<()> {
        let (height, width) = (self.height, self.width);
        if output.dim() != (height, width, CHANNELS) {
            let (oh, ow, oc) = output.dim();
            return Err(FilterError::InvalidParameter(format!(
                "output shape ({}, {}, {}) doesn't match ({}, {}, {})",
                oh, ow, oc, height, width, CHANNELS
            )));
        }

        let mut target = ArrayViewMut3::from_shape((height, width, CHANNELS), &mut *self.data)?;
        target
            .slice_mut(s![.., .., 0..3])
            .assign(&output.slice(s![.., .., 0..3]));

        trace!(width, height, "committed filter output");
        Ok(())
    }

    /// Replace every pixel's RGB with `f(rgb)`.
    ///
    /// Pixels are independent, so with the `parallel` feature they are
    /// spread across the rayon pool. Each worker owns whole pixels.
    pub fn map_rgb<F>(&mut self, f: F)
    where
        F: Fn([u8; 3]) -> [u8; 3] + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        self.data
            .par_chunks_exact_mut(CHANNELS)
            .for_each(|pixel| apply_rgb(pixel, &f));

        #[cfg(not(feature = "parallel"))]
        self.data
            .chunks_exact_mut(CHANNELS)
            .for_each(|pixel| apply_rgb(pixel, &f));
    }
}

#[inline]
fn apply_rgb<F>(pixel: &mut [u8], f: &F)
where
    F: Fn([u8; 3]) -> [u8; 3],
{
    let [r, g, b] = f([pixel[0], pixel[1], pixel[2]]);
    pixel[0] = r;
    pixel[1] = g;
    pixel[2] = b;
}

/// Convert host-side signed dimensions into pixel counts.
pub fn checked_dimensions(width: i32, height: i32) -> FilterResult<(usize, usize)> {
    if width <= 0 || height <= 0 {
        return Err(FilterError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        });
    }
    Ok((width as usize, height as usize))
}

/// Convert a host-side signed size parameter (block size, kernel size,
/// radius) into a strictly positive count.
pub fn positive_size(name: &str, value: i32) -> FilterResult<usize> {
    if value <= 0 {
        return Err(FilterError::InvalidParameter(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(value as usize)
}
