//! Filter modules for in-place RGBA image effects.
//!
//! ## Buffer Format
//!
//! Every filter takes a flat `&mut [u8]` of RGBA pixels, row-major and
//! top-to-bottom, plus the image width and height. The length must be
//! exactly `width * height * 4`.
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **Validate first** - Dimensions and parameters are checked before the
//!   first byte is written; an error leaves the buffer untouched
//! - **Alpha preservation** - The alpha byte is never modified
//! - **Clamped output** - Intermediate values are computed wide and
//!   saturated into 0-255
//! - **Snapshot reads** - Neighborhood filters read from a copy of the input
//!
//! ## Filter Categories
//!
//! - **Pixel-wise**: grayscale, invert, brightness, saturation
//! - **Color science**: sepia, hue_rotation
//! - **Blur**: gaussian_blur
//! - **Stylize**: mosaic, emboss
//! - **Noise**: kuwahara

pub mod core;
pub mod grayscale;
pub mod color_adjust;
pub mod color_science;
pub mod blur;
pub mod stylize;
pub mod noise;

pub use blur::gaussian_blur;
pub use color_adjust::{brightness, invert, saturation};
pub use color_science::{hue_rotation, sepia};
pub use grayscale::grayscale;
pub use noise::kuwahara;
pub use stylize::{emboss, mosaic};

use crate::error::FilterResult;

/// One filter together with its parameters.
///
/// Lets a host pick a filter at runtime and apply it through a single call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter {
    Grayscale,
    Sepia,
    Invert,
    GaussianBlur { kernel_size: usize, sigma: f32 },
    Mosaic { block_size: usize },
    HueRotation { degrees: f32 },
    Saturation { factor: f32 },
    Brightness { amount: i32 },
    Emboss { angle: f32, depth: f32 },
    Kuwahara { radius: usize },
}

impl Filter {
    /// Short lowercase identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Grayscale => "grayscale",
            Filter::Sepia => "sepia",
            Filter::Invert => "invert",
            Filter::GaussianBlur { .. } => "gaussian_blur",
            Filter::Mosaic { .. } => "mosaic",
            Filter::HueRotation { .. } => "hue_rotation",
            Filter::Saturation { .. } => "saturation",
            Filter::Brightness { .. } => "brightness",
            Filter::Emboss { .. } => "emboss",
            Filter::Kuwahara { .. } => "kuwahara",
        }
    }

    /// Run the filter over `data` in place.
    pub fn apply(&self, data: &mut [u8], width: usize, height: usize) -> FilterResult<()> {
        match *self {
            Filter::Grayscale => grayscale(data, width, height),
            Filter::Sepia => sepia(data, width, height),
            Filter::Invert => invert(data, width, height),
            Filter::GaussianBlur { kernel_size, sigma } => {
                gaussian_blur(data, width, height, kernel_size, sigma)
            }
            Filter::Mosaic { block_size } => mosaic(data, width, height, block_size),
            Filter::HueRotation { degrees } => hue_rotation(data, width, height, degrees),
            Filter::Saturation { factor } => saturation(data, width, height, factor),
            Filter::Brightness { amount } => brightness(data, width, height, amount),
            Filter::Emboss { angle, depth } => emboss(data, width, height, angle, depth),
            Filter::Kuwahara { radius } => kuwahara(data, width, height, radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    fn sample() -> Vec<u8> {
        (0..4 * 3)
            .flat_map(|i: u32| [(i * 20) as u8, (255 - i * 9) as u8, (i * 7 + 3) as u8, 100 + i as u8])
            .collect()
    }

    const ALL: [Filter; 10] = [
        Filter::Grayscale,
        Filter::Sepia,
        Filter::Invert,
        Filter::GaussianBlur { kernel_size: 3, sigma: 1.0 },
        Filter::Mosaic { block_size: 2 },
        Filter::HueRotation { degrees: 90.0 },
        Filter::Saturation { factor: 1.5 },
        Filter::Brightness { amount: 30 },
        Filter::Emboss { angle: 45.0, depth: 1.0 },
        Filter::Kuwahara { radius: 1 },
    ];

    #[test]
    fn test_apply_matches_direct_call() {
        let mut via_enum = sample();
        let mut direct = sample();

        Filter::Mosaic { block_size: 2 }.apply(&mut via_enum, 4, 3).unwrap();
        mosaic(&mut direct, 4, 3, 2).unwrap();

        assert_eq!(via_enum, direct);
    }

    #[test]
    fn test_every_filter_preserves_alpha() {
        let original = sample();
        for filter in ALL {
            let mut img = original.clone();
            filter.apply(&mut img, 4, 3).unwrap();
            for (out, src) in img.chunks(4).zip(original.chunks(4)) {
                assert_eq!(out[3], src[3], "{} changed alpha", filter.name());
            }
        }
    }

    #[test]
    fn test_every_filter_rejects_zero_width_untouched() {
        let original = sample();
        for filter in ALL {
            let mut img = original.clone();
            let err = filter.apply(&mut img, 0, 3).unwrap_err();
            assert!(
                matches!(err, FilterError::InvalidDimensions { width: 0, .. }),
                "{} returned {:?}",
                filter.name(),
                err
            );
            assert_eq!(img, original, "{} touched the buffer", filter.name());
        }
    }

    #[test]
    fn test_every_filter_rejects_length_mismatch() {
        for filter in ALL {
            let mut img = sample();
            img.pop();
            let original = img.clone();
            assert!(matches!(
                filter.apply(&mut img, 4, 3),
                Err(FilterError::InvalidParameter(_))
            ));
            assert_eq!(img, original);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = ALL.iter().map(Filter::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL.len());
    }
}
