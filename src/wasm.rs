//! WebAssembly exports for the canvas filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. The pixel
//! buffer is a `Uint8Array` / `Uint8ClampedArray` view of canvas
//! `ImageData`; wasm-bindgen copies the modified bytes back into it when
//! the call returns.
//!
//! Integer arguments arrive as JS numbers truncated to `i32`. Negative or
//! zero sizes are reported as errors (thrown `Error` objects on the JS
//! side) and leave the buffer unchanged.
//!
//! Build with `--no-default-features --features wasm`; rayon needs
//! threads that `wasm32-unknown-unknown` doesn't provide.

use wasm_bindgen::prelude::*;

use crate::buffer::{checked_dimensions, positive_size};
use crate::error::{FilterError, FilterResult};
use crate::filters::Filter;

fn run(filter: FilterResult<Filter>, data: &mut [u8], width: i32, height: i32) -> Result<(), JsError> {
    let (width, height) = checked_dimensions(width, height).map_err(to_js)?;
    let filter = filter.map_err(to_js)?;
    filter.apply(data, width, height).map_err(to_js)
}

fn to_js(err: FilterError) -> JsError {
    JsError::new(&err.to_string())
}

// ============================================================================
// Pixel-wise filters
// ============================================================================

/// Convert to grayscale.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
#[wasm_bindgen]
pub fn apply_grayscale(data: &mut [u8], width: i32, height: i32) -> Result<(), JsError> {
    run(Ok(Filter::Grayscale), data, width, height)
}

/// Apply a sepia tone.
#[wasm_bindgen]
pub fn apply_sepia(data: &mut [u8], width: i32, height: i32) -> Result<(), JsError> {
    run(Ok(Filter::Sepia), data, width, height)
}

/// Invert colors.
#[wasm_bindgen]
pub fn apply_invert(data: &mut [u8], width: i32, height: i32) -> Result<(), JsError> {
    run(Ok(Filter::Invert), data, width, height)
}

/// Rotate hue by `angle` degrees.
#[wasm_bindgen]
pub fn apply_hue_rotation(data: &mut [u8], width: i32, height: i32, angle: f32) -> Result<(), JsError> {
    run(Ok(Filter::HueRotation { degrees: angle }), data, width, height)
}

/// Scale saturation; 1.0 leaves the image unchanged.
#[wasm_bindgen]
pub fn apply_saturation(data: &mut [u8], width: i32, height: i32, factor: f32) -> Result<(), JsError> {
    run(Ok(Filter::Saturation { factor }), data, width, height)
}

/// Add `amount` to every color channel.
#[wasm_bindgen]
pub fn apply_brightness(data: &mut [u8], width: i32, height: i32, amount: i32) -> Result<(), JsError> {
    run(Ok(Filter::Brightness { amount }), data, width, height)
}

// ============================================================================
// Neighborhood filters
// ============================================================================

/// Gaussian blur with a `kernel_size x kernel_size` kernel.
#[wasm_bindgen]
pub fn apply_gaussian(
    data: &mut [u8],
    width: i32,
    height: i32,
    kernel_size: i32,
    sigma: f32,
) -> Result<(), JsError> {
    let filter = positive_size("kernel size", kernel_size)
        .map(|kernel_size| Filter::GaussianBlur { kernel_size, sigma });
    run(filter, data, width, height)
}

/// Pixelate into `block_size` blocks.
#[wasm_bindgen]
pub fn apply_mosaic(data: &mut [u8], width: i32, height: i32, block_size: i32) -> Result<(), JsError> {
    let filter = positive_size("block size", block_size).map(|block_size| Filter::Mosaic { block_size });
    run(filter, data, width, height)
}

/// Emboss with light from `angle` degrees.
#[wasm_bindgen]
pub fn apply_emboss(
    data: &mut [u8],
    width: i32,
    height: i32,
    angle: f32,
    depth: f32,
) -> Result<(), JsError> {
    run(Ok(Filter::Emboss { angle, depth }), data, width, height)
}

/// Kuwahara smoothing with quadrants of `radius` pixels.
#[wasm_bindgen]
pub fn apply_kuwahara(data: &mut [u8], width: i32, height: i32, radius: i32) -> Result<(), JsError> {
    let filter = positive_size("radius", radius).map(|radius| Filter::Kuwahara { radius });
    run(filter, data, width, height)
}
