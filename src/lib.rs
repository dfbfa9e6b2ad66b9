//! Canvas Filters
//!
//! Deterministic, in-place image filters for raw RGBA pixel buffers such
//! as the `ImageData` of a browser canvas, with WASM bindings for
//! JavaScript and optional Python bindings via PyO3.
//!
//! ## Image Format
//! - Flat `&mut [u8]`, row-major, top-to-bottom
//! - 4 bytes per pixel: red, green, blue, alpha
//! - Length must equal `width * height * 4`
//!
//! The caller owns the memory. Filters borrow it for the duration of the
//! call, rewrite the color channels and leave alpha untouched. Invalid
//! input is reported as a [`FilterError`] before anything is written.
//!
//! ## Example
//!
//! ```rust
//! use canvas_filters::filters::{grayscale, mosaic};
//!
//! let mut pixels = vec![255, 0, 0, 255, 0, 0, 255, 255];
//! grayscale(&mut pixels, 2, 1).unwrap();
//! assert_eq!(&pixels[0..4], &[77, 77, 77, 255]);
//!
//! assert!(mosaic(&mut pixels, 2, 1, 0).is_err());
//! ```
//!
//! ## Features
//! - `parallel` (default): per-pixel filters run on the rayon thread pool
//! - `wasm`: wasm-bindgen exports (`apply_grayscale`, `apply_gaussian`, ...)
//! - `python`: `canvas_filters` extension module operating on numpy arrays

pub mod buffer;
pub mod error;
pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use buffer::RgbaBuffer;
pub use error::{FilterError, FilterResult};
pub use filters::Filter;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::PyReadwriteArray3;
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::FilterError;
    use crate::filters::Filter;

    impl From<FilterError> for PyErr {
        fn from(err: FilterError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    /// Run `filter` over a (height, width, 4) uint8 array in place.
    fn apply_in_place(mut image: PyReadwriteArray3<'_, u8>, filter: Filter) -> PyResult<()> {
        let mut view = image.as_array_mut();
        let (height, width, channels) = view.dim();
        if channels != 4 {
            return Err(PyValueError::new_err(format!(
                "expected an RGBA image with 4 channels, got {}",
                channels
            )));
        }
        let data = view
            .as_slice_mut()
            .ok_or_else(|| PyValueError::new_err("image must be C-contiguous"))?;
        filter.apply(data, width, height)?;
        Ok(())
    }

    // ========================================================================
    // Pixel-wise Filters
    // ========================================================================

    /// Convert RGBA u8 image to grayscale in place.
    ///
    /// Output has R=G=B=gray, alpha preserved.
    #[pyfunction]
    pub fn grayscale<'py>(image: PyReadwriteArray3<'py, u8>) -> PyResult<()> {
        apply_in_place(image, Filter::Grayscale)
    }

    #[pyfunction]
    pub fn sepia<'py>(image: PyReadwriteArray3<'py, u8>) -> PyResult<()> {
        apply_in_place(image, Filter::Sepia)
    }

    #[pyfunction]
    pub fn invert<'py>(image: PyReadwriteArray3<'py, u8>) -> PyResult<()> {
        apply_in_place(image, Filter::Invert)
    }

    /// Rotate hue by `degrees` (wraps around).
    #[pyfunction]
    pub fn hue_rotation<'py>(image: PyReadwriteArray3<'py, u8>, degrees: f32) -> PyResult<()> {
        apply_in_place(image, Filter::HueRotation { degrees })
    }

    /// Scale saturation: 0.0 = gray, 1.0 = unchanged.
    #[pyfunction]
    pub fn saturation<'py>(image: PyReadwriteArray3<'py, u8>, factor: f32) -> PyResult<()> {
        apply_in_place(image, Filter::Saturation { factor })
    }

    #[pyfunction]
    pub fn brightness<'py>(image: PyReadwriteArray3<'py, u8>, amount: i32) -> PyResult<()> {
        apply_in_place(image, Filter::Brightness { amount })
    }

    // ========================================================================
    // Neighborhood Filters
    // ========================================================================

    #[pyfunction]
    #[pyo3(signature = (image, kernel_size=5, sigma=1.0))]
    pub fn gaussian_blur<'py>(
        image: PyReadwriteArray3<'py, u8>,
        kernel_size: usize,
        sigma: f32,
    ) -> PyResult<()> {
        apply_in_place(image, Filter::GaussianBlur { kernel_size, sigma })
    }

    #[pyfunction]
    pub fn mosaic<'py>(image: PyReadwriteArray3<'py, u8>, block_size: usize) -> PyResult<()> {
        apply_in_place(image, Filter::Mosaic { block_size })
    }

    #[pyfunction]
    #[pyo3(signature = (image, angle=135.0, depth=1.0))]
    pub fn emboss<'py>(image: PyReadwriteArray3<'py, u8>, angle: f32, depth: f32) -> PyResult<()> {
        apply_in_place(image, Filter::Emboss { angle, depth })
    }

    #[pyfunction]
    #[pyo3(signature = (image, radius=2))]
    pub fn kuwahara<'py>(image: PyReadwriteArray3<'py, u8>, radius: usize) -> PyResult<()> {
        apply_in_place(image, Filter::Kuwahara { radius })
    }

    /// Canvas filters extension module
    #[pymodule]
    pub fn canvas_filters(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(grayscale, m)?)?;
        m.add_function(wrap_pyfunction!(sepia, m)?)?;
        m.add_function(wrap_pyfunction!(invert, m)?)?;
        m.add_function(wrap_pyfunction!(hue_rotation, m)?)?;
        m.add_function(wrap_pyfunction!(saturation, m)?)?;
        m.add_function(wrap_pyfunction!(brightness, m)?)?;

        m.add_function(wrap_pyfunction!(gaussian_blur, m)?)?;
        m.add_function(wrap_pyfunction!(mosaic, m)?)?;
        m.add_function(wrap_pyfunction!(emboss, m)?)?;
        m.add_function(wrap_pyfunction!(kuwahara, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::canvas_filters;
