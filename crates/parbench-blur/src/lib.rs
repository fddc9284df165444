//! Gaussian blur by direct 2-D convolution.
//!
//! The convolution itself lives in [`convolve`]; [`Raster`] wraps the pixel
//! buffer and its image-file form, [`pattern`] makes synthetic inputs.

pub mod convolve;
pub mod error;
pub mod kernel;
pub mod pattern;
pub mod raster;

pub use convolve::{convolve, Schedule};
pub use error::{BlurError, Result};
pub use kernel::Kernel;
pub use pattern::{Pattern, Size, STANDARD_SIZES};
pub use raster::Raster;

/// Blur `src` with the Gaussian preset of side `kernel_size`.
pub fn gaussian_blur(src: &Raster, kernel_size: usize, schedule: Schedule) -> Result<Raster> {
    let kernel = Kernel::gaussian(kernel_size)?;
    Ok(convolve(src, &kernel, schedule))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_blur_rejects_even_kernel() {
        let src = Raster::filled(8, 8, 1, 0).unwrap();
        assert!(matches!(
            gaussian_blur(&src, 2, Schedule::Sequential),
            Err(BlurError::UnsupportedKernel(2))
        ));
    }

    #[test]
    fn test_blur_smooths_checkerboard() {
        let src = Pattern::Checkerboard.render(64, 64, 0);
        let out = gaussian_blur(&src, 3, Schedule::Static).unwrap();
        // On a square edge the 3x3 footprint straddles black and white.
        let v = out.at(8, 4, 0);
        assert!(v > 0 && v < 255, "edge sample {v}");
        // Deep inside a square nothing changes.
        assert_eq!(out.at(3, 3, 0), 255);
    }
}
