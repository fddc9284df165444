//! Gaussian convolution kernels.

use crate::error::{BlurError, Result};

#[rustfmt::skip]
const GAUSSIAN_3X3: [f64; 9] = [
    1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0,
    2.0 / 16.0, 4.0 / 16.0, 2.0 / 16.0,
    1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0,
];

#[rustfmt::skip]
const GAUSSIAN_5X5: [f64; 25] = [
    1.0 / 273.0, 4.0 / 273.0, 7.0 / 273.0, 4.0 / 273.0, 1.0 / 273.0,
    4.0 / 273.0, 16.0 / 273.0, 26.0 / 273.0, 16.0 / 273.0, 4.0 / 273.0,
    7.0 / 273.0, 26.0 / 273.0, 41.0 / 273.0, 26.0 / 273.0, 7.0 / 273.0,
    4.0 / 273.0, 16.0 / 273.0, 26.0 / 273.0, 16.0 / 273.0, 4.0 / 273.0,
    1.0 / 273.0, 4.0 / 273.0, 7.0 / 273.0, 4.0 / 273.0, 1.0 / 273.0,
];

// sigma ~= 0.84
#[rustfmt::skip]
const GAUSSIAN_7X7: [f64; 49] = [
    0.00000067, 0.00002292, 0.00019117, 0.00038771, 0.00019117, 0.00002292, 0.00000067,
    0.00002292, 0.00078633, 0.00655965, 0.01330373, 0.00655965, 0.00078633, 0.00002292,
    0.00019117, 0.00655965, 0.05472157, 0.11098164, 0.05472157, 0.00655965, 0.00019117,
    0.00038771, 0.01330373, 0.11098164, 0.22508352, 0.11098164, 0.01330373, 0.00038771,
    0.00019117, 0.00655965, 0.05472157, 0.11098164, 0.05472157, 0.00655965, 0.00019117,
    0.00002292, 0.00078633, 0.00655965, 0.01330373, 0.00655965, 0.00078633, 0.00002292,
    0.00000067, 0.00002292, 0.00019117, 0.00038771, 0.00019117, 0.00002292, 0.00000067,
];

/// Square kernel of odd side length, weights stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Sizes with a built-in Gaussian preset.
    pub const SIZES: [usize; 3] = [3, 5, 7];

    /// The Gaussian preset for `size` (3, 5 or 7).
    pub fn gaussian(size: usize) -> Result<Self> {
        let weights = match size {
            3 => GAUSSIAN_3X3.to_vec(),
            5 => GAUSSIAN_5X5.to_vec(),
            7 => GAUSSIAN_7X7.to_vec(),
            other => return Err(BlurError::UnsupportedKernel(other)),
        };
        Ok(Self { size, weights })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the centre tap to the edge.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Weight at row `ky`, column `kx`.
    #[inline]
    pub fn weight(&self, ky: usize, kx: usize) -> f64 {
        self.weights[ky * self.size + kx]
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_normalised() {
        for size in Kernel::SIZES {
            let k = Kernel::gaussian(size).unwrap();
            assert_eq!(k.size(), size);
            assert_eq!(k.radius(), size / 2);
            assert!((k.sum() - 1.0).abs() < 1e-3, "size {size} sums to {}", k.sum());
        }
    }

    #[test]
    fn test_presets_are_symmetric() {
        for size in Kernel::SIZES {
            let k = Kernel::gaussian(size).unwrap();
            for y in 0..size {
                for x in 0..size {
                    assert_eq!(k.weight(y, x), k.weight(x, y));
                    assert_eq!(k.weight(y, x), k.weight(size - 1 - y, size - 1 - x));
                }
            }
        }
    }

    #[test]
    fn test_unsupported_size() {
        assert!(matches!(Kernel::gaussian(4), Err(BlurError::UnsupportedKernel(4))));
        assert!(Kernel::gaussian(9).is_err());
    }
}
