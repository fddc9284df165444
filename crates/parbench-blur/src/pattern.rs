//! Synthetic RGB test images.

use core::fmt;
use core::str::FromStr;

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::raster::Raster;

/// Standard benchmark sizes, from VGA up to a 4K-class frame.
pub const STANDARD_SIZES: [Size; 4] = [
    Size::new(640, 480),
    Size::new(1024, 768),
    Size::new(2560, 1560),
    Size::new(4096, 3072),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Grey ramp along the diagonal.
    Gradient,
    /// Uniform random bytes.
    Noise,
    /// Black and white squares.
    Checkerboard,
    /// Red down, green across, blue along the diagonal.
    Colorful,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [
        Pattern::Gradient,
        Pattern::Noise,
        Pattern::Checkerboard,
        Pattern::Colorful,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Gradient => "gradient",
            Pattern::Noise => "noise",
            Pattern::Checkerboard => "checkerboard",
            Pattern::Colorful => "colorful",
        }
    }

    /// Render a `width` x `height` RGB raster. `seed` only affects `Noise`.
    pub fn render(self, width: usize, height: usize, seed: u64) -> Raster {
        let mut pixels = Vec::with_capacity(width * height * 3);

        match self {
            Pattern::Gradient => {
                let span = (width + height).saturating_sub(2).max(1);
                for i in 0..height {
                    for j in 0..width {
                        let v = (255 * (i + j) / span) as u8;
                        pixels.extend_from_slice(&[v, v, v]);
                    }
                }
            }
            Pattern::Noise => {
                pixels.resize(width * height * 3, 0);
                ChaCha8Rng::seed_from_u64(seed).fill_bytes(&mut pixels);
            }
            Pattern::Checkerboard => {
                let block = 32.min(width / 8).min(height / 8).max(1);
                for i in 0..height {
                    for j in 0..width {
                        let v = if (i / block + j / block) % 2 == 0 { 255 } else { 0 };
                        pixels.extend_from_slice(&[v, v, v]);
                    }
                }
            }
            Pattern::Colorful => {
                for i in 0..height {
                    for j in 0..width {
                        let r = (255 * i / height) as u8;
                        let g = (255 * j / width) as u8;
                        let b = (255 * (i + j) / (width + height)) as u8;
                        pixels.extend_from_slice(&[r, g, b]);
                    }
                }
            }
        }

        Raster::from_rgb(width, height, pixels)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown pattern '{s}' (expected gradient, noise, checkerboard or colorful)")
            })
    }
}

/// Image dimensions written as `WIDTHxHEIGHT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid size '{s}' (use WIDTHxHEIGHT, e.g. 1920x1080)");
        let (w, h) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: usize = w.trim().parse().map_err(|_| invalid())?;
        let height: usize = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        for pattern in Pattern::ALL {
            let img = pattern.render(13, 7, 1);
            assert_eq!((img.width(), img.height(), img.channels()), (13, 7, 3));
            assert_eq!(img.pixels().len(), 13 * 7 * 3);
        }
    }

    #[test]
    fn test_gradient_corners() {
        let img = Pattern::Gradient.render(10, 6, 0);
        assert_eq!(img.at(0, 0, 0), 0);
        assert_eq!(img.at(9, 5, 0), 255);
    }

    #[test]
    fn test_checkerboard_alternates() {
        let img = Pattern::Checkerboard.render(64, 64, 0);
        // 64 / 8 = 8 pixel squares
        assert_eq!(img.at(0, 0, 0), 255);
        assert_eq!(img.at(8, 0, 0), 0);
        assert_eq!(img.at(8, 8, 0), 255);
    }

    #[test]
    fn test_noise_is_seeded() {
        assert_eq!(Pattern::Noise.render(8, 8, 3), Pattern::Noise.render(8, 8, 3));
        assert_ne!(Pattern::Noise.render(8, 8, 3), Pattern::Noise.render(8, 8, 4));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!("1920x1080".parse::<Size>().unwrap(), Size::new(1920, 1080));
        assert_eq!("64X48".parse::<Size>().unwrap(), Size::new(64, 48));
        assert!("1920".parse::<Size>().is_err());
        assert!("0x10".parse::<Size>().is_err());
        assert!("axb".parse::<Size>().is_err());
        assert_eq!(Size::new(3, 4).to_string(), "3x4");
    }

    #[test]
    fn test_parse_pattern() {
        assert_eq!("noise".parse::<Pattern>().unwrap(), Pattern::Noise);
        assert!("stripes".parse::<Pattern>().is_err());
    }
}
