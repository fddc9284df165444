//! Interleaved 8-bit images and their on-disk form.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, ImageFormat};

use crate::error::{BlurError, Result};

/// JPEG quality used by [`Raster::save`].
pub const JPEG_QUALITY: u8 = 100;

/// JPEG quality for generated benchmark inputs.
pub const INPUT_JPEG_QUALITY: u8 = 95;

/// Row-major image with `channels` interleaved bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    channels: usize,
    pixels: Vec<u8>,
}

impl Raster {
    pub fn new(width: usize, height: usize, channels: usize, pixels: Vec<u8>) -> Result<Self> {
        if !(1..=4).contains(&channels) {
            return Err(BlurError::UnsupportedChannels(channels));
        }

        let expected = width * height * channels;
        if pixels.len() != expected {
            return Err(BlurError::SizeMismatch {
                width,
                height,
                channels,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// A raster with every byte set to `value`.
    pub fn filled(width: usize, height: usize, channels: usize, value: u8) -> Result<Self> {
        Self::new(width, height, channels, vec![value; width * height * channels])
    }

    pub(crate) fn from_rgb(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height * 3);
        Self {
            width,
            height,
            channels: 3,
            pixels,
        }
    }

    /// Decode an image file, keeping its channel count (as 8-bit samples).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)?;
        let (width, height) = (img.width() as usize, img.height() as usize);
        let channels = img.color().channel_count() as usize;

        let (channels, pixels) = match channels {
            1 => (1, img.into_luma8().into_raw()),
            2 => (2, img.into_luma_alpha8().into_raw()),
            3 => (3, img.into_rgb8().into_raw()),
            _ => (4, img.into_rgba8().into_raw()),
        };
        log::debug!(
            "[raster] loaded {} ({}x{}, {} channels)",
            path.display(),
            width,
            height,
            channels
        );

        Self::new(width, height, channels, pixels)
    }

    /// Encode to `path`; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_with_quality(path, JPEG_QUALITY)
    }

    /// Like [`Raster::save`], with an explicit JPEG quality (1-100).
    /// Other formats ignore `quality`.
    pub fn save_with_quality(&self, path: impl AsRef<Path>, quality: u8) -> Result<()> {
        let path = path.as_ref();
        let color = self.color_type();
        let (width, height) = (self.width as u32, self.height as u32);

        if matches!(ImageFormat::from_path(path), Ok(ImageFormat::Jpeg)) {
            let mut writer = BufWriter::new(File::create(path)?);
            JpegEncoder::new_with_quality(&mut writer, quality).encode(
                &self.pixels,
                width,
                height,
                color.into(),
            )?;
            writer.flush()?;
        } else {
            image::save_buffer(path, &self.pixels, width, height, color)?;
        }

        log::debug!("[raster] wrote {}", path.display());
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width * self.channels
    }

    /// Sample of channel `c` at `(x, y)`.
    pub fn at(&self, x: usize, y: usize, c: usize) -> u8 {
        self.pixels[(y * self.width + x) * self.channels + c]
    }

    fn color_type(&self) -> ColorType {
        match self.channels {
            1 => ColorType::L8,
            2 => ColorType::La8,
            3 => ColorType::Rgb8,
            _ => ColorType::Rgba8,
        }
    }
}
