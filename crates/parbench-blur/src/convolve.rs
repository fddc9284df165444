//! Kernel convolution over the interior of a raster.
//!
//! Every interior row is independent, so the schedules only differ in how
//! rows are handed to rayon workers: one contiguous block per worker decided
//! up front (`Static`), or one row at a time as workers become free
//! (`Dynamic`). The arithmetic per sample is identical, so all schedules
//! produce the same bytes.

use core::fmt;
use core::str::FromStr;

use rayon::prelude::*;
use serde::Serialize;

use crate::kernel::Kernel;
use crate::raster::Raster;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Schedule {
    Sequential,
    Static,
    Dynamic,
}

impl Schedule {
    pub const ALL: [Schedule; 3] = [Schedule::Sequential, Schedule::Static, Schedule::Dynamic];

    pub fn name(self) -> &'static str {
        match self {
            Schedule::Sequential => "sequential",
            Schedule::Static => "static",
            Schedule::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Schedule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sch| sch.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown schedule '{s}' (expected sequential, static or dynamic)"))
    }
}

/// Convolve `src` with `kernel`.
///
/// Pixels closer than the kernel radius to an edge are copied from `src`.
/// A raster smaller than the kernel comes back as an unchanged copy.
pub fn convolve(src: &Raster, kernel: &Kernel, schedule: Schedule) -> Raster {
    let mut out = src.clone();
    let r = kernel.radius();
    let (width, height) = (src.width(), src.height());
    if width < kernel.size() || height < kernel.size() {
        return out;
    }

    let stride = src.stride();
    let rows = height - 2 * r;
    let interior = &mut out.pixels_mut()[r * stride..(height - r) * stride];

    log::debug!(
        "[blur] {}x{}x{} kernel={} schedule={} threads={}",
        width,
        height,
        src.channels(),
        kernel.size(),
        schedule,
        rayon::current_num_threads()
    );

    match schedule {
        Schedule::Sequential => {
            for (i, row) in interior.chunks_mut(stride).enumerate() {
                blur_row(src, kernel, r + i, row);
            }
        }
        Schedule::Static => {
            let block = rows.div_ceil(rayon::current_num_threads().max(1));
            interior
                .par_chunks_mut(block * stride)
                .enumerate()
                .for_each(|(b, chunk)| {
                    for (i, row) in chunk.chunks_mut(stride).enumerate() {
                        blur_row(src, kernel, r + b * block + i, row);
                    }
                });
        }
        Schedule::Dynamic => {
            interior
                .par_chunks_mut(stride)
                .with_max_len(1)
                .enumerate()
                .for_each(|(i, row)| blur_row(src, kernel, r + i, row));
        }
    }

    out
}

/// Fill the interior samples of output row `y`.
fn blur_row(src: &Raster, kernel: &Kernel, y: usize, row: &mut [u8]) {
    let r = kernel.radius();
    let size = kernel.size();
    let channels = src.channels();

    for x in r..src.width() - r {
        for c in 0..channels {
            let mut sum = 0.0;
            for ky in 0..size {
                for kx in 0..size {
                    let sample = src.at(x + kx - r, y + ky - r, c);
                    sum += f64::from(sample) * kernel.weight(ky, kx);
                }
            }
            row[x * channels + c] = sum.clamp(0.0, 255.0) as u8;
        }
    }
}
