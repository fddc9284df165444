use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlurError {
    #[error("unsupported kernel size {0} (expected 3, 5 or 7)")]
    UnsupportedKernel(usize),

    #[error("unsupported channel count {0} (expected 1 to 4)")]
    UnsupportedChannels(usize),

    #[error("{width}x{height}x{channels} raster needs {expected} bytes, got {actual}")]
    SizeMismatch {
        width: usize,
        height: usize,
        channels: usize,
        expected: usize,
        actual: usize,
    },

    #[error("image codec: {0}")]
    Image(#[from] image::ImageError),

    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BlurError>;
