use image::{ImageError, ImageFormat};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode {path} as {format:?}: {source}")]
    Image {
        path: PathBuf,
        format: ImageFormat,
        source: ImageError,
    },

    #[error("unsupported image extension {extension:?} for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },
}
