use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while constructing a tagger or loading its inputs.
///
/// Pointer and hover handlers never return these; they clamp or ignore
/// whatever they are given.
#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("container width must be greater than zero")]
    InvalidContainer,

    #[error("thumbnail size must be non-zero on both axes, got {width}x{height}")]
    InvalidThumbnail { width: u32, height: u32 },

    #[error("image '{url}' has unusable dimensions {width}x{height}")]
    InvalidImageDimensions { url: String, width: u32, height: u32 },

    #[error("failed to parse {} from {}: {}", .what, .path.display(), .source)]
    Parse {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read image {}: {}", .path.display(), .source)]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TaggerError>;
