use thiserror::Error;

#[derive(Error, Debug)]
pub enum WallpaperError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Failed to decode tile image: {0}")]
    DecodeError(String),

    #[error(
        "Internal error: image too small to crop. Have {width}x{height}, need {target_width}x{target_height}"
    )]
    InternalSizeError {
        width: u32,
        height: u32,
        target_width: u32,
        target_height: u32,
    },

    #[error("Failed to encode output image: {0}")]
    EncodeError(String),
}

pub type Result<T> = std::result::Result<T, WallpaperError>;
