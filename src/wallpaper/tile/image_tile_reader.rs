//! Tile reader implementation using the image library.
//!
//! Any format the `image` crate can sniff from the file contents is accepted
//! (PNG, JPEG, WebP, TIFF, BMP, GIF, ...). The decoded raster is always converted
//! to RGBA8 so later stages work on a single pixel layout.

use std::io::Cursor;

use image::{ImageReader, Limits, RgbaImage};
use tracing::debug;

use crate::wallpaper::common::error::{Result, WallpaperError};
use crate::wallpaper::tile::reader::TileReader;

/// Tile reader backed by `image::ImageReader`.
///
/// Decoding is unbounded by default: the tile is scaled down to the effective size right
/// after decoding, so very large sources are expected input.
#[derive(Debug, Clone)]
pub struct ImageTileReader {
    limits: Limits,
}

impl ImageTileReader {
    pub fn new() -> Self {
        Self {
            limits: Limits::no_limits(),
        }
    }

    /// Reader that refuses tiles exceeding `limits`.
    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }
}

impl Default for ImageTileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TileReader for ImageTileReader {
    /// Decodes a tile from the raw bytes of an image file.
    ///
    /// Sources without an alpha channel gain a fully opaque one; sources that already
    /// carry alpha keep it untouched.
    fn read_tile(&self, data: &[u8]) -> Result<RgbaImage> {
        debug!("Decoding tile image, {} bytes", data.len());

        let mut reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| WallpaperError::DecodeError(e.to_string()))?;
        reader.limits(self.limits.clone());

        let decoded = reader
            .decode()
            .map_err(|e| WallpaperError::DecodeError(e.to_string()))?;

        debug!(
            "Decoded tile: {}x{} ({:?})",
            decoded.width(),
            decoded.height(),
            decoded.color()
        );

        Ok(decoded.into_rgba8())
    }
}
