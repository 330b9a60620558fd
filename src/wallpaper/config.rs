//! Wallpaper configuration types

use image::imageops::FilterType;

use crate::wallpaper::target::{Anchor, TargetSpec, TileCount};

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

/// Configuration for building one wallpaper
#[derive(Debug, Clone)]
pub struct WallpaperConfig {
    /// Tile repetitions along each axis
    pub tiles: TileCount,
    /// Exact output size and the DPI written to the file
    pub target: TargetSpec,
    /// Which region of the canvas is kept when cropping
    pub anchor: Anchor,
    /// Reject tiles whose width differs from their height
    pub square_check: bool,
    /// Resampling filter used when scaling the tile
    pub filter: FilterType,
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
    /// Compression method for TIFF output
    pub tiff_compression: TiffCompression,
    /// Apply horizontal differencing before TIFF compression
    pub tiff_predictor: bool,
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            tiles: TileCount::default(),
            target: TargetSpec::default(),
            anchor: Anchor::default(),
            square_check: true,
            filter: FilterType::Lanczos3,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            tiff_compression: TiffCompression::None,
            tiff_predictor: false,
        }
    }
}

impl WallpaperConfig {
    pub fn builder() -> WallpaperConfigBuilder {
        WallpaperConfigBuilder::default()
    }
}

/// Builder for WallpaperConfig
#[derive(Default)]
pub struct WallpaperConfigBuilder {
    tiles: Option<TileCount>,
    target: Option<TargetSpec>,
    anchor: Option<Anchor>,
    square_check: Option<bool>,
    filter: Option<FilterType>,
    jpeg_quality: Option<u8>,
    tiff_compression: Option<TiffCompression>,
    tiff_predictor: Option<bool>,
}

impl WallpaperConfigBuilder {
    pub fn tiles(mut self, tiles: TileCount) -> Self {
        self.tiles = Some(tiles);
        self
    }

    pub fn target(mut self, target: TargetSpec) -> Self {
        self.target = Some(target);
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn square_check(mut self, enable: bool) -> Self {
        self.square_check = Some(enable);
        self
    }

    pub fn filter(mut self, filter: FilterType) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }

    pub fn tiff_compression(mut self, compression: TiffCompression) -> Self {
        self.tiff_compression = Some(compression);
        self
    }

    pub fn tiff_predictor(mut self, enable: bool) -> Self {
        self.tiff_predictor = Some(enable);
        self
    }

    pub fn build(self) -> WallpaperConfig {
        let default = WallpaperConfig::default();
        WallpaperConfig {
            tiles: self.tiles.unwrap_or(default.tiles),
            target: self.target.unwrap_or(default.target),
            anchor: self.anchor.unwrap_or(default.anchor),
            square_check: self.square_check.unwrap_or(default.square_check),
            filter: self.filter.unwrap_or(default.filter),
            jpeg_quality: self
                .jpeg_quality
                .unwrap_or(default.jpeg_quality)
                .clamp(1, 100),
            tiff_compression: self.tiff_compression.unwrap_or(default.tiff_compression),
            tiff_predictor: self.tiff_predictor.unwrap_or(default.tiff_predictor),
        }
    }
}
