//! Wallpaper compositing module
//!
//! This module turns a seamless square tile into a wallpaper of an exact size, with
//! separate modules for tile loading, compositing, output encoding and orchestration.

pub mod common;
pub mod compose;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod target;
pub mod tile;

pub use common::{Result, WallpaperError};

pub use target::{
    Anchor, DEFAULT_DPI, PRESETS, Preset, TargetSpec, TileCount, parse_size, parse_tiles,
};

pub use tile::{ImageTileReader, TileReader};

pub use compose::{crop_to_target, effective_tile_size, resize_tile, tile_canvas};

pub use config::{TiffCompression, WallpaperConfig, WallpaperConfigBuilder};

pub use output::{OutputFormat, StandardWallpaperWriter, WallpaperWriter, finalize};

pub use pipeline::{WallpaperPipeline, make_wallpaper};
