//! Wallpaper pipeline module
//!
//! Orchestrates decode, validation, sizing, tiling, cropping and encoding in order.

mod tile_to_wallpaper;

#[cfg(test)]
mod tests;

pub use tile_to_wallpaper::{WallpaperPipeline, make_wallpaper};
