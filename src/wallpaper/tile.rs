//! Tile loading module
//!
//! Decodes the source tile and normalizes it to 8-bit RGBA, whatever the source format.

mod image_tile_reader;
mod reader;

pub use image_tile_reader::ImageTileReader;
pub use reader::TileReader;
