//! Compositing module
//!
//! Sizing, tiling and cropping. The tile is scaled to the smallest edge that still
//! covers the target before it is repeated, so the canvas stays close to the output size.

mod crop;
mod geometry;
mod tiling;

pub use crop::crop_to_target;
pub use geometry::effective_tile_size;
pub use tiling::{resize_tile, tile_canvas};
