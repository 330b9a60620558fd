use image::imageops::{self, FilterType};
use image::{GenericImage, RgbaImage};
use tracing::debug;

use crate::wallpaper::common::error::{Result, WallpaperError};
use crate::wallpaper::target::TileCount;

/// Resamples `tile` to an `edge`x`edge` square. Returns the tile untouched when it
/// already has that size.
pub fn resize_tile(tile: RgbaImage, edge: u32, filter: FilterType) -> RgbaImage {
    if tile.dimensions() == (edge, edge) {
        debug!("Tile already {}x{}, skipping resize", edge, edge);
        return tile;
    }
    debug!(
        "Resizing tile {}x{} -> {}x{} with {:?}",
        tile.width(),
        tile.height(),
        edge,
        edge,
        filter
    );
    imageops::resize(&tile, edge, edge, filter)
}

/// Repeats `tile` on a transparent canvas of exactly `tile size * tiles`.
pub fn tile_canvas(tile: &RgbaImage, tiles: TileCount) -> Result<RgbaImage> {
    let (tw, th) = tile.dimensions();
    let too_large = || {
        WallpaperError::InvalidValue(format!(
            "canvas of {tw}x{th} tiles repeated {tiles} overflows"
        ))
    };
    let width = tw.checked_mul(tiles.x).ok_or_else(too_large)?;
    let height = th.checked_mul(tiles.y).ok_or_else(too_large)?;

    debug!("Allocating canvas {}x{}", width, height);
    let mut canvas = RgbaImage::new(width, height);

    for row in 0..tiles.y {
        for col in 0..tiles.x {
            canvas
                .copy_from(tile, col * tw, row * th)
                .map_err(|e| WallpaperError::InvalidValue(e.to_string()))?;
        }
    }

    Ok(canvas)
}
