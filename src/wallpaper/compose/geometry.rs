use crate::wallpaper::common::error::{Result, WallpaperError};

/// Smallest tile edge `s` with `tiles_x * s >= target_w` and `tiles_y * s >= target_h`.
///
/// Equivalent to `ceil(max(target_w / tiles_x, target_h / tiles_y))`, computed in integers.
pub fn effective_tile_size(target_w: u32, target_h: u32, tiles_x: u32, tiles_y: u32) -> Result<u32> {
    if tiles_x == 0 || tiles_y == 0 {
        return Err(WallpaperError::InvalidValue(format!(
            "Tiles must be positive integers, got {tiles_x}x{tiles_y}"
        )));
    }
    Ok(target_w.div_ceil(tiles_x).max(target_h.div_ceil(tiles_y)))
}
