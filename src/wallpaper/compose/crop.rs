use image::RgbaImage;
use image::imageops;
use tracing::debug;

use crate::wallpaper::common::error::{Result, WallpaperError};
use crate::wallpaper::target::Anchor;

/// Cuts a `target_w`x`target_h` window out of `image`, positioned by `anchor`.
///
/// A canvas smaller than the target means the sizing step is broken, so that case is
/// reported as [`WallpaperError::InternalSizeError`] rather than a user error.
pub fn crop_to_target(
    image: &RgbaImage,
    target_w: u32,
    target_h: u32,
    anchor: Anchor,
) -> Result<RgbaImage> {
    let (width, height) = image.dimensions();
    if width < target_w || height < target_h {
        return Err(WallpaperError::InternalSizeError {
            width,
            height,
            target_width: target_w,
            target_height: target_h,
        });
    }

    let (left, top) = anchor.offset((width, height), (target_w, target_h));
    debug!(
        "Cropping {}x{} at ({}, {}) anchored {}",
        target_w, target_h, left, top, anchor
    );

    Ok(imageops::crop_imm(image, left, top, target_w, target_h).to_image())
}
