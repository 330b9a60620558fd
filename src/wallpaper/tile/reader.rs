use image::RgbaImage;

use crate::wallpaper::common::error::Result;

pub trait TileReader {
    fn read_tile(&self, data: &[u8]) -> Result<RgbaImage>;
}
