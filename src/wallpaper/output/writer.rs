use std::io::Write;

use image::DynamicImage;

use crate::wallpaper::common::error::Result;
use crate::wallpaper::config::WallpaperConfig;
use crate::wallpaper::output::format::OutputFormat;

pub trait WallpaperWriter {
    fn write_wallpaper(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        output: &mut dyn Write,
        config: &WallpaperConfig,
    ) -> Result<()>;
}
