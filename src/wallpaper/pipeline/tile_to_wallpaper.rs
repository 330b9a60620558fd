use std::io::Write;
use std::path::Path;

use image::RgbaImage;
use tracing::{info, instrument};

use crate::wallpaper::{
    common::error::{Result, WallpaperError},
    compose::{crop_to_target, effective_tile_size, resize_tile, tile_canvas},
    config::WallpaperConfig,
    output::{OutputFormat, StandardWallpaperWriter, WallpaperWriter, finalize},
    tile::{ImageTileReader, TileReader},
};

pub struct WallpaperPipeline<R: TileReader, W: WallpaperWriter> {
    reader: R,
    writer: W,
    config: WallpaperConfig,
}

impl WallpaperPipeline<ImageTileReader, StandardWallpaperWriter> {
    pub fn new(config: WallpaperConfig) -> Self {
        Self {
            reader: ImageTileReader::new(),
            writer: StandardWallpaperWriter,
            config,
        }
    }
}

impl<R: TileReader, W: WallpaperWriter> WallpaperPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: WallpaperConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_config(&self) -> Result<()> {
        let WallpaperConfig { tiles, target, .. } = &self.config;

        if tiles.x == 0 || tiles.y == 0 {
            return Err(WallpaperError::InvalidValue(format!(
                "Tiles must be positive integers, got {tiles}"
            )));
        }
        if target.width_px == 0 || target.height_px == 0 {
            return Err(WallpaperError::InvalidValue(format!(
                "Size must be positive integers, got {}x{}",
                target.width_px, target.height_px
            )));
        }
        if target.dpi == 0 {
            return Err(WallpaperError::InvalidValue("DPI must be positive".to_string()));
        }

        Ok(())
    }

    fn validate_square(&self, width: u32, height: u32) -> Result<()> {
        if self.config.square_check && width != height {
            return Err(WallpaperError::InvalidValue(format!(
                "Input tile must be square. Got {width}x{height}"
            )));
        }
        Ok(())
    }

    /// Turns a decoded tile into the cropped wallpaper raster.
    ///
    /// The tile is resized to the effective size before it is repeated; the canvas never
    /// grows with the tile's native resolution.
    #[instrument(skip(self, tile), fields(tile_width = tile.width(), tile_height = tile.height()))]
    pub fn compose(&self, tile: RgbaImage) -> Result<RgbaImage> {
        self.validate_config()?;

        {
            let _span = tracing::info_span!("validate_square").entered();
            self.validate_square(tile.width(), tile.height())?;
        }

        let WallpaperConfig {
            tiles,
            target,
            anchor,
            filter,
            ..
        } = self.config;

        let edge = effective_tile_size(target.width_px, target.height_px, tiles.x, tiles.y)?;

        let tile = {
            let _span = tracing::info_span!("resize_tile", edge).entered();
            resize_tile(tile, edge, filter)
        };

        let canvas = {
            let _span = tracing::info_span!("tile_canvas", tiles_x = tiles.x, tiles_y = tiles.y)
                .entered();
            tile_canvas(&tile, tiles)?
        };
        drop(tile);

        let _span = tracing::info_span!("crop", anchor = %anchor).entered();
        crop_to_target(&canvas, target.width_px, target.height_px, anchor)
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(
        &self,
        input_data: &[u8],
        format: OutputFormat,
        output: &mut dyn Write,
    ) -> Result<()> {
        info!("Starting wallpaper composition");

        let tile = {
            let _span = tracing::info_span!("decode_tile").entered();
            self.reader.read_tile(input_data)?
        };

        let wallpaper = self.compose(tile)?;

        {
            let _span = tracing::info_span!("encode", format = ?format).entered();
            let finalized = finalize(wallpaper, format);
            self.writer
                .write_wallpaper(&finalized, format, output, &self.config)?;
        }

        info!(
            width = self.config.target.width_px,
            height = self.config.target.height_px,
            dpi = self.config.target.dpi,
            "Wallpaper complete"
        );
        Ok(())
    }

    /// Reads the tile at `input_path` and writes the wallpaper to `output_path`.
    ///
    /// The output file is only created once encoding has succeeded, so a failed run
    /// leaves nothing behind.
    #[instrument(skip(self, input_path, output_path))]
    pub fn make_wallpaper<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            tiles = %self.config.tiles,
            anchor = %self.config.anchor,
            "Making wallpaper"
        );

        let format = OutputFormat::from_path(output_path)?;

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                WallpaperError::DecodeError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let mut encoded: Vec<u8> = Vec::new();
        self.convert(&input_data, format, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file", bytes = encoded.len()).entered();
            std::fs::write(output_path, &encoded).map_err(|e| {
                WallpaperError::EncodeError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(())
    }

    pub fn config(&self) -> &WallpaperConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: WallpaperConfig) {
        self.config = config;
    }
}

/// Builds a wallpaper from the tile at `input_path` using the standard reader and writer.
pub fn make_wallpaper<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    config: &WallpaperConfig,
) -> Result<()> {
    WallpaperPipeline::new(config.clone()).make_wallpaper(input_path, output_path)
}
