use std::io::Write;
use std::sync::{Arc, Mutex};

use image::{DynamicImage, Rgba, RgbaImage};

use crate::wallpaper::common::error::{Result, WallpaperError};
use crate::wallpaper::config::WallpaperConfig;
use crate::wallpaper::output::{OutputFormat, WallpaperWriter};
use crate::wallpaper::pipeline::WallpaperPipeline;
use crate::wallpaper::target::{Anchor, TargetSpec, TileCount};
use crate::wallpaper::tile::TileReader;

struct MockReader {
    should_fail: bool,
    mock_tile: Option<RgbaImage>,
}

impl TileReader for MockReader {
    fn read_tile(&self, _data: &[u8]) -> Result<RgbaImage> {
        if self.should_fail {
            return Err(WallpaperError::DecodeError("Mock decode error".to_string()));
        }
        Ok(self
            .mock_tile
            .clone()
            .unwrap_or_else(|| RgbaImage::from_pixel(100, 100, Rgba([9, 9, 9, 255]))))
    }
}

struct MockWriter {
    should_fail: bool,
    written: Arc<Mutex<Vec<(DynamicImage, OutputFormat)>>>,
}

impl WallpaperWriter for MockWriter {
    fn write_wallpaper(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        _output: &mut dyn Write,
        _config: &WallpaperConfig,
    ) -> Result<()> {
        if self.should_fail {
            return Err(WallpaperError::EncodeError("Mock encode error".to_string()));
        }
        self.written.lock().unwrap().push((image.clone(), format));
        Ok(())
    }
}

fn pipeline_with(
    tile: Option<RgbaImage>,
    config: WallpaperConfig,
) -> (
    WallpaperPipeline<MockReader, MockWriter>,
    Arc<Mutex<Vec<(DynamicImage, OutputFormat)>>>,
) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader {
        should_fail: false,
        mock_tile: tile,
    };
    let writer = MockWriter {
        should_fail: false,
        written: written.clone(),
    };
    (WallpaperPipeline::with_custom(reader, writer, config), written)
}

fn small_config() -> WallpaperConfig {
    WallpaperConfig::builder()
        .tiles(TileCount::new(3, 2))
        .target(TargetSpec::new(120, 70))
        .build()
}

#[test]
fn test_successful_conversion() {
    let (pipeline, written) = pipeline_with(None, small_config());

    let result = pipeline.convert(b"fake tile data", OutputFormat::Png, &mut Vec::<u8>::new());

    assert!(result.is_ok());
    let written = written.lock().unwrap();
    assert_eq!(written.len(), 1);
    let (image, format) = &written[0];
    assert_eq!((image.width(), image.height()), (120, 70));
    assert_eq!(*format, OutputFormat::Png);
    assert!(image.color().has_alpha());
}

#[test]
fn test_jpeg_output_has_no_alpha() {
    let tile = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 0]));
    let (pipeline, written) = pipeline_with(Some(tile), small_config());

    pipeline
        .convert(b"fake tile data", OutputFormat::Jpeg, &mut Vec::<u8>::new())
        .unwrap();

    let written = written.lock().unwrap();
    assert!(!written[0].0.color().has_alpha());
}

#[test]
fn test_reader_failure() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader {
        should_fail: true,
        mock_tile: None,
    };
    let writer = MockWriter {
        should_fail: false,
        written: written.clone(),
    };
    let pipeline = WallpaperPipeline::with_custom(reader, writer, small_config());

    let result = pipeline.convert(b"fake tile data", OutputFormat::Png, &mut Vec::<u8>::new());

    assert!(matches!(result, Err(WallpaperError::DecodeError(_))));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure() {
    let reader = MockReader {
        should_fail: false,
        mock_tile: None,
    };
    let writer = MockWriter {
        should_fail: true,
        written: Arc::new(Mutex::new(Vec::new())),
    };
    let pipeline = WallpaperPipeline::with_custom(reader, writer, small_config());

    let result = pipeline.convert(b"fake tile data", OutputFormat::Png, &mut Vec::<u8>::new());

    assert!(matches!(result, Err(WallpaperError::EncodeError(_))));
}

#[test]
fn test_non_square_tile_rejected_before_writing() {
    let (pipeline, written) = pipeline_with(Some(RgbaImage::new(100, 50)), small_config());

    let result = pipeline.convert(b"fake tile data", OutputFormat::Png, &mut Vec::<u8>::new());

    assert!(matches!(result, Err(WallpaperError::InvalidValue(_))));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_non_square_tile_allowed_when_check_disabled() {
    let config = WallpaperConfig::builder()
        .tiles(TileCount::new(3, 2))
        .target(TargetSpec::new(120, 70))
        .square_check(false)
        .build();
    let (pipeline, written) = pipeline_with(Some(RgbaImage::new(100, 50)), config);

    pipeline
        .convert(b"fake tile data", OutputFormat::Png, &mut Vec::<u8>::new())
        .unwrap();

    let (image, _) = &written.lock().unwrap()[0];
    assert_eq!((image.width(), image.height()), (120, 70));
}

#[test]
fn test_exact_fit_tiles_without_crop() {
    let tile = RgbaImage::from_fn(500, 500, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 7, 255]));
    let config = WallpaperConfig::builder()
        .tiles(TileCount::new(3, 3))
        .target(TargetSpec::new(1200, 1200))
        .anchor(Anchor::BottomRight)
        .build();
    let (pipeline, _) = pipeline_with(None, config);

    let composed = pipeline.compose(tile).unwrap();

    assert_eq!(composed.dimensions(), (1200, 1200));
    // 400px cells repeat exactly, so any anchor sees the same grid.
    assert_eq!(composed.get_pixel(10, 20), composed.get_pixel(410, 820));
}

#[test]
fn test_output_size_independent_of_tile_size() {
    for edge in [1, 7, 64, 333, 1000] {
        for anchor in Anchor::ALL {
            let config = WallpaperConfig::builder()
                .tiles(TileCount::new(4, 3))
                .target(TargetSpec::new(250, 190))
                .anchor(anchor)
                .build();
            let (pipeline, _) = pipeline_with(None, config);

            let composed = pipeline.compose(RgbaImage::new(edge, edge)).unwrap();

            assert_eq!(composed.dimensions(), (250, 190), "edge {edge} anchor {anchor}");
        }
    }
}

#[test]
fn test_zero_tiles_rejected() {
    let config = WallpaperConfig::builder().tiles(TileCount::new(0, 2)).build();
    let (pipeline, written) = pipeline_with(None, config);

    let result = pipeline.convert(b"fake tile data", OutputFormat::Png, &mut Vec::<u8>::new());

    assert!(matches!(result, Err(WallpaperError::InvalidValue(_))));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_set_config() {
    let (mut pipeline, _) = pipeline_with(None, WallpaperConfig::default());
    pipeline.set_config(small_config());
    assert_eq!(pipeline.config().target, TargetSpec::new(120, 70));
}
