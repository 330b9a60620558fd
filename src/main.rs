use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use image::imageops::FilterType;

use tilewall::logger;
use tilewall::wallpaper::config::DEFAULT_JPEG_QUALITY;
use tilewall::wallpaper::{
    Anchor, DEFAULT_DPI, Preset, TargetSpec, TileCount, WallpaperConfig, WallpaperError,
    WallpaperPipeline, parse_size, parse_tiles,
};

use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Create a wallpaper from a seamless square tile by repeating it and cropping to a target size."
)]
struct Args {
    /// Input tile image (square). PNG/JPG/WebP/etc.
    input: PathBuf,

    /// Output file name inside the output directory; the extension decides the format
    output: PathBuf,

    /// Tile count like "2x4" or "2*4"
    #[arg(long, value_name = "AxB", default_value = "2x2", value_parser = parse_tiles)]
    tiles: TileCount,

    /// Target preset: phone, 4k, a4-portrait, a4-landscape [default: 4k]
    #[arg(long, value_name = "NAME", conflicts_with = "size", value_parser = Preset::from_str)]
    preset: Option<Preset>,

    /// Custom target size in pixels like "3000x2000"
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    size: Option<TargetSpec>,

    /// Where to anchor the crop: center, topleft, topright, bottomleft, bottomright
    #[arg(long, default_value = "center", value_parser = Anchor::from_str)]
    anchor: Anchor,

    /// Disable square-tile validation
    #[arg(long)]
    no_square_check: bool,

    /// Resolution written into the output file
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(1..))]
    dpi: u32,

    /// Resampling filter: nearest, triangle, catmullrom, gaussian, lanczos3
    #[arg(long, default_value = "lanczos3", value_parser = parse_filter)]
    filter: FilterType,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Directory the output file is written into, created if missing
    #[arg(long, value_name = "DIR", default_value = "out")]
    out_dir: PathBuf,
}

impl Args {
    fn target(&self) -> TargetSpec {
        let target = match (self.size, self.preset) {
            (Some(size), _) => size,
            (None, preset) => preset.unwrap_or_default().target(),
        };
        target.with_dpi(self.dpi)
    }

    fn config(&self) -> WallpaperConfig {
        WallpaperConfig::builder()
            .tiles(self.tiles)
            .target(self.target())
            .anchor(self.anchor)
            .square_check(!self.no_square_check)
            .filter(self.filter)
            .jpeg_quality(self.quality)
            .build()
    }
}

fn parse_filter(s: &str) -> Result<FilterType, WallpaperError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "nearest" => Ok(FilterType::Nearest),
        "triangle" | "bilinear" => Ok(FilterType::Triangle),
        "catmullrom" | "bicubic" => Ok(FilterType::CatmullRom),
        "gaussian" => Ok(FilterType::Gaussian),
        "lanczos3" | "lanczos" => Ok(FilterType::Lanczos3),
        _ => Err(WallpaperError::InvalidValue(format!(
            "unknown filter '{s}', expected one of: nearest, triangle, catmullrom, gaussian, lanczos3"
        ))),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init();

    let config = args.config();
    info!(
        tiles = %config.tiles,
        width = config.target.width_px,
        height = config.target.height_px,
        dpi = config.target.dpi,
        anchor = %config.anchor,
        "Target selected"
    );

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating output directory {}", args.out_dir.display()))?;
    let output_path = args.out_dir.join(&args.output);

    let pipeline = WallpaperPipeline::new(config);
    pipeline
        .make_wallpaper(&args.input, &output_path)
        .with_context(|| format!("making wallpaper from {}", args.input.display()))?;

    info!(output = %output_path.display(), "Wallpaper written");
    Ok(())
}
