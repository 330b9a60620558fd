//! Parsers for `AxB` command-line tokens.

use tracing::debug;

use crate::wallpaper::common::error::{Result, WallpaperError};
use crate::wallpaper::target::types::{TargetSpec, TileCount};

/// Parses a tile grid such as `2x4` or `2*4`.
pub fn parse_tiles(s: &str) -> Result<TileCount> {
    let normalized = s.to_ascii_lowercase().replace('*', "x");
    let (x, y) = parse_pair(&normalized, "Tiles", "2x4 or 2*4")?;
    debug!("Parsed tiles {:?} as {}x{}", s, x, y);
    Ok(TileCount::new(x, y))
}

/// Parses a pixel size such as `3840x2160`. The `*` separator is not accepted here.
pub fn parse_size(s: &str) -> Result<TargetSpec> {
    let normalized = s.to_ascii_lowercase();
    let (width, height) = parse_pair(&normalized, "Size", "3840x2160")?;
    debug!("Parsed size {:?} as {}x{}", s, width, height);
    Ok(TargetSpec::new(width, height))
}

fn parse_pair(s: &str, what: &str, example: &str) -> Result<(u32, u32)> {
    let (a, b) = s
        .trim()
        .split_once('x')
        .ok_or_else(|| WallpaperError::InvalidFormat(format!("{what} must look like {example}")))?;

    let parse_field = |field: &str| {
        field.trim().parse::<i64>().map_err(|_| {
            WallpaperError::InvalidFormat(format!("{what} must be integers, like {example}"))
        })
    };
    let (a, b) = (parse_field(a)?, parse_field(b)?);

    if a <= 0 || b <= 0 {
        return Err(WallpaperError::InvalidValue(format!(
            "{what} must be positive integers"
        )));
    }

    let narrow = |v: i64| {
        u32::try_from(v)
            .map_err(|_| WallpaperError::InvalidValue(format!("{what} value {v} is too large")))
    };
    Ok((narrow(a)?, narrow(b)?))
}
