//! Target and grid value types

use std::fmt;
use std::str::FromStr;

use crate::wallpaper::common::error::{Result, WallpaperError};

/// Resolution embedded in written files unless overridden.
pub const DEFAULT_DPI: u32 = 300;

/// Exact output size of a wallpaper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    /// Output width in pixels
    pub width_px: u32,
    /// Output height in pixels
    pub height_px: u32,
    /// Resolution written into the output file metadata
    pub dpi: u32,
}

impl TargetSpec {
    pub const fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
            dpi: DEFAULT_DPI,
        }
    }

    pub const fn with_dpi(self, dpi: u32) -> Self {
        Self { dpi, ..self }
    }
}

impl Default for TargetSpec {
    fn default() -> Self {
        Preset::default().target()
    }
}

/// Named output targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Portrait phone wallpaper
    Phone,
    /// UHD desktop
    #[default]
    FourK,
    /// A4 at 300 PPI, portrait
    A4Portrait,
    /// A4 at 300 PPI, landscape
    A4Landscape,
}

/// Preset lookup table, indexed by the `Preset` discriminant.
pub static PRESETS: [(Preset, TargetSpec); 4] = [
    (Preset::Phone, TargetSpec::new(1080, 1920)),
    (Preset::FourK, TargetSpec::new(3840, 2160)),
    (Preset::A4Portrait, TargetSpec::new(2480, 3508)),
    (Preset::A4Landscape, TargetSpec::new(3508, 2480)),
];

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::Phone => "phone",
            Preset::FourK => "4k",
            Preset::A4Portrait => "a4-portrait",
            Preset::A4Landscape => "a4-landscape",
        }
    }

    pub fn target(self) -> TargetSpec {
        PRESETS[self as usize].1
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = WallpaperError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        PRESETS
            .iter()
            .map(|(preset, _)| *preset)
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = PRESETS.iter().map(|(p, _)| p.name()).collect();
                WallpaperError::InvalidValue(format!(
                    "unknown preset '{}', expected one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// How many times the tile repeats along each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCount {
    pub x: u32,
    pub y: u32,
}

impl TileCount {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl Default for TileCount {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

impl fmt::Display for TileCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}
