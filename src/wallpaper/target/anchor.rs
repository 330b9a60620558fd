use std::fmt;
use std::str::FromStr;

use crate::wallpaper::common::error::{Result, WallpaperError};

/// Which region of the canvas survives cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 5] = [
        Anchor::Center,
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Anchor::Center => "center",
            Anchor::TopLeft => "topleft",
            Anchor::TopRight => "topright",
            Anchor::BottomLeft => "bottomleft",
            Anchor::BottomRight => "bottomright",
        }
    }

    /// Top-left corner of a `target` window inside `canvas`.
    ///
    /// An axis where the canvas is smaller than the target gets offset 0; the crop step
    /// rejects that case before asking.
    pub(crate) fn offset(self, canvas: (u32, u32), target: (u32, u32)) -> (u32, u32) {
        let spare_x = canvas.0.saturating_sub(target.0);
        let spare_y = canvas.1.saturating_sub(target.1);
        match self {
            Anchor::Center => (spare_x / 2, spare_y / 2),
            Anchor::TopLeft => (0, 0),
            Anchor::TopRight => (spare_x, 0),
            Anchor::BottomLeft => (0, spare_y),
            Anchor::BottomRight => (spare_x, spare_y),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Anchor {
    type Err = WallpaperError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Anchor::ALL
            .into_iter()
            .find(|anchor| anchor.name() == wanted)
            .ok_or_else(|| WallpaperError::InvalidValue(format!("Unknown anchor: {s}")))
    }
}
