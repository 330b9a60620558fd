use std::path::Path;

use crate::wallpaper::common::error::{Result, WallpaperError};

/// Output file formats, selected by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    WebP,
    Tiff,
    Bmp,
}

impl OutputFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" | "jpe" | "jfif" => Some(OutputFormat::Jpeg),
            "webp" => Some(OutputFormat::WebP),
            "tif" | "tiff" => Some(OutputFormat::Tiff),
            "bmp" => Some(OutputFormat::Bmp),
            _ => None,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| {
                WallpaperError::EncodeError(format!(
                    "unsupported output format for {}",
                    path.display()
                ))
            })
    }

    pub fn supports_alpha(self) -> bool {
        !matches!(self, OutputFormat::Jpeg)
    }

    /// Whether the encoder writes resolution metadata for this format.
    pub fn supports_dpi(self) -> bool {
        matches!(
            self,
            OutputFormat::Png | OutputFormat::Jpeg | OutputFormat::Tiff | OutputFormat::Bmp
        )
    }
}
