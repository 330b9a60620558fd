//! Output encoding module
//!
//! Chooses the file format from the output extension, strips alpha for formats that
//! cannot carry it and embeds the target DPI where the format has a place for it.

mod format;
mod standard_writer;
mod writer;

pub use format::OutputFormat;
pub use standard_writer::{StandardWallpaperWriter, finalize};
pub use writer::WallpaperWriter;
