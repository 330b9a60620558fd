//! Target description module
//!
//! Output sizes, named presets, tile-grid counts and crop anchors, together with
//! the parsers that turn command-line tokens into them.

mod anchor;
mod parse;
pub mod types;

pub use anchor::Anchor;
pub use parse::{parse_size, parse_tiles};
pub use types::{DEFAULT_DPI, PRESETS, Preset, TargetSpec, TileCount};
