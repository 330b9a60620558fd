//! Common utilities module
//!
//! This module contains shared utilities used across the wallpaper pipeline.

pub mod error;

pub use error::{Result, WallpaperError};
