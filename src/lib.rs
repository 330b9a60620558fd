pub mod logger;
pub mod wallpaper;
