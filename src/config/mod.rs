//! Launcher configuration: TOML file, defaults and validation.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{AppEntry, Config, LauncherConfig, WallpaperConfig};
