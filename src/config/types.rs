use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ui::mvi::{EngineSettings, DEFAULT_EVENT_BUFFER, DEFAULT_INTENT_BUFFER};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub launcher: LauncherConfig,
    /// Apps served by the built-in static catalog.
    #[serde(default)]
    pub apps: Vec<AppEntry>,
    #[serde(default)]
    pub wallpaper: Option<WallpaperConfig>,
}

/// Tuning for the main screen view-model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Package name of the launcher itself, used for its settings page.
    #[serde(default = "default_own_package")]
    pub own_package: String,
    /// How many recently launched apps to remember (default: 8).
    #[serde(default = "default_recent_capacity")]
    pub recent_capacity: usize,
    /// Clock refresh period in milliseconds (default: 1000).
    #[serde(default = "default_clock_interval_ms")]
    pub clock_interval_ms: u64,
    /// Pending intents kept before new ones are dropped (default: 64).
    #[serde(default = "default_intent_buffer")]
    pub intent_buffer: usize,
    /// View events buffered per observer (default: 64).
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

/// One app entry for the static catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppEntry {
    pub package: String,
    pub label: String,
    #[serde(default)]
    pub system: bool,
    /// Whether the app has an entry point that can be started.
    #[serde(default = "default_true")]
    pub launchable: bool,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallpaperConfig {
    pub source: String,
    pub width: u32,
    pub height: u32,
    /// False simulates a missing read permission.
    #[serde(default = "default_true")]
    pub readable: bool,
}

fn default_own_package() -> String {
    "org.homelauncher".to_string()
}

fn default_recent_capacity() -> usize {
    8
}

fn default_clock_interval_ms() -> u64 {
    1000
}

fn default_intent_buffer() -> usize {
    DEFAULT_INTENT_BUFFER
}

fn default_event_buffer() -> usize {
    DEFAULT_EVENT_BUFFER
}

fn default_true() -> bool {
    true
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            own_package: default_own_package(),
            recent_capacity: default_recent_capacity(),
            clock_interval_ms: default_clock_interval_ms(),
            intent_buffer: default_intent_buffer(),
            event_buffer: default_event_buffer(),
        }
    }
}

impl LauncherConfig {
    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            intent_buffer: self.intent_buffer,
            event_buffer: self.event_buffer,
        }
    }
}
