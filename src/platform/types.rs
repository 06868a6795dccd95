use std::collections::BTreeMap;

pub const ACTION_MAIN: &str = "action.MAIN";
pub const ACTION_APPLICATION_DETAILS_SETTINGS: &str = "settings.APPLICATION_DETAILS_SETTINGS";
pub const ACTION_SET_WALLPAPER: &str = "action.SET_WALLPAPER";
pub const CATEGORY_LAUNCHER: &str = "category.LAUNCHER";

/// Opaque request for the platform to start something.
///
/// The state core only carries these around inside view events; the
/// presentation layer is the one that acts on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchDescriptor {
    pub action: String,
    pub target: String,
    pub data: Option<String>,
    pub extras: BTreeMap<String, String>,
}

impl LaunchDescriptor {
    pub fn new(action: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            target: target.into(),
            data: None,
            extras: BTreeMap::new(),
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}

/// Raw entry as reported by the package enumerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub package_name: String,
    pub label: String,
    /// System packages are hidden from the launcher.
    pub system: bool,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub source: String,
}

/// An installed, user-visible application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    /// Unique key.
    pub package_name: String,
    pub name: String,
    pub icon: Option<Icon>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallpaper {
    pub source: String,
    pub width: u32,
    pub height: u32,
}
