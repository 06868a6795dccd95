//! Config-backed implementation of the platform collaborators.

use crate::config::{AppEntry, Config, WallpaperConfig};

use super::error::PlatformError;
use super::types::{
    Icon, LaunchDescriptor, PackageRecord, Wallpaper, ACTION_APPLICATION_DETAILS_SETTINGS,
    ACTION_MAIN, CATEGORY_LAUNCHER,
};
use super::{ActivityLauncher, AppEnumerator, WallpaperSource};

/// Serves a fixed app list and wallpaper taken from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    apps: Vec<AppEntry>,
    wallpaper: Option<WallpaperConfig>,
}

impl StaticCatalog {
    pub fn new(apps: Vec<AppEntry>, wallpaper: Option<WallpaperConfig>) -> Self {
        Self { apps, wallpaper }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.apps.clone(), config.wallpaper.clone())
    }

    fn entry(&self, package: &str) -> Option<&AppEntry> {
        self.apps.iter().find(|app| app.package == package)
    }
}

impl AppEnumerator for StaticCatalog {
    fn installed_packages(&self) -> Result<Vec<PackageRecord>, PlatformError> {
        Ok(self
            .apps
            .iter()
            .map(|app| PackageRecord {
                package_name: app.package.clone(),
                label: app.label.clone(),
                system: app.system,
                metadata: app.metadata.clone(),
            })
            .collect())
    }

    fn load_icon(&self, package: &PackageRecord) -> Result<Icon, PlatformError> {
        self.entry(&package.package_name)
            .and_then(|app| app.icon.clone())
            .map(|source| Icon { source })
            .ok_or_else(|| PlatformError::IconUnavailable {
                package: package.package_name.clone(),
                reason: "no icon configured".to_string(),
            })
    }
}

impl ActivityLauncher for StaticCatalog {
    fn launch_intent_for(&self, package: &str) -> Result<Option<LaunchDescriptor>, PlatformError> {
        let app = self
            .entry(package)
            .ok_or_else(|| PlatformError::PackageNotFound {
                package: package.to_string(),
            })?;
        if !app.launchable {
            return Ok(None);
        }
        Ok(Some(
            LaunchDescriptor::new(ACTION_MAIN, &app.package).with_extra("category", CATEGORY_LAUNCHER),
        ))
    }

    fn app_details_settings(&self, package: &str) -> Result<LaunchDescriptor, PlatformError> {
        if package.trim().is_empty() {
            return Err(PlatformError::InvalidPackage {
                package: package.to_string(),
            });
        }
        Ok(LaunchDescriptor::new(ACTION_APPLICATION_DETAILS_SETTINGS, package)
            .with_data(format!("package:{package}")))
    }
}

impl WallpaperSource for StaticCatalog {
    fn current_wallpaper(&self) -> Result<Option<Wallpaper>, PlatformError> {
        let Some(config) = &self.wallpaper else {
            return Ok(None);
        };
        if !config.readable {
            return Err(PlatformError::PermissionDenied {
                permission: "READ_MEDIA_IMAGES".to_string(),
            });
        }
        Ok(Some(Wallpaper {
            source: config.source.clone(),
            width: config.width,
            height: config.height,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn entry(package: &str, label: &str) -> AppEntry {
        AppEntry {
            package: package.to_string(),
            label: label.to_string(),
            system: false,
            launchable: true,
            icon: None,
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn unknown_package_is_not_found() {
        let catalog = StaticCatalog::new(vec![entry("a.b", "AB")], None);
        assert_eq!(
            catalog.launch_intent_for("x.y"),
            Err(PlatformError::PackageNotFound {
                package: "x.y".to_string()
            })
        );
    }

    #[test]
    fn non_launchable_package_has_no_entry_point() {
        let mut app = entry("a.b", "AB");
        app.launchable = false;
        let catalog = StaticCatalog::new(vec![app], None);
        assert_eq!(catalog.launch_intent_for("a.b"), Ok(None));
    }

    #[test]
    fn launch_descriptor_targets_package() {
        let catalog = StaticCatalog::new(vec![entry("a.b", "AB")], None);
        let descriptor = catalog.launch_intent_for("a.b").unwrap().unwrap();
        assert_eq!(descriptor.action, ACTION_MAIN);
        assert_eq!(descriptor.target, "a.b");
    }

    #[test]
    fn missing_icon_is_an_error() {
        let catalog = StaticCatalog::new(vec![entry("a.b", "AB")], None);
        let record = catalog.installed_packages().unwrap().remove(0);
        assert!(matches!(
            catalog.load_icon(&record),
            Err(PlatformError::IconUnavailable { .. })
        ));
    }

    #[test]
    fn settings_descriptor_carries_package_uri() {
        let catalog = StaticCatalog::default();
        let descriptor = catalog.app_details_settings("org.homelauncher").unwrap();
        assert_eq!(descriptor.data.as_deref(), Some("package:org.homelauncher"));
        assert!(catalog.app_details_settings("  ").is_err());
    }

    #[test]
    fn unreadable_wallpaper_is_permission_error() {
        let catalog = StaticCatalog::new(
            Vec::new(),
            Some(WallpaperConfig {
                source: "/tmp/w.png".to_string(),
                width: 10,
                height: 20,
                readable: false,
            }),
        );
        assert!(matches!(
            catalog.current_wallpaper(),
            Err(PlatformError::PermissionDenied { .. })
        ));
        assert_eq!(StaticCatalog::default().current_wallpaper(), Ok(None));
    }
}
