//! Boundary with the platform services the launcher consumes.
//!
//! Everything the state core needs from the outside world goes through
//! the three collaborator traits below. Implementations are passed to
//! view-models explicitly; there is no global service lookup.

mod catalog;
mod error;
mod types;

pub use catalog::StaticCatalog;
pub use error::PlatformError;
pub use types::{
    AppInfo, Icon, LaunchDescriptor, PackageRecord, Wallpaper, ACTION_APPLICATION_DETAILS_SETTINGS,
    ACTION_MAIN, ACTION_SET_WALLPAPER, CATEGORY_LAUNCHER,
};

/// Lists installed packages.
pub trait AppEnumerator: Send + Sync {
    /// Every installed package, system ones included.
    fn installed_packages(&self) -> Result<Vec<PackageRecord>, PlatformError>;

    fn load_icon(&self, package: &PackageRecord) -> Result<Icon, PlatformError>;
}

/// Builds launch requests for packages.
pub trait ActivityLauncher: Send + Sync {
    /// Launch request for the package's entry point, `None` if it has none.
    fn launch_intent_for(&self, package: &str) -> Result<Option<LaunchDescriptor>, PlatformError>;

    /// Request opening the system details page of `package`.
    fn app_details_settings(&self, package: &str) -> Result<LaunchDescriptor, PlatformError>;
}

pub trait WallpaperSource: Send + Sync {
    fn current_wallpaper(&self) -> Result<Option<Wallpaper>, PlatformError>;
}
