//! Shared test utilities and fake platform collaborators.

#![allow(dead_code, unused_imports)]

use home_launcher::config::LauncherConfig;
use home_launcher::platform::{
    ActivityLauncher, AppEnumerator, Icon, LaunchDescriptor, PackageRecord, PlatformError,
    Wallpaper, WallpaperSource, ACTION_APPLICATION_DETAILS_SETTINGS, ACTION_MAIN,
};
use home_launcher::ui::main_screen::{
    Collaborators, MainUiState, MainViewEvent, MainViewModel, NormalState,
};
use home_launcher::ui::mvi::ViewEventWrapper;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

pub const TIMEOUT: Duration = Duration::from_secs(2);

/// How `launch_intent_for` answers for a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchBehavior {
    Launchable,
    NoEntryPoint,
    Fails,
}

/// Scriptable stand-in for the platform services.
#[derive(Default)]
pub struct FakePlatform {
    packages: Mutex<Vec<PackageRecord>>,
    no_entry_point: Mutex<HashSet<String>>,
    failing_launch: Mutex<HashSet<String>>,
    fail_enumeration: Mutex<bool>,
    fail_settings: Mutex<bool>,
    enumeration_delay: Mutex<Option<Duration>>,
    wallpaper: Mutex<Option<Wallpaper>>,
    enumerations: AtomicUsize,
}

impl FakePlatform {
    pub fn with_apps(apps: &[(&str, &str)]) -> Arc<Self> {
        let platform = Arc::new(Self::default());
        for (package, label) in apps {
            platform.install(package, label);
        }
        platform
    }

    pub fn install(&self, package: &str, label: &str) {
        self.packages.lock().push(record(package, label, false));
    }

    pub fn install_system(&self, package: &str, label: &str) {
        self.packages.lock().push(record(package, label, true));
    }

    pub fn uninstall(&self, package: &str) {
        self.packages.lock().retain(|p| p.package_name != package);
    }

    pub fn set_launch(&self, package: &str, behavior: LaunchBehavior) {
        let mut no_entry = self.no_entry_point.lock();
        let mut failing = self.failing_launch.lock();
        no_entry.remove(package);
        failing.remove(package);
        match behavior {
            LaunchBehavior::Launchable => {}
            LaunchBehavior::NoEntryPoint => {
                no_entry.insert(package.to_string());
            }
            LaunchBehavior::Fails => {
                failing.insert(package.to_string());
            }
        }
    }

    pub fn fail_enumeration(&self, fail: bool) {
        *self.fail_enumeration.lock() = fail;
    }

    pub fn fail_settings(&self, fail: bool) {
        *self.fail_settings.lock() = fail;
    }

    /// Make every enumeration block for `delay`.
    pub fn slow_enumeration(&self, delay: Option<Duration>) {
        *self.enumeration_delay.lock() = delay;
    }

    pub fn set_wallpaper(&self, wallpaper: Option<Wallpaper>) {
        *self.wallpaper.lock() = wallpaper;
    }

    pub fn enumeration_count(&self) -> usize {
        self.enumerations.load(Ordering::SeqCst)
    }
}

fn record(package: &str, label: &str, system: bool) -> PackageRecord {
    PackageRecord {
        package_name: package.to_string(),
        label: label.to_string(),
        system,
        metadata: BTreeMap::new(),
    }
}

impl AppEnumerator for FakePlatform {
    fn installed_packages(&self) -> Result<Vec<PackageRecord>, PlatformError> {
        self.enumerations.fetch_add(1, Ordering::SeqCst);
        let delay = *self.enumeration_delay.lock();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        if *self.fail_enumeration.lock() {
            return Err(PlatformError::ServiceUnavailable {
                service: "package manager",
                reason: "scripted failure".to_string(),
            });
        }
        Ok(self.packages.lock().clone())
    }

    fn load_icon(&self, package: &PackageRecord) -> Result<Icon, PlatformError> {
        Ok(Icon {
            source: format!("icons/{}.png", package.package_name),
        })
    }
}

impl ActivityLauncher for FakePlatform {
    fn launch_intent_for(&self, package: &str) -> Result<Option<LaunchDescriptor>, PlatformError> {
        if self.failing_launch.lock().contains(package) {
            return Err(PlatformError::PackageNotFound {
                package: package.to_string(),
            });
        }
        if self.no_entry_point.lock().contains(package) {
            return Ok(None);
        }
        Ok(Some(LaunchDescriptor::new(ACTION_MAIN, package)))
    }

    fn app_details_settings(&self, package: &str) -> Result<LaunchDescriptor, PlatformError> {
        if *self.fail_settings.lock() {
            return Err(PlatformError::ServiceUnavailable {
                service: "settings",
                reason: "scripted failure".to_string(),
            });
        }
        Ok(LaunchDescriptor::new(ACTION_APPLICATION_DETAILS_SETTINGS, package)
            .with_data(format!("package:{}", package)))
    }
}

impl WallpaperSource for FakePlatform {
    fn current_wallpaper(&self) -> Result<Option<Wallpaper>, PlatformError> {
        Ok(self.wallpaper.lock().clone())
    }
}

pub fn test_config() -> LauncherConfig {
    LauncherConfig {
        own_package: "org.homelauncher.test".to_string(),
        ..LauncherConfig::default()
    }
}

pub fn view_model(platform: &Arc<FakePlatform>) -> Arc<MainViewModel> {
    view_model_with(platform, test_config())
}

pub fn view_model_with(platform: &Arc<FakePlatform>, config: LauncherConfig) -> Arc<MainViewModel> {
    MainViewModel::new(Collaborators::from_single(Arc::clone(platform)), config)
        .expect("engine starts")
}

/// Submit `Init` and wait for the first normal state.
pub async fn init(view_model: &MainViewModel) -> NormalState {
    assert!(view_model.emit(home_launcher::ui::main_screen::MainIntent::Init));
    wait_normal(view_model, |_| true).await
}

/// Wait until the state is normal and satisfies `predicate`.
pub async fn wait_normal(
    view_model: &MainViewModel,
    mut predicate: impl FnMut(&NormalState) -> bool,
) -> NormalState {
    let state = tokio::time::timeout(
        TIMEOUT,
        view_model.await_state(|state| state.as_normal().is_some_and(&mut predicate)),
    )
    .await
    .expect("state reached in time")
    .expect("engine alive");
    state.into_normal().expect("normal state")
}

/// Receive the next event and consume it.
pub async fn next_event(
    events: &mut broadcast::Receiver<ViewEventWrapper<MainViewEvent>>,
) -> MainViewEvent {
    let wrapper = tokio::time::timeout(TIMEOUT, events.recv())
        .await
        .expect("event in time")
        .expect("event stream open");
    let mut taken = None;
    let consumed = wrapper
        .consume_if_not_handled(|event| {
            taken = Some(event.clone());
            std::future::ready(())
        })
        .await;
    assert!(consumed, "event should be unconsumed");
    taken.expect("handler ran")
}

pub fn names(apps: &[home_launcher::platform::AppInfo]) -> Vec<&str> {
    apps.iter().map(|app| app.name.as_str()).collect()
}

pub fn packages(apps: &[home_launcher::platform::AppInfo]) -> Vec<&str> {
    apps.iter().map(|app| app.package_name.as_str()).collect()
}
