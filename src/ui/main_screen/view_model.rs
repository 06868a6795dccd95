//! View-model of the main (home) screen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use anyhow::Context;
use chrono::Local;
use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};
use tokio::time::MissedTickBehavior;

use crate::config::LauncherConfig;
use crate::platform::{ActivityLauncher, AppEnumerator, AppInfo, Wallpaper, WallpaperSource};
use crate::ui::mvi::{
    EngineError, ExecutionContext, IntentRouter, Reducer, StateEngine, ViewEventWrapper,
};

use super::apps::{filter_apps, installed_apps};
use super::event::{MainViewEvent, TOAST_CANNOT_OPEN_SETTINGS, TOAST_CANNOT_START_APP};
use super::intent::{MainIntent, MainIntentKind};
use super::recent::RecentApps;
use super::reducer::MainReducer;
use super::state::{MainUiState, NormalState};

/// Platform services the main screen depends on.
#[derive(Clone)]
pub struct Collaborators {
    pub enumerator: Arc<dyn AppEnumerator>,
    pub launcher: Arc<dyn ActivityLauncher>,
    pub wallpaper: Arc<dyn WallpaperSource>,
}

impl Collaborators {
    /// Use one value for all three services.
    pub fn from_single<P>(platform: Arc<P>) -> Self
    where
        P: AppEnumerator + ActivityLauncher + WallpaperSource + 'static,
    {
        Self {
            enumerator: platform.clone(),
            launcher: platform.clone(),
            wallpaper: platform,
        }
    }
}

pub struct MainViewModel {
    engine: StateEngine<MainIntent, MainUiState, MainViewEvent>,
    services: Collaborators,
    config: LauncherConfig,
    /// Launch history; promoted into state as `recent_apps`.
    recent: Mutex<RecentApps>,
    clock_started: AtomicBool,
}

impl MainViewModel {
    /// Build the view-model and start its dispatch loop.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(services: Collaborators, config: LauncherConfig) -> Result<Arc<Self>, EngineError> {
        let view_model = Arc::new(Self {
            engine: StateEngine::new(MainUiState::Loading, config.engine_settings()),
            recent: Mutex::new(RecentApps::new(config.recent_capacity)),
            services,
            config,
            clock_started: AtomicBool::new(false),
        });
        view_model
            .engine
            .start(Arc::downgrade(&view_model), Self::router())?;
        Ok(view_model)
    }

    fn router() -> IntentRouter<Self, MainIntent> {
        IntentRouter::new()
            .route(MainIntentKind::Init, Self::on_init)
            .route(MainIntentKind::Resume, Self::on_resume)
            .route(MainIntentKind::RefreshApps, Self::on_refresh_apps)
            .route(MainIntentKind::AppClick, Self::on_app_click)
            .route(MainIntentKind::AppLongClick, Self::on_app_long_click)
            .route(MainIntentKind::OpenSettings, Self::on_open_settings)
            .route(MainIntentKind::ChangeWallpaper, Self::on_change_wallpaper)
            .route(MainIntentKind::NavigateToPage, Self::on_reduce)
            .route(MainIntentKind::GoBack, Self::on_reduce)
            .route(MainIntentKind::SearchQueryChange, Self::on_reduce)
            .route(MainIntentKind::SwipeLeft, Self::on_reduce)
            .route(MainIntentKind::SwipeRight, Self::on_reduce)
            .route(MainIntentKind::SwipeDown, Self::on_reduce)
            .route(MainIntentKind::SwipeUp, Self::on_reduce)
    }

    /// Submit an intent. Returns false if it was dropped.
    pub fn emit(&self, intent: MainIntent) -> bool {
        self.engine.submit_intent(intent)
    }

    pub fn state(&self) -> MainUiState {
        self.engine.current_state()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<MainUiState> {
        self.engine.subscribe_state()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ViewEventWrapper<MainViewEvent>> {
        self.engine.subscribe_events()
    }

    pub async fn await_state(
        &self,
        predicate: impl FnMut(&MainUiState) -> bool,
    ) -> Result<MainUiState, EngineError> {
        self.engine.await_state(predicate).await
    }

    /// Recorded launches, least recent first.
    pub fn recent_packages(&self) -> Vec<String> {
        self.recent.lock().packages().map(str::to_string).collect()
    }

    /// Cancel an in-flight app refresh and restore the state it started from.
    pub fn cancel_refresh(&self) -> bool {
        self.engine.tasks().cancel_active_and_restore()
    }

    pub fn is_refreshing(&self) -> bool {
        self.engine.tasks().is_busy()
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }

    async fn on_init(self: Arc<Self>, _: MainIntent) -> anyhow::Result<()> {
        let apps = self.load_apps().await?;
        let wallpaper = self.load_wallpaper().await;
        let recent_apps = self.recent.lock().select(&apps);
        self.engine.publish(MainUiState::Normal(NormalState::new(
            apps,
            recent_apps,
            wallpaper,
        )));
        tracing::info!("Main screen ready");
        self.start_clock();
        Ok(())
    }

    async fn on_resume(self: Arc<Self>, _: MainIntent) -> anyhow::Result<()> {
        self.refresh_apps().await
    }

    /// Same outcome as resume, but queued so it can be cancelled.
    async fn on_refresh_apps(self: Arc<Self>, _: MainIntent) -> anyhow::Result<()> {
        if !self.engine.state_matches(MainUiState::is_normal) {
            return Ok(());
        }
        let view_model = Arc::clone(&self);
        self.engine
            .tasks()
            .enqueue(ExecutionContext::Current, async move {
                if let Err(err) = view_model.refresh_apps().await {
                    tracing::warn!(error = %format!("{err:#}"), "App refresh failed");
                }
            })?;
        Ok(())
    }

    async fn on_app_click(self: Arc<Self>, intent: MainIntent) -> anyhow::Result<()> {
        let MainIntent::AppClick { package_name } = intent else {
            return Ok(());
        };
        self.recent.lock().record(&package_name);
        self.publish_recent();

        let event = match self.services.launcher.launch_intent_for(&package_name) {
            Ok(Some(descriptor)) => MainViewEvent::StartApp(descriptor),
            Ok(None) => {
                tracing::info!(package = %package_name, "Package has no launchable entry point");
                MainViewEvent::toast(TOAST_CANNOT_START_APP)
            }
            Err(err) => {
                tracing::warn!(package = %package_name, error = %err, "Failed to resolve launch target");
                MainViewEvent::toast(TOAST_CANNOT_START_APP)
            }
        };
        self.engine.emit_event(event);
        Ok(())
    }

    async fn on_app_long_click(self: Arc<Self>, intent: MainIntent) -> anyhow::Result<()> {
        if let MainIntent::AppLongClick { package_name } = intent {
            self.engine
                .emit_event(MainViewEvent::ShowAppInfo { package_name });
        }
        Ok(())
    }

    async fn on_open_settings(self: Arc<Self>, _: MainIntent) -> anyhow::Result<()> {
        let event = match self
            .services
            .launcher
            .app_details_settings(&self.config.own_package)
        {
            Ok(descriptor) => MainViewEvent::StartApp(descriptor),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to build settings request");
                MainViewEvent::toast(TOAST_CANNOT_OPEN_SETTINGS)
            }
        };
        self.engine.emit_event(event);
        Ok(())
    }

    async fn on_change_wallpaper(self: Arc<Self>, _: MainIntent) -> anyhow::Result<()> {
        self.engine.emit_event(MainViewEvent::OpenWallpaperPicker);
        Ok(())
    }

    async fn on_reduce(self: Arc<Self>, intent: MainIntent) -> anyhow::Result<()> {
        let current = self.engine.current_state();
        let next = MainReducer::reduce(current.clone(), &intent);
        if next != current {
            self.engine.publish(next);
        }
        Ok(())
    }

    /// Re-enumerate apps and re-apply search and recency on top of the
    /// state read before enumeration started.
    ///
    /// The read and the publish are not atomic: a clock tick landing in
    /// between is overwritten, and vice versa.
    async fn refresh_apps(&self) -> anyhow::Result<()> {
        let Some(state) = self.engine.current_state().into_normal() else {
            return Ok(());
        };
        let apps = self.load_apps().await?;
        let wallpaper = self.load_wallpaper().await;
        let recent_apps = self.recent.lock().select(&apps);
        self.engine.publish(MainUiState::Normal(NormalState {
            filtered_apps: filter_apps(&state.search_query, &apps),
            recent_apps,
            apps,
            wallpaper,
            ..state
        }));
        Ok(())
    }

    fn publish_recent(&self) {
        let Some(state) = self.engine.current_state().into_normal() else {
            return;
        };
        let recent_apps = self.recent.lock().select(&state.apps);
        if recent_apps != state.recent_apps {
            self.engine.publish(MainUiState::Normal(NormalState {
                recent_apps,
                ..state
            }));
        }
    }

    async fn load_apps(&self) -> anyhow::Result<Vec<AppInfo>> {
        let enumerator = Arc::clone(&self.services.enumerator);
        let apps = tokio::task::spawn_blocking(move || installed_apps(enumerator.as_ref()))
            .await
            .context("App enumeration did not complete")?
            .context("Failed to enumerate installed apps")?;
        tracing::debug!(count = apps.len(), "Enumerated installed apps");
        Ok(apps)
    }

    async fn load_wallpaper(&self) -> Option<Wallpaper> {
        let source = Arc::clone(&self.services.wallpaper);
        match tokio::task::spawn_blocking(move || source.current_wallpaper()).await {
            Ok(Ok(wallpaper)) => wallpaper,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "Wallpaper unavailable");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "Wallpaper lookup did not complete");
                None
            }
        }
    }

    /// Start the recurring clock tick, once per view-model.
    fn start_clock(self: &Arc<Self>) {
        if self.clock_started.swap(true, Ordering::SeqCst) {
            return;
        }
        let weak = Arc::downgrade(self);
        let period = self.config.clock_interval();
        self.engine.launch(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !tick_clock(&weak) {
                    break;
                }
            }
        });
    }
}

/// Republish the current normal state with a fresh clock reading.
///
/// Returns false once the view-model is gone.
fn tick_clock(view_model: &Weak<MainViewModel>) -> bool {
    let Some(view_model) = view_model.upgrade() else {
        return false;
    };
    if let Some(state) = view_model.engine.current_state().into_normal() {
        view_model.engine.publish(MainUiState::Normal(NormalState {
            current_time: Local::now(),
            ..state
        }));
    }
    true
}
