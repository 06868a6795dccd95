//! State of the main screen.

use chrono::{DateTime, Local};

use crate::platform::{AppInfo, Wallpaper};
use crate::ui::mvi::UiState;

/// Pages reachable from the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageType {
    #[default]
    Home,
    Info,
    More,
    AllApps,
}

/// Everything the screen renders once apps are known.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalState {
    pub current_page: PageType,
    /// Installed user apps, sorted by name.
    pub apps: Vec<AppInfo>,
    /// Recently launched apps, most recent first.
    pub recent_apps: Vec<AppInfo>,
    pub search_query: String,
    /// `apps` narrowed by `search_query`, same order.
    pub filtered_apps: Vec<AppInfo>,
    pub current_time: DateTime<Local>,
    pub wallpaper: Option<Wallpaper>,
}

impl NormalState {
    /// Fresh state on the home page with no search applied.
    pub fn new(apps: Vec<AppInfo>, recent_apps: Vec<AppInfo>, wallpaper: Option<Wallpaper>) -> Self {
        Self {
            current_page: PageType::Home,
            filtered_apps: apps.clone(),
            apps,
            recent_apps,
            search_query: String::new(),
            current_time: Local::now(),
            wallpaper,
        }
    }
}

/// Main screen lifecycle: `Loading` until the first enumeration lands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MainUiState {
    #[default]
    Loading,
    Normal(NormalState),
}

impl UiState for MainUiState {}

impl MainUiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Normal(_))
    }

    pub fn as_normal(&self) -> Option<&NormalState> {
        match self {
            Self::Normal(state) => Some(state),
            Self::Loading => None,
        }
    }

    pub fn into_normal(self) -> Option<NormalState> {
        match self {
            Self::Normal(state) => Some(state),
            Self::Loading => None,
        }
    }
}
