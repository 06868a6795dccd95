//! Intents accepted by the main screen.

use crate::ui::mvi::Intent;

use super::state::PageType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainIntent {
    /// Screen created: enumerate apps and start the clock.
    Init,
    /// Screen came back to the foreground.
    Resume,
    RefreshApps,
    AppClick { package_name: String },
    AppLongClick { package_name: String },
    /// Open the launcher's own settings page.
    OpenSettings,
    ChangeWallpaper,
    NavigateToPage(PageType),
    GoBack,
    SearchQueryChange(String),
    SwipeLeft,
    SwipeRight,
    SwipeDown,
    SwipeUp,
}

/// Routing tag of a [`MainIntent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainIntentKind {
    Init,
    Resume,
    RefreshApps,
    AppClick,
    AppLongClick,
    OpenSettings,
    ChangeWallpaper,
    NavigateToPage,
    GoBack,
    SearchQueryChange,
    SwipeLeft,
    SwipeRight,
    SwipeDown,
    SwipeUp,
}

impl Intent for MainIntent {
    type Kind = MainIntentKind;

    fn kind(&self) -> MainIntentKind {
        match self {
            MainIntent::Init => MainIntentKind::Init,
            MainIntent::Resume => MainIntentKind::Resume,
            MainIntent::RefreshApps => MainIntentKind::RefreshApps,
            MainIntent::AppClick { .. } => MainIntentKind::AppClick,
            MainIntent::AppLongClick { .. } => MainIntentKind::AppLongClick,
            MainIntent::OpenSettings => MainIntentKind::OpenSettings,
            MainIntent::ChangeWallpaper => MainIntentKind::ChangeWallpaper,
            MainIntent::NavigateToPage(_) => MainIntentKind::NavigateToPage,
            MainIntent::GoBack => MainIntentKind::GoBack,
            MainIntent::SearchQueryChange(_) => MainIntentKind::SearchQueryChange,
            MainIntent::SwipeLeft => MainIntentKind::SwipeLeft,
            MainIntent::SwipeRight => MainIntentKind::SwipeRight,
            MainIntent::SwipeDown => MainIntentKind::SwipeDown,
            MainIntent::SwipeUp => MainIntentKind::SwipeUp,
        }
    }
}
