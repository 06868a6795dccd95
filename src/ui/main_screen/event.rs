//! One-shot events emitted by the main screen.

use crate::platform::LaunchDescriptor;
use crate::ui::mvi::{AppViewEvent, ViewEvent};

pub const TOAST_CANNOT_START_APP: &str = "Unable to start app";
pub const TOAST_CANNOT_OPEN_SETTINGS: &str = "Unable to open settings";

#[derive(Debug, Clone, PartialEq)]
pub enum MainViewEvent {
    /// Screen-independent event (toasts and the like).
    App(AppViewEvent),
    StartApp(LaunchDescriptor),
    ShowAppInfo { package_name: String },
    OpenWallpaperPicker,
}

impl MainViewEvent {
    pub fn toast(message: impl Into<String>) -> Self {
        MainViewEvent::App(AppViewEvent::PopupToastMessage(message.into()))
    }
}

impl From<AppViewEvent> for MainViewEvent {
    fn from(event: AppViewEvent) -> Self {
        MainViewEvent::App(event)
    }
}

impl ViewEvent for MainViewEvent {
    fn as_app_event(&self) -> Option<&AppViewEvent> {
        match self {
            MainViewEvent::App(event) => Some(event),
            _ => None,
        }
    }
}
