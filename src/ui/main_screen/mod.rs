//! The launcher's main screen: home, info, more and all-apps pages.
//!
//! State lives in [`MainUiState`]; user input arrives as [`MainIntent`];
//! launches, toasts and pickers leave as [`MainViewEvent`].

mod apps;
mod event;
mod intent;
mod recent;
mod reducer;
mod state;
mod view_model;

pub use apps::{filter_apps, installed_apps};
pub use event::{MainViewEvent, TOAST_CANNOT_OPEN_SETTINGS, TOAST_CANNOT_START_APP};
pub use intent::{MainIntent, MainIntentKind};
pub use recent::RecentApps;
pub use reducer::MainReducer;
pub use state::{MainUiState, NormalState, PageType};
pub use view_model::{Collaborators, MainViewModel};
