//! Plain-text rendering of the main screen and its events.

use std::fmt::Write as _;

use crate::platform::{AppInfo, LaunchDescriptor};
use crate::ui::main_screen::{MainUiState, NormalState, PageType};
use crate::ui::mvi::AppViewEvent;

/// How many recent apps the home page shows.
const HOME_RECENT_LIMIT: usize = 4;

/// True when both states render the same screen at minute resolution.
///
/// Clock ticks republish the whole state every interval; only a change of
/// the displayed minute is worth redrawing for.
pub fn same_screen(previous: &MainUiState, next: &MainUiState) -> bool {
    match (previous, next) {
        (MainUiState::Loading, MainUiState::Loading) => true,
        (MainUiState::Normal(previous), MainUiState::Normal(next)) => {
            let mut previous = previous.clone();
            previous.current_time = next.current_time;
            previous == *next && clock_label(&previous) == clock_label(next)
        }
        _ => false,
    }
}

pub fn render_state(state: &MainUiState) -> String {
    match state {
        MainUiState::Loading => "Loading apps...\n".to_string(),
        MainUiState::Normal(state) => render_normal(state),
    }
}

fn render_normal(state: &NormalState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} == {}", page_title(state.current_page), clock_label(state));
    if let Some(wallpaper) = &state.wallpaper {
        let _ = writeln!(
            out,
            "wallpaper: {} ({}x{})",
            wallpaper.source, wallpaper.width, wallpaper.height
        );
    }

    match state.current_page {
        PageType::Home => {
            let _ = writeln!(out, "recent:");
            write_apps(&mut out, state.recent_apps.iter().take(HOME_RECENT_LIMIT));
        }
        PageType::Info => {
            let _ = writeln!(out, "{}", state.current_time.format("%A, %d %B %Y"));
            let _ = writeln!(
                out,
                "{} apps installed, {} recently used",
                state.apps.len(),
                state.recent_apps.len()
            );
        }
        PageType::More => {
            let _ = writeln!(out, "more:");
            let _ = writeln!(out, "  settings   open launcher settings");
            let _ = writeln!(out, "  wallpaper  change wallpaper");
        }
        PageType::AllApps => {
            if state.search_query.is_empty() {
                let _ = writeln!(out, "all apps:");
            } else {
                let _ = writeln!(
                    out,
                    "search '{}' ({} of {}):",
                    state.search_query,
                    state.filtered_apps.len(),
                    state.apps.len()
                );
            }
            write_apps(&mut out, state.filtered_apps.iter());
        }
    }
    out
}

fn write_apps<'a>(out: &mut String, apps: impl Iterator<Item = &'a AppInfo>) {
    let mut empty = true;
    for app in apps {
        empty = false;
        let _ = writeln!(out, "  {:<24} {}", app.name, app.package_name);
    }
    if empty {
        let _ = writeln!(out, "  (none)");
    }
}

fn page_title(page: PageType) -> &'static str {
    match page {
        PageType::Home => "Home",
        PageType::Info => "Info",
        PageType::More => "More",
        PageType::AllApps => "All apps",
    }
}

fn clock_label(state: &NormalState) -> String {
    state.current_time.format("%H:%M").to_string()
}

pub fn describe_launch(descriptor: &LaunchDescriptor) -> String {
    let mut line = format!("{} -> {}", descriptor.action, descriptor.target);
    if let Some(data) = &descriptor.data {
        let _ = write!(line, " [{}]", data);
    }
    for (key, value) in &descriptor.extras {
        let _ = write!(line, " {}={}", key, value);
    }
    line
}

pub fn describe_app_event(event: &AppViewEvent) -> String {
    match event {
        AppViewEvent::PopupToastMessage(message) => format!("! {}", message),
        AppViewEvent::StartActivity(descriptor) => {
            format!("> start {}", describe_launch(descriptor))
        }
        AppViewEvent::SetResult { code, descriptor } => match descriptor {
            Some(descriptor) => format!("> result {} {}", code, describe_launch(descriptor)),
            None => format!("> result {}", code),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone};
    use std::collections::BTreeMap;

    fn app(package: &str, name: &str) -> AppInfo {
        AppInfo {
            package_name: package.to_string(),
            name: name.to_string(),
            icon: None,
            metadata: BTreeMap::new(),
        }
    }

    fn normal() -> NormalState {
        let apps = vec![app("p.calc", "Calculator"), app("p.cam", "Camera")];
        let mut state = NormalState::new(apps.clone(), vec![apps[1].clone()], None);
        state.current_time = Local
            .with_ymd_and_hms(2024, 3, 1, 9, 30, 5)
            .single()
            .expect("unambiguous local time");
        state
    }

    #[test]
    fn loading_renders_placeholder() {
        assert_eq!(render_state(&MainUiState::Loading), "Loading apps...\n");
    }

    #[test]
    fn home_shows_clock_and_recent_apps() {
        let text = render_state(&MainUiState::Normal(normal()));
        assert!(text.starts_with("== Home == 09:30"));
        assert!(text.contains("Camera"));
        assert!(!text.contains("Calculator"));
    }

    #[test]
    fn all_apps_shows_search_summary() {
        let mut state = normal();
        state.current_page = PageType::AllApps;
        state.search_query = "calc".to_string();
        state.filtered_apps = vec![state.apps[0].clone()];

        let text = render_state(&MainUiState::Normal(state));
        assert!(text.contains("search 'calc' (1 of 2):"));
        assert!(text.contains("Calculator"));
        assert!(!text.contains("Camera"));
    }

    #[test]
    fn tick_within_same_minute_is_same_screen() {
        let before = normal();
        let mut after = before.clone();
        after.current_time = before.current_time + Duration::seconds(20);
        assert!(same_screen(
            &MainUiState::Normal(before.clone()),
            &MainUiState::Normal(after.clone())
        ));

        after.current_time = before.current_time + Duration::seconds(60);
        assert!(!same_screen(
            &MainUiState::Normal(before),
            &MainUiState::Normal(after)
        ));
    }

    #[test]
    fn page_change_is_a_new_screen() {
        let before = normal();
        let mut after = before.clone();
        after.current_page = PageType::More;
        assert!(!same_screen(
            &MainUiState::Normal(before),
            &MainUiState::Normal(after)
        ));
        assert!(!same_screen(&MainUiState::Loading, &MainUiState::Normal(normal())));
    }

    #[test]
    fn launch_description_includes_data_and_extras() {
        let descriptor = LaunchDescriptor::new("action.VIEW", "p.calc")
            .with_data("package:p.calc")
            .with_extra("mode", "quick");
        assert_eq!(
            describe_launch(&descriptor),
            "action.VIEW -> p.calc [package:p.calc] mode=quick"
        );
        assert_eq!(
            describe_app_event(&AppViewEvent::SetResult {
                code: 0,
                descriptor: None
            }),
            "> result 0"
        );
    }
}
