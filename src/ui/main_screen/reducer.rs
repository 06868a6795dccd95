//! Page navigation and search transitions of the main screen.

use crate::ui::mvi::Reducer;

use super::apps::filter_apps;
use super::intent::MainIntent;
use super::state::{MainUiState, NormalState, PageType};

/// Pure transitions that need nothing but the current state.
///
/// Intents that talk to collaborators are left untouched here, as is
/// everything while the screen is still loading.
pub struct MainReducer;

impl Reducer for MainReducer {
    type State = MainUiState;
    type Intent = MainIntent;

    fn reduce(state: Self::State, intent: &Self::Intent) -> Self::State {
        match state {
            MainUiState::Normal(normal) => MainUiState::Normal(reduce_normal(normal, intent)),
            loading => loading,
        }
    }
}

fn reduce_normal(state: NormalState, intent: &MainIntent) -> NormalState {
    match intent {
        MainIntent::NavigateToPage(page) => NormalState {
            current_page: *page,
            ..state
        },
        MainIntent::GoBack => NormalState {
            current_page: PageType::Home,
            ..state
        },
        MainIntent::SearchQueryChange(query) => NormalState {
            filtered_apps: filter_apps(query, &state.apps),
            search_query: query.clone(),
            ..state
        },
        MainIntent::SwipeLeft
        | MainIntent::SwipeRight
        | MainIntent::SwipeDown
        | MainIntent::SwipeUp => match swipe_target(state.current_page, intent) {
            Some(page) => NormalState {
                current_page: page,
                ..state
            },
            None => state,
        },
        _ => state,
    }
}

/// Page a swipe leads to from `page`, if the swipe does anything there.
fn swipe_target(page: PageType, swipe: &MainIntent) -> Option<PageType> {
    match (page, swipe) {
        (PageType::Home, MainIntent::SwipeLeft) => Some(PageType::Info),
        (PageType::Home, MainIntent::SwipeRight) => Some(PageType::More),
        (PageType::Home, MainIntent::SwipeDown) => Some(PageType::AllApps),
        (PageType::AllApps, MainIntent::SwipeUp) => Some(PageType::Home),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::AppInfo;
    use std::collections::BTreeMap;

    fn apps() -> Vec<AppInfo> {
        ["Calculator", "Calendar", "Camera", "Mail"]
            .iter()
            .map(|name| AppInfo {
                package_name: format!("pkg.{}", name.to_lowercase()),
                name: name.to_string(),
                icon: None,
                metadata: BTreeMap::new(),
            })
            .collect()
    }

    fn on_page(page: PageType) -> MainUiState {
        let mut state = NormalState::new(apps(), Vec::new(), None);
        state.current_page = page;
        MainUiState::Normal(state)
    }

    fn page_of(state: &MainUiState) -> PageType {
        state.as_normal().expect("normal state").current_page
    }

    #[test]
    fn swipes_from_home() {
        let cases = [
            (MainIntent::SwipeLeft, PageType::Info),
            (MainIntent::SwipeRight, PageType::More),
            (MainIntent::SwipeDown, PageType::AllApps),
            (MainIntent::SwipeUp, PageType::Home),
        ];
        for (intent, expected) in cases {
            let state = MainReducer::reduce(on_page(PageType::Home), &intent);
            assert_eq!(page_of(&state), expected, "{intent:?}");
        }
    }

    #[test]
    fn swipe_up_only_leaves_all_apps() {
        let state = MainReducer::reduce(on_page(PageType::AllApps), &MainIntent::SwipeUp);
        assert_eq!(page_of(&state), PageType::Home);

        for page in [PageType::Info, PageType::More] {
            let state = MainReducer::reduce(on_page(page), &MainIntent::SwipeUp);
            assert_eq!(page_of(&state), page);
        }
    }

    #[test]
    fn swipes_away_from_home_are_ignored() {
        for page in [PageType::Info, PageType::More, PageType::AllApps] {
            for intent in [MainIntent::SwipeLeft, MainIntent::SwipeRight, MainIntent::SwipeDown] {
                let state = MainReducer::reduce(on_page(page), &intent);
                assert_eq!(page_of(&state), page, "{page:?} {intent:?}");
            }
        }
    }

    #[test]
    fn go_back_returns_home() {
        for page in [PageType::Info, PageType::More, PageType::AllApps, PageType::Home] {
            let state = MainReducer::reduce(on_page(page), &MainIntent::GoBack);
            assert_eq!(page_of(&state), PageType::Home);
        }
    }

    #[test]
    fn navigate_overwrites_page() {
        let state = MainReducer::reduce(
            on_page(PageType::Info),
            &MainIntent::NavigateToPage(PageType::AllApps),
        );
        assert_eq!(page_of(&state), PageType::AllApps);
    }

    #[test]
    fn search_then_clear_restores_all_apps() {
        let searched = MainReducer::reduce(
            on_page(PageType::Home),
            &MainIntent::SearchQueryChange("cal".to_string()),
        );
        let normal = searched.as_normal().unwrap();
        assert_eq!(normal.search_query, "cal");
        assert_eq!(normal.filtered_apps.len(), 2);

        let cleared = MainReducer::reduce(searched, &MainIntent::SearchQueryChange(String::new()));
        let normal = cleared.as_normal().unwrap();
        assert_eq!(normal.filtered_apps, normal.apps);
    }

    #[test]
    fn loading_state_is_untouched() {
        let state = MainReducer::reduce(MainUiState::Loading, &MainIntent::SwipeDown);
        assert_eq!(state, MainUiState::Loading);
    }

    #[test]
    fn side_effect_intents_leave_state_alone() {
        let before = on_page(PageType::More);
        let after = MainReducer::reduce(before.clone(), &MainIntent::ChangeWallpaper);
        assert_eq!(after, before);
    }
}
