//! Line commands typed at the launcher prompt.

use thiserror::Error;

use crate::ui::main_screen::{MainIntent, PageType};

pub const HELP: &str = "\
commands:
  init | resume | refresh | cancel
  click <package> | hold <package>
  settings | wallpaper
  page <home|info|more|all> | back
  search [query]
  swipe <left|right|up|down>
  show | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward to the view-model.
    Intent(MainIntent),
    /// Cancel the in-flight app refresh.
    Cancel,
    /// Re-render the current state.
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{value}' is not one of {expected}")]
    InvalidArgument {
        value: String,
        expected: &'static str,
    },
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "init" => Command::Intent(MainIntent::Init),
        "resume" => Command::Intent(MainIntent::Resume),
        "refresh" => Command::Intent(MainIntent::RefreshApps),
        "cancel" => Command::Cancel,
        "click" => Command::Intent(MainIntent::AppClick {
            package_name: required(rest, "click", "a package name")?,
        }),
        "hold" => Command::Intent(MainIntent::AppLongClick {
            package_name: required(rest, "hold", "a package name")?,
        }),
        "settings" => Command::Intent(MainIntent::OpenSettings),
        "wallpaper" => Command::Intent(MainIntent::ChangeWallpaper),
        "page" => {
            let page = parse_page(&required(rest, "page", PAGE_NAMES)?)?;
            Command::Intent(MainIntent::NavigateToPage(page))
        }
        "back" => Command::Intent(MainIntent::GoBack),
        // The raw remainder is the query; an empty one clears the search.
        "search" => Command::Intent(MainIntent::SearchQueryChange(rest.to_string())),
        "swipe" => Command::Intent(parse_swipe(&required(rest, "swipe", SWIPE_NAMES)?)?),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

const PAGE_NAMES: &str = "home, info, more, all";
const SWIPE_NAMES: &str = "left, right, up, down";

fn required(
    rest: &str,
    command: &'static str,
    expected: &'static str,
) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument { command, expected });
    }
    Ok(rest.to_string())
}

fn parse_page(value: &str) -> Result<PageType, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "home" => Ok(PageType::Home),
        "info" => Ok(PageType::Info),
        "more" => Ok(PageType::More),
        "all" | "apps" | "allapps" => Ok(PageType::AllApps),
        _ => Err(CommandError::InvalidArgument {
            value: value.to_string(),
            expected: PAGE_NAMES,
        }),
    }
}

fn parse_swipe(value: &str) -> Result<MainIntent, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "left" => Ok(MainIntent::SwipeLeft),
        "right" => Ok(MainIntent::SwipeRight),
        "up" => Ok(MainIntent::SwipeUp),
        "down" => Ok(MainIntent::SwipeDown),
        _ => Err(CommandError::InvalidArgument {
            value: value.to_string(),
            expected: SWIPE_NAMES,
        }),
    }
}
