//! Episode title parsing heuristics.
//!
//! Feed titles are uncontrolled third-party text, typically shaped like
//! `"Show Name - 1x01 - Episode Title"`. Parsing is best effort: it
//! degrades to "whole title is the show name" and never fails.

use std::sync::LazyLock;

use regex::Regex;

/// Separator between show name, designator, and episode title.
const SEPARATOR: &str = " - ";

/// Standard episode designator: `S`-prefixed or bare digits, 1-4 digits
/// each side, `E` or `x` separator (e.g. `S01E01`, `1x01`).
static STANDARD_DESIGNATOR: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a literal, verified by tests
    Regex::new(r"(?i)^s?\d{1,4}[ex]\d{1,4}$").unwrap()
});

/// Outcome of splitting a display title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    /// Show name (the whole title when no separator was found).
    pub show_name: String,
    /// Episode designator, when a first split succeeded.
    pub designator: Option<String>,
    /// Designator matches the season/episode numeral pattern. Standard
    /// designators are never italicized by the renderers; free-form ones
    /// are italicized alongside the episode title.
    pub designator_is_standard: bool,
    /// Free-text episode title, when a second split succeeded.
    pub episode_title: Option<String>,
}

/// Splits a display title into show name, designator, and episode title.
///
/// The title is split on the first literal `" - "`. With no separator the
/// whole title is the show name. After one split, a second split of the
/// remainder separates the designator from the episode title; when that
/// fails the remainder is treated entirely as the designator.
#[must_use]
pub fn parse_title(title: &str) -> ParsedTitle {
    let Some((show_name, remainder)) = title.split_once(SEPARATOR) else {
        return ParsedTitle {
            show_name: String::from(title),
            designator: None,
            designator_is_standard: false,
            episode_title: None,
        };
    };

    let (designator, episode_title) = match remainder.split_once(SEPARATOR) {
        Some((num, rest)) => (num, Some(String::from(rest))),
        None => (remainder, None),
    };

    ParsedTitle {
        show_name: String::from(show_name),
        designator_is_standard: STANDARD_DESIGNATOR.is_match(designator),
        designator: Some(String::from(designator)),
        episode_title,
    }
}
