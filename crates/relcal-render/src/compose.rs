//! Shared text composition.
//!
//! Both dialects build the same lines from the same rules; only the
//! [`MarkupStyle`] constants differ. Payload shape stays in the dialect
//! modules.

use chrono::{NaiveTime, Timelike};
use relcal_core::{Day, DateWindow, EventItem, PastEventPolicy, Summary, TimeSettings};

use crate::style::MarkupStyle;

/// Subheader shown when a run (or a day) has nothing to announce.
pub const NO_NEW_RELEASES: &str = "No new releases. Maybe it's a good day to take a walk?";

/// Trailing glyph appended to season premieres.
const PREMIERE_GLYPH: &str = " 🎉";

/// Formats a time of day per the display settings and dialect separator.
#[must_use]
pub fn format_time(time: NaiveTime, settings: TimeSettings, separator: char) -> String {
    let (hour, suffix) = if settings.use_24_hour {
        (time.hour(), "")
    } else {
        match time.hour() {
            0 => (12, " AM"),
            h @ 1..=11 => (h, " AM"),
            12 => (12, " PM"),
            h => (h - 12, " PM"),
        }
    };

    let hour_str = if settings.add_leading_zero {
        format!("{hour:02}")
    } else {
        hour.to_string()
    };

    format!("{hour_str}{separator}{:02}{suffix}", time.minute())
}

/// Composes one TV entry line.
///
/// Show name is bold; a standard designator stays plain; a free-form
/// designator and the episode title are italic. Premieres get a trailing
/// glyph; under [`PastEventPolicy::Strike`] past entries are struck
/// through whole.
#[must_use]
pub fn tv_line(
    item: &EventItem,
    style: MarkupStyle,
    policy: PastEventPolicy,
    time_settings: TimeSettings,
) -> String {
    let mut line = style.bold(&item.show_name);

    if let Some(designator) = &item.designator {
        let rendered = if item.designator_is_standard {
            designator.clone()
        } else {
            style.italic(designator)
        };
        line.push_str(" - ");
        line.push_str(&rendered);
    }
    if let Some(episode_title) = &item.episode_title {
        line.push_str(" - ");
        line.push_str(&style.italic(episode_title));
    }

    if let Some(time) = item.time {
        line = format!(
            "{}: {line}",
            format_time(time, time_settings, style.time_separator)
        );
    }

    if item.is_premiere {
        line.push_str(PREMIERE_GLYPH);
    }

    if item.is_past && policy == PastEventPolicy::Strike {
        line = style.strike(&line);
    }
    line
}

/// Composes one movie entry line.
#[must_use]
pub fn movie_line(item: &EventItem, style: MarkupStyle, policy: PastEventPolicy) -> String {
    let mut line = format!("🎬  {}", style.bold(&item.show_name));
    if item.is_past && policy == PastEventPolicy::Strike {
        line = style.strike(&line);
    }
    line
}

/// Composes a day's body: TV lines, then a MOVIES section.
///
/// An empty day renders the placeholder sentence instead of empty text.
#[must_use]
pub fn day_body(
    day: &Day,
    style: MarkupStyle,
    policy: PastEventPolicy,
    time_settings: TimeSettings,
) -> String {
    if !day.has_events() {
        return String::from(NO_NEW_RELEASES);
    }

    let mut sections: Vec<String> = Vec::with_capacity(2);
    if !day.tv.is_empty() {
        let lines: Vec<String> = day
            .tv
            .iter()
            .map(|item| tv_line(item, style, policy, time_settings))
            .collect();
        sections.push(lines.join("\n"));
    }
    if !day.movies.is_empty() {
        let lines: Vec<String> = day
            .movies
            .iter()
            .map(|item| movie_line(item, style, policy))
            .collect();
        sections.push(format!("{}\n{}", style.bold("MOVIES"), lines.join("\n")));
    }
    sections.join("\n\n")
}

/// Header title text: the configured header plus an optional date range.
#[must_use]
pub fn header_title(header: &str, window: &DateWindow, show_date_range: bool) -> String {
    if show_date_range {
        format!("{header} {}", window.display_range())
    } else {
        String::from(header)
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        String::from(word)
    } else {
        format!("{word}s")
    }
}

/// Bolded one-line count summary, e.g.
/// `**📺 3 all-new episodes and 🎉 1 season premiere**`. With nothing to
/// announce this is the bolded placeholder sentence.
#[must_use]
pub fn summary_line(summary: &Summary, style: MarkupStyle) -> String {
    if summary.is_empty() {
        return style.bold(NO_NEW_RELEASES);
    }

    let gap = style.emoji_gap;
    let mut parts: Vec<String> = Vec::with_capacity(3);
    if summary.tv_count > 0 {
        parts.push(format!(
            "📺{gap}{} all-new {}",
            summary.tv_count,
            pluralize("episode", summary.tv_count)
        ));
    }
    if summary.movie_count > 0 {
        parts.push(format!(
            "🎬{gap}{} movie {}",
            summary.movie_count,
            pluralize("release", summary.movie_count)
        ));
    }
    if summary.premiere_count > 0 {
        parts.push(format!(
            "🎉{gap}{} season {}",
            summary.premiere_count,
            pluralize("premiere", summary.premiere_count)
        ));
    }

    let joined = match parts.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, [only])) => format!("{only} and {last}"),
        Some((last, rest)) => format!("{}, and {last}", rest.join(", ")),
    };
    style.bold(&joined)
}
