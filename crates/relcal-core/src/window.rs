//! Fetch window math.
//!
//! The window drives three things: the range events are requested for,
//! post-normalization validation, and the date-range text in headers.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Deserialize;

/// Which span of days one run covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarRange {
    /// Today only.
    Day,
    /// The week containing today, under the configured week start.
    #[default]
    Week,
}

/// Inclusive date window for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First covered date.
    pub start: NaiveDate,
    /// Last covered date.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Whether the window covers a single day.
    #[must_use]
    pub fn is_daily(&self) -> bool {
        self.start == self.end
    }

    /// Parenthesized range text for headers: `"(Monday, Jan 05)"` for a
    /// single day, `"(Jan 05 - Jan 11)"` for a span.
    #[must_use]
    pub fn display_range(&self) -> String {
        if self.is_daily() {
            format!("({})", self.start.format("%A, %b %d"))
        } else {
            format!(
                "({} - {})",
                self.start.format("%b %d"),
                self.end.format("%b %d")
            )
        }
    }
}

/// The seven weekdays in configured display order.
#[must_use]
pub const fn weekday_order(week_starts_monday: bool) -> [Weekday; 7] {
    if week_starts_monday {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
    } else {
        [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ]
    }
}

/// Position of a weekday within the configured display order (0-6).
#[must_use]
pub fn weekday_position(weekday: Weekday, week_starts_monday: bool) -> usize {
    let days_from_start = if week_starts_monday {
        weekday.num_days_from_monday()
    } else {
        weekday.num_days_from_sunday()
    };
    usize::try_from(days_from_start).unwrap_or_default()
}

/// Calculates the inclusive date window for a run.
///
/// `Day` covers `today` alone; `Week` covers the seven days of the week
/// containing `today`, starting Monday or Sunday per configuration.
#[must_use]
pub fn calculate_window(
    range: CalendarRange,
    week_starts_monday: bool,
    today: NaiveDate,
) -> DateWindow {
    match range {
        CalendarRange::Day => DateWindow {
            start: today,
            end: today,
        },
        CalendarRange::Week => {
            let back = if week_starts_monday {
                today.weekday().num_days_from_monday()
            } else {
                today.weekday().num_days_from_sunday()
            };
            let start = today - Days::new(u64::from(back));
            let end = start + Days::new(6);
            DateWindow { start, end }
        }
    }
}
