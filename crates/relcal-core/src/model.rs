//! Canonical data types shared across the pipeline.

use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::Deserialize;

/// Source category of a calendar feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceCategory {
    /// TV episode feed.
    Tv,
    /// Movie release feed.
    Movie,
}

/// Unprocessed calendar record as supplied by the calendar collaborator.
///
/// `start` is kept as the raw string; interpretation (date-only, naive
/// datetime, offset datetime) is the normalizer's job.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    /// Display title, e.g. `"Show X - 1x01 - Pilot"`.
    pub title: String,
    /// Raw start value. Accepted forms are documented on [`crate::normalize`].
    pub start: String,
    /// Which feed this record came from.
    pub category: SourceCategory,
}

/// Fully normalized, timezone-resolved calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Display title (never empty).
    pub title: String,
    /// Start instant in the configured timezone (always timezone-aware).
    pub start: DateTime<Tz>,
    /// Source category.
    pub category: SourceCategory,
    /// Title matches the season-premiere pattern.
    pub is_premiere: bool,
    /// Start instant is before the run's reference instant.
    pub is_past: bool,
}

impl Event {
    /// Local calendar date of the start instant.
    #[must_use]
    pub fn local_date(&self) -> NaiveDate {
        self.start.date_naive()
    }
}

/// Render-ready event owned by a [`Day`] bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    /// Time of day, present iff the display-time setting is enabled.
    /// The renderer owns turning this into a display string so each
    /// dialect can apply its own separator.
    pub time: Option<NaiveTime>,
    /// Show name (or the whole title when parsing found no separator).
    pub show_name: String,
    /// Episode designator, e.g. `"1x01"` or `"Special Event"`.
    pub designator: Option<String>,
    /// Designator matches the season/episode numeral pattern.
    pub designator_is_standard: bool,
    /// Free-text episode title, e.g. `"Pilot"`.
    pub episode_title: Option<String>,
    /// Season premiere flag.
    pub is_premiere: bool,
    /// Past-event flag (visual treatment decided by the renderer).
    pub is_past: bool,
    /// Source category.
    pub category: SourceCategory,
}

/// One calendar day's worth of events, in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    /// Local calendar date.
    pub date: NaiveDate,
    /// Display name, e.g. `"Monday, Jan 06"`.
    pub display_name: String,
    /// TV items, ascending by start time (ties keep input order).
    pub tv: Vec<EventItem>,
    /// Movie items, in input order.
    pub movies: Vec<EventItem>,
}

impl Day {
    /// Weekday name portion of the display name, e.g. `"Monday"`.
    #[must_use]
    pub fn weekday_name(&self) -> String {
        self.date.format("%A").to_string()
    }

    /// Whether the bucket holds any events.
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.tv.is_empty() || !self.movies.is_empty()
    }
}

/// Aggregate counts for one run, passed unchanged to every renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Total TV episodes (before past-event hiding).
    pub tv_count: usize,
    /// Total movie releases (before past-event hiding).
    pub movie_count: usize,
    /// Total season premieres.
    pub premiere_count: usize,
    /// Events removed by deduplication (diagnostic).
    pub deduplicated_count: usize,
    /// Past events dropped under the HIDE policy (diagnostic).
    pub skipped_past_count: usize,
}

impl Summary {
    /// Whether the run has nothing to announce.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tv_count == 0 && self.movie_count == 0
    }
}

/// How events that already started are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PastEventPolicy {
    /// Render past events like any other.
    #[default]
    Display,
    /// Drop past events before bucketing.
    Hide,
    /// Keep past events, rendered struck through.
    Strike,
}

/// Time-of-day display settings.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimeSettings {
    /// Show the start time before each TV entry.
    pub display_time: bool,
    /// 24-hour clock instead of 12-hour AM/PM.
    pub use_24_hour: bool,
    /// Pad the hour to two digits.
    pub add_leading_zero: bool,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            display_time: true,
            use_24_hour: false,
            add_leading_zero: true,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_day_weekday_name() {
        // Arrange
        let day = Day {
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            display_name: String::from("Monday, Jan 05"),
            tv: Vec::new(),
            movies: Vec::new(),
        };

        // Act & Assert
        assert_eq!(day.weekday_name(), "Monday");
        assert!(!day.has_events());
    }

    #[test]
    fn test_summary_is_empty() {
        // Arrange & Act
        let empty = Summary::default();
        let busy = Summary {
            tv_count: 1,
            ..Summary::default()
        };

        // Assert
        assert!(empty.is_empty());
        assert!(!busy.is_empty());
    }

    #[test]
    fn test_raw_event_deserialize() {
        // Arrange
        let json = r#"{"title": "Show X - 1x01 - Pilot", "start": "2026-01-05T20:00:00", "category": "tv"}"#;

        // Act
        let raw: RawEvent = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(raw.title, "Show X - 1x01 - Pilot");
        assert_eq!(raw.category, SourceCategory::Tv);
    }

    #[test]
    fn test_time_settings_default() {
        // Arrange & Act
        let settings = TimeSettings::default();

        // Assert
        assert!(settings.display_time);
        assert!(!settings.use_24_hour);
        assert!(settings.add_leading_zero);
    }
}
