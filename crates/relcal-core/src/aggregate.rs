//! Day bucketing and summary counts.
//!
//! Groups normalized events into per-day buckets in display order and
//! produces the run-wide [`Summary`]. Counts are taken over every event
//! that enters the aggregator, so hiding past events never changes what
//! the header announces.

use chrono::{DateTime, Datelike, NaiveDate};
use chrono_tz::Tz;
use std::collections::BTreeMap;

use crate::model::{Day, Event, EventItem, PastEventPolicy, SourceCategory, Summary, TimeSettings};
use crate::title::parse_title;
use crate::window::weekday_position;

fn to_item(event: &Event, time_settings: TimeSettings) -> EventItem {
    let parsed = parse_title(&event.title);
    EventItem {
        time: time_settings.display_time.then(|| event.start.time()),
        show_name: parsed.show_name,
        designator: parsed.designator,
        designator_is_standard: parsed.designator_is_standard,
        episode_title: parsed.episode_title,
        is_premiere: event.is_premiere,
        is_past: event.is_past,
        category: event.category,
    }
}

/// Buckets events by local calendar date and computes the run summary.
///
/// Day buckets come back ordered by weekday position under the configured
/// week start, TV items within a day ascending by start instant (stable),
/// movies in input order. Under [`PastEventPolicy::Hide`] past events are
/// dropped after counting, so `skipped_past_count` is the only count that
/// reflects the drop.
///
/// `deduplicated_count` is left at zero; the caller merges in the count
/// reported by [`crate::dedup::dedup`].
#[must_use]
pub fn aggregate(
    events: &[Event],
    week_starts_monday: bool,
    policy: PastEventPolicy,
    time_settings: TimeSettings,
) -> (Vec<Day>, Summary) {
    let mut summary = Summary::default();
    for event in events {
        match event.category {
            SourceCategory::Tv => {
                summary.tv_count += 1;
                // Only TV events count as premieres; the renderers never
                // mark a movie line with the premiere glyph.
                if event.is_premiere {
                    summary.premiere_count += 1;
                }
            }
            SourceCategory::Movie => summary.movie_count += 1,
        }
    }

    // (weekday position, date) keeps multi-week windows deterministic.
    let mut buckets: BTreeMap<(usize, NaiveDate), (Vec<(DateTime<Tz>, EventItem)>, Vec<EventItem>)> =
        BTreeMap::new();

    for event in events {
        if policy == PastEventPolicy::Hide && event.is_past {
            summary.skipped_past_count += 1;
            tracing::debug!(title = %event.title, "Hiding past event");
            continue;
        }

        let date = event.local_date();
        let key = (weekday_position(date.weekday(), week_starts_monday), date);
        let (tv, movies) = buckets.entry(key).or_default();
        match event.category {
            SourceCategory::Tv => tv.push((event.start, to_item(event, time_settings))),
            SourceCategory::Movie => movies.push(to_item(event, time_settings)),
        }
    }

    let days = buckets
        .into_iter()
        .map(|((_, date), (mut tv, movies))| {
            tv.sort_by_key(|(start, _)| *start);
            Day {
                date,
                display_name: date.format("%A, %b %d").to_string(),
                tv: tv.into_iter().map(|(_, item)| item).collect(),
                movies,
            }
        })
        .collect();

    (days, summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use chrono::{NaiveTime, TimeZone};
    use chrono_tz::America::New_York;

    use super::*;

    fn event(title: &str, day: u32, hour: u32, category: SourceCategory, is_past: bool) -> Event {
        Event {
            title: String::from(title),
            start: New_York.with_ymd_and_hms(2026, 1, day, hour, 0, 0).unwrap(),
            category,
            is_premiere: crate::normalize::is_premiere_title(title),
            is_past,
        }
    }

    #[test]
    fn test_counts_taken_before_hiding() {
        // Arrange: 3 TV (one past premiere), 1 movie, HIDE policy
        let events = vec![
            event("Show A - 1x01 - Pilot", 5, 8, SourceCategory::Tv, true),
            event("Show B - 2x05 - Ep", 5, 20, SourceCategory::Tv, false),
            event("Show C - 3x02 - Ep", 7, 21, SourceCategory::Tv, false),
            event("Big Movie", 7, 0, SourceCategory::Movie, false),
        ];

        // Act
        let (days, summary) = aggregate(
            &events,
            true,
            PastEventPolicy::Hide,
            TimeSettings::default(),
        );

        // Assert: counts include the hidden event, buckets do not
        assert_eq!(summary.tv_count, 3);
        assert_eq!(summary.movie_count, 1);
        assert_eq!(summary.premiere_count, 1);
        assert_eq!(summary.skipped_past_count, 1);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].tv.len(), 1);
        assert_eq!(days[1].tv.len(), 1);
        assert_eq!(days[1].movies.len(), 1);
    }

    #[test]
    fn test_movie_with_premiere_style_title_is_not_a_premiere() {
        // Arrange: a movie whose title matches the premiere pattern,
        // with the flag forced on to exercise the aggregator's guard
        let mut movie = event(
            "Alien - 1x01 - Collector's Cut",
            6,
            0,
            SourceCategory::Movie,
            false,
        );
        movie.is_premiere = true;

        // Act
        let (_, summary) = aggregate(
            &[movie],
            true,
            PastEventPolicy::Display,
            TimeSettings::default(),
        );

        // Assert: announced as a movie, never as a premiere
        assert_eq!(summary.movie_count, 1);
        assert_eq!(summary.premiere_count, 0);
    }

    #[test]
    fn test_tv_sorted_by_start_movies_keep_input_order() {
        // Arrange: TV out of order, movies deliberately "reversed"
        let events = vec![
            event("Show Late - 1x02 - Ep", 5, 22, SourceCategory::Tv, false),
            event("Movie Z", 5, 0, SourceCategory::Movie, false),
            event("Show Early - 1x03 - Ep", 5, 9, SourceCategory::Tv, false),
            event("Movie A", 5, 0, SourceCategory::Movie, false),
        ];

        // Act
        let (days, _) = aggregate(
            &events,
            true,
            PastEventPolicy::Display,
            TimeSettings::default(),
        );

        // Assert
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].tv[0].show_name, "Show Early");
        assert_eq!(days[0].tv[1].show_name, "Show Late");
        assert_eq!(days[0].movies[0].show_name, "Movie Z");
        assert_eq!(days[0].movies[1].show_name, "Movie A");
    }

    #[test]
    fn test_day_order_follows_week_start() {
        // Arrange: Sunday 2026-01-11 and Monday 2026-01-05, same week
        let events = vec![
            event("Sunday Show - 1x02 - Ep", 11, 20, SourceCategory::Tv, false),
            event("Monday Show - 1x02 - Ep", 5, 20, SourceCategory::Tv, false),
        ];

        // Act
        let (monday_first, _) = aggregate(
            &events,
            true,
            PastEventPolicy::Display,
            TimeSettings::default(),
        );
        let (sunday_first, _) = aggregate(
            &events,
            false,
            PastEventPolicy::Display,
            TimeSettings::default(),
        );

        // Assert
        assert_eq!(monday_first[0].weekday_name(), "Monday");
        assert_eq!(monday_first[1].weekday_name(), "Sunday");
        assert_eq!(sunday_first[0].weekday_name(), "Sunday");
        assert_eq!(sunday_first[1].weekday_name(), "Monday");
    }

    #[test]
    fn test_display_name_format() {
        // Arrange
        let events = vec![event("Show - 1x02 - Ep", 6, 20, SourceCategory::Tv, false)];

        // Act
        let (days, _) = aggregate(
            &events,
            true,
            PastEventPolicy::Display,
            TimeSettings::default(),
        );

        // Assert
        assert_eq!(days[0].display_name, "Tuesday, Jan 06");
    }

    #[test]
    fn test_time_carried_only_when_display_enabled() {
        // Arrange
        let events = vec![event("Show - 1x02 - Ep", 6, 20, SourceCategory::Tv, false)];
        let no_time = TimeSettings {
            display_time: false,
            ..TimeSettings::default()
        };

        // Act
        let (with, _) = aggregate(&events, true, PastEventPolicy::Display, TimeSettings::default());
        let (without, _) = aggregate(&events, true, PastEventPolicy::Display, no_time);

        // Assert
        assert_eq!(
            with[0].tv[0].time,
            Some(NaiveTime::from_hms_opt(20, 0, 0).unwrap())
        );
        assert_eq!(without[0].tv[0].time, None);
    }

    #[test]
    fn test_strike_policy_keeps_past_events() {
        // Arrange
        let events = vec![event("Show - 1x02 - Ep", 5, 8, SourceCategory::Tv, true)];

        // Act
        let (days, summary) = aggregate(
            &events,
            true,
            PastEventPolicy::Strike,
            TimeSettings::default(),
        );

        // Assert: kept in the bucket, flagged for the renderer
        assert_eq!(summary.skipped_past_count, 0);
        assert!(days[0].tv[0].is_past);
    }
}
