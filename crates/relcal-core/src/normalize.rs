//! Raw record normalization.
//!
//! Converts [`RawEvent`] records into canonical [`Event`] values: resolves
//! the timezone, classifies past/future against an explicit reference
//! instant, and detects season premieres.
//!
//! Accepted start formats:
//! - RFC 3339 with offset, e.g. `"2026-01-05T20:00:00-05:00"` — converted
//!   (not relabeled) to the configured timezone.
//! - `"%Y-%m-%dT%H:%M:%S"` / `"%Y-%m-%d %H:%M:%S"` — naive; assumed to
//!   already represent the configured timezone. No silent UTC assumption,
//!   which would double-shift recurring all-day events.
//! - `"%Y-%m-%d"` — midnight local time in the configured timezone.

use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use regex::Regex;

use crate::model::{Event, RawEvent, SourceCategory};

/// Season-premiere pattern: `S01E01`-style or `1x01`-style first episodes,
/// leading zeros allowed in the episode portion.
static PREMIERE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a literal, verified by tests
    Regex::new(r"(?i)[-\s](?:s\d+e0*1|(?:\d+x0*1))\b").unwrap()
});

/// Whether a display title marks the first episode of a season.
#[must_use]
pub fn is_premiere_title(title: &str) -> bool {
    PREMIERE_PATTERN.is_match(title)
}

/// Tries both naive datetime formats, returns `None` if both fail.
fn try_naive_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// Resolves a naive local datetime in `tz`, handling DST gaps and folds.
fn resolve_local(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Tz>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("local time {naive} does not exist in {tz}"))
}

/// Parses a raw start value into an instant in the configured timezone.
fn parse_start(raw: &str, tz: Tz) -> Result<DateTime<Tz>> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Ok(zoned.with_timezone(&tz));
    }
    if let Some(naive) = try_naive_datetime(raw) {
        return resolve_local(naive, tz);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .context("failed to build midnight datetime")?;
        return resolve_local(midnight, tz);
    }
    bail!("start value is neither a date nor a datetime: {raw:?}");
}

/// Normalizes a raw record into a canonical [`Event`].
///
/// `reference` is the instant past/future classification is measured
/// against; passing it explicitly keeps the pipeline deterministic.
///
/// # Errors
///
/// Returns an error when the title is empty or blank, or when the start
/// value cannot be interpreted as a date or datetime.
pub fn normalize(raw: &RawEvent, tz: Tz, reference: DateTime<Tz>) -> Result<Event> {
    if raw.title.trim().is_empty() {
        bail!("event has an empty title");
    }

    let start = parse_start(&raw.start, tz)
        .with_context(|| format!("invalid start for event {:?}", raw.title))?;

    // Premieres are a TV concept; a movie title that happens to match the
    // pattern (e.g. a re-release cut) is not one.
    let is_premiere = raw.category == SourceCategory::Tv && is_premiere_title(&raw.title);

    Ok(Event {
        title: raw.title.clone(),
        start,
        category: raw.category,
        is_premiere,
        is_past: start < reference,
    })
}

/// Drops events whose local calendar date falls outside the fetch window.
///
/// Timezone conversion can shift an event across a date boundary (DST
/// transitions, midnight-adjacent starts), so the upstream window filter
/// is not trusted. Discarded events are logged, never an error.
#[must_use]
pub fn retain_in_window(events: Vec<Event>, start: NaiveDate, end: NaiveDate) -> Vec<Event> {
    events
        .into_iter()
        .filter(|event| {
            let date = event.local_date();
            let inside = date >= start && date <= end;
            if !inside {
                tracing::warn!(
                    title = %event.title,
                    date = %date,
                    window_start = %start,
                    window_end = %end,
                    "Event date outside requested window after normalization, skipping"
                );
            }
            inside
        })
        .collect()
}
