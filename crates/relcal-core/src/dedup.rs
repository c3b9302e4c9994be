//! Duplicate event collapsing.
//!
//! Two feeds can announce the same release on the same day (e.g. an
//! episode present in both a personal and a shared calendar). Events
//! sharing a `(title, local calendar date)` key collapse to the one with
//! the earliest start instant.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::Event;

/// Collapses events sharing a `(title, calendar date)` key.
///
/// When `enabled` is `false` this is the identity transform. Otherwise
/// exactly one event per key survives: the one with the earliest start
/// instant, ties keeping the first-seen instance. Output preserves the
/// input order of surviving keys. The removed count is a diagnostic,
/// never an error.
#[must_use]
pub fn dedup(events: Vec<Event>, enabled: bool) -> (Vec<Event>, usize) {
    if !enabled {
        return (events, 0);
    }

    let total = events.len();
    let mut kept: Vec<Event> = Vec::with_capacity(total);
    let mut index_by_key: HashMap<(String, NaiveDate), usize> = HashMap::new();

    for event in events {
        let key = (event.title.clone(), event.local_date());
        match index_by_key.get(&key) {
            None => {
                index_by_key.insert(key, kept.len());
                kept.push(event);
            }
            Some(&slot) => {
                if let Some(existing) = kept.get_mut(slot)
                    && event.start < existing.start
                {
                    *existing = event;
                }
            }
        }
    }

    let removed = total.saturating_sub(kept.len());
    if removed > 0 {
        tracing::debug!(removed, kept = kept.len(), "Collapsed duplicate events");
    }
    (kept, removed)
}
