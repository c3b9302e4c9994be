//! Core pipeline library for relcal.
//!
//! Turns raw calendar records into deduplicated, day-bucketed release
//! events ready for dialect rendering. No I/O happens here; everything
//! is deterministic given an explicit reference instant.

/// Day bucketing and summary counts.
pub mod aggregate;
/// Duplicate event collapsing.
pub mod dedup;
/// Canonical event types and display settings.
pub mod model;
/// Raw record normalization.
pub mod normalize;
/// Episode title parsing heuristics.
pub mod title;
/// Fetch window math.
pub mod window;

pub use aggregate::aggregate;
pub use dedup::dedup;
pub use model::{
    Day, Event, EventItem, PastEventPolicy, RawEvent, SourceCategory, Summary, TimeSettings,
};
pub use normalize::{is_premiere_title, normalize, retain_in_window};
pub use title::{ParsedTitle, parse_title};
pub use window::{CalendarRange, DateWindow, calculate_window};
