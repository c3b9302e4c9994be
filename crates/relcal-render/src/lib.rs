//! Dialect renderers for relcal.
//!
//! Turns day buckets and summary counts into Discord and Slack webhook
//! payloads. The two dialects implement one capability contract,
//! [`DialectRenderer`], over a shared composition core; per-dialect text
//! differences are confined to [`style::MarkupStyle`] constants.

/// Shared text composition.
pub mod compose;
/// Discord dialect.
pub mod discord;
/// Slack dialect.
pub mod slack;
/// Per-dialect markup constants.
pub mod style;

use relcal_core::{Day, DateWindow, PastEventPolicy, Summary, TimeSettings};
use serde_json::Value;

pub use compose::NO_NEW_RELEASES;
pub use discord::DiscordRenderer;
pub use slack::SlackRenderer;

/// How a dialect wants its header delivered relative to the body batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderDelivery {
    /// Header goes out as its own prior request.
    Separate,
    /// Header rides inside the first body batch's payload.
    Combined,
}

/// Presentation settings shared by both dialects.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Header title, e.g. `"New Releases"`.
    pub header: String,
    /// Append the window's date range to the header title.
    pub show_date_range: bool,
    /// Time-of-day display settings.
    pub time: TimeSettings,
    /// Visual treatment of events that already started.
    pub past_events: PastEventPolicy,
    /// Week-start convention, drives the day color cycle.
    pub week_starts_monday: bool,
    /// Mention target appended to the header (dialect-specific syntax).
    pub mention: Option<String>,
    /// Footer text delivered as a trailing request.
    pub footer: Option<String>,
    /// Disclose the configured timezone under the header.
    pub show_timezone: bool,
    /// Timezone name for the disclosure line, e.g. `"America/New_York"`.
    pub timezone_name: String,
}

/// One chat dialect's rendering rules and payload shapes.
///
/// `render_day` returning `None` signals a formatting failure for that
/// single day; the dispatcher skips it and the run continues.
pub trait DialectRenderer {
    /// Dialect name for logging.
    fn name(&self) -> &'static str;

    /// Whether the header is a separate request or rides with the body.
    fn header_delivery(&self) -> HeaderDelivery;

    /// Renders the header payload (title, counts, mention, timezone line).
    fn render_header(&self, window: &DateWindow, summary: &Summary) -> Value;

    /// Renders one day as a body fragment.
    fn render_day(&self, day: &Day) -> Option<Value>;

    /// Renders the footer payload, when configured.
    fn render_footer(&self) -> Option<Value>;

    /// Wraps body fragments (and, for combined delivery, the header) into
    /// one outbound request payload.
    fn assemble_batch(&self, header: Option<&Value>, fragments: &[Value]) -> Value;
}
