//! Per-dialect markup constants.
//!
//! The two dialects share all composition logic; everything that actually
//! differs between them lives in a [`MarkupStyle`] value plus a day color
//! palette. Adding text-level divergence anywhere else defeats the point.

use chrono::Datelike;
use relcal_core::Day;
use relcal_core::window::weekday_position;

/// Markup delimiters and spacing quirks for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct MarkupStyle {
    /// Bold delimiter, applied on both sides.
    pub bold: &'static str,
    /// Italic delimiter, applied on both sides.
    pub italic: &'static str,
    /// Strikethrough delimiter, applied on both sides.
    pub strike: &'static str,
    /// Separator between hour and minute digits.
    pub time_separator: char,
    /// Spacing between an emoji and the text after it.
    pub emoji_gap: &'static str,
}

impl MarkupStyle {
    /// Wraps text in the dialect's bold delimiter.
    #[must_use]
    pub fn bold(&self, text: &str) -> String {
        format!("{}{text}{}", self.bold, self.bold)
    }

    /// Wraps text in the dialect's italic delimiter.
    #[must_use]
    pub fn italic(&self, text: &str) -> String {
        format!("{}{text}{}", self.italic, self.italic)
    }

    /// Wraps text in the dialect's strikethrough delimiter.
    #[must_use]
    pub fn strike(&self, text: &str) -> String {
        format!("{}{text}{}", self.strike, self.strike)
    }
}

/// Discord markdown.
pub const DISCORD_STYLE: MarkupStyle = MarkupStyle {
    bold: "**",
    italic: "*",
    strike: "~~",
    time_separator: ':',
    emoji_gap: " ",
};

/// Slack mrkdwn.
pub const SLACK_STYLE: MarkupStyle = MarkupStyle {
    bold: "*",
    italic: "_",
    strike: "~",
    time_separator: '.',
    emoji_gap: "  ",
};

/// ROYGBIV palette as Discord embed color integers, week-position order.
const DISCORD_PALETTE: [u32; 7] = [
    15_158_332, // red
    15_844_367, // orange
    16_776_960, // yellow
    5_763_719,  // green
    3_447_003,  // blue
    10_181_046, // indigo
    9_846_527,  // violet
];

/// ROYGBIV palette as Slack attachment hex strings, week-position order.
const SLACK_PALETTE: [&str; 7] = [
    "#E53935", "#FB8C00", "#FFD600", "#43A047", "#1E88E5", "#5E35B1", "#8E24AA",
];

/// Discord color integer for a day under the configured week start.
#[must_use]
pub fn discord_day_color(day: &Day, week_starts_monday: bool) -> u32 {
    let position = weekday_position(day.date.weekday(), week_starts_monday);
    DISCORD_PALETTE.get(position).copied().unwrap_or(0)
}

/// Slack hex color for a day under the configured week start.
#[must_use]
pub fn slack_day_color(day: &Day, week_starts_monday: bool) -> &'static str {
    let position = weekday_position(day.date.weekday(), week_starts_monday);
    SLACK_PALETTE.get(position).copied().unwrap_or("#000000")
}
