//! Slack dialect: block-kit header and color-striped attachments.
//!
//! The header is a `blocks` pair (plain-text header + mrkdwn section)
//! that rides inside the first body batch's payload; each day is a legacy
//! attachment carrying the color stripe, since block kit has no per-block
//! color.

use relcal_core::{Day, DateWindow, Summary};
use serde::Serialize;
use serde_json::Value;

use crate::compose::{day_body, header_title, summary_line};
use crate::style::{SLACK_STYLE, slack_day_color};
use crate::{DialectRenderer, HeaderDelivery, RenderOptions};

#[derive(Debug, Serialize)]
struct Attachment {
    color: &'static str,
    title: String,
    text: String,
    mrkdwn_in: [&'static str; 1],
}

/// Slack webhook message renderer.
#[derive(Debug, Clone)]
pub struct SlackRenderer {
    options: RenderOptions,
}

impl SlackRenderer {
    /// Creates a renderer with the given presentation settings.
    #[must_use]
    pub const fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl DialectRenderer for SlackRenderer {
    fn name(&self) -> &'static str {
        "slack"
    }

    fn header_delivery(&self) -> HeaderDelivery {
        HeaderDelivery::Combined
    }

    fn render_header(&self, window: &DateWindow, summary: &Summary) -> Value {
        let title = header_title(&self.options.header, window, self.options.show_date_range);
        let mut section = summary_line(summary, SLACK_STYLE);

        if self.options.show_timezone {
            let disclosure = format!("All times shown in {}", self.options.timezone_name);
            section.push_str("\n\n");
            section.push_str(&SLACK_STYLE.italic(&disclosure));
        }
        if let Some(mention) = &self.options.mention {
            section.push_str(&format!("\n\n{mention}"));
        }

        serde_json::json!({
            "blocks": [
                {
                    "type": "header",
                    "text": { "type": "plain_text", "text": title }
                },
                {
                    "type": "section",
                    "text": { "type": "mrkdwn", "text": section }
                }
            ]
        })
    }

    fn render_day(&self, day: &Day) -> Option<Value> {
        let attachment = Attachment {
            color: slack_day_color(day, self.options.week_starts_monday),
            title: day.display_name.clone(),
            text: day_body(
                day,
                SLACK_STYLE,
                self.options.past_events,
                self.options.time,
            ),
            mrkdwn_in: ["text"],
        };
        match serde_json::to_value(&attachment) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::error!(day = %day.display_name, %error, "Failed to render day attachment");
                None
            }
        }
    }

    fn render_footer(&self) -> Option<Value> {
        self.options.footer.as_ref().map(|footer| {
            serde_json::json!({
                "blocks": [
                    {
                        "type": "section",
                        "text": { "type": "mrkdwn", "text": footer }
                    }
                ]
            })
        })
    }

    fn assemble_batch(&self, header: Option<&Value>, fragments: &[Value]) -> Value {
        let mut payload = serde_json::Map::new();
        if let Some(blocks) = header.and_then(|h| h.get("blocks")) {
            payload.insert(String::from("blocks"), blocks.clone());
        }
        payload.insert(
            String::from("attachments"),
            Value::Array(fragments.to_vec()),
        );
        Value::Object(payload)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use chrono::NaiveDate;
    use relcal_core::{EventItem, PastEventPolicy, SourceCategory, TimeSettings};

    use super::*;

    fn options() -> RenderOptions {
        RenderOptions {
            header: String::from("New Releases"),
            show_date_range: true,
            time: TimeSettings::default(),
            past_events: PastEventPolicy::Display,
            week_starts_monday: true,
            mention: None,
            footer: None,
            show_timezone: false,
            timezone_name: String::from("America/New_York"),
        }
    }

    fn window() -> DateWindow {
        DateWindow {
            start: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
        }
    }

    fn tuesday() -> Day {
        Day {
            date: NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(),
            display_name: String::from("Tuesday, Jan 06"),
            tv: vec![EventItem {
                time: None,
                show_name: String::from("Show X"),
                designator: Some(String::from("1x05")),
                designator_is_standard: true,
                episode_title: Some(String::from("Episode")),
                is_premiere: false,
                is_past: false,
                category: SourceCategory::Tv,
            }],
            movies: Vec::new(),
        }
    }

    #[test]
    fn test_header_block_pair() {
        // Arrange
        let renderer = SlackRenderer::new(options());
        let summary = Summary {
            tv_count: 2,
            ..Summary::default()
        };

        // Act
        let payload = renderer.render_header(&window(), &summary);

        // Assert
        let blocks = payload["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0]["type"], "header");
        assert_eq!(
            blocks[0]["text"]["text"],
            "New Releases (Jan 05 - Jan 11)"
        );
        assert_eq!(blocks[1]["text"]["type"], "mrkdwn");
        assert_eq!(blocks[1]["text"]["text"], "*📺  2 all-new episodes*");
        assert_eq!(renderer.header_delivery(), HeaderDelivery::Combined);
    }

    #[test]
    fn test_header_mention_appended_verbatim() {
        // Arrange
        let mut opts = options();
        opts.mention = Some(String::from("<!channel>"));
        let renderer = SlackRenderer::new(opts);

        // Act
        let payload = renderer.render_header(&window(), &Summary::default());

        // Assert
        let section = payload["blocks"][1]["text"]["text"].as_str().unwrap();
        assert!(section.ends_with("<!channel>"));
    }

    #[test]
    fn test_day_attachment_shape() {
        // Arrange
        let renderer = SlackRenderer::new(options());

        // Act
        let attachment = renderer.render_day(&tuesday()).unwrap();

        // Assert: Tuesday is orange under a Monday-start week
        assert_eq!(attachment["color"], "#FB8C00");
        assert_eq!(attachment["title"], "Tuesday, Jan 06");
        assert_eq!(attachment["text"], "*Show X* - 1x05 - _Episode_");
        assert_eq!(attachment["mrkdwn_in"], serde_json::json!(["text"]));
    }

    #[test]
    fn test_batch_combines_header_blocks_with_attachments() {
        // Arrange
        let renderer = SlackRenderer::new(options());
        let header = renderer.render_header(&window(), &Summary::default());
        let fragment = renderer.render_day(&tuesday()).unwrap();

        // Act
        let combined = renderer.assemble_batch(Some(&header), &[fragment.clone()]);
        let body_only = renderer.assemble_batch(None, &[fragment.clone()]);

        // Assert
        assert_eq!(combined["blocks"], header["blocks"]);
        assert_eq!(combined["attachments"], serde_json::json!([fragment]));
        assert!(body_only.get("blocks").is_none());
        assert_eq!(body_only["attachments"], serde_json::json!([fragment]));
    }

    #[test]
    fn test_footer_block() {
        // Arrange
        let mut opts = options();
        opts.footer = Some(String::from("Powered by relcal"));
        let renderer = SlackRenderer::new(opts);

        // Act
        let footer = renderer.render_footer().unwrap();

        // Assert
        assert_eq!(
            footer["blocks"][0]["text"]["text"],
            "Powered by relcal"
        );
    }
}
