//! Discord dialect: markdown content messages and color-striped embeds.
//!
//! Header and footer are plain `{"content": ...}` messages; each day is
//! an embed and batches go out as `{"embeds": [...]}`. Discord rejects
//! payloads mixing oversized embed lists, so the header is always its own
//! prior request.

use relcal_core::{Day, DateWindow, Summary};
use serde::Serialize;
use serde_json::Value;

use crate::compose::{day_body, header_title, summary_line};
use crate::style::{DISCORD_STYLE, discord_day_color};
use crate::{DialectRenderer, HeaderDelivery, RenderOptions};

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    description: String,
    color: u32,
}

/// Discord webhook message renderer.
#[derive(Debug, Clone)]
pub struct DiscordRenderer {
    options: RenderOptions,
}

impl DiscordRenderer {
    /// Creates a renderer with the given presentation settings.
    #[must_use]
    pub const fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl DialectRenderer for DiscordRenderer {
    fn name(&self) -> &'static str {
        "discord"
    }

    fn header_delivery(&self) -> HeaderDelivery {
        HeaderDelivery::Separate
    }

    fn render_header(&self, window: &DateWindow, summary: &Summary) -> Value {
        let title = header_title(&self.options.header, window, self.options.show_date_range);
        let mut content = format!("# {title}\n\n{}", summary_line(summary, DISCORD_STYLE));

        if self.options.show_timezone {
            let disclosure = format!("All times shown in {}", self.options.timezone_name);
            content.push_str("\n\n");
            content.push_str(&DISCORD_STYLE.italic(&disclosure));
        }
        if let Some(role_id) = &self.options.mention {
            content.push_str(&format!("\n\n<@&{role_id}>"));
        }

        serde_json::json!({ "content": content })
    }

    fn render_day(&self, day: &Day) -> Option<Value> {
        let embed = Embed {
            title: day.display_name.clone(),
            description: day_body(
                day,
                DISCORD_STYLE,
                self.options.past_events,
                self.options.time,
            ),
            color: discord_day_color(day, self.options.week_starts_monday),
        };
        match serde_json::to_value(&embed) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::error!(day = %day.display_name, %error, "Failed to render day embed");
                None
            }
        }
    }

    fn render_footer(&self) -> Option<Value> {
        self.options
            .footer
            .as_ref()
            .map(|footer| serde_json::json!({ "content": footer }))
    }

    fn assemble_batch(&self, _header: Option<&Value>, fragments: &[Value]) -> Value {
        serde_json::json!({ "embeds": fragments })
    }
}
