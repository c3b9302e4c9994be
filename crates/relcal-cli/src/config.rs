//! `AppConfig` struct and TOML loading.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono_tz::Tz;
use relcal_core::{CalendarRange, PastEventPolicy, TimeSettings};
use serde::Deserialize;
use url::Url;

/// Discord allows at most 10 embeds per webhook request.
const DISCORD_MAX_ITEMS: usize = 10;
/// Discord caps combined message content around 6000 characters.
const DISCORD_MAX_BYTES: usize = 6_000;
/// Slack attachment count ceiling per message.
const SLACK_MAX_ITEMS: usize = 20;
/// Slack payload size ceiling, in bytes.
const SLACK_MAX_BYTES: usize = 16_000;

/// Top-level application configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// IANA timezone identifier events are normalized into.
    pub timezone: String,
    /// Span of days one run covers.
    pub calendar_range: CalendarRange,
    /// Week-start convention (Monday or Sunday).
    pub start_week_on_monday: bool,
    /// Treatment of events that already started.
    pub passed_events: PastEventPolicy,
    /// Collapse duplicate events sharing a title and date.
    pub deduplicate: bool,
    /// Header title text.
    pub header: String,
    /// Append the date range to the header title.
    pub show_date_range: bool,
    /// Per-request HTTP timeout in seconds.
    pub http_timeout_secs: u64,
    /// Time-of-day display settings.
    pub time: TimeSettings,
    /// Discord delivery settings.
    pub discord: PlatformConfig,
    /// Slack delivery settings.
    pub slack: PlatformConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timezone: String::from("UTC"),
            calendar_range: CalendarRange::Week,
            start_week_on_monday: true,
            passed_events: PastEventPolicy::Display,
            deduplicate: true,
            header: String::from("New Releases"),
            show_date_range: true,
            http_timeout_secs: 30,
            time: TimeSettings::default(),
            discord: PlatformConfig::default(),
            slack: PlatformConfig::default(),
        }
    }
}

/// Per-platform delivery configuration.
///
/// Packing ceilings and success codes default per platform; see
/// [`ResolvedLimits`].
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlatformConfig {
    /// Whether this platform receives deliveries.
    pub enabled: bool,
    /// Webhook endpoint. Required when enabled.
    pub webhook_url: Option<String>,
    /// Mention appended to the header (role ID for Discord, raw mrkdwn
    /// mention for Slack).
    pub mention: Option<String>,
    /// Footer text sent as a trailing message.
    pub footer: Option<String>,
    /// Disclose the configured timezone under the header.
    pub show_timezone: bool,
    /// Override for maximum fragments per request.
    pub max_items: Option<usize>,
    /// Override for maximum serialized payload bytes per request.
    pub max_bytes: Option<usize>,
    /// Override for status codes treated as accepted.
    pub success_codes: Option<Vec<u16>>,
}

/// Platform limits with per-platform defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLimits {
    /// Maximum fragments per request.
    pub max_items: usize,
    /// Maximum serialized payload bytes per request.
    pub max_bytes: usize,
    /// Status codes treated as accepted.
    pub success_codes: Vec<u16>,
}

impl PlatformConfig {
    /// Limits with Discord defaults for unset overrides.
    #[must_use]
    pub fn discord_limits(&self) -> ResolvedLimits {
        ResolvedLimits {
            max_items: self.max_items.unwrap_or(DISCORD_MAX_ITEMS),
            max_bytes: self.max_bytes.unwrap_or(DISCORD_MAX_BYTES),
            success_codes: self.success_codes.clone().unwrap_or_else(|| vec![200, 204]),
        }
    }

    /// Limits with Slack defaults for unset overrides.
    #[must_use]
    pub fn slack_limits(&self) -> ResolvedLimits {
        ResolvedLimits {
            max_items: self.max_items.unwrap_or(SLACK_MAX_ITEMS),
            max_bytes: self.max_bytes.unwrap_or(SLACK_MAX_BYTES),
            success_codes: self
                .success_codes
                .clone()
                .unwrap_or_else(|| vec![200, 201, 204]),
        }
    }

    /// Parsed webhook URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or unparseable.
    pub fn url(&self) -> Result<Url> {
        let raw = self
            .webhook_url
            .as_deref()
            .context("webhook_url is required for an enabled platform")?;
        Url::parse(raw).with_context(|| format!("invalid webhook_url {raw:?}"))
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parses the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns an error when the identifier is not a known IANA zone.
    pub fn timezone(&self) -> Result<Tz> {
        Tz::from_str(&self.timezone)
            .map_err(|_| anyhow::anyhow!("unknown timezone {:?}", self.timezone))
    }

    /// Per-request HTTP timeout.
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Validates the configuration before any network activity.
    ///
    /// # Errors
    ///
    /// Returns an error when no platform is enabled, an enabled platform
    /// lacks a webhook URL, or the timezone is unknown.
    pub fn validate(&self) -> Result<()> {
        self.timezone()?;

        if !self.discord.enabled && !self.slack.enabled {
            bail!("no platform enabled: set [discord] or [slack] enabled = true");
        }
        if self.discord.enabled {
            self.discord.url().context("discord")?;
        }
        if self.slack.enabled {
            self.slack.url().context("slack")?;
        }
        Ok(())
    }
}
