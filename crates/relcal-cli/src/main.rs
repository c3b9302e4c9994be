//! relcal - media release calendar notifier.
//!
//! Reads raw calendar events from a JSON file, runs them through the
//! normalization/aggregation pipeline, and delivers day-grouped release
//! summaries to the enabled webhook platforms.

/// Application configuration (TOML).
mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::{AppConfig, PlatformConfig, ResolvedLimits};
use relcal_core::{RawEvent, aggregate, calculate_window, dedup, normalize, retain_in_window};
use relcal_render::{DialectRenderer, DiscordRenderer, RenderOptions, SlackRenderer};
use relcal_webhook::{BatchLimits, PlatformTarget, WebhookClient, dispatch};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = "relcal.toml")]
    config: PathBuf,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Render the current window's releases and deliver them.
    Run(RunArgs),
    /// Validate the configuration and exit.
    Check,
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
struct RunArgs {
    /// JSON file with raw calendar events (array of {title, start, category}).
    #[arg(long, required = true)]
    events: PathBuf,

    /// Override "today" (format: "2026-01-05"). The reference instant for
    /// past-event classification becomes local midnight of this date.
    #[arg(long)]
    date: Option<String>,
}

/// Reads raw events from a JSON file.
fn load_events(path: &Path) -> Result<Vec<RawEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse events from {}", path.display()))
}

/// Resolves the run's reference instant: now, or local midnight of an
/// explicit `--date` override.
fn resolve_reference(date: Option<&str>, tz: Tz) -> Result<DateTime<Tz>> {
    match date {
        Some(raw) => {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("invalid --date {raw:?}, expected YYYY-MM-DD"))?;
            let midnight = date
                .and_hms_opt(0, 0, 0)
                .context("failed to build midnight datetime")?;
            tz.from_local_datetime(&midnight)
                .earliest()
                .with_context(|| format!("midnight of {raw} does not exist in {tz}"))
        }
        None => Ok(Utc::now().with_timezone(&tz)),
    }
}

fn render_options(config: &AppConfig, platform: &PlatformConfig) -> RenderOptions {
    RenderOptions {
        header: config.header.clone(),
        show_date_range: config.show_date_range,
        time: config.time,
        past_events: config.passed_events,
        week_starts_monday: config.start_week_on_monday,
        mention: platform.mention.clone(),
        footer: platform.footer.clone(),
        show_timezone: platform.show_timezone,
        timezone_name: config.timezone.clone(),
    }
}

fn platform_target(platform: &PlatformConfig, limits: ResolvedLimits) -> Result<PlatformTarget> {
    Ok(PlatformTarget {
        url: platform.url()?,
        success_codes: limits.success_codes,
        limits: BatchLimits {
            max_items: limits.max_items,
            max_bytes: limits.max_bytes,
        },
    })
}

/// Runs the `run` subcommand: pipeline plus sequential per-platform delivery.
///
/// # Errors
///
/// Returns an error on configuration problems, an unreadable events file,
/// or when any enabled platform's delivery fails.
#[instrument(skip_all)]
async fn run_deliver(args: &RunArgs, config_path: &Path) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    config.validate()?;
    let tz = config.timezone()?;

    let reference = resolve_reference(args.date.as_deref(), tz)?;
    let window = calculate_window(
        config.calendar_range,
        config.start_week_on_monday,
        reference.date_naive(),
    );
    tracing::info!(
        start = %window.start,
        end = %window.end,
        %tz,
        "Fetch window resolved"
    );

    let raw_events = load_events(&args.events)?;
    let mut events = Vec::with_capacity(raw_events.len());
    for raw in &raw_events {
        match normalize(raw, tz, reference) {
            Ok(event) => events.push(event),
            Err(error) => tracing::warn!(%error, "Discarding malformed event"),
        }
    }

    let events = retain_in_window(events, window.start, window.end);
    let (events, removed) = dedup(events, config.deduplicate);
    let (days, mut summary) = aggregate(
        &events,
        config.start_week_on_monday,
        config.passed_events,
        config.time,
    );
    summary.deduplicated_count = removed;

    tracing::info!(
        tv = summary.tv_count,
        movies = summary.movie_count,
        premieres = summary.premiere_count,
        deduplicated = summary.deduplicated_count,
        hidden_past = summary.skipped_past_count,
        days = days.len(),
        "Pipeline complete"
    );

    let client = WebhookClient::builder()
        .timeout(config.http_timeout())
        .build()
        .context("failed to build webhook client")?;

    let mut failed: Vec<&str> = Vec::new();

    if config.discord.enabled {
        let renderer = DiscordRenderer::new(render_options(&config, &config.discord));
        let target = platform_target(&config.discord, config.discord.discord_limits())?;
        if !dispatch(&client, &renderer, &target, &window, &days, &summary).await {
            failed.push(renderer.name());
        }
    }
    if config.slack.enabled {
        let renderer = SlackRenderer::new(render_options(&config, &config.slack));
        let target = platform_target(&config.slack, config.slack.slack_limits())?;
        if !dispatch(&client, &renderer, &target, &window, &days, &summary).await {
            failed.push(renderer.name());
        }
    }

    if !failed.is_empty() {
        bail!("delivery failed for: {}", failed.join(", "));
    }
    Ok(())
}

/// Runs the `check` subcommand.
///
/// # Errors
///
/// Returns an error when the configuration fails validation.
fn run_check(config_path: &Path) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    config.validate()?;
    let tz = config.timezone()?;

    let today = Utc::now().with_timezone(&tz).date_naive();
    let window = calculate_window(config.calendar_range, config.start_week_on_monday, today);
    tracing::info!(
        timezone = %config.timezone,
        range = ?config.calendar_range,
        window_start = %window.start,
        window_end = %window.end,
        discord = config.discord.enabled,
        slack = config.slack.enabled,
        "Configuration OK"
    );
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run_deliver(&args, &cli.config).await,
        Commands::Check => run_check(&cli.config),
    }
}
