//! Per-platform delivery sequencing.
//!
//! Drives one platform through header → packed body batches → footer.
//! A failed header aborts the platform; a failed body batch is recorded
//! and delivery continues; the footer always goes out as its own trailing
//! request. Overall success is the conjunction of every request sent.

use relcal_core::{Day, DateWindow, Summary};
use relcal_render::{DialectRenderer, HeaderDelivery};
use serde_json::Value;
use url::Url;

use crate::batch::{BatchLimits, pack_fragments};
use crate::client::LocalWebhookPost;

/// Delivery coordinates for one platform.
#[derive(Debug, Clone)]
pub struct PlatformTarget {
    /// Webhook endpoint.
    pub url: Url,
    /// Status codes the platform treats as accepted.
    pub success_codes: Vec<u16>,
    /// Packing ceilings.
    pub limits: BatchLimits,
}

fn payload_size(payload: &Value) -> usize {
    serde_json::to_string(payload).map_or(usize::MAX, |s| s.len())
}

async fn send(
    client: &impl LocalWebhookPost,
    target: &PlatformTarget,
    payload: &Value,
    stage: &str,
) -> bool {
    match client.post(&target.url, payload).await {
        Ok(code) if target.success_codes.contains(&code) => {
            tracing::debug!(stage, code, "Request accepted");
            true
        }
        Ok(code) => {
            tracing::warn!(stage, code, "Request rejected");
            false
        }
        Err(error) => {
            tracing::error!(stage, %error, "Request failed");
            false
        }
    }
}

/// Delivers one run's output to one platform.
///
/// Returns `true` only if the header, every body batch, and the footer
/// (when configured) were all accepted.
pub async fn dispatch(
    client: &impl LocalWebhookPost,
    renderer: &dyn DialectRenderer,
    target: &PlatformTarget,
    window: &DateWindow,
    days: &[Day],
    summary: &Summary,
) -> bool {
    let fragments: Vec<Value> = days.iter().filter_map(|day| renderer.render_day(day)).collect();
    if fragments.len() < days.len() {
        tracing::warn!(
            platform = renderer.name(),
            dropped = days.len() - fragments.len(),
            "Some days failed to render and were skipped"
        );
    }

    let header = renderer.render_header(window, summary);
    let delivery = renderer.header_delivery();

    let header_for = |index: usize| -> Option<&Value> {
        (delivery == HeaderDelivery::Combined && index == 0).then_some(&header)
    };

    let batches = pack_fragments(&fragments, target.limits, |index, candidate| {
        payload_size(&renderer.assemble_batch(header_for(index), candidate))
    });
    tracing::info!(
        platform = renderer.name(),
        days = days.len(),
        batches = batches.len(),
        "Dispatching"
    );

    let mut all_ok = true;

    match delivery {
        HeaderDelivery::Separate => {
            if !send(client, target, &header, "header").await {
                tracing::error!(platform = renderer.name(), "Header rejected, aborting platform");
                return false;
            }
        }
        HeaderDelivery::Combined => {
            if batches.is_empty() && !send(client, target, &header, "header").await {
                return false;
            }
        }
    }

    for (index, batch) in batches.iter().enumerate() {
        let payload = renderer.assemble_batch(header_for(index), batch);
        let ok = send(client, target, &payload, "body").await;
        if !ok && header_for(index).is_some() {
            // The header rode in this request; nothing after it may be sent.
            tracing::error!(platform = renderer.name(), "Header batch rejected, aborting platform");
            return false;
        }
        all_ok &= ok;
    }

    if let Some(footer) = renderer.render_footer() {
        all_ok &= send(client, target, &footer, "footer").await;
    }

    tracing::info!(platform = renderer.name(), success = all_ok, "Dispatch finished");
    all_ok
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::NaiveDate;
    use relcal_core::{
        EventItem, PastEventPolicy, SourceCategory, TimeSettings,
    };
    use relcal_render::{DiscordRenderer, RenderOptions, SlackRenderer};
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::WebhookClient;

    fn options(footer: Option<&str>) -> RenderOptions {
        RenderOptions {
            header: String::from("New Releases"),
            show_date_range: false,
            time: TimeSettings::default(),
            past_events: PastEventPolicy::Display,
            week_starts_monday: true,
            mention: None,
            footer: footer.map(String::from),
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

    fn day(date: NaiveDate, show: &str) -> Day {
        Day {
            date,
            display_name: date.format("%A, %b %d").to_string(),
            tv: vec![EventItem {
                time: None,
                show_name: String::from(show),
                designator: Some(String::from("1x05")),
                designator_is_standard: true,
                episode_title: None,
                is_premiere: false,
                is_past: false,
                category: SourceCategory::Tv,
            }],
            movies: Vec::new(),
        }
    }

    fn target(server: &MockServer, success_codes: &[u16]) -> PlatformTarget {
        PlatformTarget {
            url: format!("{}/hook", server.uri()).parse().unwrap(),
            success_codes: success_codes.to_vec(),
            limits: BatchLimits {
                max_items: 10,
                max_bytes: 6_000,
            },
        }
    }

    fn summary_one_tv() -> Summary {
        Summary {
            tv_count: 1,
            ..Summary::default()
        }
    }

    #[tokio::test]
    async fn test_discord_header_then_body() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(body_string_contains("New Releases"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(body_string_contains("embeds"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = WebhookClient::builder().build().unwrap();
        let renderer = DiscordRenderer::new(options(None));
        let days = vec![day(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), "Show X")];

        // Act
        let ok = dispatch(
            &client,
            &renderer,
            &target(&server, &[200, 204]),
            &window(),
            &days,
            &summary_one_tv(),
        )
        .await;

        // Assert (mock expectations verify the two-request sequence)
        assert!(ok);
    }

    #[tokio::test]
    async fn test_header_failure_aborts_platform() {
        // Arrange: everything is rejected; only the header should be tried
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = WebhookClient::builder().build().unwrap();
        let renderer = DiscordRenderer::new(options(None));
        let days = vec![day(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), "Show X")];

        // Act
        let ok = dispatch(
            &client,
            &renderer,
            &target(&server, &[200, 204]),
            &window(),
            &days,
            &summary_one_tv(),
        )
        .await;

        // Assert
        assert!(!ok);
    }

    #[tokio::test]
    async fn test_body_failure_recorded_but_footer_still_sent() {
        // Arrange: header and footer accepted, body rejected
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("embeds"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .expect(2)
            .mount(&server)
            .await;

        let client = WebhookClient::builder().build().unwrap();
        let renderer = DiscordRenderer::new(options(Some("See you next week")));
        let days = vec![day(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), "Show X")];

        // Act
        let ok = dispatch(
            &client,
            &renderer,
            &target(&server, &[200, 204]),
            &window(),
            &days,
            &summary_one_tv(),
        )
        .await;

        // Assert: footer went out (expect(2) above), platform still failed
        assert!(!ok);
    }

    #[tokio::test]
    async fn test_slack_combines_header_with_first_batch() {
        // Arrange: exactly one request carrying both blocks and attachments
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("blocks"))
            .and(body_string_contains("attachments"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = WebhookClient::builder().build().unwrap();
        let renderer = SlackRenderer::new(options(None));
        let days = vec![day(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), "Show X")];

        // Act
        let ok = dispatch(
            &client,
            &renderer,
            &target(&server, &[200, 201, 204]),
            &window(),
            &days,
            &summary_one_tv(),
        )
        .await;

        // Assert
        assert!(ok);
    }

    #[tokio::test]
    async fn test_zero_days_sends_header_only() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = WebhookClient::builder().build().unwrap();
        let renderer = SlackRenderer::new(options(None));

        // Act
        let ok = dispatch(
            &client,
            &renderer,
            &target(&server, &[200, 201, 204]),
            &window(),
            &[],
            &Summary::default(),
        )
        .await;

        // Assert
        assert!(ok);
    }

    #[tokio::test]
    async fn test_item_limit_produces_multiple_batches() {
        // Arrange: 3 days, max 2 embeds per request -> header + 2 batches
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .expect(3)
            .mount(&server)
            .await;

        let client = WebhookClient::builder().build().unwrap();
        let renderer = DiscordRenderer::new(options(None));
        let days = vec![
            day(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), "Show A"),
            day(NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(), "Show B"),
            day(NaiveDate::from_ymd_opt(2026, 1, 7).unwrap(), "Show C"),
        ];
        let mut target = target(&server, &[200, 204]);
        target.limits.max_items = 2;

        // Act
        let ok = dispatch(
            &client,
            &renderer,
            &target,
            &window(),
            &days,
            &summary_one_tv(),
        )
        .await;

        // Assert
        assert!(ok);
    }
}
