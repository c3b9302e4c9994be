//! Webhook delivery for relcal.
//!
//! A thin POST-with-JSON client, a pure fragment packer bounded by item
//! and byte ceilings, and the per-platform dispatcher that sequences
//! header, body batches, and footer.

/// Fragment packing.
pub mod batch;
/// Webhook POST client.
pub mod client;
/// Per-platform delivery sequencing.
pub mod dispatch;

pub use batch::{BatchLimits, pack_fragments};
pub use client::{LocalWebhookPost, WebhookClient, WebhookClientBuilder, WebhookPost};
pub use dispatch::{PlatformTarget, dispatch};
