// crates/switchboard-web/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared registry and transport fixtures for web tests.
// Purpose: Provide a small peer-directory control surface for testing.
// Dependencies: switchboard-core, switchboard-web
// ============================================================================

//! ## Overview
//! Builds a registry with a small peer-directory surface (`sample_peers`,
//! `fetch_shares`) and wraps it in the in-process test harness.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test fixtures favor direct unwraps for setup clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use switchboard_core::ActionError;
use switchboard_core::ActionRegistry;
use switchboard_core::FailureEntry;
use switchboard_core::TypedSchema;
use switchboard_web::TestHarness;
use switchboard_web::WebTransport;

// ============================================================================
// SECTION: Sample Control Surface
// ============================================================================

/// Parameters for the peer-sampling action.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplePeersParams {
    /// Number of peers to return.
    pub quantity: u32,
    /// Optional region filter.
    #[serde(default)]
    pub region: Option<String>,
}

/// Output of the peer-sampling action.
#[derive(Debug, Serialize)]
pub struct SamplePeersOutput {
    /// Selected peer identifiers.
    pub peers: Vec<String>,
}

/// Parameters for the share-fetching action.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchSharesParams {
    /// Share identifiers to fetch.
    pub share_ids: Vec<String>,
}

/// Output of the share-fetching action.
#[derive(Debug, Serialize)]
pub struct FetchSharesOutput {
    /// Fetched share payloads keyed by identifier.
    pub shares: Vec<String>,
}

/// Builds the peer-directory registry used across web tests.
///
/// Share identifiers starting with `bad` fail individually; when any fail,
/// the whole call reports an aggregated partial failure in request order.
pub fn peer_registry() -> Arc<ActionRegistry> {
    let registry = ActionRegistry::builder()
        .action(
            "sample_peers",
            TypedSchema::<SamplePeersParams, SamplePeersOutput>::new(),
            |params: SamplePeersParams| {
                let region = params.region.unwrap_or_else(|| "default".to_string());
                let peers = (0..params.quantity).map(|n| format!("{region}-peer-{n}")).collect();
                Ok(SamplePeersOutput {
                    peers,
                })
            },
        )
        .expect("declare sample_peers")
        .action(
            "fetch_shares",
            TypedSchema::<FetchSharesParams, FetchSharesOutput>::new(),
            |params: FetchSharesParams| {
                let failures: Vec<FailureEntry> = params
                    .share_ids
                    .iter()
                    .filter(|id| id.starts_with("bad"))
                    .map(|id| FailureEntry::new(id.clone(), "share unavailable"))
                    .collect();
                if failures.is_empty() {
                    let shares =
                        params.share_ids.iter().map(|id| format!("payload-for-{id}")).collect();
                    Ok(FetchSharesOutput {
                        shares,
                    })
                } else {
                    Err(ActionError::aggregated(
                        format!("{} of {} shares failed", failures.len(), params.share_ids.len()),
                        failures,
                    ))
                }
            },
        )
        .expect("declare fetch_shares")
        .action(
            "rotate_directory",
            TypedSchema::<SamplePeersParams, SamplePeersOutput>::new(),
            |_params| Err(ActionError::failed("directory backend offline")),
        )
        .expect("declare rotate_directory")
        .build();
    Arc::new(registry)
}

/// Wraps the peer registry in a harness with conversion enabled.
pub fn harness() -> TestHarness {
    TestHarness::new(Arc::new(WebTransport::new(peer_registry())))
}

/// Wraps the peer registry in a harness with error propagation enabled.
pub fn crashing_harness() -> TestHarness {
    TestHarness::new(Arc::new(WebTransport::new(peer_registry()).with_crash_on_error(true)))
}
