// crates/switchboard-web/src/telemetry.rs
// ============================================================================
// Module: Web Telemetry
// Description: Observability hooks for web request handling.
// Purpose: Provide metric events without hard observability dependencies.
// Dependencies: switchboard-core
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for web request counters and
//! latencies. It is intentionally dependency-light so deployments can plug in
//! Prometheus or OpenTelemetry without redesign; leveled log lines go through
//! `tracing` separately.
//!
//! Security posture: metric labels derive from validated data only; raw
//! request payloads never enter events.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Metric Events
// ============================================================================

/// Web request metric event payload.
///
/// # Invariants
/// - `error_kind` is `None` exactly when the request succeeded.
#[derive(Debug, Clone)]
pub struct WebMetricEvent {
    /// Action name the caller requested.
    pub action: String,
    /// HTTP status the taxonomy selected for the outcome.
    pub status: u16,
    /// Normalized error kind label when the request failed.
    pub error_kind: Option<&'static str>,
    /// Request body size in bytes.
    pub request_bytes: usize,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Metrics sink for web requests and latencies.
pub trait WebMetrics: Send + Sync {
    /// Records a request counter event.
    fn record_request(&self, event: WebMetricEvent);
    /// Records a latency observation for the request.
    fn record_latency(&self, event: WebMetricEvent, latency: Duration);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are intentionally discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopWebMetrics;

impl WebMetrics for NoopWebMetrics {
    fn record_request(&self, _event: WebMetricEvent) {}

    fn record_latency(&self, _event: WebMetricEvent, _latency: Duration) {}
}
