// crates/switchboard-web/src/lib.rs
// ============================================================================
// Module: Switchboard Web Transport
// Description: HTTP front end for the Switchboard action dispatcher.
// Purpose: Normalize web requests, map dispatch errors to status codes, and
//          bind the control endpoint with optional TLS.
// Dependencies: axum, axum-server, serde, switchboard-core, thiserror, tokio,
//               toml, tracing, url
// ============================================================================

//! ## Overview
//! The web transport mounts one HTTP endpoint per registered action. Each
//! request is normalized from up to three sources (JSON body, query string,
//! transport-injected parameters), dispatched through the shared pipeline,
//! and answered with a structured JSON envelope whose status code follows the
//! error-kind taxonomy. A test harness drives the same handling path without
//! a live network bind.
//!
//! Security posture: request bodies, query strings, and action names are
//! untrusted; caller mistakes are always converted to 400 responses and never
//! allowed to crash the process.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod harness;
pub mod server;
pub mod telemetry;
pub mod transport;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use config::ConfigError;
pub use config::WebConfig;
pub use harness::TestHarness;
pub use server::ServeOptions;
pub use server::TlsMaterial;
pub use server::WebServeError;
pub use server::serve;
pub use telemetry::NoopWebMetrics;
pub use telemetry::WebMetricEvent;
pub use telemetry::WebMetrics;
pub use transport::PropagatedFault;
pub use transport::WebRequest;
pub use transport::WebResponse;
pub use transport::WebTransport;
