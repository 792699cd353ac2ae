// crates/switchboard-cli/src/transport/tests.rs
// ============================================================================
// Module: CLI Transport Unit Tests
// Description: Unit tests for merging, cleanup, and id assignment.
// Purpose: Verify override precedence and guaranteed hook execution.
// Dependencies: switchboard-core
// ============================================================================

//! ## Overview
//! Exercises override merging, the guaranteed cleanup hook, and monotonic
//! request id assignment with in-memory fixtures.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use switchboard_core::ActionError;
use switchboard_core::ActionRegistry;
use switchboard_core::CleanupHook;
use switchboard_core::ErrorKind;
use switchboard_core::RawRequest;
use switchboard_core::Transport;
use switchboard_core::TypedSchema;

use super::CliTransport;
use super::merge_overrides;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Parameters echoed back by the fixture action.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EchoParams {
    /// Merged value under test.
    a: Value,
}

/// Output echoed by the fixture action.
#[derive(Debug, Serialize)]
struct EchoOutput {
    /// Echoed value.
    a: Value,
}

/// Cleanup hook counting its invocations.
#[derive(Default)]
struct CountingHook {
    /// Number of times the hook fired.
    calls: AtomicUsize,
}

impl CleanupHook for CountingHook {
    fn cleanup(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn echo_registry() -> Arc<ActionRegistry> {
    let registry = ActionRegistry::builder()
        .action("echo", TypedSchema::<EchoParams, EchoOutput>::new(), |params: EchoParams| {
            Ok(EchoOutput {
                a: params.a,
            })
        })
        .expect("declare echo")
        .action("explode", TypedSchema::<EchoParams, EchoOutput>::new(), |_params| {
            Err(ActionError::failed("backend unavailable"))
        })
        .expect("declare explode")
        .build();
    Arc::new(registry)
}

fn request_with(key: &str, value: Value) -> RawRequest {
    let mut map = RawRequest::new();
    map.insert(key.to_string(), value);
    map
}

// ============================================================================
// SECTION: Merging
// ============================================================================

#[test]
fn overrides_replace_request_fields() {
    let merged = merge_overrides(&request_with("a", json!(1)), &request_with("a", json!(2)));
    assert_eq!(merged["a"], json!(2));
}

#[test]
fn disjoint_overrides_extend_the_request() {
    let merged = merge_overrides(&request_with("a", json!(1)), &request_with("b", json!(2)));
    assert_eq!(merged.len(), 2);
}

#[test]
fn invoke_applies_overrides_before_validation() {
    let transport = CliTransport::new(echo_registry());
    let outcome = transport
        .invoke("echo", &request_with("a", json!(1)), &request_with("a", json!(2)))
        .expect("success");
    assert_eq!(outcome.result, json!({"a": 2}));
}

// ============================================================================
// SECTION: Cleanup
// ============================================================================

#[test]
fn cleanup_fires_exactly_once_on_success() {
    let hook = Arc::new(CountingHook::default());
    let transport = CliTransport::new(echo_registry())
        .with_cleanup(Arc::<CountingHook>::clone(&hook));
    transport
        .invoke("echo", &request_with("a", json!(1)), &RawRequest::new())
        .expect("success");
    assert_eq!(hook.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn cleanup_fires_exactly_once_on_failure() {
    let hook = Arc::new(CountingHook::default());
    let transport = CliTransport::new(echo_registry())
        .with_cleanup(Arc::<CountingHook>::clone(&hook));
    let err = transport
        .invoke("explode", &request_with("a", json!(1)), &RawRequest::new())
        .expect_err("failure");
    assert_eq!(err.kind(), ErrorKind::Unhandled);
    assert_eq!(hook.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn cleanup_fires_exactly_once_on_validation_failure() {
    let hook = Arc::new(CountingHook::default());
    let transport = CliTransport::new(echo_registry())
        .with_cleanup(Arc::<CountingHook>::clone(&hook));
    transport
        .invoke("echo", &RawRequest::new(), &RawRequest::new())
        .expect_err("missing parameter");
    assert_eq!(hook.calls.load(Ordering::SeqCst), 1);
}

// ============================================================================
// SECTION: Request Ids
// ============================================================================

#[test]
fn request_ids_are_monotonic_across_outcomes() {
    let transport = CliTransport::new(echo_registry());
    let first = transport
        .invoke("echo", &request_with("a", json!(1)), &RawRequest::new())
        .expect("success");
    transport
        .invoke("explode", &request_with("a", json!(1)), &RawRequest::new())
        .expect_err("failure");
    let third = transport
        .invoke("echo", &request_with("a", json!(1)), &RawRequest::new())
        .expect("success");
    assert_eq!(first.id, 0);
    assert_eq!(third.id, 2);
}

// ============================================================================
// SECTION: Transport Seam
// ============================================================================

#[test]
fn transport_seam_invokes_without_overrides() {
    let transport = CliTransport::new(echo_registry());
    assert!(!Transport::registry(&transport).is_empty());
    let outcome = transport
        .handle_request("echo", &request_with("a", json!(9)))
        .expect("success");
    assert_eq!(outcome.result, json!({"a": 9}));
}

#[test]
fn unknown_action_is_an_error_value() {
    let transport = CliTransport::new(echo_registry());
    let err = transport
        .invoke("enroll", &RawRequest::new(), &RawRequest::new())
        .expect_err("unknown action");
    assert_eq!(err.kind(), ErrorKind::Input);
    assert_eq!(err.to_string(), "no action named 'enroll'");
}
