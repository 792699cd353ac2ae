// crates/switchboard-core/src/cleanup/tests.rs
// ============================================================================
// Module: Cleanup Guard Unit Tests
// Description: Unit tests for release-on-drop cleanup semantics.
// Purpose: Validate the hook fires exactly once on every exit path.
// Dependencies: switchboard-core
// ============================================================================

//! ## Overview
//! Exercises the cleanup guard across normal returns and early error exits.

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

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use super::CleanupGuard;
use super::CleanupHook;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Cleanup hook counting how often it fires.
#[derive(Default)]
struct CountingHook {
    /// Number of cleanup calls observed.
    calls: AtomicUsize,
}

impl CleanupHook for CountingHook {
    fn cleanup(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Runs a fallible body under a cleanup guard.
fn with_guard(hook: &CountingHook, fail: bool) -> Result<(), &'static str> {
    let _guard = CleanupGuard::new(hook);
    if fail {
        return Err("pipeline failure");
    }
    Ok(())
}

// ============================================================================
// SECTION: Guard Semantics
// ============================================================================

#[test]
fn cleanup_fires_once_on_success() {
    let hook = CountingHook::default();
    with_guard(&hook, false).expect("success path");
    assert_eq!(hook.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn cleanup_fires_once_on_failure() {
    let hook = CountingHook::default();
    with_guard(&hook, true).expect_err("failure path");
    assert_eq!(hook.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn each_invocation_releases_independently() {
    let hook = CountingHook::default();
    with_guard(&hook, false).expect("first");
    with_guard(&hook, true).expect_err("second");
    assert_eq!(hook.calls.load(Ordering::SeqCst), 2);
}
