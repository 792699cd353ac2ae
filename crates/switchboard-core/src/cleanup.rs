// crates/switchboard-core/src/cleanup.rs
// ============================================================================
// Module: Cleanup Hook
// Description: Scoped release-on-drop wrapper for the implementer hook.
// Purpose: Guarantee post-action cleanup runs exactly once per invocation.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The implementer may expose a cleanup operation that must run after each
//! CLI-triggered action, success or failure alike. [`CleanupGuard`] models
//! this as scoped acquisition with release on drop, so the hook fires on
//! every exit path without branch-duplicated cleanup code.

// ============================================================================
// SECTION: Hook Trait
// ============================================================================

/// Implementer-side cleanup operation released after each invocation.
///
/// The hook is a scoped-resource release, not conditional on outcome.
pub trait CleanupHook: Send + Sync {
    /// Releases implementer resources held for the completed action.
    fn cleanup(&self);
}

/// Cleanup hook that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCleanup;

impl CleanupHook for NoopCleanup {
    fn cleanup(&self) {}
}

// ============================================================================
// SECTION: Guard
// ============================================================================

/// Scoped guard that fires the cleanup hook when dropped.
///
/// # Invariants
/// - The hook fires exactly once per guard, on every exit path.
#[must_use = "dropping the guard immediately defeats the post-action cleanup"]
pub struct CleanupGuard<'a> {
    /// Hook released on drop.
    hook: &'a dyn CleanupHook,
}

impl<'a> CleanupGuard<'a> {
    /// Arms a guard around the given hook.
    pub const fn new(hook: &'a dyn CleanupHook) -> Self {
        Self {
            hook,
        }
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        self.hook.cleanup();
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
