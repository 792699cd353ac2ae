// crates/switchboard-core/src/transport.rs
// ============================================================================
// Module: Transport Seam
// Description: Trait implemented by each concrete front end.
// Purpose: Let callers drive any transport through one request seam.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Each front end (HTTP, CLI) implements [`Transport`] over its native
//! request and response representations. The trait replaces an abstract-base
//! shape with an explicit seam: a transport exposes its registry and handles
//! one named request at a time; everything else is transport-specific.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::error::DispatchError;
use crate::registry::ActionRegistry;

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Front end driving the shared dispatch pipeline.
pub trait Transport {
    /// Transport-native request representation.
    type Request;
    /// Transport-native success representation.
    type Response;

    /// Returns the action registry behind this transport.
    fn registry(&self) -> &ActionRegistry;

    /// Handles one request for the named action.
    ///
    /// # Errors
    /// Returns [`DispatchError`] when the failure is propagated rather than
    /// converted into a transport-native response.
    fn handle_request(
        &self,
        action_name: &str,
        request: &Self::Request,
    ) -> Result<Self::Response, DispatchError>;
}
