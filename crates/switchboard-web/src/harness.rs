// crates/switchboard-web/src/harness.rs
// ============================================================================
// Module: Web Test Harness
// Description: In-process request driver for the web transport.
// Purpose: Exercise the full handling path without a live network bind.
// Dependencies: switchboard-core
// ============================================================================

//! ## Overview
//! The harness drives the transport's handling path directly, bypassing the
//! HTTP server: GET maps to query parameters, POST maps to a JSON body, and
//! the raw entry point exposes transport-injected parameters as well. It is
//! for verification, not production traffic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;
use switchboard_core::DispatchError;
use switchboard_core::RawRequest;

use crate::transport::WebRequest;
use crate::transport::WebResponse;
use crate::transport::WebTransport;

// ============================================================================
// SECTION: Harness
// ============================================================================

/// In-process client for a web transport.
pub struct TestHarness {
    /// Transport under test.
    transport: Arc<WebTransport>,
}

impl TestHarness {
    /// Wraps a transport for in-process driving.
    #[must_use]
    pub const fn new(transport: Arc<WebTransport>) -> Self {
        Self {
            transport,
        }
    }

    /// Simulates a GET request carrying query-string parameters.
    ///
    /// # Errors
    /// Propagates dispatch errors exactly as [`WebTransport::handle`] does.
    pub fn get(
        &self,
        action: &str,
        query: &[(&str, &str)],
    ) -> Result<WebResponse, DispatchError> {
        let request = WebRequest {
            body: Vec::new(),
            query: query
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect(),
            injected: RawRequest::new(),
        };
        self.transport.handle(action, &request)
    }

    /// Simulates a POST request carrying a JSON body.
    ///
    /// # Errors
    /// Propagates dispatch errors exactly as [`WebTransport::handle`] does.
    pub fn post(&self, action: &str, body: &Value) -> Result<WebResponse, DispatchError> {
        self.post_raw(action, body.to_string().into_bytes())
    }

    /// Simulates a POST request with arbitrary body bytes.
    ///
    /// # Errors
    /// Propagates dispatch errors exactly as [`WebTransport::handle`] does.
    pub fn post_raw(
        &self,
        action: &str,
        body: Vec<u8>,
    ) -> Result<WebResponse, DispatchError> {
        let request = WebRequest {
            body,
            query: Vec::new(),
            injected: RawRequest::new(),
        };
        self.transport.handle(action, &request)
    }

    /// Drives a fully specified request, including injected parameters.
    ///
    /// # Errors
    /// Propagates dispatch errors exactly as [`WebTransport::handle`] does.
    pub fn request(
        &self,
        action: &str,
        request: &WebRequest,
    ) -> Result<WebResponse, DispatchError> {
        self.transport.handle(action, request)
    }
}
