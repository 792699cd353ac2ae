// crates/switchboard-web/src/transport.rs
// ============================================================================
// Module: Web Transport
// Description: Request normalization and exception-to-status mapping.
// Purpose: Handle one HTTP request per action through the shared pipeline.
// Dependencies: axum, switchboard-core, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! Per request the transport merges parameters from three sources with a
//! defined precedence (JSON body, then query string, then transport-injected
//! parameters, later sources winning), resolves the action, runs the dispatch
//! pipeline, and maps the outcome onto the status taxonomy: input errors are
//! 400, aggregated partial failures are 404, anything else unhandled is 500.
//! With `crash_on_error` set, the 404 and 500 classes propagate to the caller
//! instead of being converted; input errors are always converted because they
//! represent caller mistakes rather than server faults.
//!
//! Security posture: bodies and query strings are untrusted; the unknown
//! action check runs before the body is parsed against any schema.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::RawQuery;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use serde_json::Value;
use switchboard_core::ActionRegistry;
use switchboard_core::DispatchError;
use switchboard_core::ErrorEnvelope;
use switchboard_core::ErrorKind;
use switchboard_core::RawRequest;
use switchboard_core::SuccessEnvelope;
use switchboard_core::Transport;
use thiserror::Error;

use crate::telemetry::NoopWebMetrics;
use crate::telemetry::WebMetricEvent;
use crate::telemetry::WebMetrics;

// ============================================================================
// SECTION: Requests and Responses
// ============================================================================

/// One normalized-input web request before merging.
///
/// # Invariants
/// - `query` pairs keep arrival order; later same-named pairs win.
/// - `injected` parameters come from the transport itself (path segments,
///   mount-point bindings), never from the caller's payload.
#[derive(Debug, Clone, Default)]
pub struct WebRequest {
    /// Raw request body bytes; empty means an empty parameter map.
    pub body: Vec<u8>,
    /// Decoded query-string pairs.
    pub query: Vec<(String, String)>,
    /// Transport-injected parameters overriding body and query.
    pub injected: RawRequest,
}

/// Status code and JSON body selected for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct WebResponse {
    /// HTTP status per the error-kind taxonomy.
    pub status: StatusCode,
    /// Structured JSON envelope body.
    pub body: Value,
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// HTTP front end over the shared action registry.
///
/// # Invariants
/// - `registry` and `crash_on_error` are immutable after construction, so
///   concurrent requests share no mutable transport state.
pub struct WebTransport {
    /// Immutable action table.
    registry: Arc<ActionRegistry>,
    /// Propagate 404/500-class errors instead of converting them.
    crash_on_error: bool,
    /// Metrics sink recording every outcome.
    metrics: Arc<dyn WebMetrics>,
}

impl WebTransport {
    /// Constructs a transport over a registry with conversion enabled.
    #[must_use]
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self {
            registry,
            crash_on_error: false,
            metrics: Arc::new(NoopWebMetrics),
        }
    }

    /// Selects whether 404/500-class errors propagate instead of converting.
    #[must_use]
    pub const fn with_crash_on_error(mut self, crash_on_error: bool) -> Self {
        self.crash_on_error = crash_on_error;
        self
    }

    /// Installs a metrics sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn WebMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Returns whether error propagation is enabled.
    #[must_use]
    pub const fn crash_on_error(&self) -> bool {
        self.crash_on_error
    }

    /// Returns the action registry behind this transport.
    #[must_use]
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Handles one request for the named action.
    ///
    /// # Errors
    /// Returns the underlying [`DispatchError`] only when `crash_on_error` is
    /// set and the error is in the aggregated or unhandled class; input
    /// errors are always converted to a 400 response.
    pub fn handle(
        &self,
        action_name: &str,
        request: &WebRequest,
    ) -> Result<WebResponse, DispatchError> {
        let started = Instant::now();
        let outcome = self.run(action_name, request);
        let response = match outcome {
            Ok(result) => {
                tracing::debug!(action = action_name, status = 200, "action dispatched");
                Ok(WebResponse {
                    status: StatusCode::OK,
                    body: SuccessEnvelope::new(result).into_value(),
                })
            }
            Err(err) => self.respond_error(action_name, err),
        };
        self.record(action_name, request, &response, started.elapsed());
        response
    }

    /// Resolves the action and runs normalization plus the pipeline.
    fn run(&self, action_name: &str, request: &WebRequest) -> Result<Value, DispatchError> {
        // Unknown names are rejected before the body is parsed at all.
        let action =
            self.registry.lookup(action_name).ok_or_else(|| DispatchError::UnknownAction {
                name: action_name.to_string(),
            })?;
        let raw = normalize_request(&request.body, &request.query, &request.injected)?;
        action.dispatch(&raw)
    }

    /// Maps a dispatch error onto the status taxonomy.
    fn respond_error(
        &self,
        action_name: &str,
        err: DispatchError,
    ) -> Result<WebResponse, DispatchError> {
        let status = status_for(err.kind());
        match err.kind() {
            ErrorKind::Input => {
                tracing::debug!(
                    action = action_name,
                    status = status.as_u16(),
                    error = %err,
                    "request rejected"
                );
            }
            ErrorKind::Aggregated => {
                tracing::warn!(
                    action = action_name,
                    status = status.as_u16(),
                    error = %err,
                    "partial failure"
                );
                if self.crash_on_error {
                    return Err(err);
                }
            }
            ErrorKind::Unhandled => {
                tracing::debug!(
                    action = action_name,
                    status = status.as_u16(),
                    error = %err,
                    "action failed"
                );
                if self.crash_on_error {
                    return Err(err);
                }
            }
        }
        Ok(WebResponse {
            status,
            body: ErrorEnvelope::from_error(&err).into_value(),
        })
    }

    /// Records the outcome in the metrics sink.
    fn record(
        &self,
        action_name: &str,
        request: &WebRequest,
        response: &Result<WebResponse, DispatchError>,
        latency: std::time::Duration,
    ) {
        let (status, error_kind) = match response {
            Ok(web_response) => {
                let kind = if web_response.status == StatusCode::OK {
                    None
                } else {
                    Some(kind_for(web_response.status).as_str())
                };
                (web_response.status.as_u16(), kind)
            }
            Err(err) => (status_for(err.kind()).as_u16(), Some(err.kind().as_str())),
        };
        let event = WebMetricEvent {
            action: action_name.to_string(),
            status,
            error_kind,
            request_bytes: request.body.len(),
        };
        self.metrics.record_request(event.clone());
        self.metrics.record_latency(event, latency);
    }
}

impl Transport for WebTransport {
    type Request = WebRequest;
    type Response = WebResponse;

    fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    fn handle_request(
        &self,
        action_name: &str,
        request: &Self::Request,
    ) -> Result<Self::Response, DispatchError> {
        self.handle(action_name, request)
    }
}

// ============================================================================
// SECTION: Status Taxonomy
// ============================================================================

/// Maps an error kind onto its HTTP status code.
#[must_use]
pub const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Input => StatusCode::BAD_REQUEST,
        ErrorKind::Aggregated => StatusCode::NOT_FOUND,
        ErrorKind::Unhandled => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a non-success status back onto its error kind.
fn kind_for(status: StatusCode) -> ErrorKind {
    match status.as_u16() {
        400 => ErrorKind::Input,
        404 => ErrorKind::Aggregated,
        _ => ErrorKind::Unhandled,
    }
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Merges body, query, and injected parameters with defined precedence.
///
/// Later sources override earlier ones: query overrides body, injected
/// parameters override both. Query values are coerced from text to JSON
/// scalars where they parse as such.
///
/// # Errors
/// Returns [`DispatchError::MalformedBody`] when the body is neither empty
/// nor a JSON object.
pub fn normalize_request(
    body: &[u8],
    query: &[(String, String)],
    injected: &RawRequest,
) -> Result<RawRequest, DispatchError> {
    let mut merged = parse_body(body)?;
    for (key, value) in query {
        merged.insert(key.clone(), coerce_scalar(value));
    }
    for (key, value) in injected {
        merged.insert(key.clone(), value.clone());
    }
    Ok(merged)
}

/// Parses the request body into a parameter map; empty means empty map.
fn parse_body(body: &[u8]) -> Result<RawRequest, DispatchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RawRequest::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DispatchError::MalformedBody {
            detail: format!("expected a JSON object, got {}", json_type_name(&other)),
        }),
        Err(err) => Err(DispatchError::MalformedBody {
            detail: err.to_string(),
        }),
    }
}

/// Coerces query-string text into a JSON scalar, falling back to a string.
fn coerce_scalar(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Returns a short label for a JSON value's type.
const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// SECTION: Axum Surface
// ============================================================================

/// Dispatch fault that escaped conversion because `crash_on_error` is set.
///
/// The axum adapter has to answer something at the framework edge; the fault
/// renders as a bare 500 there, while in-process callers (the test harness)
/// observe the original error value.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct PropagatedFault(#[from] DispatchError);

impl PropagatedFault {
    /// Returns the propagated dispatch error.
    #[must_use]
    pub const fn inner(&self) -> &DispatchError {
        &self.0
    }
}

impl IntoResponse for PropagatedFault {
    fn into_response(self) -> Response {
        let body = ErrorEnvelope::from_error(&self.0).into_value();
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl WebTransport {
    /// Builds an axum router mounting `/{action}` for GET and POST.
    #[must_use]
    pub fn router(self: &Arc<Self>) -> Router {
        Router::new()
            .route("/{action}", get(handle_action).post(handle_action))
            .with_state(Arc::clone(self))
    }
}

/// Axum handler bridging one HTTP request into the transport.
async fn handle_action(
    State(transport): State<Arc<WebTransport>>,
    Path(action): Path<String>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Response, PropagatedFault> {
    let query_pairs = query.map_or_else(Vec::new, |text| {
        url::form_urlencoded::parse(text.as_bytes()).into_owned().collect()
    });
    let request = WebRequest {
        body: body.to_vec(),
        query: query_pairs,
        injected: RawRequest::new(),
    };
    let response = transport.handle(&action, &request)?;
    Ok((response.status, Json(response.body)).into_response())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
