// crates/switchboard-core/src/schema/tests.rs
// ============================================================================
// Module: Schema Capability Unit Tests
// Description: Unit tests for typed and document schema validation.
// Purpose: Validate rejection of missing, malformed, and undeclared fields.
// Dependencies: switchboard-core
// ============================================================================

//! ## Overview
//! Exercises the two stock schema implementations against valid, incomplete,
//! and over-specified request maps.

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

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use super::ActionSchema;
use super::DocumentSchema;
use super::RawRequest;
use super::TypedSchema;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Parameters for the sample peer-selection action.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
struct SamplePeersParams {
    /// Number of peers to select.
    quantity: u32,
    /// Peer addresses to exclude from selection.
    #[serde(default)]
    exclude: Vec<String>,
}

/// Output of the sample peer-selection action.
#[derive(Debug, Serialize)]
struct SamplePeersOutput {
    /// Selected peer addresses.
    peers: Vec<String>,
}

fn raw(value: Value) -> RawRequest {
    match value {
        Value::Object(map) => map,
        _ => panic!("fixture must be a JSON object"),
    }
}

// ============================================================================
// SECTION: Typed Schema
// ============================================================================

#[test]
fn typed_schema_validates_and_coerces() {
    let schema = TypedSchema::<SamplePeersParams, SamplePeersOutput>::new();
    let params = schema.validate(&raw(json!({"quantity": 3}))).expect("valid request");
    assert_eq!(params.quantity, 3);
    assert!(params.exclude.is_empty());
}

#[test]
fn typed_schema_rejects_missing_field() {
    let schema = TypedSchema::<SamplePeersParams, SamplePeersOutput>::new();
    let err = schema.validate(&raw(json!({}))).expect_err("missing quantity");
    assert!(err.to_string().contains("quantity"));
}

#[test]
fn typed_schema_rejects_undeclared_field() {
    let schema = TypedSchema::<SamplePeersParams, SamplePeersOutput>::new();
    let err = schema
        .validate(&raw(json!({"quantity": 3, "surplus": true})))
        .expect_err("undeclared field");
    assert!(err.to_string().contains("surplus"));
}

#[test]
fn typed_schema_rejects_wrong_type() {
    let schema = TypedSchema::<SamplePeersParams, SamplePeersOutput>::new();
    schema.validate(&raw(json!({"quantity": "many"}))).expect_err("non-numeric quantity");
}

#[test]
fn typed_schema_serializes_output() {
    let schema = TypedSchema::<SamplePeersParams, SamplePeersOutput>::new();
    let value = schema
        .serialize(SamplePeersOutput {
            peers: vec!["peer-1".to_string()],
        })
        .expect("serializable output");
    assert_eq!(value, json!({"peers": ["peer-1"]}));
}

// ============================================================================
// SECTION: Document Schema
// ============================================================================

fn sample_document() -> DocumentSchema {
    DocumentSchema::compile(&json!({
        "type": "object",
        "properties": {
            "quantity": {"type": "integer", "minimum": 1}
        },
        "required": ["quantity"],
        "additionalProperties": false
    }))
    .expect("valid schema document")
}

#[test]
fn document_schema_accepts_valid_map() {
    let schema = sample_document();
    let request = raw(json!({"quantity": 2}));
    let params = schema.validate(&request).expect("valid request");
    assert_eq!(params, request);
}

#[test]
fn document_schema_rejects_undeclared_field() {
    let schema = sample_document();
    schema.validate(&raw(json!({"quantity": 2, "surplus": 1}))).expect_err("undeclared field");
}

#[test]
fn document_schema_rejects_out_of_range() {
    let schema = sample_document();
    schema.validate(&raw(json!({"quantity": 0}))).expect_err("below minimum");
}

#[test]
fn document_schema_compile_rejects_bad_document() {
    DocumentSchema::compile(&json!({"type": 12})).expect_err("invalid schema document");
}

#[test]
fn document_schema_serializes_passthrough() {
    let schema = sample_document();
    let value = schema.serialize(json!({"shares": []})).expect("passthrough");
    assert_eq!(value, json!({"shares": []}));
}
