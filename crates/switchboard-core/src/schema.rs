// crates/switchboard-core/src/schema.rs
// ============================================================================
// Module: Schema Capability
// Description: Input validation and output serialization contracts per action.
// Purpose: Keep raw untrusted data away from handlers and raw handler output
//          away from callers.
// Dependencies: jsonschema, serde, serde_json
// ============================================================================

//! ## Overview
//! Each registered action carries a schema: a capability that type-checks and
//! coerces the raw request map into the handler's typed parameters and
//! serializes the handler's result back into a JSON-compatible primitive
//! structure. Two stock implementations are provided: [`TypedSchema`] bridges
//! to serde-derived parameter and output types, and [`DocumentSchema`] checks
//! the raw map against a JSON Schema document (draft 2020-12).
//!
//! Security posture: the raw map is untrusted; validation must reject missing,
//! malformed, and undeclared fields before any handler runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::marker::PhantomData;

use jsonschema::Draft;
use jsonschema::Validator;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::error::SerializeError;
use crate::error::ValidationError;

// ============================================================================
// SECTION: Raw Requests
// ============================================================================

/// Untyped request map as assembled by a transport.
///
/// Keys are parameter names; values are whatever the caller supplied. The
/// source of the map differs per transport (JSON body, query string, CLI
/// keyword overrides) but the merged shape is always this.
pub type RawRequest = serde_json::Map<String, Value>;

// ============================================================================
// SECTION: Schema Trait
// ============================================================================

/// Per-action input/output contract.
///
/// # Invariants
/// - `validate` runs to completion before a handler is ever invoked.
/// - `serialize` runs on the success path only.
pub trait ActionSchema: Send + Sync {
    /// Typed parameters produced by validation.
    type Params: Send;
    /// Domain result consumed by serialization.
    type Output;

    /// Validates and coerces a raw request map into typed parameters.
    ///
    /// # Errors
    /// Returns [`ValidationError`] on missing, malformed, or undeclared
    /// fields.
    fn validate(&self, raw: &RawRequest) -> Result<Self::Params, ValidationError>;

    /// Serializes a domain result into a JSON-compatible structure.
    ///
    /// # Errors
    /// Returns [`SerializeError`] when the result cannot be represented as
    /// JSON; this is a server fault, not a caller mistake.
    fn serialize(&self, output: Self::Output) -> Result<Value, SerializeError>;
}

// ============================================================================
// SECTION: Serde-Typed Schema
// ============================================================================

/// Schema backed by serde-derived parameter and output types.
///
/// Declare `#[serde(deny_unknown_fields)]` on the parameter type to reject
/// fields the action does not declare.
#[derive(Debug)]
pub struct TypedSchema<P, O> {
    /// Marker tying the schema to its parameter and output types.
    marker: PhantomData<fn(P) -> O>,
}

impl<P, O> TypedSchema<P, O> {
    /// Constructs a typed schema.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<P, O> Default for TypedSchema<P, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, O> ActionSchema for TypedSchema<P, O>
where
    P: DeserializeOwned + Send,
    O: Serialize,
{
    type Output = O;
    type Params = P;

    fn validate(&self, raw: &RawRequest) -> Result<Self::Params, ValidationError> {
        serde_json::from_value(Value::Object(raw.clone()))
            .map_err(|err| ValidationError::new(err.to_string()))
    }

    fn serialize(&self, output: Self::Output) -> Result<Value, SerializeError> {
        serde_json::to_value(output).map_err(|err| SerializeError::new(err.to_string()))
    }
}

// ============================================================================
// SECTION: JSON Schema Document
// ============================================================================

/// Failure compiling a JSON Schema document into a validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema compilation failed: {detail}")]
pub struct SchemaCompileError {
    /// Human-readable compilation failure detail.
    detail: String,
}

/// Schema backed by a compiled JSON Schema document (draft 2020-12).
///
/// Parameters pass through as the validated raw map and output passes through
/// as a JSON value, so this fits actions whose shapes are data-driven rather
/// than statically typed.
#[derive(Debug)]
pub struct DocumentSchema {
    /// Compiled validator for the input document.
    validator: Validator,
}

impl DocumentSchema {
    /// Compiles a JSON Schema document into a reusable validator.
    ///
    /// # Errors
    /// Returns [`SchemaCompileError`] when the document is not a valid
    /// draft 2020-12 schema.
    pub fn compile(schema: &Value) -> Result<Self, SchemaCompileError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(schema)
            .map_err(|err| SchemaCompileError {
                detail: err.to_string(),
            })?;
        Ok(Self {
            validator,
        })
    }
}

impl ActionSchema for DocumentSchema {
    type Output = Value;
    type Params = RawRequest;

    fn validate(&self, raw: &RawRequest) -> Result<Self::Params, ValidationError> {
        let instance = Value::Object(raw.clone());
        if self.validator.is_valid(&instance) {
            return Ok(raw.clone());
        }
        let mut errors = self.validator.iter_errors(&instance);
        let detail = errors
            .next()
            .map_or_else(|| "schema validation failed".to_string(), |err| err.to_string());
        Err(ValidationError::new(detail))
    }

    fn serialize(&self, output: Self::Output) -> Result<Value, SerializeError> {
        Ok(output)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
