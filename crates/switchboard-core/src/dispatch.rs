// crates/switchboard-core/src/dispatch.rs
// ============================================================================
// Module: Dispatch Pipeline
// Description: Validate → invoke → serialize execution for a bound action.
// Purpose: Share one pipeline between the CLI and web transports.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! An [`Action`] binds a name, a schema, and a handler closure into a single
//! dispatchable unit. Dispatch runs the shared pipeline: the schema validates
//! the raw map, the handler runs on the typed parameters, and the schema
//! serializes the result. Validation and invocation are never interleaved;
//! the handler is invoked only after complete validation succeeds. The
//! pipeline is synchronous and runs to completion on the calling thread.
//!
//! Security posture: raw untyped data never reaches the handler, and handler
//! output never reaches the caller unserialized.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ActionError;
use crate::error::DispatchError;
use crate::registry::ActionName;
use crate::schema::ActionSchema;
use crate::schema::RawRequest;

// ============================================================================
// SECTION: Action
// ============================================================================

/// A named, schema-validated operation exposed by the dispatcher.
///
/// # Invariants
/// - Immutable after construction; cloning shares the bound runner.
#[derive(Clone)]
pub struct Action {
    /// Unique action name.
    name: ActionName,
    /// Type-erased pipeline runner for this action.
    runner: Arc<dyn ErasedAction>,
}

impl Action {
    /// Binds a schema and handler into a dispatchable action.
    pub(crate) fn bind<S, F>(name: ActionName, schema: S, handler: F) -> Self
    where
        S: ActionSchema + 'static,
        F: Fn(S::Params) -> Result<S::Output, ActionError> + Send + Sync + 'static,
    {
        let runner = BoundAction {
            name: name.clone(),
            schema,
            handler,
        };
        Self {
            name,
            runner: Arc::new(runner),
        }
    }

    /// Returns the action name.
    #[must_use]
    pub const fn name(&self) -> &ActionName {
        &self.name
    }

    /// Runs the validate → invoke → serialize pipeline on a raw request.
    ///
    /// # Errors
    /// Returns [`DispatchError::Validation`] when the schema rejects the map,
    /// [`DispatchError::Aggregated`] when the handler reports a partial
    /// failure, and [`DispatchError::Unhandled`] for any other handler or
    /// serialization fault.
    pub fn dispatch(&self, raw: &RawRequest) -> Result<Value, DispatchError> {
        self.runner.dispatch(raw)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Erased Pipeline
// ============================================================================

/// Object-safe pipeline runner hiding the schema's associated types.
trait ErasedAction: Send + Sync {
    /// Runs the full pipeline for one raw request.
    fn dispatch(&self, raw: &RawRequest) -> Result<Value, DispatchError>;
}

/// Schema and handler bound together under one action name.
struct BoundAction<S, F> {
    /// Action name used in unhandled-error messages.
    name: ActionName,
    /// Input/output contract for the action.
    schema: S,
    /// Handler closure invoked with validated parameters.
    handler: F,
}

impl<S, F> ErasedAction for BoundAction<S, F>
where
    S: ActionSchema,
    F: Fn(S::Params) -> Result<S::Output, ActionError> + Send + Sync,
{
    fn dispatch(&self, raw: &RawRequest) -> Result<Value, DispatchError> {
        let typed = self.schema.validate(raw)?;
        let output = (self.handler)(typed).map_err(|err| match err {
            ActionError::Aggregated {
                message,
                failures,
            } => DispatchError::Aggregated {
                message,
                failures,
            },
            ActionError::Failed {
                detail,
            } => DispatchError::Unhandled {
                action: self.name.to_string(),
                detail,
            },
        })?;
        self.schema.serialize(output).map_err(|err| DispatchError::Unhandled {
            action: self.name.to_string(),
            detail: err.to_string(),
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
