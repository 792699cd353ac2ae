// crates/switchboard-core/src/registry.rs
// ============================================================================
// Module: Action Registry
// Description: Explicit, statically declared action table built once.
// Purpose: Resolve action names to bound handlers for both transports.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The registry is an explicit action table: each entry is declared by name
//! with its schema and handler at construction, with no runtime introspection
//! and no mutation of the dispatcher's own shape afterwards. The registry
//! exposes exactly the declared actions; nothing else is callable by name.
//! Building the same declarations twice yields an equal table, so
//! re-derivation is a no-op rather than mutation of existing entries.
//!
//! Security posture: action names arrive from untrusted callers; lookup is an
//! exact match against validated names, never interpretation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::dispatch::Action;
use crate::error::ActionError;
use crate::error::DispatchError;
use crate::schema::ActionSchema;
use crate::schema::RawRequest;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length of an action name in characters.
pub const MAX_ACTION_NAME_LENGTH: usize = 64;

// ============================================================================
// SECTION: Action Names
// ============================================================================

/// Validated action name: lowercase ASCII letters, digits, and underscores.
///
/// # Invariants
/// - Non-empty, at most [`MAX_ACTION_NAME_LENGTH`] characters.
/// - First character is a lowercase ASCII letter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ActionName(String);

/// Rejection reason for an invalid action name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionNameError {
    /// The name was empty.
    #[error("action name is empty")]
    Empty,
    /// The name exceeded the maximum length.
    #[error("action name '{name}' exceeds {MAX_ACTION_NAME_LENGTH} characters")]
    TooLong {
        /// Offending name.
        name: String,
    },
    /// The name contained characters outside `[a-z0-9_]` or started with a
    /// non-letter.
    #[error("action name '{name}' must start with a letter and use [a-z0-9_]")]
    UnsupportedCharacters {
        /// Offending name.
        name: String,
    },
}

impl ActionName {
    /// Parses and validates an action name.
    ///
    /// # Errors
    /// Returns [`ActionNameError`] when the name is empty, too long, or uses
    /// characters outside the allowed set.
    pub fn parse(value: &str) -> Result<Self, ActionNameError> {
        if value.is_empty() {
            return Err(ActionNameError::Empty);
        }
        if value.chars().count() > MAX_ACTION_NAME_LENGTH {
            return Err(ActionNameError::TooLong {
                name: value.to_string(),
            });
        }
        let mut chars = value.chars();
        let starts_with_letter = chars.next().is_some_and(|ch| ch.is_ascii_lowercase());
        let rest_allowed =
            chars.all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_');
        if !starts_with_letter || !rest_allowed {
            return Err(ActionNameError::UnsupportedCharacters {
                name: value.to_string(),
            });
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ActionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ActionName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// SECTION: Registry Errors
// ============================================================================

/// Failure while declaring the action table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two declarations used the same action name.
    #[error("duplicate action '{name}'")]
    DuplicateAction {
        /// Name declared more than once.
        name: ActionName,
    },
    /// A declared name failed validation.
    #[error(transparent)]
    InvalidName(#[from] ActionNameError),
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for the immutable action table.
///
/// Declarations are explicit: every entry names the action, its schema, and
/// its handler reference. Construction is side-effect-free.
#[derive(Debug, Default)]
pub struct ActionRegistryBuilder {
    /// Actions declared so far, keyed by name.
    actions: BTreeMap<ActionName, Action>,
}

impl ActionRegistryBuilder {
    /// Constructs an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            actions: BTreeMap::new(),
        }
    }

    /// Declares one action with its schema and handler.
    ///
    /// # Errors
    /// Returns [`RegistryError`] when the name is invalid or already
    /// declared.
    pub fn action<S, F>(mut self, name: &str, schema: S, handler: F) -> Result<Self, RegistryError>
    where
        S: ActionSchema + 'static,
        F: Fn(S::Params) -> Result<S::Output, ActionError> + Send + Sync + 'static,
    {
        let name = ActionName::parse(name)?;
        if self.actions.contains_key(&name) {
            return Err(RegistryError::DuplicateAction {
                name,
            });
        }
        let action = Action::bind(name.clone(), schema, handler);
        self.actions.insert(name, action);
        Ok(self)
    }

    /// Freezes the declared table into an immutable registry.
    #[must_use]
    pub fn build(self) -> ActionRegistry {
        ActionRegistry {
            actions: self.actions,
        }
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Immutable mapping from action name to bound action.
///
/// # Invariants
/// - Built once; read-only for the life of the server.
/// - Exposes exactly the declared actions.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    /// Bound actions keyed by validated name.
    actions: BTreeMap<ActionName, Action>,
}

impl ActionRegistry {
    /// Returns a builder for declaring the action table.
    #[must_use]
    pub const fn builder() -> ActionRegistryBuilder {
        ActionRegistryBuilder::new()
    }

    /// Resolves an action by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// Returns the registered action names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &ActionName> {
        self.actions.keys()
    }

    /// Returns the number of registered actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns whether the registry has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Resolves an action by name and runs the dispatch pipeline.
    ///
    /// # Errors
    /// Returns [`DispatchError::UnknownAction`] when the name is not
    /// registered, and propagates pipeline errors otherwise.
    pub fn dispatch(&self, name: &str, raw: &RawRequest) -> Result<Value, DispatchError> {
        let action = self.lookup(name).ok_or_else(|| DispatchError::UnknownAction {
            name: name.to_string(),
        })?;
        action.dispatch(raw)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
