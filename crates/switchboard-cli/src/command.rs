// crates/switchboard-cli/src/command.rs
// ============================================================================
// Module: Command Surface
// Description: Dynamic clap command tree derived from the action registry.
// Purpose: Expose one subcommand per registered action with request inputs.
// Dependencies: clap, serde_json, switchboard-core, thiserror
// ============================================================================

//! ## Overview
//! The command tree is derived from the registry at startup: one subcommand
//! per registered action, each accepting a `--json` request object and
//! repeatable `--set KEY=VALUE` keyword overrides, plus a global `--json-ipc`
//! flag selecting the machine-readable envelope. Parsed invocations feed the
//! CLI transport; dispatch failures render as error output unless error
//! propagation is enabled.

// ============================================================================
// SECTION: Imports
// ============================================================================

use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use serde_json::Value;
use switchboard_core::ActionRegistry;
use switchboard_core::DispatchError;
use switchboard_core::RawRequest;
use thiserror::Error;

use crate::emitter::OutputMode;
use crate::emitter::render;
use crate::emitter::render_failure;
use crate::transport::CliTransport;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure parsing or executing a CLI invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// No subcommand was selected.
    #[error("no action selected")]
    MissingAction,
    /// The request object or a keyword override was malformed.
    #[error("invalid request input: {detail}")]
    InvalidRequest {
        /// Human-readable input failure detail.
        detail: String,
    },
    /// Dispatch failed and error propagation is enabled.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

// ============================================================================
// SECTION: Command Tree
// ============================================================================

/// Builds the command tree: one subcommand per registered action.
#[must_use]
pub fn build_command(registry: &ActionRegistry) -> Command {
    let mut command = Command::new("switchboard")
        .about("Dispatch control-plane actions from the command line")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json-ipc")
                .long("json-ipc")
                .help("Emit a machine-readable JSON-IPC envelope")
                .global(true)
                .action(ArgAction::SetTrue),
        );
    for name in registry.names() {
        command = command.subcommand(
            Command::new(name.as_str().to_string())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .value_name("JSON")
                        .help("Request object as a JSON map"),
                )
                .arg(
                    Arg::new("set")
                        .long("set")
                        .value_name("KEY=VALUE")
                        .action(ArgAction::Append)
                        .help("Keyword override replacing same-named request fields"),
                ),
        );
    }
    command
}

// ============================================================================
// SECTION: Invocation Parsing
// ============================================================================

/// One parsed CLI invocation before dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionInvocation {
    /// Selected action name.
    pub action: String,
    /// Explicit request object from `--json`.
    pub request: RawRequest,
    /// Keyword overrides from `--set`, replacing request fields.
    pub overrides: RawRequest,
    /// Whether the JSON-IPC envelope was requested.
    pub json_ipc: bool,
}

/// Extracts an invocation from parsed matches.
///
/// # Errors
/// Returns [`CliError`] when no subcommand was selected or an input is
/// malformed.
pub fn parse_invocation(matches: &ArgMatches) -> Result<ActionInvocation, CliError> {
    let (action, submatches) = matches.subcommand().ok_or(CliError::MissingAction)?;
    let request = match submatches.get_one::<String>("json") {
        Some(text) => parse_request_object(text)?,
        None => RawRequest::new(),
    };
    let mut overrides = RawRequest::new();
    if let Some(pairs) = submatches.get_many::<String>("set") {
        for pair in pairs {
            let (key, value) = split_override(pair)?;
            overrides.insert(key.to_string(), coerce_scalar(value));
        }
    }
    Ok(ActionInvocation {
        action: action.to_string(),
        request,
        overrides,
        json_ipc: submatches.get_flag("json-ipc"),
    })
}

/// Parses a `--json` argument into a request map.
fn parse_request_object(text: &str) -> Result<RawRequest, CliError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CliError::InvalidRequest {
            detail: "--json must be a JSON object".to_string(),
        }),
        Err(err) => Err(CliError::InvalidRequest {
            detail: err.to_string(),
        }),
    }
}

/// Splits a `--set KEY=VALUE` pair at the first equals sign.
fn split_override(pair: &str) -> Result<(&str, &str), CliError> {
    pair.split_once('=').ok_or_else(|| CliError::InvalidRequest {
        detail: format!("--set '{pair}' must use KEY=VALUE form"),
    })
}

/// Coerces override text into a JSON scalar, falling back to a string.
fn coerce_scalar(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Executes one parsed invocation and renders the output.
///
/// Dispatch failures render as error output in the selected mode; with error
/// propagation enabled on the transport, they return as [`CliError::Dispatch`]
/// instead.
///
/// # Errors
/// Returns [`CliError`] on malformed input, or on dispatch failure when the
/// transport propagates errors.
pub fn run(transport: &CliTransport, matches: &ArgMatches) -> Result<String, CliError> {
    let invocation = parse_invocation(matches)?;
    let mode = if invocation.json_ipc {
        OutputMode::JsonIpc
    } else {
        transport.output_mode()
    };
    match transport.invoke(&invocation.action, &invocation.request, &invocation.overrides) {
        Ok(outcome) => Ok(render(outcome, mode)),
        Err(err) => {
            if transport.crash_on_error() {
                return Err(CliError::Dispatch(err));
            }
            Ok(render_failure(&err, mode))
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
