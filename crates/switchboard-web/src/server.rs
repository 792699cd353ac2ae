// crates/switchboard-web/src/server.rs
// ============================================================================
// Module: Control Endpoint Startup
// Description: HTTP/HTTPS bind selection and dry-run startup.
// Purpose: Serve the web transport router with optional TLS material.
// Dependencies: axum-server, switchboard-core, thiserror, tokio, tracing
// ============================================================================

//! ## Overview
//! Startup accepts optional TLS material (key plus certificate) to select an
//! HTTPS bind over plain HTTP, and a dry-run mode that constructs the router
//! without binding at all, for construction-only verification. The hosting
//! server owns process lifecycle, deadlines, and connection scheduling; this
//! layer only wires the transport in.
//!
//! Security posture: TLS material paths come from operator config; missing
//! or unreadable material fails startup rather than silently downgrading.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;

use crate::config::ConfigError;
use crate::config::WebConfig;
use crate::transport::WebTransport;

// ============================================================================
// SECTION: Options
// ============================================================================

/// TLS key and certificate selecting an HTTPS bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsMaterial {
    /// PEM-encoded private key path.
    pub key: PathBuf,
    /// PEM-encoded certificate path.
    pub certificate: PathBuf,
}

/// Startup options for the control endpoint.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Socket address to bind.
    pub bind: SocketAddr,
    /// Optional TLS material; absent selects plain HTTP.
    pub tls: Option<TlsMaterial>,
    /// Construct the router but skip binding entirely.
    pub dry_run: bool,
}

impl ServeOptions {
    /// Derives startup options from a validated web config.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the bind address cannot be resolved.
    pub fn from_config(config: &WebConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            bind: config.socket_addr()?,
            tls: config.tls_material(),
            dry_run: false,
        })
    }

    /// Selects dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure starting the control endpoint.
#[derive(Debug, Error)]
pub enum WebServeError {
    /// TLS material could not be loaded.
    #[error("failed to load TLS material: {detail}")]
    Tls {
        /// Underlying load failure.
        detail: String,
    },
    /// The bind or serve loop failed.
    #[error("control endpoint failed: {detail}")]
    Serve {
        /// Underlying serve failure.
        detail: String,
    },
}

// ============================================================================
// SECTION: Serve
// ============================================================================

/// Serves the transport router, blocking until the server stops.
///
/// # Errors
/// Returns [`WebServeError`] when TLS material cannot be loaded or the bind
/// fails. A dry run returns `Ok` immediately after router construction.
pub async fn serve(transport: Arc<WebTransport>, options: ServeOptions) -> Result<(), WebServeError> {
    let router = transport.router();
    if options.dry_run {
        tracing::info!(bind = %options.bind, "dry run requested, skipping bind");
        return Ok(());
    }
    match options.tls {
        Some(material) => {
            tracing::info!(bind = %options.bind, "starting HTTPS control endpoint");
            let tls = RustlsConfig::from_pem_file(&material.certificate, &material.key)
                .await
                .map_err(|err| WebServeError::Tls {
                    detail: err.to_string(),
                })?;
            axum_server::bind_rustls(options.bind, tls)
                .serve(router.into_make_service())
                .await
                .map_err(|err| WebServeError::Serve {
                    detail: err.to_string(),
                })
        }
        None => {
            tracing::info!(bind = %options.bind, "starting HTTP control endpoint");
            axum_server::bind(options.bind)
                .serve(router.into_make_service())
                .await
                .map_err(|err| WebServeError::Serve {
                    detail: err.to_string(),
                })
        }
    }
}
