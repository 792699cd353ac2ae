// crates/switchboard-web/src/config.rs
// ============================================================================
// Module: Web Transport Configuration
// Description: TOML-backed configuration for the control endpoint.
// Purpose: Validate bind, TLS, and error-propagation settings before start.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration for the web transport: bind address and port, optional TLS
//! material selecting HTTPS over HTTP, and the `crash_on_error` debug flag.
//! Files are size-capped before parsing and validated before use.
//!
//! Security posture: config files are operator-supplied but still parsed
//! defensively; unknown keys and partial TLS material are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::net::IpAddr;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::server::TlsMaterial;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum size of a web config file in bytes.
pub const MAX_CONFIG_BYTES: usize = 1024 * 1024;

/// Default bind address when none is configured.
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure loading or validating a web config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config '{path}': {detail}")]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying read failure.
        detail: String,
    },
    /// The file exceeded the size cap.
    #[error("config '{path}' exceeds {MAX_CONFIG_BYTES} bytes")]
    TooLarge {
        /// Config file path.
        path: PathBuf,
    },
    /// The file was not valid TOML for this shape.
    #[error("failed to parse config: {detail}")]
    Parse {
        /// Underlying parse failure.
        detail: String,
    },
    /// The parsed config violated a constraint.
    #[error("invalid config: {detail}")]
    Invalid {
        /// Constraint violation detail.
        detail: String,
    },
}

// ============================================================================
// SECTION: Config
// ============================================================================

/// Web transport configuration.
///
/// # Invariants
/// - `tls_key` and `tls_certificate` are either both present or both absent.
/// - `port` is nonzero after validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebConfig {
    /// Bind address for the control endpoint.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Bind port for the control endpoint.
    pub port: u16,
    /// TLS private key path; selects HTTPS together with the certificate.
    #[serde(default)]
    pub tls_key: Option<PathBuf>,
    /// TLS certificate path; selects HTTPS together with the key.
    #[serde(default)]
    pub tls_certificate: Option<PathBuf>,
    /// Propagate 404/500-class errors instead of converting them.
    #[serde(default)]
    pub crash_on_error: bool,
}

/// Returns the default bind address.
fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

impl WebConfig {
    /// Loads and validates a config file.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the file is unreadable, oversized,
    /// unparsable, or violates a constraint.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = read_with_limit(path)?;
        let text = String::from_utf8(bytes).map_err(|err| ConfigError::Parse {
            detail: err.to_string(),
        })?;
        let config: Self = toml::from_str(&text).map_err(|err| ConfigError::Parse {
            detail: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates cross-field constraints.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] on a zero port or partial TLS
    /// material.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                detail: "port must be nonzero".to_string(),
            });
        }
        if self.tls_key.is_some() != self.tls_certificate.is_some() {
            return Err(ConfigError::Invalid {
                detail: "tls_key and tls_certificate must be supplied together".to_string(),
            });
        }
        Ok(())
    }

    /// Resolves the configured bind address and port.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when the bind address is not an IP
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind_address.parse().map_err(|_| ConfigError::Invalid {
            detail: format!("bind_address '{}' is not an IP address", self.bind_address),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Returns the TLS material when both key and certificate are set.
    #[must_use]
    pub fn tls_material(&self) -> Option<TlsMaterial> {
        match (&self.tls_key, &self.tls_certificate) {
            (Some(key), Some(certificate)) => Some(TlsMaterial {
                key: key.clone(),
                certificate: certificate.clone(),
            }),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a file, rejecting anything over the size cap.
fn read_with_limit(path: &Path) -> Result<Vec<u8>, ConfigError> {
    let file = File::open(path).map_err(|err| ConfigError::Read {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })?;
    let limit = u64::try_from(MAX_CONFIG_BYTES).unwrap_or(u64::MAX);
    let mut buffer = Vec::new();
    file.take(limit.saturating_add(1)).read_to_end(&mut buffer).map_err(|err| {
        ConfigError::Read {
            path: path.to_path_buf(),
            detail: err.to_string(),
        }
    })?;
    if buffer.len() > MAX_CONFIG_BYTES {
        return Err(ConfigError::TooLarge {
            path: path.to_path_buf(),
        });
    }
    Ok(buffer)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
