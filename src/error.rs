//! Error types used by the healthvisor runtime and config loader.
//!
//! Two error enums cover the only fatal paths in the system:
//!
//! - [`ConfigError`] - configuration loading/validation failures, fatal at
//!   startup. The polling core never sees a malformed descriptor.
//! - [`RuntimeError`] - failures of the orchestration itself, such as a
//!   shutdown exceeding its grace period.
//!
//! Probe failures are deliberately absent: construction errors, transport
//! errors and classification mismatches are all encoded as
//! [`Report`](crate::Report) data and never surface as `Err` inside the
//! polling loop.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while loading or validating the configuration file.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// Path as given on the command line.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML.
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// The `[globals]` table carries an invalid value.
    #[error("globals: {reason}")]
    InvalidGlobals { reason: String },

    /// One endpoint entry failed validation.
    #[error("endpoint {index} ({name}): {reason}")]
    InvalidEndpoint {
        /// Zero-based position in the `[[endpoints]]` array.
        index: usize,
        name: String,
        reason: String,
    },

    /// The config declares no endpoints at all.
    #[error("no endpoints configured")]
    NoEndpoints,
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "config_read",
            ConfigError::Parse { .. } => "config_parse",
            ConfigError::InvalidGlobals { .. } => "config_invalid_globals",
            ConfigError::InvalidEndpoint { .. } => "config_invalid_endpoint",
            ConfigError::NoEndpoints => "config_no_endpoints",
        }
    }
}

/// Errors produced by the scheduler runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Shutdown grace period was exceeded; some polling tasks were still
    /// running and had to be aborted.
    #[error("shutdown grace {grace:?} exceeded; still running: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Names of endpoints whose tasks did not stop in time.
        stuck: Vec<String>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }
}
