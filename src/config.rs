//! # Configuration loading and validation.
//!
//! Reads a TOML file with an optional `[globals]` table and an
//! `[[endpoints]]` array, applies global defaults to endpoints that omit a
//! value, validates every entry, and produces the `Vec<Endpoint>` the
//! scheduler consumes. All failures here are fatal [`ConfigError`]s; the
//! polling core never sees a malformed descriptor.
//!
//! ## File shape
//! ```toml
//! [globals]
//! method = "GET"
//! type = "http"
//! interval_ms = 30000
//! timeout_ms = 5000
//!
//! [[endpoints]]
//! name = "api"
//! url = "https://example.com/health"
//! expected_status = 200
//! must_match_status = true
//! max_latency_ms = 250
//! retry = 2
//!
//! [endpoints.headers]
//! authorization = "Bearer ..."
//! ```
//!
//! ## Validation rules
//! - interval and timeout must be set (directly or via globals) and positive;
//! - the kind must be recognized (`http`, `tcp`, `dns`);
//! - HTTP endpoints need a valid method and a parseable URL;
//! - the endpoint list must be non-empty.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::endpoint::{
    is_valid_kind, is_valid_method, normalize_kind, Endpoint, HTTP_KIND, METHOD_GET,
};
use crate::error::ConfigError;

#[derive(Debug, Default, Deserialize)]
struct RawGlobals {
    method: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    interval_ms: Option<u64>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawEndpoint {
    name: String,
    url: String,
    method: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    interval_ms: Option<u64>,
    timeout_ms: Option<u64>,
    #[serde(default)]
    headers: HashMap<String, String>,
    expected_status: Option<u16>,
    #[serde(default)]
    must_match_status: bool,
    max_latency_ms: Option<u64>,
    #[serde(default)]
    retry: u32,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    globals: RawGlobals,
    #[serde(default)]
    endpoints: Vec<RawEndpoint>,
}

/// Validated configuration: the endpoint list the scheduler consumes.
#[derive(Clone, Debug)]
pub struct Config {
    pub endpoints: Vec<Endpoint>,
}

impl Config {
    /// Loads and validates the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: shown.clone(),
            source,
        })?;
        Self::from_toml(&text, &shown)
    }

    /// Parses and validates config text; `origin` names the source in errors.
    pub fn from_toml(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;

        validate_globals(&raw.globals)?;

        if raw.endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints);
        }

        let mut endpoints = Vec::with_capacity(raw.endpoints.len());
        for (index, entry) in raw.endpoints.into_iter().enumerate() {
            endpoints.push(build_endpoint(index, entry, &raw.globals)?);
        }
        Ok(Self { endpoints })
    }
}

fn validate_globals(globals: &RawGlobals) -> Result<(), ConfigError> {
    if let Some(method) = &globals.method {
        if !is_valid_method(method) {
            return Err(ConfigError::InvalidGlobals {
                reason: format!("invalid HTTP method {method:?}"),
            });
        }
    }
    if let Some(kind) = &globals.kind {
        if !is_valid_kind(kind) {
            return Err(ConfigError::InvalidGlobals {
                reason: format!("unrecognized endpoint type {kind:?}"),
            });
        }
    }
    Ok(())
}

fn build_endpoint(
    index: usize,
    entry: RawEndpoint,
    globals: &RawGlobals,
) -> Result<Endpoint, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        index,
        name: entry.name.clone(),
        reason,
    };

    let kind_raw = entry
        .kind
        .clone()
        .or_else(|| globals.kind.clone())
        .unwrap_or_else(|| HTTP_KIND.to_string());
    if !is_valid_kind(&kind_raw) {
        return Err(invalid(format!("unrecognized endpoint type {kind_raw:?}")));
    }
    let kind = normalize_kind(&kind_raw);

    let method = entry
        .method
        .clone()
        .or_else(|| globals.method.clone())
        .unwrap_or_else(|| METHOD_GET.to_string())
        .to_ascii_uppercase();
    if kind == HTTP_KIND && !is_valid_method(&method) {
        return Err(invalid(format!("invalid HTTP method {method:?}")));
    }

    if entry.url.is_empty() {
        return Err(invalid("url is required".to_string()));
    }
    if kind == HTTP_KIND {
        Url::parse(&entry.url).map_err(|err| invalid(format!("invalid url: {err}")))?;
    }

    let interval_ms = entry
        .interval_ms
        .or(globals.interval_ms)
        .filter(|ms| *ms > 0)
        .ok_or_else(|| invalid("interval_ms must be set and positive".to_string()))?;
    let timeout_ms = entry
        .timeout_ms
        .or(globals.timeout_ms)
        .filter(|ms| *ms > 0)
        .ok_or_else(|| invalid("timeout_ms must be set and positive".to_string()))?;

    Ok(Endpoint {
        name: entry.name,
        url: entry.url,
        method,
        timeout: Duration::from_millis(timeout_ms),
        interval: Duration::from_millis(interval_ms),
        headers: entry.headers,
        kind,
        expected_status: entry.expected_status.unwrap_or(200),
        must_match_status: entry.must_match_status,
        max_latency: entry.max_latency_ms.map(Duration::from_millis),
        retry: entry.retry,
    })
}
