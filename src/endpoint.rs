//! # Endpoint descriptor: immutable per-run configuration for one probe target.
//!
//! An [`Endpoint`] bundles everything a checker needs to probe one remote
//! target: where to probe (URL, method, headers), how often (interval), how
//! long to wait (timeout), and how to judge the response (expected status,
//! strict matching, latency ceiling, retry budget).
//!
//! ## Rules
//! - Descriptors are validated by the config loader before the scheduler ever
//!   sees them; the core treats them as trusted input.
//! - The scheduler hands each polling task its own clone. Mutable probe state
//!   (the retry counter) lives in the task, never in the descriptor.
//! - `kind` is an uppercase tag resolved against the checker registry
//!   (`"HTTP"`, `"TCP"`, `"DNS"`, ...).

use std::collections::HashMap;
use std::time::Duration;

pub const METHOD_GET: &str = "GET";
pub const METHOD_POST: &str = "POST";
pub const METHOD_PUT: &str = "PUT";
pub const METHOD_PATCH: &str = "PATCH";
pub const METHOD_DELETE: &str = "DELETE";

/// Kind tag served by the built-in HTTP checker.
pub const HTTP_KIND: &str = "HTTP";
/// Kind tag reserved for TCP probing.
pub const TCP_KIND: &str = "TCP";
/// Kind tag reserved for DNS probing.
pub const DNS_KIND: &str = "DNS";

const VALID_METHODS: [&str; 5] = [
    METHOD_GET,
    METHOD_POST,
    METHOD_PUT,
    METHOD_PATCH,
    METHOD_DELETE,
];

const VALID_KINDS: [&str; 3] = [HTTP_KIND, TCP_KIND, DNS_KIND];

/// Returns true if `method` (case-insensitive) is an accepted HTTP method.
pub fn is_valid_method(method: &str) -> bool {
    VALID_METHODS
        .iter()
        .any(|m| m.eq_ignore_ascii_case(method))
}

/// Returns true if `kind` (case-insensitive) is a recognized probe kind.
pub fn is_valid_kind(kind: &str) -> bool {
    VALID_KINDS.iter().any(|k| k.eq_ignore_ascii_case(kind))
}

/// Normalizes a kind tag to the uppercase form used as registry key.
pub fn normalize_kind(kind: &str) -> String {
    kind.to_ascii_uppercase()
}

/// Immutable description of one probe target.
///
/// Construct with [`Endpoint::new`] and refine with the `with_*` builders, or
/// let the config loader produce validated descriptors from a file.
#[derive(Clone, Debug)]
pub struct Endpoint {
    /// Human-readable endpoint name (used in logs and diagnostics).
    pub name: String,
    /// Target URL.
    pub url: String,
    /// HTTP method for HTTP-kind endpoints.
    pub method: String,
    /// Per-probe deadline. Must be positive.
    pub timeout: Duration,
    /// Poll period between probes. Must be positive.
    pub interval: Duration,
    /// Extra request headers (key unique, order irrelevant).
    pub headers: HashMap<String, String>,
    /// Probe kind tag, uppercase (resolved against the checker registry).
    pub kind: String,
    /// Status code expected when `must_match_status` is set.
    pub expected_status: u16,
    /// Strict status matching: a mismatch downgrades an otherwise-Up result.
    pub must_match_status: bool,
    /// Latency ceiling: exceeding it downgrades an otherwise-Up result.
    pub max_latency: Option<Duration>,
    /// Retry budget: number of consecutive non-Up results to suppress before
    /// one is published.
    pub retry: u32,
}

impl Endpoint {
    /// Creates a descriptor with defaults: GET, 10s timeout, 30s interval,
    /// HTTP kind, expected status 200, no strict match, no latency ceiling,
    /// no retry budget.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            method: METHOD_GET.to_string(),
            timeout: Duration::from_secs(10),
            interval: Duration::from_secs(30),
            headers: HashMap::new(),
            kind: HTTP_KIND.to_string(),
            expected_status: 200,
            must_match_status: false,
            max_latency: None,
            retry: 0,
        }
    }

    /// Returns a copy with the given HTTP method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Returns a copy with the given per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns a copy with the given poll interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Returns a copy with an extra request header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Returns a copy with the given probe kind (normalized to uppercase).
    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = normalize_kind(kind);
        self
    }

    /// Returns a copy expecting `code` strictly.
    pub fn with_expected_status(mut self, code: u16) -> Self {
        self.expected_status = code;
        self.must_match_status = true;
        self
    }

    /// Returns a copy with the given latency ceiling.
    pub fn with_max_latency(mut self, ceiling: Duration) -> Self {
        self.max_latency = Some(ceiling);
        self
    }

    /// Returns a copy with the given retry budget.
    pub fn with_retry(mut self, budget: u32) -> Self {
        self.retry = budget;
        self
    }
}
