//! # HTTP checker: probe execution and status classification.
//!
//! [`HttpChecker`] issues one HTTP request per probe through a shared
//! [`reqwest::Client`] and classifies the outcome:
//!
//! ```text
//! request construction fails  → Unreachable (elapsed 0)
//! transport fails / deadline  → Unreachable (measured elapsed, error text)
//! 200..=299                   → Up
//! >=500                       → Down
//! 300..=499                   → Degraded
//! ```
//!
//! Two independent, cumulative policy checks then run on responses:
//! - strict status matching: received code != expected code appends
//!   [`UNEXPECTED_STATUS_CODE`] and downgrades Up to Degraded;
//! - latency ceiling: elapsed over `max_latency` appends
//!   [`UNEXPECTED_LATENCY`] and downgrades Up to Degraded.
//!
//! Both can fire on the same response, each contributing its own message.
//! Neither ever upgrades: a 5xx stays Down under a strict-match mismatch.
//!
//! The client's connection pool is shared read-only across all polling
//! tasks; it holds no per-endpoint mutable state and needs no locking.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method, Url};

use crate::endpoint::{Endpoint, HTTP_KIND};
use crate::report::{Report, Status, UNEXPECTED_LATENCY, UNEXPECTED_STATUS_CODE};

/// Concrete [`Checker`](crate::Checker) for HTTP endpoints.
#[derive(Clone, Debug)]
pub struct HttpChecker {
    client: Client,
}

impl HttpChecker {
    /// Creates a checker backed by a default shared client.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Creates a checker around a caller-tuned client (pool sizing, TLS,
    /// proxies). Also the injection point for tests.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl crate::probe::Checker for HttpChecker {
    fn kind(&self) -> &str {
        HTTP_KIND
    }

    async fn check(&self, endpoint: &Endpoint) -> Report {
        let method = match Method::from_bytes(endpoint.method.as_bytes()) {
            Ok(method) => method,
            Err(err) => {
                return Report::unreachable(
                    &endpoint.url,
                    Duration::ZERO,
                    format!("invalid method {:?}: {err}", endpoint.method),
                );
            }
        };
        let url = match Url::parse(&endpoint.url) {
            Ok(url) => url,
            Err(err) => {
                return Report::unreachable(
                    &endpoint.url,
                    Duration::ZERO,
                    format!("invalid url {:?}: {err}", endpoint.url),
                );
            }
        };

        let mut request = self.client.request(method, url).timeout(endpoint.timeout);
        for (key, value) in &endpoint.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let started = Instant::now();
        match request.send().await {
            Ok(response) => {
                let elapsed = started.elapsed();
                let code = response.status().as_u16();
                // Drain the body so the pooled connection stays reusable.
                let _ = response.bytes().await;

                let mut report = Report::new(&endpoint.url, classify_status(code), code, elapsed);
                apply_expectations(endpoint, &mut report);
                report
            }
            Err(err) => {
                let elapsed = started.elapsed();
                let error = if err.is_timeout() {
                    format!("deadline exceeded after {:?}: {err}", endpoint.timeout)
                } else {
                    err.to_string()
                };
                Report::unreachable(&endpoint.url, elapsed, error)
            }
        }
    }
}

/// Classifies a response status code alone, before policy checks.
fn classify_status(code: u16) -> Status {
    match code {
        200..=299 => Status::Up,
        500.. => Status::Down,
        _ => Status::Degraded,
    }
}

/// Applies the strict-match and latency policy checks to a response report.
fn apply_expectations(endpoint: &Endpoint, report: &mut Report) {
    if endpoint.must_match_status && report.status_code != endpoint.expected_status {
        report.downgrade(UNEXPECTED_STATUS_CODE);
    }
    if let Some(ceiling) = endpoint.max_latency {
        if report.elapsed > ceiling {
            report.downgrade(UNEXPECTED_LATENCY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_report(code: u16, elapsed_ms: u64) -> Report {
        Report::new(
            "http://example.com",
            classify_status(code),
            code,
            Duration::from_millis(elapsed_ms),
        )
    }

    #[test]
    fn test_status_classification_table() {
        let cases = [
            (200, Status::Up),
            (201, Status::Up),
            (299, Status::Up),
            (300, Status::Degraded),
            (404, Status::Degraded),
            (429, Status::Degraded),
            (499, Status::Degraded),
            (500, Status::Down),
            (503, Status::Down),
        ];
        for (code, expected) in cases {
            assert_eq!(classify_status(code), expected, "code {code}");
        }
    }

    #[test]
    fn test_strict_match_downgrades_up() {
        let ep = Endpoint::new("api", "http://example.com").with_expected_status(200);
        let mut report = response_report(201, 10);
        apply_expectations(&ep, &mut report);
        assert_eq!(report.status, Status::Degraded);
        assert_eq!(report.messages, vec![UNEXPECTED_STATUS_CODE]);
    }

    #[test]
    fn test_strict_match_keeps_down() {
        let ep = Endpoint::new("api", "http://example.com").with_expected_status(200);
        let mut report = response_report(500, 10);
        apply_expectations(&ep, &mut report);
        assert_eq!(report.status, Status::Down);
        assert_eq!(report.messages, vec![UNEXPECTED_STATUS_CODE]);
    }

    #[test]
    fn test_no_strict_match_ignores_mismatch() {
        let ep = Endpoint::new("api", "http://example.com");
        let mut report = response_report(201, 10);
        apply_expectations(&ep, &mut report);
        assert_eq!(report.status, Status::Up);
        assert!(report.messages.is_empty());
    }

    #[test]
    fn test_latency_ceiling_downgrades_up() {
        let ep = Endpoint::new("api", "http://example.com")
            .with_max_latency(Duration::from_millis(100));
        let mut report = response_report(200, 200);
        apply_expectations(&ep, &mut report);
        assert_eq!(report.status, Status::Degraded);
        assert_eq!(report.messages, vec![UNEXPECTED_LATENCY]);
    }

    #[test]
    fn test_latency_within_ceiling_keeps_up() {
        let ep = Endpoint::new("api", "http://example.com")
            .with_max_latency(Duration::from_millis(100));
        let mut report = response_report(200, 60);
        apply_expectations(&ep, &mut report);
        assert_eq!(report.status, Status::Up);
        assert!(report.messages.is_empty());
    }

    #[test]
    fn test_both_downgrades_co_occur() {
        let ep = Endpoint::new("api", "http://example.com")
            .with_expected_status(200)
            .with_max_latency(Duration::from_millis(100));
        let mut report = response_report(201, 200);
        apply_expectations(&ep, &mut report);
        assert_eq!(report.status, Status::Degraded);
        assert_eq!(
            report.messages,
            vec![UNEXPECTED_STATUS_CODE, UNEXPECTED_LATENCY]
        );
    }
}
