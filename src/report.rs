//! # Probe reports: classified outcome of a single probe.
//!
//! A [`Report`] is created fresh by a checker for every probe, is immutable
//! once published to the result queue, and is consumed as a self-contained
//! record by whichever sink drains the queue.
//!
//! ## Status vocabulary
//! - [`Status::Up`]: the target responded and passed every policy check.
//! - [`Status::Degraded`]: the target responded, but failed a policy check
//!   (status match or latency) or answered with a 3xx/4xx code.
//! - [`Status::Down`]: the target answered with a server error (5xx).
//! - [`Status::Unreachable`]: no usable response was obtained (construction
//!   or transport failure, deadline exceeded, missing checker).
//!
//! Policy violations never escalate severity beyond what the raw response
//! already implies: a 5xx stays Down even under a strict-match mismatch.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Message recorded when strict status matching fails.
pub const UNEXPECTED_STATUS_CODE: &str = "unexpected status code";
/// Message recorded when the measured latency exceeds the configured ceiling.
pub const UNEXPECTED_LATENCY: &str = "unexpected latency";

/// Health classification of one probe.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Up,
    Degraded,
    Down,
    Unreachable,
}

impl Status {
    /// Returns the lowercase wire form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Up => "up",
            Status::Degraded => "degraded",
            Status::Down => "down",
            Status::Unreachable => "unreachable",
        }
    }

    /// True for [`Status::Up`] only.
    pub fn is_up(&self) -> bool {
        matches!(self, Status::Up)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one probe against one endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    /// Target URL the probe was issued against.
    pub url: String,
    /// Health classification.
    pub status: Status,
    /// Response status code; 0 when no response was obtained.
    pub status_code: u16,
    /// Wall-clock probe duration, measured with a monotonic clock.
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    /// Completion timestamp.
    pub checked_at: DateTime<Utc>,
    /// Error text; empty when the probe obtained a response.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,
    /// Ordered policy-violation messages.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

impl Report {
    /// Creates a report for a probe that obtained a response.
    pub fn new(url: impl Into<String>, status: Status, status_code: u16, elapsed: Duration) -> Self {
        Self {
            url: url.into(),
            status,
            status_code,
            elapsed,
            checked_at: Utc::now(),
            error: String::new(),
            messages: Vec::new(),
        }
    }

    /// Creates an [`Status::Unreachable`] report for a probe that obtained no
    /// usable response. `status_code` is 0.
    pub fn unreachable(url: impl Into<String>, elapsed: Duration, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: Status::Unreachable,
            status_code: 0,
            elapsed,
            checked_at: Utc::now(),
            error: error.into(),
            messages: Vec::new(),
        }
    }

    /// Appends a classification message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// Records a policy violation: the message is always appended, and an Up
    /// classification drops to Degraded. Statuses worse than Up are kept, so
    /// a downgrade never overrides Down or Unreachable.
    pub fn downgrade(&mut self, message: &str) {
        if self.status == Status::Up {
            self.status = Status::Degraded;
        }
        self.messages.push(message.to_string());
    }
}

fn serialize_millis<S>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(elapsed.as_millis().min(u128::from(u64::MAX)) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downgrade_drops_up_to_degraded() {
        let mut report = Report::new("http://x", Status::Up, 201, Duration::ZERO);
        report.downgrade(UNEXPECTED_STATUS_CODE);
        assert_eq!(report.status, Status::Degraded);
        assert_eq!(report.messages, vec![UNEXPECTED_STATUS_CODE]);
    }

    #[test]
    fn test_downgrade_never_overrides_down() {
        let mut report = Report::new("http://x", Status::Down, 503, Duration::ZERO);
        report.downgrade(UNEXPECTED_STATUS_CODE);
        assert_eq!(report.status, Status::Down);
        assert_eq!(report.messages, vec![UNEXPECTED_STATUS_CODE]);
    }

    #[test]
    fn test_downgrade_messages_accumulate_in_order() {
        let mut report = Report::new("http://x", Status::Up, 201, Duration::ZERO);
        report.downgrade(UNEXPECTED_STATUS_CODE);
        report.downgrade(UNEXPECTED_LATENCY);
        assert_eq!(report.status, Status::Degraded);
        assert_eq!(
            report.messages,
            vec![UNEXPECTED_STATUS_CODE, UNEXPECTED_LATENCY]
        );
    }

    #[test]
    fn test_unreachable_has_no_status_code() {
        let report = Report::unreachable("http://x", Duration::from_millis(40), "refused");
        assert_eq!(report.status, Status::Unreachable);
        assert_eq!(report.status_code, 0);
        assert_eq!(report.error, "refused");
    }

    #[test]
    fn test_serializes_status_lowercase() {
        let report = Report::new("http://x", Status::Degraded, 404, Duration::from_millis(12));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["elapsed_ms"], 12);
        assert!(json.get("error").is_none());
    }
}
