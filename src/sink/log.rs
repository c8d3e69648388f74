//! Structured logging sink.
//!
//! Emits one tracing event per report, level selected by status: error for
//! down/unreachable, warn for degraded, info for up.

use async_trait::async_trait;

use crate::report::{Report, Status};
use crate::sink::Sink;

/// Logs every report through `tracing`.
pub struct LogSink;

#[async_trait]
impl Sink for LogSink {
    async fn consume(&self, report: &Report) {
        let elapsed_ms = report.elapsed.as_millis() as u64;
        match report.status {
            Status::Down | Status::Unreachable => tracing::error!(
                url = %report.url,
                status = %report.status,
                code = report.status_code,
                elapsed_ms,
                error = %report.error,
                messages = ?report.messages,
                checked_at = %report.checked_at,
                "probe result"
            ),
            Status::Degraded => tracing::warn!(
                url = %report.url,
                status = %report.status,
                code = report.status_code,
                elapsed_ms,
                messages = ?report.messages,
                checked_at = %report.checked_at,
                "probe result"
            ),
            Status::Up => tracing::info!(
                url = %report.url,
                status = %report.status,
                code = report.status_code,
                elapsed_ms,
                checked_at = %report.checked_at,
                "probe result"
            ),
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
