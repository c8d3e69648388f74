//! # Report sinks: consuming the result queue.
//!
//! A [`Sink`] is the seam between the polling core and whatever wants the
//! results: logging, persistence, alerting. The core never knows which sinks
//! exist; [`drain`] forwards every report from the queue to each injected
//! sink in order until the queue closes.
//!
//! ```text
//! mpsc::Receiver<Report> ──► drain ──► sink[0].consume(&report)
//!                                  └─► sink[1].consume(&report)  ...
//! ```
//!
//! ## Rules
//! - Reports are immutable and self-contained; sinks only borrow them.
//! - The drain loop ends when the receiver yields `None`, i.e. when every
//!   polling task has stopped and dropped its sender.
//! - A panicking sink is isolated: the panic is caught and logged, the other
//!   sinks and the loop keep going.

mod log;

use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::mpsc;
use tracing::error;

use crate::report::Report;

pub use log::LogSink;

/// Consumer of published probe reports.
#[async_trait]
pub trait Sink: Send + Sync + 'static {
    /// Consumes one report.
    async fn consume(&self, report: &Report);

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Forwards every report from `reports` to each sink, in order, until the
/// queue is closed.
pub async fn drain(mut reports: mpsc::Receiver<Report>, sinks: Vec<Arc<dyn Sink>>) {
    while let Some(report) = reports.recv().await {
        for sink in &sinks {
            let fut = sink.consume(&report);
            if std::panic::AssertUnwindSafe(fut).catch_unwind().await.is_err() {
                error!(sink = sink.name(), "sink panicked while consuming a report");
            }
        }
    }
}
