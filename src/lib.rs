//! # healthvisor
//!
//! **healthvisor** periodically probes a set of remote endpoints, classifies
//! their health, and emits structured results for downstream consumption.
//!
//! The crate is built around a concurrent polling scheduler: one independent
//! async task per endpoint, a pluggable checker abstraction, a task-local
//! retry/suppression policy, and join-based graceful shutdown.
//!
//! ## Architecture
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Endpoint   │   │   Endpoint   │   │   Endpoint   │
//!     │ (descriptor) │   │ (descriptor) │   │ (descriptor) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Scheduler                                                    │
//! │  - capability check (kind → registered checker?)              │
//! │  - bounded result queue: max(queue_floor, 2 × endpoints)      │
//! │  - CancellationToken hierarchy + JoinSet (graceful shutdown)  │
//! └──────┬──────────────────┬──────────────────┬──────────────────┘
//!        ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   PollTask   │   │   PollTask   │   │   PollTask   │
//!     │ (tick loop,  │   │              │   │              │
//!     │  RetryState) │   │              │   │              │
//!     └┬─────────────┘   └┬─────────────┘   └┬─────────────┘
//!      │ resolve kind     │                  │
//!      ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  CheckerRegistry: "HTTP" → HttpChecker, ...   (read-only)     │
//! └──────────────────────────────┬────────────────────────────────┘
//!                                ▼
//!                      Checker::check(&Endpoint) → Report
//!                                │
//!                                ▼
//!                  mpsc queue → drain → Sink (LogSink, ...)
//! ```
//!
//! ## Classification
//! | Outcome | Status |
//! |---|---|
//! | 200-299, policies pass | `Up` |
//! | 300-499, or a failed policy check (strict status, latency) | `Degraded` |
//! | >= 500 | `Down` |
//! | no usable response (construction/transport/deadline/missing checker) | `Unreachable` |
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use healthvisor::{
//!     drain, CheckerRegistry, Endpoint, LogSink, Scheduler, SchedulerConfig, Sink,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoints = vec![Endpoint::new("api", "https://example.com/health")
//!         .with_interval(Duration::from_secs(30))
//!         .with_timeout(Duration::from_secs(5))
//!         .with_retry(2)];
//!
//!     let registry = Arc::new(CheckerRegistry::with_defaults());
//!     let scheduler = Scheduler::new(endpoints, registry, SchedulerConfig::default());
//!     let (handle, reports) = scheduler.start();
//!
//!     let sinks: Vec<Arc<dyn Sink>> = vec![Arc::new(LogSink)];
//!     let consumer = tokio::spawn(drain(reports, sinks));
//!
//!     healthvisor::wait_for_shutdown_signal().await?;
//!     handle.shutdown().await?;
//!     consumer.await?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod endpoint;
mod error;
mod probe;
mod report;
mod sink;

// ---- Public re-exports ----

pub use config::Config;
pub use self::core::{
    wait_for_shutdown_signal, RetryDecision, RetryState, Scheduler, SchedulerConfig,
    SchedulerHandle,
};
pub use endpoint::{
    is_valid_kind, is_valid_method, normalize_kind, Endpoint, DNS_KIND, HTTP_KIND, TCP_KIND,
};
pub use error::{ConfigError, RuntimeError};
pub use probe::{Checker, CheckerRef, CheckerRegistry, DnsChecker, HttpChecker, TcpChecker};
pub use report::{Report, Status, UNEXPECTED_LATENCY, UNEXPECTED_STATUS_CODE};
pub use sink::{drain, LogSink, Sink};
