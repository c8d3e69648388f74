//! # Polling task: the per-endpoint probe loop.
//!
//! One [`PollTask`] runs per endpoint, fully independent of every other
//! task. It owns a clone of its descriptor and a private [`RetryState`];
//! the only shared state is the result queue sender, the checker registry
//! and the cancellation token.
//!
//! ## State machine
//! ```text
//! Waiting ──tick──► Checking ──► Classifying ──► Deciding ─┐
//!    ▲                                                     │
//!    │                 publish / suppress                  │
//!    └─────────────────────────────────────────────────────┘
//!    │
//!    └──cancelled──► Stopped
//! ```
//!
//! ## Rules
//! - Cancellation is observed only in the Waiting select; an in-flight probe
//!   runs to its bounded deadline before the loop re-evaluates shutdown.
//! - A missing checker never fails the task: the tick synthesizes an
//!   Unreachable report naming the kind, publishes it, and the loop
//!   continues.
//! - Publishing uses a bounded queue; a full queue back-pressures the task,
//!   delaying its return to Waiting. A closed queue (consumer gone) ends
//!   the task.
//! - The first tick fires one full interval after spawn; missed ticks are
//!   skipped, never bursted.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::core::alive::AliveSet;
use crate::core::retry::{RetryDecision, RetryState};
use crate::endpoint::Endpoint;
use crate::probe::{Checker as _, CheckerRegistry};
use crate::report::Report;

pub(crate) struct PollTask {
    pub(crate) endpoint: Endpoint,
    pub(crate) registry: Arc<CheckerRegistry>,
    pub(crate) queue: mpsc::Sender<Report>,
    pub(crate) alive: Arc<AliveSet>,
}

impl PollTask {
    /// Runs the polling loop until cancellation or queue closure.
    pub(crate) async fn run(self, token: CancellationToken) {
        self.alive.insert(&self.endpoint.name);

        let mut retry = RetryState::new(self.endpoint.retry);
        let mut ticker = time::interval_at(
            Instant::now() + self.endpoint.interval,
            self.endpoint.interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let Some(checker) = self.registry.resolve(&self.endpoint.kind) else {
                error!(
                    endpoint = %self.endpoint.name,
                    url = %self.endpoint.url,
                    kind = %self.endpoint.kind,
                    "no checker registered for endpoint kind, skipping probe"
                );
                let report = Report::unreachable(
                    &self.endpoint.url,
                    std::time::Duration::ZERO,
                    "no checker registered for kind",
                )
                .with_message(format!(
                    "checker for kind {:?} not registered",
                    self.endpoint.kind
                ));
                if self.queue.send(report).await.is_err() {
                    break;
                }
                continue;
            };

            // Checking: the probe is bounded by its own deadline; the outer
            // timeout only trips for a checker that ignores the contract.
            let report = match time::timeout(
                self.endpoint.timeout,
                checker.check(&self.endpoint),
            )
            .await
            {
                Ok(report) => report,
                Err(_elapsed) => Report::unreachable(
                    &self.endpoint.url,
                    self.endpoint.timeout,
                    format!("deadline exceeded after {:?}", self.endpoint.timeout),
                ),
            };

            // Deciding: suppress while the retry budget lasts, else publish.
            match retry.observe(report.status) {
                RetryDecision::Suppress => {
                    warn!(
                        endpoint = %self.endpoint.name,
                        status = %report.status,
                        remaining = retry.remaining(),
                        "unhealthy result suppressed, retrying after next interval"
                    );
                }
                RetryDecision::Publish => {
                    debug!(
                        endpoint = %self.endpoint.name,
                        status = %report.status,
                        "publishing result"
                    );
                    if self.queue.send(report).await.is_err() {
                        break;
                    }
                }
            }
        }

        self.alive.remove(&self.endpoint.name);
    }
}
