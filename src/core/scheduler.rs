//! # Scheduler: spawns polling tasks, owns the result queue, coordinates shutdown.
//!
//! The [`Scheduler`] turns a validated endpoint list into one independent
//! polling task per endpoint and hands the caller the receiving end of the
//! bounded result queue.
//!
//! ## High-level architecture
//! ```text
//! Endpoint[0]   Endpoint[1]  ...  Endpoint[N-1]
//!     │             │                  │
//!     └──► PollTask (one per endpoint, child CancellationToken)
//!                │ tick → resolve checker → probe → retry decision
//!                ▼
//!        mpsc::Sender<Report>  (bounded: max(queue_floor, 2N))
//!                │
//!                ▼
//!        mpsc::Receiver<Report>  → external consumer (sinks)
//!
//! Shutdown path:
//!   handle.stop()      → cancel runtime token (tasks exit at next Waiting)
//!   handle.shutdown()  → stop() + join every task, bounded by cfg.grace
//!                          ├─ all joined   → Ok(()) ; senders dropped,
//!                          │                 receiver observes closed queue
//!                          └─ grace passed → abort remainder,
//!                                            Err(GraceExceeded { stuck })
//! ```
//!
//! ## Rules
//! - `start()` returns without blocking; no probe runs before the first
//!   interval elapses.
//! - The capability check before spawning is non-fatal: a descriptor whose
//!   kind has no registered checker still gets a task (the task handles the
//!   missing checker per tick).
//! - Queue capacity is at least `queue_floor`, or twice the endpoint count
//!   when larger, absorbing bursts when many tasks tick near-simultaneously.
//! - The queue closes exactly when the last task has stopped; shutdown joins
//!   tasks instead of sleeping an arbitrary delay.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::core::alive::AliveSet;
use crate::core::poller::PollTask;
use crate::endpoint::Endpoint;
use crate::error::RuntimeError;
use crate::probe::CheckerRegistry;
use crate::report::Report;

/// Runtime settings for the scheduler.
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Minimum result-queue capacity, regardless of endpoint count.
    pub queue_floor: usize,
    /// Maximum wait for polling tasks to stop during [`SchedulerHandle::shutdown`].
    pub grace: Duration,
}

impl SchedulerConfig {
    /// Result-queue capacity for `endpoints` targets: the larger of the
    /// floor and twice the endpoint count.
    pub fn queue_capacity(&self, endpoints: usize) -> usize {
        self.queue_floor.max(endpoints * 2).max(1)
    }
}

impl Default for SchedulerConfig {
    /// Defaults: `queue_floor = 10`, `grace = 30s`.
    fn default() -> Self {
        Self {
            queue_floor: 10,
            grace: Duration::from_secs(30),
        }
    }
}

/// Spawns and supervises one polling task per endpoint.
pub struct Scheduler {
    endpoints: Vec<Endpoint>,
    registry: Arc<CheckerRegistry>,
    cfg: SchedulerConfig,
}

impl Scheduler {
    /// Creates a scheduler over validated endpoint descriptors.
    pub fn new(
        endpoints: Vec<Endpoint>,
        registry: Arc<CheckerRegistry>,
        cfg: SchedulerConfig,
    ) -> Self {
        Self {
            endpoints,
            registry,
            cfg,
        }
    }

    /// Spawns one polling task per endpoint and returns without blocking.
    ///
    /// Returns the control handle and the consuming end of the result queue.
    /// Consumers should drain until the receiver yields `None`, which happens
    /// exactly when every task has stopped.
    pub fn start(self) -> (SchedulerHandle, mpsc::Receiver<Report>) {
        self.check_capabilities();

        let capacity = self.cfg.queue_capacity(self.endpoints.len());
        let (tx, rx) = mpsc::channel(capacity);
        let token = CancellationToken::new();
        let alive = Arc::new(AliveSet::new());
        let mut tasks = JoinSet::new();

        info!(
            endpoints = self.endpoints.len(),
            queue_capacity = capacity,
            "starting polling tasks"
        );

        for endpoint in self.endpoints {
            let task = PollTask {
                endpoint,
                registry: Arc::clone(&self.registry),
                queue: tx.clone(),
                alive: Arc::clone(&alive),
            };
            tasks.spawn(task.run(token.child_token()));
        }
        // The tasks hold the only senders now; the queue closes when the
        // last one exits.
        drop(tx);

        let handle = SchedulerHandle {
            token,
            tasks,
            alive,
            grace: self.cfg.grace,
        };
        (handle, rx)
    }

    /// Non-fatal capability check: one diagnostic per endpoint whose kind has
    /// no registered checker. The task is still spawned; it synthesizes
    /// Unreachable reports per tick until a checker exists.
    fn check_capabilities(&self) {
        for endpoint in &self.endpoints {
            if !self.registry.contains(&endpoint.kind) {
                error!(
                    endpoint = %endpoint.name,
                    url = %endpoint.url,
                    kind = %endpoint.kind,
                    registered = ?self.registry.kinds(),
                    "no checker registered for endpoint kind"
                );
            }
        }
    }
}

/// Control handle for a started scheduler.
pub struct SchedulerHandle {
    token: CancellationToken,
    tasks: JoinSet<()>,
    alive: Arc<AliveSet>,
    grace: Duration,
}

impl SchedulerHandle {
    /// Signals every polling task to stop at its next Waiting state.
    ///
    /// Returns immediately; use [`SchedulerHandle::shutdown`] to also wait
    /// for the tasks to finish.
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// Signals shutdown and waits for every task to reach its stopped state,
    /// bounded by the configured grace period.
    ///
    /// On success the result queue is fully closed: the receiver drains any
    /// buffered reports and then yields `None`. If the grace elapses the
    /// remaining tasks are aborted and the error names them.
    pub async fn shutdown(self) -> Result<(), RuntimeError> {
        let Self {
            token,
            mut tasks,
            alive,
            grace,
        } = self;

        token.cancel();

        let drained = time::timeout(grace, async {
            while tasks.join_next().await.is_some() {}
        })
        .await;
        match drained {
            Ok(()) => {
                info!("all polling tasks stopped");
                Ok(())
            }
            Err(_elapsed) => {
                let stuck = alive.snapshot();
                error!(?grace, ?stuck, "shutdown grace exceeded, aborting tasks");
                tasks.abort_all();
                Err(RuntimeError::GraceExceeded { grace, stuck })
            }
        }
    }
}
