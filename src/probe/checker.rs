//! # Checker capability trait.
//!
//! A [`Checker`] executes one probe against one endpoint and returns a
//! classified [`Report`]. The common handle type is [`CheckerRef`], an
//! `Arc<dyn Checker>` suitable for sharing across polling tasks.
//!
//! ## Rules
//! - `check` never raises uncontrolled failures: every failure mode
//!   (construction, transport, deadline) is represented as a report with
//!   status [`Unreachable`](crate::Status::Unreachable) and a populated
//!   error field.
//! - Implementations may hold shared read-only resources (e.g. a connection
//!   pool); they receive no mutable per-endpoint state.
//! - Each probe must bound itself by the endpoint's configured timeout. The
//!   polling task additionally wraps the call in its own deadline, so a
//!   misbehaving checker cannot wedge a task.

use std::sync::Arc;

use async_trait::async_trait;

use crate::endpoint::Endpoint;
use crate::report::Report;

/// Shared handle to a checker.
pub type CheckerRef = Arc<dyn Checker>;

/// Capability executing one probe against one endpoint.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use healthvisor::{Checker, Endpoint, Report, Status};
/// use std::time::Duration;
///
/// struct AlwaysUp;
///
/// #[async_trait]
/// impl Checker for AlwaysUp {
///     fn kind(&self) -> &str {
///         "HTTP"
///     }
///
///     async fn check(&self, endpoint: &Endpoint) -> Report {
///         Report::new(&endpoint.url, Status::Up, 200, Duration::ZERO)
///     }
/// }
/// ```
#[async_trait]
pub trait Checker: Send + Sync + 'static {
    /// Returns the uppercase kind tag this checker serves (`"HTTP"`, ...).
    fn kind(&self) -> &str;

    /// Executes one probe and returns its classified outcome.
    ///
    /// All failure modes are encoded in the report; this method never panics
    /// under normal operation and has no error return.
    async fn check(&self, endpoint: &Endpoint) -> Report;
}
