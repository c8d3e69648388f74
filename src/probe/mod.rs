//! # Probe capability: checkers and the kind registry.
//!
//! This module groups the pluggable probe machinery:
//! - [`Checker`] - capability trait executing one probe against one endpoint;
//! - [`HttpChecker`] - the concrete HTTP implementation;
//! - [`TcpChecker`], [`DnsChecker`] - placeholders honoring the contract;
//! - [`CheckerRegistry`] - kind tag to checker lookup, populated before the
//!   scheduler starts and read-only thereafter.
//!
//! ## Extension contract
//! A new probe kind is added by implementing [`Checker`] (same status
//! vocabulary, never a panic or an `Err`) and registering it under its
//! uppercase kind tag before `Scheduler::start`. Dispatch is table lookup,
//! never inheritance.

mod checker;
mod http;
mod registry;
mod stub;

pub use checker::{Checker, CheckerRef};
pub use http::HttpChecker;
pub use registry::CheckerRegistry;
pub use stub::{DnsChecker, TcpChecker};
