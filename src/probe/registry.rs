//! # Checker registry: kind tag to checker lookup.
//!
//! Pure lookup table mapping an endpoint's declared kind to its checker.
//!
//! ## Rules
//! - Populated once, before the scheduler starts; shared read-only behind an
//!   `Arc` thereafter. No dynamic registration race exists by construction.
//! - Keys are uppercase kind tags; [`CheckerRegistry::resolve`] normalizes
//!   its input, so lookups are case-insensitive.
//! - A kind with no registered checker is not an error here: the polling
//!   task degrades gracefully per tick (see `core::poller`).

use std::collections::HashMap;

use crate::endpoint::normalize_kind;
use crate::probe::{Checker as _, CheckerRef, HttpChecker};

/// Lookup table from kind tag to checker.
#[derive(Default)]
pub struct CheckerRegistry {
    checkers: HashMap<String, CheckerRef>,
}

impl CheckerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            checkers: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in HTTP checker registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(std::sync::Arc::new(HttpChecker::new()));
        registry
    }

    /// Registers `checker` under its own kind tag, replacing any previous
    /// checker for that kind.
    pub fn register(&mut self, checker: CheckerRef) {
        let kind = normalize_kind(checker.kind());
        self.checkers.insert(kind, checker);
    }

    /// Resolves the checker for `kind`, if one is registered.
    pub fn resolve(&self, kind: &str) -> Option<&CheckerRef> {
        self.checkers.get(&normalize_kind(kind))
    }

    /// True if a checker is registered for `kind`.
    pub fn contains(&self, kind: &str) -> bool {
        self.checkers.contains_key(&normalize_kind(kind))
    }

    /// Returns the registered kind tags, sorted, for diagnostics.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.checkers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::HTTP_KIND;

    #[test]
    fn test_defaults_register_http() {
        let registry = CheckerRegistry::with_defaults();
        assert!(registry.contains(HTTP_KIND));
        assert!(registry.contains("http"));
        assert!(!registry.contains("TCP"));
        assert_eq!(registry.kinds(), vec![HTTP_KIND]);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = CheckerRegistry::with_defaults();
        assert!(registry.resolve("Http").is_some());
        assert!(registry.resolve("dns").is_none());
    }
}
