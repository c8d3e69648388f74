//! # Retry state: suppress-or-publish decision for one polling task.
//!
//! [`RetryState`] holds the counter a polling task consults after every
//! probe. "Retry" here means "suppress publication for up to N further
//! ticks", not "re-probe sooner": the next probe always happens one full
//! poll interval later, with no backoff and no fast-retry path.
//!
//! ## Rules
//! - A non-Up outcome while the counter is positive decrements it and
//!   suppresses that tick's report.
//! - An Up outcome, or a non-Up outcome with the counter exhausted,
//!   publishes the report and resets the counter to the configured budget.
//! - With budget N, exactly N consecutive non-Up outcomes are suppressed and
//!   the (N+1)th is published.
//!
//! The state is entirely local to one task's loop; it is never shared or
//! persisted.

use crate::report::Status;

/// What the polling task should do with the current tick's report.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryDecision {
    /// Push the report onto the result queue.
    Publish,
    /// Discard the report; decide again after the next full interval.
    Suppress,
}

/// Task-local retry counter, initialized from the endpoint's budget.
#[derive(Clone, Copy, Debug)]
pub struct RetryState {
    budget: u32,
    remaining: u32,
}

impl RetryState {
    /// Creates a state with `budget` suppressions available.
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            remaining: budget,
        }
    }

    /// Records one probe outcome and returns the publication decision.
    pub fn observe(&mut self, status: Status) -> RetryDecision {
        if !status.is_up() && self.remaining > 0 {
            self.remaining -= 1;
            RetryDecision::Suppress
        } else {
            self.remaining = self.budget;
            RetryDecision::Publish
        }
    }

    /// Suppressions left before the next non-Up outcome is published.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_always_publishes() {
        let mut state = RetryState::new(0);
        for _ in 0..5 {
            assert_eq!(state.observe(Status::Down), RetryDecision::Publish);
        }
    }

    #[test]
    fn test_up_always_publishes_and_resets() {
        let mut state = RetryState::new(3);
        assert_eq!(state.observe(Status::Down), RetryDecision::Suppress);
        assert_eq!(state.remaining(), 2);
        assert_eq!(state.observe(Status::Up), RetryDecision::Publish);
        assert_eq!(state.remaining(), 3);
    }

    #[test]
    fn test_budget_two_suppresses_two_then_publishes_third() {
        let mut state = RetryState::new(2);
        assert_eq!(state.observe(Status::Down), RetryDecision::Suppress);
        assert_eq!(state.observe(Status::Down), RetryDecision::Suppress);
        assert_eq!(state.observe(Status::Down), RetryDecision::Publish);
        // Counter reset: the cycle starts over.
        assert_eq!(state.remaining(), 2);
        assert_eq!(state.observe(Status::Down), RetryDecision::Suppress);
    }

    #[test]
    fn test_degraded_and_unreachable_count_as_non_up() {
        let mut state = RetryState::new(2);
        assert_eq!(state.observe(Status::Degraded), RetryDecision::Suppress);
        assert_eq!(state.observe(Status::Unreachable), RetryDecision::Suppress);
        assert_eq!(state.observe(Status::Degraded), RetryDecision::Publish);
    }

    #[test]
    fn test_intervening_up_restarts_the_cycle() {
        let mut state = RetryState::new(2);
        assert_eq!(state.observe(Status::Down), RetryDecision::Suppress);
        assert_eq!(state.observe(Status::Up), RetryDecision::Publish);
        assert_eq!(state.observe(Status::Down), RetryDecision::Suppress);
        assert_eq!(state.observe(Status::Down), RetryDecision::Suppress);
        assert_eq!(state.observe(Status::Down), RetryDecision::Publish);
    }
}
