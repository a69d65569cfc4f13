//! Search budget contract.
//!
//! The search loop has no cancellation primitive of its own: it runs until
//! the frontier is exhausted. A caller that needs early termination (a time
//! limit, an expansion cap, a cancel flag) injects it here; the loop asks
//! the budget once per iteration, before popping.

/// Progress counters visible to a budget check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProgressV1 {
    /// Nodes expanded so far (depth-bound completions are not expansions).
    pub expansions: u64,
    /// Schedules completed so far.
    pub completed: u64,
    /// Current frontier size.
    pub frontier_len: usize,
}

/// Caller-supplied early termination check.
///
/// # Contract
///
/// - Called once per loop iteration with the current counters.
/// - Returning `false` stops the search; schedules completed so far are
///   still reported.
/// - Must not assume it is called at all: a search whose frontier empties
///   first never consults it again.
pub trait SearchBudget {
    /// Whether the search may run another iteration.
    fn should_continue(&self, progress: &SearchProgressV1) -> bool;
}

/// No budget: the search runs until the frontier is exhausted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl SearchBudget for Unbounded {
    fn should_continue(&self, _progress: &SearchProgressV1) -> bool {
        true
    }
}

/// Hard cap on node expansions.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionBudget {
    pub max_expansions: u64,
}

impl SearchBudget for ExpansionBudget {
    fn should_continue(&self, progress: &SearchProgressV1) -> bool {
        progress.expansions < self.max_expansions
    }
}

impl<F> SearchBudget for F
where
    F: Fn(&SearchProgressV1) -> bool,
{
    fn should_continue(&self, progress: &SearchProgressV1) -> bool {
        self(progress)
    }
}
