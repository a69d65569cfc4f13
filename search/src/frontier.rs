//! Bounded best-first frontier.
//!
//! Uses a `BTreeMap` keyed by [`FrontierKey`] (not a `BinaryHeap`): the
//! search needs both ends of the order, the best entry to pop and the worst
//! entry to evict. Keys are unique because `creation_order` is unique per
//! search.

use std::collections::BTreeMap;

use crate::node::{FrontierKey, ScheduleNode};

/// Size-capped priority frontier.
///
/// Invariant: `len() <= capacity()` after every [`BoundedFrontier::push`].
pub struct BoundedFrontier {
    entries: BTreeMap<FrontierKey, ScheduleNode>,
    capacity: usize,
    high_water: usize,
    evictions: u64,
}

impl BoundedFrontier {
    /// Create an empty frontier holding at most `capacity` nodes.
    ///
    /// A zero capacity is raised to one; the scheduler policy rejects zero
    /// before a frontier is ever built.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity: capacity.max(1),
            high_water: 0,
            evictions: 0,
        }
    }

    /// Insert a node. If the frontier then exceeds its capacity, exactly one
    /// lowest-priority entry is evicted and returned; it may be the node just
    /// inserted.
    pub fn push(&mut self, node: ScheduleNode) -> Option<ScheduleNode> {
        self.entries.insert(FrontierKey::from(&node), node);
        self.high_water = self.high_water.max(self.entries.len());
        if self.entries.len() > self.capacity {
            self.evictions += 1;
            return self.entries.pop_last().map(|(_, evicted)| evicted);
        }
        None
    }

    /// Pop the best node (highest priority; oldest among ties).
    #[must_use]
    pub fn pop(&mut self) -> Option<ScheduleNode> {
        self.entries.pop_first().map(|(_, node)| node)
    }

    /// Peek at the best node's key without removing it.
    #[must_use]
    pub fn peek_key(&self) -> Option<FrontierKey> {
        self.entries.keys().next().copied()
    }

    /// Current frontier size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest size observed, including the transient overflow entry
    /// before its eviction.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Number of evictions so far.
    #[must_use]
    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}
