//! Mercator Search: anytime, bounded-frontier best-first schedule search.
//!
//! This crate provides the planning layer. It depends only on
//! `mercator_kernel`; it does NOT depend on `mercator_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! mercator_kernel  ←  mercator_search  ←  mercator_harness
//! (state, recipes)    (frontier, search)   (config, worlds, reports)
//! ```
//!
//! # Key types
//!
//! - [`node::ScheduleNode`]: a partial schedule owning its world snapshot
//! - [`node::ActionV1`]: a transform or transfer action descriptor
//! - [`frontier::BoundedFrontier`]: size-capped priority frontier with eviction
//! - [`successor::generate_successors`]: feasible one-step branches
//! - [`scorer::StateScorer`]: trait for per-capita state quality
//! - [`contract::SearchBudget`]: caller-injected early termination
//! - [`search::schedule`]: the search loop
//! - [`log::ScheduleLogV1`]: structured log of completed schedules

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod log;
pub mod node;
pub mod policy;
pub mod scorer;
pub mod search;
pub mod successor;
