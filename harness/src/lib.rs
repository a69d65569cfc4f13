//! Mercator Harness: world-level orchestration for the scheduler.
//!
//! The harness loads a world (CSV tables or the built-in economy), runs it
//! through `mercator_search::search::schedule`, and packages the result as a
//! verifiable report directory.
//!
//! The harness does NOT score or search. It delegates to the search crate.
//! Worlds provide domain data only; the harness owns orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod contract;
pub mod report;
pub mod report_dir;
pub mod runner;
pub mod worlds;
