//! Mercator Kernel: the state model of the planning economy.
//!
//! # API Surface
//!
//! - [`state::world::WorldState`] -- agents and their resource bags, with
//!   guarded mutation ([`state::agent::Agent::apply`],
//!   [`state::world::WorldState::transfer`]) and deep cloning
//! - [`transform::template::TransformTemplate`] -- scalable recipes gated by
//!   required (non-consumed) resources
//! - [`proof::fingerprint::world_fingerprint`] -- content hash of a world state
//!
//! # Module Dependency Direction
//!
//! `state` ← `transform` ← `proof`
//!
//! One-way only. `transform` reads agents from `state`; `proof` reads both.
//! Nothing in the kernel performs I/O.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod proof;
pub mod state;
pub mod transform;
