//! State module: resource bags, agents, and the world they live in.
//!
//! This is the foundational layer. No other kernel module is imported here.

pub mod agent;
pub mod bag;
pub mod error;
pub mod weights;
pub mod world;
