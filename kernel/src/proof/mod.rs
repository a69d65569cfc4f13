//! Proof module: domain-separated hashing and state fingerprints.
//!
//! Depends on `state`. Nothing here mutates a world.

pub mod fingerprint;
pub mod hash;
pub mod hash_domain;
