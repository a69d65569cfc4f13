//! World-state fingerprints.
//!
//! # Encoding
//!
//! The fingerprint hashes a canonical byte encoding of the world:
//!
//! ```text
//! u32 LE agent_count
//! per agent (name order):
//!   u32 LE name_len, name bytes
//!   u32 LE resource_count
//!   per resource (name order):
//!     u32 LE name_len, name bytes, u64 LE f64 bit pattern
//! ```
//!
//! Quantities are encoded by bit pattern, so `0.0` and `-0.0` fingerprint
//! differently. Two worlds that compare equal with `==` and contain no signed
//! zeros always share a fingerprint.

use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};
use crate::state::world::WorldState;

/// Canonical bytes of a world (see module docs for the layout).
#[must_use]
pub fn world_bytes(world: &WorldState) -> Vec<u8> {
    let mut buf = Vec::new();
    push_len(&mut buf, world.len());
    for agent in world.agents() {
        push_str(&mut buf, agent.name());
        push_len(&mut buf, agent.resources().len());
        for (resource, quantity) in agent.resources().iter() {
            push_str(&mut buf, resource);
            buf.extend_from_slice(&quantity.to_bits().to_le_bytes());
        }
    }
    buf
}

/// `canonical_hash(HashDomain::WorldState, world_bytes(world))`.
#[must_use]
pub fn world_fingerprint(world: &WorldState) -> ContentHash {
    canonical_hash(HashDomain::WorldState, &world_bytes(world))
}

fn push_len(buf: &mut Vec<u8>, len: usize) {
    // Worlds never approach u32::MAX agents or resources.
    #[allow(clippy::cast_possible_truncation)]
    buf.extend_from_slice(&(len as u32).to_le_bytes());
}

fn push_str(buf: &mut Vec<u8>, s: &str) {
    push_len(buf, s.len());
    buf.extend_from_slice(s.as_bytes());
}
