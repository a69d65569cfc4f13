//! Shared fixtures for the lock tests and the fixture binary.

pub mod fixtures;
