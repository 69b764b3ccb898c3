//! Shared utilities for Gauge project tooling.
//!
//! This crate provides the low-level pieces the project crates build on:
//! the error type, a filesystem abstraction with a real and an in-memory
//! implementation, the upward ancestor walk, and best-effort file scanning.

pub mod errors;
pub mod fs;
pub mod memfs;
pub mod scan;
