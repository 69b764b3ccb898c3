//! Project filesystem layer for Gauge.
//!
//! This crate answers "where is the project?" and "where inside it is X?":
//! upward discovery of the directory holding `manifest.json`, resolution of
//! the well-known directories inside a project (`env/default`, `specs`),
//! spec and concept file scanning, and appending property records to
//! environment `.properties` files.
//!
//! Every lookup re-walks the filesystem; nothing is cached between calls.

pub mod layout;
pub mod project;
pub mod properties;
