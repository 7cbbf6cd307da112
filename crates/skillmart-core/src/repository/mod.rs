//! Repository trait definitions (ports).
//!
//! The infrastructure layer (skillmart-infra) implements these against
//! SQLite. The core crate never depends on a specific storage technology.

pub mod booking;
pub mod profile;
