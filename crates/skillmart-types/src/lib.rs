//! Shared domain types for SkillMart.
//!
//! This crate contains the plain data used across the marketplace: identifiers,
//! profile submissions, booking status enums, audit-log entries, readiness
//! reports, configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, rust_decimal, thiserror.

pub mod booking;
pub mod config;
pub mod error;
pub mod ids;
pub mod profile;
pub mod score;
