//! Business logic and repository trait definitions for SkillMart.
//!
//! This crate holds the readiness scorer, the booking state machine and the
//! services that drive them. It defines the "ports" (repository, clock and id
//! traits) that the infrastructure layer implements, and depends only on
//! `skillmart-types`, never on `skillmart-infra` or any database crate.

pub mod booking;
pub mod profile;
pub mod repository;
pub mod scoring;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;
