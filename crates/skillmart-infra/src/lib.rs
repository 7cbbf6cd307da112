//! Infrastructure layer for SkillMart.
//!
//! Contains implementations of the ports defined in `skillmart-core`: SQLite
//! repositories, the system clock, the random booking id generator, and the
//! `config.toml` loader.

pub mod clock;
pub mod config;
pub mod id;
pub mod sqlite;
