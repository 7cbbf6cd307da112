//! Observability for SkillMart: subscriber setup and span attribute names.

pub mod attrs;
pub mod tracing_setup;
