//! Business logic services (use cases).
//!
//! Services orchestrate repository calls and domain rules. They depend on
//! traits (ports) and never on concrete infrastructure.

pub mod booking;
pub mod clock;
pub mod guard;
pub mod id;
pub mod profile;
