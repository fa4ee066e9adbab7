//! Domain layer
//!
//! Repository traits the application layer depends on.

pub mod repositories;
