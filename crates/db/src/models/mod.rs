//! Row models and DTOs, one module per table.

pub mod friendship;
pub mod quest;
pub mod user;
