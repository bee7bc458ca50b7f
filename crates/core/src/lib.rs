//! Domain logic for the quest lifecycle and progression engine.
//!
//! Everything in this crate is pure and synchronous: no database access,
//! no HTTP types. The `db` and `api` crates build on these rules.

pub mod error;
pub mod progression;
pub mod quest;
pub mod shop;
pub mod types;
pub mod verification;
