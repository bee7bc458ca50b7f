//! Request handlers, one submodule per resource.
//!
//! Handlers delegate persistence to the repositories in `questlog_db`, keep
//! domain decisions in `questlog_core`, and map failures via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod auth;
pub mod friends;
pub mod leaderboard;
pub mod quest;
pub mod shop;
pub mod user;
pub mod verification;
