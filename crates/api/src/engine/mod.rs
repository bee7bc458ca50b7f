//! Quest completion engine.
//!
//! Owns the one write path that moves rewards: the transactional
//! `active -> completed` transition in [`completion`].

pub mod completion;
