//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods that must run inside
//! a caller-owned transaction take `&mut PgConnection` instead.

pub mod friendship_repo;
pub mod quest_repo;
pub mod user_repo;

pub use friendship_repo::FriendshipRepo;
pub use quest_repo::QuestRepo;
pub use user_repo::UserRepo;
