//! Repository modules for database operations

pub mod activities;
pub mod checkpoints;
pub mod completions;
pub mod courses;
pub mod progress;
pub mod streaks;
pub mod users;
