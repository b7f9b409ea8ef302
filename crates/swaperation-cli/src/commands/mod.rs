//! CLI command implementations.

pub mod common;
pub mod levels;
pub mod play;
pub mod verify;
pub mod version;
