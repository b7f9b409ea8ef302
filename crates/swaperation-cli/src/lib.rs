//! Library half of the `swaperation` binary: configuration, level files,
//! driver scripts and the command implementations.

pub mod cli;
pub mod commands;
pub mod config;
pub mod level;
pub mod script;
