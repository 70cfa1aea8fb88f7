//! SongForge CLI library.
//!
//! Configuration loading, staged progress and the command implementations
//! behind the `songforge` binary.

pub mod commands;
pub mod config;
pub mod progress;
