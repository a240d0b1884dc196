//! Plane collection: catch falling towers, dodge falling flags.
//!
//! The library holds the simulation core only. Terminal rendering and
//! input handling live in the binary.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod spawner;
