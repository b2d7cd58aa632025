//! Shared types for the blockview workspace.
//!
//! # Invariants
//! - Chunk dimensions are compile-time constants shared by every crate.
//! - Matrix helpers never mutate the matrices they read.

pub mod transform;
pub mod types;

pub use transform::{multiply_chain, multiply_chain_in_place};
pub use types::{BlockState, CHUNK_HEIGHT, CHUNK_SIZE, ChunkCoord};
