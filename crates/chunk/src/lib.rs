//! Chunks: a fixed block grid plus the triangle mesh derived from it.
//!
//! # Invariants
//! - Only faces of solid blocks that touch empty space (or the grid boundary)
//!   are meshed.
//! - Vertex emission order is a pure function of the grid: cells in x, y, z
//!   raster order, faces in front, right, back, left, top, bottom order.
//! - A chunk never holds more than one GPU mesh; regeneration releases the old
//!   one first.
//!
//! # Known limitation
//! Chunks have no access to their neighbors, so faces on the grid boundary are
//! always emitted even when an adjacent chunk would hide them.

mod backend;
mod chunk;
pub mod face;
mod grid;
mod mesher;

pub use backend::{MeshBackend, RecordingBackend, RecordedMesh};
pub use chunk::Chunk;
pub use grid::BlockGrid;
pub use mesher::{ChunkMesh, ChunkVertex, MeshError, MeshLimits, MeshStats, mesh_grid};
