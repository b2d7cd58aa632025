//! wgpu render backend for blockview.
//!
//! Owns the device, the surface configuration, the chunk pipeline and the GPU
//! buffers behind every chunk mesh.
//!
//! # Invariants
//! - Rendering never mutates chunk or camera state.
//! - Every chunk mesh buffer is created and destroyed through [`GpuMeshBackend`].
//! - Shader and pipeline validation errors are logged, never fatal.

mod context;
mod gpu;
mod mesh;
mod shaders;

pub use context::{BackendError, GpuContext};
pub use gpu::{FrameStats, WgpuRenderer};
pub use mesh::{GpuChunkMesh, GpuMeshBackend};
