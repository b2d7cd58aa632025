use blockview_chunk::{ChunkVertex, MeshBackend};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct ModelUniform {
    origin: [f32; 4],
}

/// Vertex layout matching [`ChunkVertex`]: position at location 0, normal at 1.
pub(crate) const CHUNK_VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<ChunkVertex>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
    ],
};

/// GPU buffers for one chunk.
pub struct GpuChunkMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) model_buffer: wgpu::Buffer,
    pub(crate) model_bind_group: wgpu::BindGroup,
    pub(crate) vertex_count: u32,
}

impl std::fmt::Debug for GpuChunkMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuChunkMesh")
            .field("vertex_count", &self.vertex_count)
            .finish_non_exhaustive()
    }
}

/// [`MeshBackend`] that places chunk meshes in GPU memory.
///
/// Borrow one from [`crate::WgpuRenderer::mesh_backend`] whenever chunks are
/// meshed or destroyed.
pub struct GpuMeshBackend<'a> {
    pub(crate) device: &'a wgpu::Device,
    pub(crate) model_layout: &'a wgpu::BindGroupLayout,
}

impl MeshBackend for GpuMeshBackend<'_> {
    type Mesh = GpuChunkMesh;

    fn upload(&mut self, origin: Vec3, vertices: &[ChunkVertex], indices: &[u32]) -> GpuChunkMesh {
        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chunk_vertex_buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chunk_index_buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let model_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chunk_model_buffer"),
            contents: bytemuck::bytes_of(&ModelUniform {
                origin: origin.extend(0.0).to_array(),
            }),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let model_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("chunk_model_bind_group"),
            layout: self.model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
        });

        tracing::trace!(vertices = vertices.len(), "uploaded chunk mesh");

        GpuChunkMesh {
            vertex_buffer,
            index_buffer,
            model_buffer,
            model_bind_group,
            vertex_count: vertices.len() as u32,
        }
    }

    fn release(&mut self, mesh: GpuChunkMesh) {
        mesh.vertex_buffer.destroy();
        mesh.index_buffer.destroy();
        mesh.model_buffer.destroy();
        tracing::trace!(vertices = mesh.vertex_count, "released chunk mesh");
    }
}
