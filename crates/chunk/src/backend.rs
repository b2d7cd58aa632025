use crate::mesher::ChunkVertex;
use glam::Vec3;

/// Graphics-side owner of chunk meshes.
///
/// The chunk decides *when* a mesh is created or released; the backend owns
/// the GPU objects. Every mesh handed out by [`MeshBackend::upload`] comes
/// back through [`MeshBackend::release`] exactly once.
pub trait MeshBackend {
    type Mesh;

    /// Copy staged vertices and indices into GPU memory. `origin` is the
    /// chunk's world-space offset.
    fn upload(&mut self, origin: Vec3, vertices: &[ChunkVertex], indices: &[u32]) -> Self::Mesh;

    /// Free the GPU objects behind `mesh`.
    fn release(&mut self, mesh: Self::Mesh);
}

/// Handle issued by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMesh {
    pub id: u64,
    pub origin: Vec3,
    pub vertex_count: usize,
    pub index_count: usize,
}

/// Headless backend that keeps track of live meshes instead of GPU buffers.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u64,
    uploads: usize,
    releases: usize,
    live: Vec<u64>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploads(&self) -> usize {
        self.uploads
    }

    pub fn releases(&self) -> usize {
        self.releases
    }

    /// Meshes uploaded and not yet released.
    pub fn live(&self) -> &[u64] {
        &self.live
    }
}

impl MeshBackend for RecordingBackend {
    type Mesh = RecordedMesh;

    fn upload(&mut self, origin: Vec3, vertices: &[ChunkVertex], indices: &[u32]) -> RecordedMesh {
        let id = self.next_id;
        self.next_id += 1;
        self.uploads += 1;
        self.live.push(id);
        RecordedMesh {
            id,
            origin,
            vertex_count: vertices.len(),
            index_count: indices.len(),
        }
    }

    fn release(&mut self, mesh: RecordedMesh) {
        self.releases += 1;
        self.live.retain(|id| *id != mesh.id);
    }
}
