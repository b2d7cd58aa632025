use crate::backend::MeshBackend;
use crate::grid::BlockGrid;
use crate::mesher::{MeshError, MeshLimits, MeshStats, mesh_grid};
use blockview_common::ChunkCoord;
use glam::Vec3;

/// One block grid and the GPU mesh derived from it.
///
/// `M` is the backend's mesh handle. A chunk starts unmeshed; call
/// [`Chunk::generate_mesh`] before drawing and [`Chunk::destroy`] when done.
#[derive(Debug)]
pub struct Chunk<M> {
    coord: ChunkCoord,
    origin: Vec3,
    blocks: BlockGrid,
    mesh: Option<M>,
    vertex_count: u32,
    limits: MeshLimits,
}

impl<M> Chunk<M> {
    /// Chunk at `coord` with procedurally generated terrain.
    pub fn new(coord: ChunkCoord) -> Self {
        Self::with_blocks(coord, BlockGrid::generate(coord))
    }

    pub fn with_blocks(coord: ChunkCoord, blocks: BlockGrid) -> Self {
        Self {
            coord,
            origin: coord.origin(),
            blocks,
            mesh: None,
            vertex_count: 0,
            limits: MeshLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: MeshLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn blocks(&self) -> &BlockGrid {
        &self.blocks
    }

    /// Vertices in the current mesh; zero while unmeshed.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn is_meshed(&self) -> bool {
        self.mesh.is_some()
    }

    /// Mesh and vertex count, only once the chunk has been meshed.
    pub fn drawable(&self) -> Option<(&M, u32)> {
        self.mesh.as_ref().map(|mesh| (mesh, self.vertex_count))
    }

    /// Mesh the block grid and upload it through `backend`.
    ///
    /// Any previous mesh is released before the new one is installed. When
    /// staging fails the chunk keeps its previous mesh and vertex count, and
    /// nothing is uploaded.
    pub fn generate_mesh<B>(&mut self, backend: &mut B) -> Result<MeshStats, MeshError>
    where
        B: MeshBackend<Mesh = M>,
    {
        let _span = tracing::info_span!("generate_mesh", x = self.coord.x, z = self.coord.z).entered();

        let staged = match mesh_grid(&self.blocks, self.limits) {
            Ok(staged) => staged,
            Err(e) => {
                tracing::error!("chunk mesh generation aborted: {e}");
                return Err(e);
            }
        };
        let stats = MeshStats::of(&self.blocks, &staged);

        if let Some(previous) = self.mesh.take() {
            backend.release(previous);
        }

        let mesh = backend.upload(self.origin, &staged.vertices, &staged.indices);
        self.mesh = Some(mesh);
        self.vertex_count = staged.vertices.len() as u32;

        tracing::debug!(
            faces = stats.visible_faces,
            vertices = stats.vertices,
            "chunk meshed"
        );
        Ok(stats)
    }

    /// Alias of [`Chunk::generate_mesh`] for callers rebuilding after edits.
    pub fn regenerate_mesh<B>(&mut self, backend: &mut B) -> Result<MeshStats, MeshError>
    where
        B: MeshBackend<Mesh = M>,
    {
        self.generate_mesh(backend)
    }

    /// Release the GPU mesh, if any, and drop the chunk.
    pub fn destroy<B>(mut self, backend: &mut B)
    where
        B: MeshBackend<Mesh = M>,
    {
        if let Some(mesh) = self.mesh.take() {
            backend.release(mesh);
        }
        tracing::debug!(x = self.coord.x, z = self.coord.z, "chunk destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{RecordedMesh, RecordingBackend};
    use blockview_common::BlockState;

    fn single_block_chunk() -> Chunk<RecordedMesh> {
        let mut grid = BlockGrid::empty();
        grid.set(0, 0, 0, BlockState::Solid);
        Chunk::with_blocks(ChunkCoord::new(1, 2), grid)
    }

    #[test]
    fn new_chunk_is_unmeshed() {
        let chunk = Chunk::<RecordedMesh>::new(ChunkCoord::new(0, 0));
        assert!(!chunk.is_meshed());
        assert_eq!(chunk.vertex_count(), 0);
        assert!(chunk.drawable().is_none());
    }

    #[test]
    fn origin_follows_chunk_coord() {
        let chunk = single_block_chunk();
        assert_eq!(chunk.origin(), Vec3::new(16.0, 0.0, 32.0));
    }

    #[test]
    fn generate_mesh_uploads_once() {
        let mut backend = RecordingBackend::new();
        let mut chunk = single_block_chunk();
        let stats = chunk.generate_mesh(&mut backend).unwrap();

        assert_eq!(stats.vertices, 36);
        assert_eq!(chunk.vertex_count(), 36);
        let (mesh, count) = chunk.drawable().unwrap();
        assert_eq!(count, 36);
        assert_eq!(mesh.index_count, 36);
        assert_eq!(mesh.origin, chunk.origin());
        assert_eq!(backend.uploads(), 1);
        assert_eq!(backend.live().len(), 1);
    }

    #[test]
    fn regeneration_releases_previous_mesh() {
        let mut backend = RecordingBackend::new();
        let mut chunk = single_block_chunk();
        chunk.generate_mesh(&mut backend).unwrap();
        chunk.regenerate_mesh(&mut backend).unwrap();
        chunk.regenerate_mesh(&mut backend).unwrap();

        assert_eq!(backend.uploads(), 3);
        assert_eq!(backend.releases(), 2);
        assert_eq!(backend.live().len(), 1);
        assert_eq!(chunk.vertex_count(), 36);
    }

    #[test]
    fn failed_staging_keeps_previous_mesh() {
        let mut backend = RecordingBackend::new();
        let mut chunk = single_block_chunk();
        chunk.generate_mesh(&mut backend).unwrap();
        let live_before = backend.live().to_vec();

        let mut chunk = chunk.with_limits(MeshLimits { max_vertices: 6 });
        assert!(chunk.regenerate_mesh(&mut backend).is_err());

        assert_eq!(backend.live(), live_before.as_slice());
        assert_eq!(backend.uploads(), 1);
        assert_eq!(chunk.vertex_count(), 36);
        assert!(chunk.is_meshed());
    }

    #[test]
    fn failed_first_mesh_leaves_chunk_undrawable() {
        let mut backend = RecordingBackend::new();
        let mut chunk = single_block_chunk().with_limits(MeshLimits { max_vertices: 0 });
        assert!(chunk.generate_mesh(&mut backend).is_err());
        assert!(chunk.drawable().is_none());
        assert_eq!(chunk.vertex_count(), 0);
        assert_eq!(backend.uploads(), 0);
    }

    #[test]
    fn destroy_releases_mesh() {
        let mut backend = RecordingBackend::new();
        let mut chunk = single_block_chunk();
        chunk.generate_mesh(&mut backend).unwrap();
        chunk.destroy(&mut backend);
        assert!(backend.live().is_empty());
        assert_eq!(backend.releases(), 1);
    }

    #[test]
    fn destroying_unmeshed_chunk_releases_nothing() {
        let mut backend = RecordingBackend::new();
        single_block_chunk().destroy(&mut backend);
        assert_eq!(backend.releases(), 0);
    }
}
