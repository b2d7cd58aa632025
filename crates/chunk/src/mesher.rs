use crate::face::{FACES, FaceDef, QUAD_TRIANGLES};
use crate::grid::BlockGrid;
use bytemuck::{Pod, Zeroable};
use glam::IVec3;
use serde::{Deserialize, Serialize};
use std::collections::TryReserveError;

/// Vertices emitted per visible face: two unshared triangles.
pub const VERTICES_PER_FACE: usize = QUAD_TRIANGLES.len();

/// GPU vertex: chunk-local position plus the face normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ChunkVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Upper bound on host-side staging for one chunk mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshLimits {
    pub max_vertices: usize,
}

impl Default for MeshLimits {
    /// Room for every face of every cell.
    fn default() -> Self {
        Self {
            max_vertices: BlockGrid::CELLS * FACES.len() * VERTICES_PER_FACE,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("mesh needs {required} vertices, staging limit is {limit}")]
    StagingLimit { required: usize, limit: usize },
    #[error("failed to allocate staging for {vertices} vertices: {source}")]
    StagingAlloc {
        vertices: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Host-side staging produced by the mesher, ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkMesh {
    pub vertices: Vec<ChunkVertex>,
    /// Identity mapping `0..vertices.len()`; no vertices are shared.
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }
}

/// Summary of a meshed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeshStats {
    pub solid_blocks: usize,
    pub visible_faces: usize,
    pub vertices: usize,
}

impl MeshStats {
    pub fn of(grid: &BlockGrid, mesh: &ChunkMesh) -> Self {
        Self {
            solid_blocks: grid.solid_count(),
            visible_faces: mesh.face_count(),
            vertices: mesh.vertex_count(),
        }
    }
}

/// A face is visible when its neighbor is outside the grid or empty.
fn face_visible(grid: &BlockGrid, cell: IVec3, face: &FaceDef) -> bool {
    match grid.lookup(cell + face.offset) {
        None => true,
        Some(neighbor) => !neighbor.is_solid(),
    }
}

/// Visit every visible face in emission order.
fn for_each_visible_face(grid: &BlockGrid, mut visit: impl FnMut(IVec3, &FaceDef)) {
    for x in 0..BlockGrid::WIDTH {
        for y in 0..BlockGrid::HEIGHT {
            for z in 0..BlockGrid::DEPTH {
                if !grid.get(x, y, z).is_solid() {
                    continue;
                }
                let cell = IVec3::new(x as i32, y as i32, z as i32);
                for face in &FACES {
                    if face_visible(grid, cell, face) {
                        visit(cell, face);
                    }
                }
            }
        }
    }
}

/// Build the face-culled mesh for `grid`.
///
/// Visible faces are counted first so staging is reserved exactly once; on
/// failure nothing has been emitted.
pub fn mesh_grid(grid: &BlockGrid, limits: MeshLimits) -> Result<ChunkMesh, MeshError> {
    let mut faces = 0usize;
    for_each_visible_face(grid, |_, _| faces += 1);

    let required = faces * VERTICES_PER_FACE;
    if required > limits.max_vertices {
        return Err(MeshError::StagingLimit {
            required,
            limit: limits.max_vertices,
        });
    }

    let mut vertices: Vec<ChunkVertex> = Vec::new();
    vertices
        .try_reserve_exact(required)
        .map_err(|source| MeshError::StagingAlloc {
            vertices: required,
            source,
        })?;
    let mut indices: Vec<u32> = Vec::new();
    indices
        .try_reserve_exact(required)
        .map_err(|source| MeshError::StagingAlloc {
            vertices: required,
            source,
        })?;

    for_each_visible_face(grid, |cell, face| {
        let normal = face.normal();
        for corner in QUAD_TRIANGLES.map(|i| face.corners[i]) {
            vertices.push(ChunkVertex {
                position: (cell + corner).as_vec3().to_array(),
                normal,
            });
        }
    });
    indices.extend(0..vertices.len() as u32);

    Ok(ChunkMesh { vertices, indices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockview_common::BlockState;

    fn single_block(x: usize, y: usize, z: usize) -> BlockGrid {
        let mut grid = BlockGrid::empty();
        grid.set(x, y, z, BlockState::Solid);
        grid
    }

    fn normals_of(mesh: &ChunkMesh) -> Vec<[f32; 3]> {
        mesh.vertices
            .chunks(VERTICES_PER_FACE)
            .map(|face| face[0].normal)
            .collect()
    }

    #[test]
    fn empty_grid_yields_empty_mesh() {
        let mesh = mesh_grid(&BlockGrid::empty(), MeshLimits::default()).unwrap();
        assert!(mesh.vertices.is_empty());
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn single_block_emits_36_vertices() {
        let mesh = mesh_grid(&single_block(5, 6, 7), MeshLimits::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 36);
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(
            normals_of(&mesh),
            vec![
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 0.0],
                [0.0, 0.0, -1.0],
                [-1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, -1.0, 0.0],
            ]
        );
    }

    #[test]
    fn normals_are_constant_per_face() {
        let mesh = mesh_grid(&single_block(0, 0, 0), MeshLimits::default()).unwrap();
        for face in mesh.vertices.chunks(VERTICES_PER_FACE) {
            assert!(face.iter().all(|v| v.normal == face[0].normal));
        }
    }

    #[test]
    fn block_vertices_cover_its_unit_cube() {
        let mesh = mesh_grid(&single_block(2, 3, 4), MeshLimits::default()).unwrap();
        for v in &mesh.vertices {
            assert!(v.position[0] == 2.0 || v.position[0] == 3.0);
            assert!(v.position[1] == 3.0 || v.position[1] == 4.0);
            assert!(v.position[2] == 4.0 || v.position[2] == 5.0);
        }
    }

    #[test]
    fn emitted_triangles_face_outward() {
        let mesh = mesh_grid(&single_block(1, 1, 1), MeshLimits::default()).unwrap();
        for tri in mesh.vertices.chunks(3) {
            let a = glam::Vec3::from(tri[0].position);
            let b = glam::Vec3::from(tri[1].position);
            let c = glam::Vec3::from(tri[2].position);
            let winding = (b - a).cross(c - a);
            assert_eq!(winding, glam::Vec3::from(tri[0].normal));
        }
    }

    #[test]
    fn shared_face_between_neighbors_is_culled() {
        let mut grid = single_block(4, 4, 4);
        grid.set(5, 4, 4, BlockState::Solid);
        let mesh = mesh_grid(&grid, MeshLimits::default()).unwrap();
        assert_eq!(mesh.face_count(), 10);
        assert_eq!(mesh.vertex_count(), 60);

        // No vertex sits on the shared plane x = 5 with an X-axis normal.
        for v in &mesh.vertices {
            if v.normal[0] != 0.0 {
                assert_ne!(v.position[0], 5.0);
            }
        }
    }

    #[test]
    fn fully_solid_grid_meshes_only_its_boundary() {
        let mesh = mesh_grid(&BlockGrid::filled(), MeshLimits::default()).unwrap();
        let w = BlockGrid::WIDTH;
        let h = BlockGrid::HEIGHT;
        let d = BlockGrid::DEPTH;
        let boundary_faces = 2 * (w * h + h * d + w * d);
        assert_eq!(mesh.face_count(), boundary_faces);
    }

    #[test]
    fn indices_are_identity() {
        let mesh = mesh_grid(&single_block(0, 0, 0), MeshLimits::default()).unwrap();
        let expected: Vec<u32> = (0..36).collect();
        assert_eq!(mesh.indices, expected);
    }

    #[test]
    fn meshing_is_deterministic() {
        let grid = BlockGrid::generate(blockview_common::ChunkCoord::new(-4, 9));
        let first = mesh_grid(&grid, MeshLimits::default()).unwrap();
        let second = mesh_grid(&grid, MeshLimits::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn staging_limit_is_enforced() {
        let err = mesh_grid(&single_block(0, 0, 0), MeshLimits { max_vertices: 35 }).unwrap_err();
        assert!(matches!(
            err,
            MeshError::StagingLimit {
                required: 36,
                limit: 35
            }
        ));
    }

    #[test]
    fn default_limit_fits_worst_case() {
        // A 3D checkerboard exposes every face of every solid cell.
        let mut grid = BlockGrid::empty();
        for x in 0..BlockGrid::WIDTH {
            for y in 0..BlockGrid::HEIGHT {
                for z in 0..BlockGrid::DEPTH {
                    if (x + y + z) % 2 == 0 {
                        grid.set(x, y, z, BlockState::Solid);
                    }
                }
            }
        }
        let mesh = mesh_grid(&grid, MeshLimits::default()).unwrap();
        assert_eq!(mesh.face_count(), grid.solid_count() * 6);
    }

    #[test]
    fn stats_summarize_mesh() {
        let grid = single_block(0, 0, 0);
        let mesh = mesh_grid(&grid, MeshLimits::default()).unwrap();
        let stats = MeshStats::of(&grid, &mesh);
        assert_eq!(
            stats,
            MeshStats {
                solid_blocks: 1,
                visible_faces: 6,
                vertices: 36
            }
        );
    }
}
