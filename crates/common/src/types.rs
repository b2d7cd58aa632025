use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Chunk extent along the X and Z axes, in blocks.
pub const CHUNK_SIZE: usize = 16;

/// Chunk extent along the Y axis, in blocks.
pub const CHUNK_HEIGHT: usize = 32;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockState {
    #[default]
    Empty,
    Solid,
}

impl BlockState {
    pub fn is_solid(self) -> bool {
        self == BlockState::Solid
    }
}

/// Horizontal chunk index. Chunks are stacked only along X and Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World-space position of the chunk's (0, 0, 0) corner.
    pub fn origin(self) -> Vec3 {
        Vec3::new(
            (self.x as i64 * CHUNK_SIZE as i64) as f32,
            0.0,
            (self.z as i64 * CHUNK_SIZE as i64) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_state_default_is_empty() {
        assert_eq!(BlockState::default(), BlockState::Empty);
        assert!(!BlockState::Empty.is_solid());
        assert!(BlockState::Solid.is_solid());
    }

    #[test]
    fn chunk_origin_scales_by_chunk_size() {
        assert_eq!(ChunkCoord::new(0, 0).origin(), Vec3::ZERO);
        assert_eq!(ChunkCoord::new(2, -1).origin(), Vec3::new(32.0, 0.0, -16.0));
    }

    #[test]
    fn chunk_origin_handles_extreme_coords() {
        let origin = ChunkCoord::new(200_000_000, i32::MIN).origin();
        assert_eq!(origin.x, 3_200_000_000.0);
        assert_eq!(origin.z, i32::MIN as f32 * CHUNK_SIZE as f32);
        assert!(origin.is_finite());
    }
}
