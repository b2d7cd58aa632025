use blockview_common::{BlockState, CHUNK_HEIGHT, CHUNK_SIZE, ChunkCoord};
use glam::IVec3;

/// Extra solid blocks stacked on the floor layer, at most.
const MAX_HILL_HEIGHT: u64 = 3;

/// Dense `CHUNK_SIZE x CHUNK_HEIGHT x CHUNK_SIZE` grid indexed as `[x][y][z]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockGrid {
    blocks: [[[BlockState; CHUNK_SIZE]; CHUNK_HEIGHT]; CHUNK_SIZE],
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl BlockGrid {
    pub const WIDTH: usize = CHUNK_SIZE;
    pub const HEIGHT: usize = CHUNK_HEIGHT;
    pub const DEPTH: usize = CHUNK_SIZE;

    /// Number of cells in a grid.
    pub const CELLS: usize = Self::WIDTH * Self::HEIGHT * Self::DEPTH;

    pub fn empty() -> Self {
        Self {
            blocks: [[[BlockState::Empty; CHUNK_SIZE]; CHUNK_HEIGHT]; CHUNK_SIZE],
        }
    }

    pub fn filled() -> Self {
        Self {
            blocks: [[[BlockState::Solid; CHUNK_SIZE]; CHUNK_HEIGHT]; CHUNK_SIZE],
        }
    }

    /// Procedural terrain for the chunk at `coord`.
    ///
    /// The floor layer (y = 0) is always solid. Each column then rises by
    /// 0..=3 blocks, hashed from its world column position, so the result
    /// depends on nothing but `coord`.
    pub fn generate(coord: ChunkCoord) -> Self {
        let mut grid = Self::empty();
        for x in 0..Self::WIDTH {
            for z in 0..Self::DEPTH {
                let world_x = coord.x as i64 * Self::WIDTH as i64 + x as i64;
                let world_z = coord.z as i64 * Self::DEPTH as i64 + z as i64;
                let top = column_height(world_x, world_z);
                for y in 0..=top {
                    grid.blocks[x][y][z] = BlockState::Solid;
                }
            }
        }
        grid
    }

    /// Whether `(x, y, z)` lies inside the grid.
    pub fn contains(x: i32, y: i32, z: i32) -> bool {
        (0..Self::WIDTH as i32).contains(&x)
            && (0..Self::HEIGHT as i32).contains(&y)
            && (0..Self::DEPTH as i32).contains(&z)
    }

    /// Block at `(x, y, z)`. Panics when out of range.
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockState {
        self.blocks[x][y][z]
    }

    /// Overwrite the block at `(x, y, z)`. Returns `false` when out of range.
    pub fn set(&mut self, x: usize, y: usize, z: usize, state: BlockState) -> bool {
        if x >= Self::WIDTH || y >= Self::HEIGHT || z >= Self::DEPTH {
            return false;
        }
        self.blocks[x][y][z] = state;
        true
    }

    /// Bounds-checked lookup. `None` means the position is outside the grid.
    pub fn lookup(&self, pos: IVec3) -> Option<BlockState> {
        if !Self::contains(pos.x, pos.y, pos.z) {
            return None;
        }
        Some(self.blocks[pos.x as usize][pos.y as usize][pos.z as usize])
    }

    pub fn solid_count(&self) -> usize {
        self.blocks
            .iter()
            .flatten()
            .flatten()
            .filter(|b| b.is_solid())
            .count()
    }
}

/// Top solid y of the column at world `(x, z)`.
fn column_height(world_x: i64, world_z: i64) -> usize {
    let key = (world_x as u64).wrapping_mul(0x0000_0001_0000_0001) ^ (world_z as u64).rotate_left(32);
    (splitmix64(key) % (MAX_HILL_HEIGHT + 1)) as usize
}

fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
