use std::hint::black_box;
use std::time::Instant;

use blockview_chunk::{BlockGrid, MeshLimits, mesh_grid};
use blockview_common::{BlockState, ChunkCoord};

fn checkerboard() -> BlockGrid {
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
    grid
}

fn bench_mesh(label: &str, grid: &BlockGrid, iterations: usize) {
    let start = Instant::now();
    let mut vertices = 0;
    for _ in 0..iterations {
        let mesh = mesh_grid(black_box(grid), MeshLimits::default()).expect("mesh fits default limits");
        vertices = mesh.vertex_count();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  {label} ({vertices} vertices, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== blockview-chunk meshing benchmarks ===\n");

    println!("[mesh_grid]");
    bench_mesh("empty", &BlockGrid::empty(), 200);
    bench_mesh("generated", &BlockGrid::generate(ChunkCoord::new(0, 0)), 200);
    bench_mesh("filled", &BlockGrid::filled(), 100);
    bench_mesh("checkerboard", &checkerboard(), 20);

    println!("\nDone.");
}
