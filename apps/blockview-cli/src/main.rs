use anyhow::Context as _;
use blockview_camera::{Camera, CameraSettings, CameraState};
use blockview_chunk::{BlockGrid, Chunk, MeshStats, RecordingBackend};
use blockview_common::{CHUNK_HEIGHT, CHUNK_SIZE, ChunkCoord};
use blockview_input::{Key, ScriptedInput};
use clap::{Parser, Subcommand};
use glam::{UVec2, Vec3};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blockview-cli", about = "Headless chunk meshing and camera simulation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and chunk dimensions
    Info,
    /// Generate and mesh one chunk, then report face and vertex counts
    Mesh {
        /// Chunk x coordinate
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        x: i32,
        /// Chunk z coordinate
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        z: i32,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the locked camera for a number of frames with a fixed mouse offset
    Camera {
        /// Frames to simulate at 60 Hz
        #[arg(short, long, default_value_t = 60)]
        frames: u32,
        /// Horizontal cursor offset from center per frame, in pixels
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        dx: f64,
        /// Vertical cursor offset from center per frame, in pixels
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        dy: f64,
        /// Hold the forward key for every frame
        #[arg(long)]
        forward: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct MeshReport {
    coord: ChunkCoord,
    origin: Vec3,
    #[serde(flatten)]
    stats: MeshStats,
}

#[derive(Debug, Serialize)]
struct CameraReport {
    frames: u32,
    state: CameraState,
    position: Vec3,
    front: Vec3,
    yaw: f32,
    pitch: f32,
    view_projection: [[f32; 4]; 4],
}

const SIM_FRAMEBUFFER: UVec2 = UVec2::new(800, 600);
const SIM_DELTA: f32 = 1.0 / 60.0;

fn mesh_chunk(coord: ChunkCoord) -> anyhow::Result<MeshReport> {
    let mut backend = RecordingBackend::new();
    let mut chunk = Chunk::new(coord);
    let stats = chunk
        .generate_mesh(&mut backend)
        .with_context(|| format!("meshing chunk ({}, {})", coord.x, coord.z))?;
    let report = MeshReport {
        coord,
        origin: chunk.origin(),
        stats,
    };
    chunk.destroy(&mut backend);
    Ok(report)
}

fn simulate_camera(frames: u32, dx: f64, dy: f64, forward: bool) -> CameraReport {
    let mut input = ScriptedInput::new(SIM_FRAMEBUFFER);
    input.set_delta_time(SIM_DELTA);
    if forward {
        input.press(Key::W);
    }

    let mut camera = Camera::new(CameraSettings {
        aspect_ratio: SIM_FRAMEBUFFER.x as f32 / SIM_FRAMEBUFFER.y as f32,
        ..CameraSettings::default()
    });
    camera.lock(&mut input);

    for _ in 0..frames {
        input.offset_cursor(dx, dy);
        camera.update(&mut input);
    }

    CameraReport {
        frames,
        state: camera.state(),
        position: camera.position(),
        front: camera.front(),
        yaw: camera.yaw(),
        pitch: camera.pitch(),
        view_projection: camera.matrix().to_cols_array_2d(),
    }
}

/// `RUST_LOG` when set, otherwise "debug" with `--verbose` and "info" without.
fn log_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("blockview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "chunk: {CHUNK_SIZE} x {CHUNK_HEIGHT} x {CHUNK_SIZE} ({} cells)",
                BlockGrid::CELLS
            );
            let settings = CameraSettings::default();
            println!(
                "camera: fov={} speed={} sensitivity={}",
                settings.fov, settings.speed, settings.sensitivity
            );
        }
        Commands::Mesh { x, z, json } => {
            let report = mesh_chunk(ChunkCoord::new(x, z))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "chunk ({}, {}): solid={} faces={} vertices={}",
                    x, z, report.stats.solid_blocks, report.stats.visible_faces, report.stats.vertices
                );
            }
        }
        Commands::Camera {
            frames,
            dx,
            dy,
            forward,
            json,
        } => {
            let report = simulate_camera(frames, dx, dy, forward);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("frames: {}", report.frames);
                println!(
                    "position: ({:.3}, {:.3}, {:.3})",
                    report.position.x, report.position.y, report.position.z
                );
                println!("yaw: {:.3}  pitch: {:.3}", report.yaw, report.pitch);
                println!(
                    "front: ({:.3}, {:.3}, {:.3})",
                    report.front.x, report.front.y, report.front.z
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_report_matches_generated_grid() {
        let coord = ChunkCoord::new(2, -1);
        let report = mesh_chunk(coord).unwrap();
        assert_eq!(report.stats.solid_blocks, BlockGrid::generate(coord).solid_count());
        assert_eq!(report.stats.vertices, report.stats.visible_faces * 6);
        assert_eq!(report.origin, Vec3::new(32.0, 0.0, -16.0));
    }

    #[test]
    fn centered_cursor_leaves_orientation_alone() {
        let report = simulate_camera(30, 0.0, 0.0, false);
        assert!((report.yaw - 270.0).abs() < 1e-4);
        assert_eq!(report.pitch, 0.0);
        assert_eq!(report.position, Vec3::new(4.0, 2.0, 4.0));
    }

    #[test]
    fn forward_flight_moves_along_front() {
        let report = simulate_camera(60, 0.0, 0.0, true);
        // One second at 10 units per second down -Z.
        assert!((report.position.z - (4.0 - 10.0)).abs() < 1e-3);
        assert!((report.position.x - 4.0).abs() < 1e-4);
    }

    #[test]
    fn sustained_upward_look_clamps_pitch() {
        let report = simulate_camera(1000, 0.0, -100.0, false);
        assert!((report.pitch - 89.0).abs() < 1e-4);
        assert_eq!(report.state, CameraState::Locked);
    }

    #[test]
    fn log_filter_falls_back_to_verbosity() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(log_filter(false).to_string(), "info");
        assert_eq!(log_filter(true).to_string(), "debug");
    }

    #[test]
    fn camera_report_serializes() {
        let json = serde_json::to_value(simulate_camera(1, 4.0, 0.0, false)).unwrap();
        assert_eq!(json["frames"], 1);
        assert_eq!(json["state"], "Locked");
        assert_eq!(json["position"].as_array().map(Vec::len), Some(3));
    }
}
