mod window_input;

use anyhow::{Context as _, Result};
use blockview_camera::{Camera, CameraSettings};
use blockview_chunk::Chunk;
use blockview_common::ChunkCoord;
use blockview_input::{FrameClock, InputSurface, Key, LockToggle, ResizeDispatch};
use blockview_render_wgpu::{FrameStats, GpuChunkMesh, GpuContext, WgpuRenderer};
use clap::Parser;
use egui::Context as EguiContext;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use window_input::WindowInput;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "blockview-desktop", about = "Fly around procedurally generated chunks")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in pixels
    #[arg(long, default_value_t = WindowSettings::default().width)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = WindowSettings::default().height)]
    height: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = CameraSettings::default().fov)]
    fov: f32,

    /// Movement speed in world units per second
    #[arg(long, default_value_t = CameraSettings::default().speed)]
    speed: f32,

    /// Mouse look sensitivity
    #[arg(long, default_value_t = CameraSettings::default().sensitivity)]
    sensitivity: f32,

    /// Chunk radius around the origin; 0 renders a single chunk
    #[arg(long, default_value_t = 0)]
    chunks: u32,
}

#[derive(Debug, Clone)]
struct WindowSettings {
    title: String,
    width: u32,
    height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "blockview".into(),
            width: 800,
            height: 600,
        }
    }
}

struct ViewerSettings {
    window: WindowSettings,
    camera: CameraSettings,
    chunk_radius: u32,
}

impl From<Cli> for ViewerSettings {
    fn from(cli: Cli) -> Self {
        Self {
            window: WindowSettings {
                width: cli.width.max(1),
                height: cli.height.max(1),
                ..WindowSettings::default()
            },
            camera: CameraSettings {
                fov: cli.fov,
                speed: cli.speed,
                sensitivity: cli.sensitivity,
                aspect_ratio: cli.width.max(1) as f32 / cli.height.max(1) as f32,
            },
            chunk_radius: cli.chunks,
        }
    }
}

/// Everything that exists only while a window is open.
struct Viewer {
    window: Arc<Window>,
    input: WindowInput,
    gpu: GpuContext,
    renderer: WgpuRenderer,
    chunks: Vec<Chunk<GpuChunkMesh>>,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Viewer {
    fn new(event_loop: &ActiveEventLoop, settings: &ViewerSettings, egui_ctx: &EguiContext) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(settings.window.title.clone())
            .with_inner_size(PhysicalSize::new(settings.window.width, settings.window.height));
        let window = Arc::new(event_loop.create_window(attrs).context("failed to create window")?);

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)?;
        let renderer = WgpuRenderer::new(&gpu.device, gpu.surface_format(), size.width, size.height);

        let radius = settings.chunk_radius as i32;
        let mut chunks = Vec::new();
        {
            let mut backend = renderer.mesh_backend(&gpu.device);
            for x in -radius..=radius {
                for z in -radius..=radius {
                    let mut chunk = Chunk::new(ChunkCoord::new(x, z));
                    // A failed chunk stays unmeshed and is skipped when drawing.
                    let _ = chunk.generate_mesh(&mut backend);
                    chunks.push(chunk);
                }
            }
        }
        tracing::info!(
            chunks = chunks.len(),
            vertices = chunks.iter().map(|c| c.vertex_count()).sum::<u32>(),
            "world meshed"
        );

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.surface_format(), None, 1, false);

        Ok(Self {
            input: WindowInput::new(window.clone()),
            window,
            gpu,
            renderer,
            chunks,
            egui_winit,
            egui_renderer,
        })
    }

    /// Release every chunk mesh while the device is still alive.
    fn shutdown(self) {
        let mut backend = self.renderer.mesh_backend(&self.gpu.device);
        for chunk in self.chunks {
            chunk.destroy(&mut backend);
        }
        tracing::info!("viewer shut down");
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.renderer.resize(&self.gpu.device, width, height);
    }

    fn draw_overlay(&mut self, egui_ctx: &EguiContext, view: &wgpu::TextureView, overlay: &Overlay) {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| overlay.show(ctx));
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = self.gpu.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let device = &self.gpu.device;
        let queue = &self.gpu.queue;
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        self.egui_renderer
            .update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

/// Snapshot of the values shown in the debug overlay.
struct Overlay {
    position: glam::Vec3,
    yaw: f32,
    pitch: f32,
    locked: bool,
    frame: FrameStats,
    chunks: usize,
}

impl Overlay {
    fn show(&self, ctx: &EguiContext) {
        egui::Window::new("blockview")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Position: ({:.1}, {:.1}, {:.1})",
                    self.position.x, self.position.y, self.position.z
                ));
                ui.label(format!("Yaw: {:.1}  Pitch: {:.1}", self.yaw, self.pitch));
                ui.label(format!("Camera: {}", if self.locked { "locked" } else { "unlocked" }));
                ui.separator();
                ui.label(format!("Chunks drawn: {} / {}", self.frame.chunks_drawn, self.chunks));
                ui.label(format!("Vertices: {}", self.frame.vertices_drawn));
                ui.separator();
                ui.small("E: Lock camera | Esc: Unlock | WASD/Space/Shift: Move | F1: Overlay");
            });
    }
}

struct App {
    settings: ViewerSettings,
    camera: Camera,
    clock: FrameClock,
    lock_toggle: LockToggle,
    resize: ResizeDispatch<Camera>,
    show_overlay: bool,
    last_frame: FrameStats,
    egui_ctx: EguiContext,
    viewer: Option<Viewer>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: ViewerSettings) -> Self {
        let mut resize = ResizeDispatch::<Camera>::new();
        resize.on_resize(Camera::resize);
        Self {
            camera: Camera::new(settings.camera),
            settings,
            clock: FrameClock::new(),
            lock_toggle: LockToggle::new(),
            resize,
            show_overlay: true,
            last_frame: FrameStats::default(),
            egui_ctx: EguiContext::default(),
            viewer: None,
            error: None,
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        let dt = self.clock.tick();
        viewer.input.set_delta_time(dt);

        if self.lock_toggle.poll(viewer.input.is_key_pressed(Key::E)) {
            self.camera.toggle_lock(&mut viewer.input);
        }
        self.camera.update(&mut viewer.input);

        if viewer.input.should_close() {
            event_loop.exit();
            return;
        }

        let Some(output) = viewer.gpu.acquire() else {
            viewer.window.request_redraw();
            return;
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.last_frame = viewer.renderer.render(
            &viewer.gpu.device,
            &viewer.gpu.queue,
            &view,
            self.camera.matrix(),
            &viewer.chunks,
        );

        if self.show_overlay {
            let overlay = Overlay {
                position: self.camera.position(),
                yaw: self.camera.yaw(),
                pitch: self.camera.pitch(),
                locked: self.camera.is_locked(),
                frame: self.last_frame,
                chunks: viewer.chunks.len(),
            };
            viewer.draw_overlay(&self.egui_ctx, &view, &overlay);
        }

        output.present();
        viewer.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }

        match Viewer::new(event_loop, &self.settings, &self.egui_ctx) {
            Ok(viewer) => {
                let size = viewer.input.framebuffer_size();
                self.resize.dispatch(&mut self.camera, size.x, size.y);
                self.clock = FrameClock::new();
                self.viewer = Some(viewer);
            }
            Err(e) => {
                tracing::error!("failed to start viewer: {e:#}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        let pressed = viewer.input.handle_window_event(&event);
        if self.show_overlay {
            let _ = viewer.egui_winit.on_window_event(&viewer.window, &event);
        }

        match pressed {
            Some(Key::Escape) if self.camera.is_locked() => self.camera.unlock(&mut viewer.input),
            Some(Key::F1) => self.show_overlay = !self.show_overlay,
            _ => {}
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if new_size.width > 0 && new_size.height > 0 {
                    viewer.resize(new_size.width, new_size.height);
                }
                self.resize
                    .dispatch(&mut self.camera, new_size.width, new_size.height);
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let (DeviceEvent::MouseMotion { delta }, Some(viewer)) = (event, self.viewer.as_mut()) {
            viewer.input.handle_mouse_motion(delta);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = &self.viewer {
            viewer.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = self.viewer.take() {
            viewer.shutdown();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    tracing::info!("blockview-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(ViewerSettings::from(cli));
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.error.take() {
        return Err(e);
    }
    Ok(())
}
