use blockview_common::multiply_chain_in_place;
use blockview_input::{CursorMode, InputSurface, movement_intent};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

pub const NEAR_PLANE: f32 = 0.01;
pub const FAR_PLANE: f32 = 100.0;

/// Pitch bound in degrees. Stops the view from flipping over the poles.
pub const PITCH_LIMIT: f32 = 89.0;

const WORLD_UP: Vec3 = Vec3::Y;

/// Lens and control parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// World units per second.
    pub speed: f32,
    pub sensitivity: f32,
    pub aspect_ratio: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 60.0,
            speed: 10.0,
            sensitivity: 0.25,
            aspect_ratio: 800.0 / 600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraState {
    /// Frozen camera, free cursor.
    #[default]
    Unlocked,
    /// First-person controls active, cursor captured.
    Locked,
}

/// Free-fly camera. Angles are in degrees.
#[derive(Debug, Clone)]
pub struct Camera {
    matrix: Mat4,
    position: Vec3,
    front: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    speed: f32,
    sensitivity: f32,
    aspect_ratio: f32,
    state: CameraState,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

/// Wrap an angle into [0, 360).
fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

fn front_from(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}

impl Camera {
    /// Camera at (4, 2, 4) looking down -Z, unlocked.
    pub fn new(settings: CameraSettings) -> Self {
        let mut camera = Self {
            matrix: Mat4::IDENTITY,
            position: Vec3::new(4.0, 2.0, 4.0),
            front: Vec3::NEG_Z,
            yaw: wrap_degrees(-90.0),
            pitch: 0.0,
            fov: settings.fov,
            speed: settings.speed,
            sensitivity: settings.sensitivity,
            aspect_ratio: settings.aspect_ratio,
            state: CameraState::Unlocked,
        };
        camera.front = front_from(camera.yaw, camera.pitch);
        camera.recompute_matrix();
        camera
    }

    /// Replace position and orientation. Pitch is clamped, yaw wrapped.
    pub fn with_pose(mut self, position: Vec3, yaw: f32, pitch: f32) -> Self {
        self.position = position;
        self.yaw = wrap_degrees(yaw);
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.front = front_from(self.yaw, self.pitch);
        self.recompute_matrix();
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == CameraState::Locked
    }

    /// Combined view-projection from the last [`Camera::recompute_matrix`].
    ///
    /// Column vectors multiply on the right (`matrix * v`); the memory layout
    /// equals the row-vector matrix `view × projection`. Clip-space depth is
    /// wgpu's [0, 1] range, not GL's [-1, 1], so the depth terms at `[2][2]`
    /// and `[3][2]` differ from a GL perspective.
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = wrap_degrees(yaw);
        self.front = front_from(self.yaw, self.pitch);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.front = front_from(self.yaw, self.pitch);
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    /// Ignored unless finite and positive.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.aspect_ratio = aspect_ratio;
        }
    }

    /// Resize hook: adopt the framebuffer's aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.set_aspect_ratio(width as f32 / height as f32);
    }

    /// Capture the cursor and enable first-person controls.
    pub fn lock(&mut self, input: &mut impl InputSurface) {
        self.state = CameraState::Locked;
        input.set_cursor_mode(CursorMode::Hidden);
        input.center_cursor();
        tracing::debug!("camera locked");
    }

    /// Release the cursor and freeze the camera.
    pub fn unlock(&mut self, input: &mut impl InputSurface) {
        self.state = CameraState::Unlocked;
        input.set_cursor_mode(CursorMode::Normal);
        tracing::debug!("camera unlocked");
    }

    pub fn toggle_lock(&mut self, input: &mut impl InputSurface) {
        match self.state {
            CameraState::Locked => self.unlock(input),
            CameraState::Unlocked => self.lock(input),
        }
    }

    /// Move along the input's movement intent. No-op while unlocked.
    pub fn recompute_position(&mut self, input: &impl InputSurface) {
        if !self.is_locked() {
            return;
        }

        let intent = movement_intent(input).normalize_or_zero();
        let right = self.front.cross(WORLD_UP).normalize();
        let direction =
            (self.front * intent.z + right * intent.x + WORLD_UP * intent.y).normalize_or_zero();

        self.position += direction * (self.speed * input.delta_time());
    }

    /// Turn by the cursor's offset from the framebuffer center. No-op while
    /// unlocked.
    ///
    /// Sensitivity scales the offset and then the angle increment again, so
    /// the effective factor is `sensitivity²`.
    pub fn recompute_rotation(&mut self, input: &impl InputSurface) {
        if !self.is_locked() {
            return;
        }

        let cursor = input.cursor_position();
        let center = input.framebuffer_size().as_dvec2() / 2.0;
        let delta_x = (cursor.x - center.x) as f32 * self.sensitivity;
        let delta_y = (cursor.y - center.y) as f32 * self.sensitivity;

        self.yaw += delta_x * self.sensitivity;
        self.pitch -= delta_y * self.sensitivity;

        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = wrap_degrees(self.yaw);
        self.front = front_from(self.yaw, self.pitch);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, WORLD_UP)
    }

    /// Right-handed perspective with a [0, 1] depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect_ratio, NEAR_PLANE, FAR_PLANE)
    }

    pub fn recompute_matrix(&mut self) {
        let view = self.view_matrix();
        let projection = self.projection_matrix();
        multiply_chain_in_place(&mut self.matrix, &[view, projection]);
    }

    /// One frame: movement, mouse look, cursor recentering, matrix.
    pub fn update(&mut self, input: &mut impl InputSurface) {
        self.recompute_position(&*input);
        self.recompute_rotation(&*input);
        if self.is_locked() {
            input.center_cursor();
        }
        self.recompute_matrix();
    }
}
