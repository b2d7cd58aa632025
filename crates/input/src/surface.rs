use glam::{DVec2, UVec2, Vec3};

/// Keys the viewer reacts to. The desktop app maps physical keys onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    LeftShift,
    /// Toggles the camera lock.
    E,
    Escape,
    F1,
}

/// Cursor presentation requested by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    #[default]
    Normal,
    Hidden,
}

/// Per-frame view of the window and its input devices.
pub trait InputSurface {
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Cursor position in physical pixels, origin at the top-left corner.
    fn cursor_position(&self) -> DVec2;

    fn framebuffer_size(&self) -> UVec2;

    fn set_cursor_mode(&mut self, mode: CursorMode);

    /// Move the cursor to the middle of the framebuffer.
    fn center_cursor(&mut self);

    /// Seconds elapsed since the previous frame.
    fn delta_time(&self) -> f32;

    fn should_close(&self) -> bool;
}

fn axis(input: &impl InputSurface, positive: Key, negative: Key) -> f32 {
    let mut value = 0.0;
    if input.is_key_pressed(positive) {
        value += 1.0;
    }
    if input.is_key_pressed(negative) {
        value -= 1.0;
    }
    value
}

/// Raw movement intent from the opposing key pairs.
///
/// `x` strafes (D / A), `y` is vertical (Space / LeftShift), `z` is forward
/// (W / S). Each component is -1, 0 or +1; the vector is not normalized.
pub fn movement_intent(input: &impl InputSurface) -> Vec3 {
    Vec3::new(
        axis(input, Key::D, Key::A),
        axis(input, Key::Space, Key::LeftShift),
        axis(input, Key::W, Key::S),
    )
}

/// Rising-edge detector for a held key.
///
/// Holding the key across many frames fires once; it fires again only after
/// the key has been released.
#[derive(Debug, Default)]
pub struct LockToggle {
    was_pressed: bool,
}

impl LockToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current key state. Returns `true` on the frame the key goes down.
    pub fn poll(&mut self, pressed: bool) -> bool {
        let fired = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        fired
    }
}
