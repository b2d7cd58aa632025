use crate::surface::{CursorMode, InputSurface, Key};
use glam::{DVec2, UVec2};
use std::collections::HashSet;

/// In-memory input surface for headless runs.
///
/// Key state and cursor position are set directly; `center_cursor` snaps the
/// cursor to the framebuffer middle the way a real window would.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    keys: HashSet<Key>,
    cursor: DVec2,
    size: UVec2,
    cursor_mode: CursorMode,
    delta_time: f32,
    close_requested: bool,
    centered: usize,
}

impl ScriptedInput {
    /// Create a surface of the given framebuffer size with the cursor centered.
    pub fn new(size: UVec2) -> Self {
        Self {
            keys: HashSet::new(),
            cursor: size.as_dvec2() / 2.0,
            size,
            cursor_mode: CursorMode::Normal,
            delta_time: 0.0,
            close_requested: false,
            centered: 0,
        }
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.keys.clear();
    }

    pub fn set_cursor(&mut self, position: DVec2) {
        self.cursor = position;
    }

    /// Place the cursor at an offset from the framebuffer center.
    pub fn offset_cursor(&mut self, dx: f64, dy: f64) {
        self.cursor = self.center() + DVec2::new(dx, dy);
    }

    pub fn set_framebuffer_size(&mut self, size: UVec2) {
        self.size = size;
    }

    pub fn set_delta_time(&mut self, dt: f32) {
        self.delta_time = dt;
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    /// How many times the cursor has been recentered.
    pub fn center_count(&self) -> usize {
        self.centered
    }

    fn center(&self) -> DVec2 {
        self.size.as_dvec2() / 2.0
    }
}

impl InputSurface for ScriptedInput {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    fn cursor_position(&self) -> DVec2 {
        self.cursor
    }

    fn framebuffer_size(&self) -> UVec2 {
        self.size
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.cursor_mode = mode;
    }

    fn center_cursor(&mut self) {
        self.cursor = self.center();
        self.centered += 1;
    }

    fn delta_time(&self) -> f32 {
        self.delta_time
    }

    fn should_close(&self) -> bool {
        self.close_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_centered_with_normal_cursor() {
        let input = ScriptedInput::new(UVec2::new(800, 600));
        assert_eq!(input.cursor_position(), DVec2::new(400.0, 300.0));
        assert_eq!(input.cursor_mode(), CursorMode::Normal);
        assert!(!input.should_close());
    }

    #[test]
    fn center_cursor_follows_framebuffer_size() {
        let mut input = ScriptedInput::new(UVec2::new(800, 600));
        input.offset_cursor(25.0, -10.0);
        assert_eq!(input.cursor_position(), DVec2::new(425.0, 290.0));
        input.set_framebuffer_size(UVec2::new(1000, 500));
        input.center_cursor();
        assert_eq!(input.cursor_position(), DVec2::new(500.0, 250.0));
        assert_eq!(input.center_count(), 1);
    }

    #[test]
    fn released_keys_stop_reporting_pressed() {
        let mut input = ScriptedInput::new(UVec2::new(800, 600));
        input.press(Key::W);
        input.press(Key::Space);
        input.release(Key::W);
        assert!(!input.is_key_pressed(Key::W));
        assert!(input.is_key_pressed(Key::Space));

        input.press(Key::D);
        input.release_all();
        assert!(!input.is_key_pressed(Key::Space));
        assert!(!input.is_key_pressed(Key::D));
    }

    #[test]
    fn set_cursor_places_absolute_position() {
        let mut input = ScriptedInput::new(UVec2::new(800, 600));
        input.set_cursor(DVec2::new(12.5, 700.0));
        assert_eq!(input.cursor_position(), DVec2::new(12.5, 700.0));
    }

    #[test]
    fn frame_loop_stops_once_close_is_requested() {
        let mut input = ScriptedInput::new(UVec2::new(800, 600));
        let mut frames = 0;
        while !input.should_close() {
            frames += 1;
            if frames == 3 {
                input.request_close();
            }
        }
        assert_eq!(frames, 3);
    }
}
