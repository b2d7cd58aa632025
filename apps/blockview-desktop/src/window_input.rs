use blockview_input::{CursorMode, InputSurface, Key};
use glam::{DVec2, UVec2};
use std::collections::HashSet;
use std::sync::Arc;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window};

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::Space => Key::Space,
        KeyCode::ShiftLeft => Key::LeftShift,
        KeyCode::KeyE => Key::E,
        KeyCode::Escape => Key::Escape,
        KeyCode::F1 => Key::F1,
        _ => return None,
    })
}

/// [`InputSurface`] fed from winit window events.
pub struct WindowInput {
    window: Arc<Window>,
    keys: HashSet<Key>,
    cursor: DVec2,
    size: UVec2,
    grab: CursorGrabMode,
    delta_time: f32,
    close_requested: bool,
}

impl WindowInput {
    pub fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();
        let size = UVec2::new(size.width, size.height);
        Self {
            window,
            keys: HashSet::new(),
            cursor: size.as_dvec2() / 2.0,
            size,
            grab: CursorGrabMode::None,
            delta_time: 0.0,
            close_requested: false,
        }
    }

    /// Track key, cursor and size changes. Returns the key when this event is
    /// a fresh press of it.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Option<Key> {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let key = map_key(*code)?;
                match state {
                    ElementState::Pressed => {
                        self.keys.insert(key);
                        (!repeat).then_some(key)
                    }
                    ElementState::Released => {
                        self.keys.remove(&key);
                        None
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = DVec2::new(position.x, position.y);
                None
            }
            WindowEvent::Resized(size) => {
                self.size = UVec2::new(size.width, size.height);
                None
            }
            WindowEvent::Focused(false) => {
                self.keys.clear();
                None
            }
            WindowEvent::CloseRequested => {
                self.close_requested = true;
                None
            }
            _ => None,
        }
    }

    /// Raw mouse motion. Only consulted while the pointer is locked in place,
    /// where no `CursorMoved` events arrive.
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        if self.grab == CursorGrabMode::Locked {
            self.cursor += DVec2::new(delta.0, delta.1);
        }
    }

    pub fn set_delta_time(&mut self, dt: f32) {
        self.delta_time = dt;
    }
}

impl InputSurface for WindowInput {
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
        match mode {
            CursorMode::Hidden => {
                self.grab = match self.window.set_cursor_grab(CursorGrabMode::Confined) {
                    Ok(()) => CursorGrabMode::Confined,
                    Err(_) => match self.window.set_cursor_grab(CursorGrabMode::Locked) {
                        Ok(()) => CursorGrabMode::Locked,
                        Err(e) => {
                            tracing::warn!("cursor grab unavailable: {e}");
                            CursorGrabMode::None
                        }
                    },
                };
                self.window.set_cursor_visible(false);
            }
            CursorMode::Normal => {
                if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
                    tracing::debug!("cursor release failed: {e}");
                }
                self.grab = CursorGrabMode::None;
                self.window.set_cursor_visible(true);
            }
        }
    }

    fn center_cursor(&mut self) {
        let center = self.size.as_dvec2() / 2.0;
        if self.grab != CursorGrabMode::Locked {
            if let Err(e) = self
                .window
                .set_cursor_position(PhysicalPosition::new(center.x, center.y))
            {
                tracing::debug!("cursor warp failed: {e}");
            }
        }
        // The warp's own CursorMoved may arrive late; start the next frame
        // from the center either way.
        self.cursor = center;
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
    fn movement_and_toggle_keys_are_mapped() {
        assert_eq!(map_key(KeyCode::KeyW), Some(Key::W));
        assert_eq!(map_key(KeyCode::ShiftLeft), Some(Key::LeftShift));
        assert_eq!(map_key(KeyCode::KeyE), Some(Key::E));
        assert_eq!(map_key(KeyCode::F1), Some(Key::F1));
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        assert_eq!(map_key(KeyCode::KeyQ), None);
        assert_eq!(map_key(KeyCode::ShiftRight), None);
        assert_eq!(map_key(KeyCode::ControlLeft), None);
    }
}
