//! Input surface: the window-side collaborator the camera and frame loop read from.
//!
//! # Invariants
//! - Consumers only see key state, cursor position and framebuffer size through
//!   [`InputSurface`]; no windowing crate leaks into the camera.
//! - Resize notifications carry their context explicitly. There is no global state.

mod clock;
mod resize;
mod scripted;
mod surface;

pub use clock::FrameClock;
pub use resize::{ResizeCallback, ResizeDispatch};
pub use scripted::ScriptedInput;
pub use surface::{CursorMode, InputSurface, Key, LockToggle, movement_intent};
