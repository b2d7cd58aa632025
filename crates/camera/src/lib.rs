//! Free-fly camera driven by an [`blockview_input::InputSurface`].
//!
//! # Invariants
//! - Pitch stays within [-89°, 89°]; yaw stays within [0°, 360°).
//! - `front` is always unit length and derived from yaw and pitch alone.
//! - Position and orientation only change while the camera is locked; the
//!   matrix is recomputed every frame regardless.

mod camera;

pub use camera::{Camera, CameraSettings, CameraState, FAR_PLANE, NEAR_PLANE, PITCH_LIMIT};
