use bevy::math::{Vec2, Vec3};
use fluidcore::config::CameraConfig;
use std::f32::consts::PI;

/// Radians of orbit per pixel of mouse drag.
pub const ROTATE_SPEED: f32 = 0.005;
/// Radius change per scroll line, relative to the current radius.
pub const ZOOM_STEP: f32 = 0.1;

// Keep the polar angle off the poles so `looking_at` has a usable up vector
const MIN_BETA: f32 = 0.01;
const MAX_BETA: f32 = PI - 0.01;

/// Position on the orbit sphere. `alpha` turns around +Y, `beta` is measured from +Y.
pub fn orbit_translation(alpha: f32, beta: f32, radius: f32, target: Vec3) -> Vec3 {
    target
        + Vec3::new(
            radius * alpha.cos() * beta.sin(),
            radius * beta.cos(),
            radius * alpha.sin() * beta.sin(),
        )
}

/// Configured starting angles, with the polar angle kept off the poles.
pub fn home_angles(camera: &CameraConfig) -> (f32, f32) {
    (camera.alpha, camera.beta.clamp(MIN_BETA, MAX_BETA))
}

/// New orbit angles after dragging the mouse by `delta` pixels.
pub fn apply_drag(alpha: f32, beta: f32, delta: Vec2) -> (f32, f32) {
    let alpha = alpha - delta.x * ROTATE_SPEED;
    let beta = (beta - delta.y * ROTATE_SPEED).clamp(MIN_BETA, MAX_BETA);
    (alpha, beta)
}

/// Radius after scrolling `lines` (positive zooms in).
pub fn zoomed_radius(radius: f32, lines: f32) -> f32 {
    radius * (1.0 - lines * ZOOM_STEP).max(0.1)
}
