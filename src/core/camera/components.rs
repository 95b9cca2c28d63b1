use bevy::prelude::*;

/// Camera orbiting `target`. The render surface sets `radius` and puts the angles
/// back home when a scenario starts.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub(crate) struct OrbitCamera {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vec3,
}
