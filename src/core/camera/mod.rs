pub(crate) mod components;
pub(crate) mod logic;
mod systems;

use crate::core::camera::components::*;
use crate::core::camera::systems::*;
use bevy::prelude::*;
use bevy::transform::TransformSystems;

pub(crate) struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<OrbitCamera>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, camera_control)
            .add_systems(PostUpdate, apply_orbit.before(TransformSystems::Propagate));
    }
}
