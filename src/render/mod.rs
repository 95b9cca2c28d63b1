pub(crate) mod particles;
pub(crate) mod surface;

use crate::render::particles::*;
use crate::render::surface::SurfaceRegistry;
use bevy::prelude::*;

pub(crate) struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceRegistry>()
            .add_systems(Update, (emit_particles, update_particles).chain());
    }
}
