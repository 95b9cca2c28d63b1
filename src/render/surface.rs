// Bevy side of the render surface: turns session calls into entities and component writes

use crate::core::camera::components::OrbitCamera;
use crate::core::camera::logic::home_angles;
use crate::helpers::mesh::box_edges_mesh;
use crate::render::particles::ParticleEmitter;
use crate::simulation::ScenarioEntity;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use fluidcore::config::CameraConfig;
use fluidcore::surface::{EmitterHandle, EmitterSpec, MeshHandle, MeshShape, MeshSpec, RenderSurface};

/// Entities created through the surface, indexed by handle id.
#[derive(Resource, Default, Debug)]
pub(crate) struct SurfaceRegistry {
    entities: Vec<Entity>,
}

impl SurfaceRegistry {
    fn register(&mut self, entity: Entity) -> u64 {
        self.entities.push(entity);
        (self.entities.len() - 1) as u64
    }

    fn get(&self, id: u64) -> Option<Entity> {
        let entity = usize::try_from(id).ok().and_then(|i| self.entities.get(i)).copied();
        if entity.is_none() {
            debug!("Ignoring stale surface handle {id}");
        }
        entity
    }

    pub(crate) fn clear(&mut self) {
        self.entities.clear();
    }
}

fn color(rgba: [f32; 4]) -> Color {
    Color::srgba(rgba[0], rgba[1], rgba[2], rgba[3])
}

fn material(rgba: [f32; 4], unlit: bool) -> StandardMaterial {
    StandardMaterial {
        base_color: color(rgba),
        alpha_mode: if rgba[3] < 1.0 {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        unlit,
        ..default()
    }
}

#[derive(SystemParam)]
pub(crate) struct BevySurface<'w, 's> {
    pub commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    registry: ResMut<'w, SurfaceRegistry>,
    transforms: Query<'w, 's, &'static mut Transform, With<ScenarioEntity>>,
    emitters: Query<'w, 's, &'static mut ParticleEmitter>,
    cameras: Query<'w, 's, &'static mut OrbitCamera>,
}

impl BevySurface<'_, '_> {
    fn transform(&mut self, mesh: MeshHandle) -> Option<Mut<'_, Transform>> {
        let entity = self.registry.get(mesh.0)?;
        self.transforms.get_mut(entity).ok()
    }

    fn emitter(&mut self, emitter: EmitterHandle) -> Option<Mut<'_, ParticleEmitter>> {
        let entity = self.registry.get(emitter.0)?;
        self.emitters.get_mut(entity).ok()
    }

    /// Undo any orbiting left over from the previous scenario. The radius is the
    /// session's zoom and is pushed on the first tick.
    pub(crate) fn reset_orbit(&mut self, camera: &CameraConfig) {
        let (alpha, beta) = home_angles(camera);
        for mut orbit in &mut self.cameras {
            orbit.alpha = alpha;
            orbit.beta = beta;
        }
    }
}

impl RenderSurface for BevySurface<'_, '_> {
    fn create_mesh(&mut self, spec: MeshSpec) -> MeshHandle {
        let mesh = match spec.shape {
            MeshShape::Box { size } if spec.wireframe => box_edges_mesh(size),
            MeshShape::Box { size } => Cuboid::new(size.x, size.y, size.z).into(),
            MeshShape::Cylinder { height, diameter } => Cylinder::new(diameter / 2.0, height).into(),
            MeshShape::Sphere { diameter } => Sphere::new(diameter / 2.0).mesh().uv(32, 18),
        };
        let mesh = self.meshes.add(mesh);
        let material = self.materials.add(material(spec.color, spec.wireframe));

        let entity = self
            .commands
            .spawn((
                Name::new(spec.name),
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(spec.position),
                ScenarioEntity,
            ))
            .id();
        MeshHandle(self.registry.register(entity))
    }

    fn create_particle_emitter(&mut self, spec: EmitterSpec) -> EmitterHandle {
        let mesh = self.meshes.add(Sphere::new(0.5).mesh().uv(8, 6));
        let materials = [
            self.materials.add(material(spec.color1, true)),
            self.materials.add(material(spec.color2, true)),
        ];

        let entity = self
            .commands
            .spawn((
                Name::new(spec.name),
                Transform::from_translation(spec.position),
                Visibility::default(),
                ParticleEmitter::new(&spec, mesh, materials),
                ScenarioEntity,
            ))
            .id();
        EmitterHandle(self.registry.register(entity))
    }

    fn set_scale(&mut self, mesh: MeshHandle, scale: Vec3) {
        if let Some(mut transform) = self.transform(mesh) {
            transform.scale = scale;
        }
    }

    fn set_position(&mut self, mesh: MeshHandle, position: Vec3) {
        if let Some(mut transform) = self.transform(mesh) {
            transform.translation = position;
        }
    }

    fn set_emit_bounds(&mut self, emitter: EmitterHandle, min: Vec3, max: Vec3) {
        if let Some(mut emitter) = self.emitter(emitter) {
            emitter.emit_min = min;
            emitter.emit_max = max;
        }
    }

    fn set_emit_rate(&mut self, emitter: EmitterHandle, per_second: f32) {
        if let Some(mut emitter) = self.emitter(emitter) {
            emitter.emit_rate = per_second;
        }
    }

    fn set_emit_power_range(&mut self, emitter: EmitterHandle, min: f32, max: f32) {
        if let Some(mut emitter) = self.emitter(emitter) {
            emitter.power_range = (min, max);
        }
    }

    fn set_particle_size_range(&mut self, emitter: EmitterHandle, min: f32, max: f32) {
        if let Some(mut emitter) = self.emitter(emitter) {
            emitter.size_range = (min, max);
        }
    }

    fn set_emitter_gravity(&mut self, emitter: EmitterHandle, gravity: Vec3) {
        if let Some(mut emitter) = self.emitter(emitter) {
            emitter.gravity = gravity;
        }
    }

    fn set_emitter_speed_scale(&mut self, emitter: EmitterHandle, scale: f32) {
        if let Some(mut emitter) = self.emitter(emitter) {
            emitter.speed_scale = scale;
        }
    }

    fn set_camera_radius(&mut self, radius: f32) {
        for mut orbit in &mut self.cameras {
            orbit.radius = radius;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

    #[test]
    fn reset_orbit_restores_configured_angles() {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        world.init_resource::<SurfaceRegistry>();
        let camera = world
            .spawn(OrbitCamera {
                alpha: 3.0,
                beta: 0.2,
                radius: 40.0,
                target: Vec3::ZERO,
            })
            .id();

        world
            .run_system_once(|mut surface: BevySurface| {
                surface.reset_orbit(&CameraConfig::default());
            })
            .unwrap();

        let orbit = world.get::<OrbitCamera>(camera).unwrap();
        assert_eq!(orbit.alpha, FRAC_PI_2);
        assert_eq!(orbit.beta, FRAC_PI_3);
        assert_eq!(orbit.radius, 40.0);
    }

    #[test]
    fn registry_hands_out_sequential_ids() {
        let mut registry = SurfaceRegistry::default();
        let a = Entity::PLACEHOLDER;
        assert_eq!(registry.register(a), 0);
        assert_eq!(registry.register(a), 1);
        assert_eq!(registry.get(1), Some(a));
        assert_eq!(registry.get(2), None);

        registry.clear();
        assert_eq!(registry.get(0), None);
    }
}
