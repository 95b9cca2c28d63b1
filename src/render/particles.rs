// CPU particle emitters: every particle is a small sphere entity parented to its emitter

use bevy::prelude::*;
use fluidcore::surface::EmitterSpec;
use rand::Rng;

/// Particle source. Particles spawn inside `emit_min..emit_max` relative to the
/// emitter transform.
#[derive(Component, Debug)]
pub(crate) struct ParticleEmitter {
    pub capacity: u32,
    pub emit_rate: f32,
    pub emit_min: Vec3,
    pub emit_max: Vec3,
    pub size_range: (f32, f32),
    pub lifetime_range: (f32, f32),
    pub power_range: (f32, f32),
    pub direction1: Vec3,
    pub direction2: Vec3,
    pub gravity: Vec3,
    /// Scales particle ageing and motion, 1 is real time.
    pub speed_scale: f32,
    live: u32,
    // Fractional particles carried over between frames
    pending: f32,
    mesh: Handle<Mesh>,
    materials: [Handle<StandardMaterial>; 2],
}

impl ParticleEmitter {
    pub(crate) fn new(
        spec: &EmitterSpec,
        mesh: Handle<Mesh>,
        materials: [Handle<StandardMaterial>; 2],
    ) -> Self {
        Self {
            capacity: spec.capacity,
            emit_rate: spec.emit_rate,
            emit_min: spec.emit_min,
            emit_max: spec.emit_max,
            size_range: spec.size_range,
            lifetime_range: spec.lifetime_range,
            power_range: spec.power_range,
            direction1: spec.direction1,
            direction2: spec.direction2,
            gravity: spec.gravity,
            speed_scale: 1.0,
            live: 0,
            pending: 0.0,
            mesh,
            materials,
        }
    }

    /// How many particles to spawn this frame, respecting the capacity.
    fn take_spawn_count(&mut self, dt: f32) -> u32 {
        self.pending += self.emit_rate.max(0.0) * dt;
        let wanted = self.pending.floor();
        self.pending -= wanted;
        let free = self.capacity.saturating_sub(self.live);
        (wanted as u32).min(free)
    }
}

#[derive(Component, Debug)]
pub(crate) struct Particle {
    pub emitter: Entity,
    pub velocity: Vec3,
    pub age: f32,
    pub lifetime: f32,
}

/// Uniform sample in `[a, b]` that tolerates `a == b` and swapped ends.
fn random_between(rng: &mut impl Rng, a: f32, b: f32) -> f32 {
    a + (b - a) * rng.random::<f32>()
}

fn random_in_box(rng: &mut impl Rng, min: Vec3, max: Vec3) -> Vec3 {
    Vec3::new(
        random_between(rng, min.x, max.x),
        random_between(rng, min.y, max.y),
        random_between(rng, min.z, max.z),
    )
}

pub fn emit_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut emitters: Query<(Entity, &mut ParticleEmitter)>,
) {
    let dt = time.delta_secs();
    let mut rng = rand::rng();

    for (entity, mut emitter) in &mut emitters {
        let count = emitter.take_spawn_count(dt);
        if count == 0 {
            continue;
        }
        emitter.live += count;

        commands.entity(entity).with_children(|parent| {
            for _ in 0..count {
                let position = random_in_box(&mut rng, emitter.emit_min, emitter.emit_max);
                let direction = random_in_box(&mut rng, emitter.direction1, emitter.direction2);
                let power = random_between(&mut rng, emitter.power_range.0, emitter.power_range.1);
                let size = random_between(&mut rng, emitter.size_range.0, emitter.size_range.1);
                let lifetime =
                    random_between(&mut rng, emitter.lifetime_range.0, emitter.lifetime_range.1);
                let material = emitter.materials[rng.random_range(0..2)].clone();

                parent.spawn((
                    Mesh3d(emitter.mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_translation(position).with_scale(Vec3::splat(size.max(0.0))),
                    Particle {
                        emitter: entity,
                        velocity: direction * power,
                        age: 0.0,
                        lifetime,
                    },
                ));
            }
        });
    }
}

/// Age, move and retire particles, all on their emitter's time scale.
pub fn update_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut particles: Query<(Entity, &mut Transform, &mut Particle)>,
    mut emitters: Query<&mut ParticleEmitter>,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, mut particle) in &mut particles {
        let Ok(mut emitter) = emitters.get_mut(particle.emitter) else {
            continue;
        };
        let dt = delta * emitter.speed_scale;
        particle.age += dt;

        if particle.age >= particle.lifetime {
            emitter.live = emitter.live.saturating_sub(1);
            commands.entity(entity).despawn();
            continue;
        }

        let gravity = emitter.gravity;
        particle.velocity += gravity * dt;
        transform.translation += particle.velocity * dt;
    }
}
