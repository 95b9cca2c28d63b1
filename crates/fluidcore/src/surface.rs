// Seam between the mapping engine and whatever draws the scene

use crate::config::EmitterConfig;
use crate::controls::Substance;
use glam::Vec3;
use std::collections::HashMap;

/// Opaque id of a mesh created by a [`RenderSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Opaque id of a particle emitter created by a [`RenderSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmitterHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    Box { size: Vec3 },
    Cylinder { height: f32, diameter: f32 },
    Sphere { diameter: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshSpec {
    pub name: &'static str,
    pub shape: MeshShape,
    /// Linear RGBA, alpha below 1 means blended.
    pub color: [f32; 4],
    /// Draw only the edges.
    pub wireframe: bool,
    pub position: Vec3,
}

/// Everything needed to create an emitter. Fields the session drives per frame
/// (bounds, rate, power, size, gravity) are only starting values.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterSpec {
    pub name: &'static str,
    pub capacity: u32,
    pub emit_rate: f32,
    pub size_range: (f32, f32),
    pub lifetime_range: (f32, f32),
    pub power_range: (f32, f32),
    pub direction1: Vec3,
    pub direction2: Vec3,
    pub gravity: Vec3,
    pub color1: [f32; 4],
    pub color2: [f32; 4],
    pub position: Vec3,
    pub emit_min: Vec3,
    pub emit_max: Vec3,
}

impl EmitterSpec {
    pub fn from_config(name: &'static str, config: &EmitterConfig, position: Vec3) -> Self {
        Self {
            name,
            capacity: config.capacity,
            emit_rate: config.emit_rate,
            size_range: (config.min_size, config.max_size),
            lifetime_range: (config.min_lifetime, config.max_lifetime),
            power_range: (config.min_power, config.max_power),
            direction1: config.direction1,
            direction2: config.direction2,
            gravity: config.gravity,
            color1: config.color1,
            color2: config.color2,
            position,
            emit_min: Vec3::ZERO,
            emit_max: Vec3::ZERO,
        }
    }

    pub fn with_emit_box(mut self, min: Vec3, max: Vec3) -> Self {
        self.emit_min = min;
        self.emit_max = max;
        self
    }
}

/// Drawing backend the session writes into. It never reads anything back.
///
/// Calls with a handle the surface no longer knows about must be ignored.
pub trait RenderSurface {
    fn create_mesh(&mut self, spec: MeshSpec) -> MeshHandle;

    fn create_box(&mut self, name: &'static str, size: Vec3, color: [f32; 4]) -> MeshHandle {
        self.create_mesh(MeshSpec {
            name,
            shape: MeshShape::Box { size },
            color,
            wireframe: false,
            position: Vec3::ZERO,
        })
    }

    fn create_particle_emitter(&mut self, spec: EmitterSpec) -> EmitterHandle;

    fn set_scale(&mut self, mesh: MeshHandle, scale: Vec3);
    fn set_position(&mut self, mesh: MeshHandle, position: Vec3);

    /// Particles spawn uniformly inside `min..max`, relative to the emitter position.
    fn set_emit_bounds(&mut self, emitter: EmitterHandle, min: Vec3, max: Vec3);
    fn set_emit_rate(&mut self, emitter: EmitterHandle, per_second: f32);
    fn set_emit_power_range(&mut self, emitter: EmitterHandle, min: f32, max: f32);
    fn set_particle_size_range(&mut self, emitter: EmitterHandle, min: f32, max: f32);
    fn set_emitter_gravity(&mut self, emitter: EmitterHandle, gravity: Vec3);
    /// Multiplier on how fast particles age and move.
    fn set_emitter_speed_scale(&mut self, emitter: EmitterHandle, scale: f32);

    fn set_camera_radius(&mut self, radius: f32);
}

/// Logical meshes of the three scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneMesh {
    Container,
    Liquid,
    LiquidContainer,
    Water,
    GasContainer,
    Tube(Substance),
    Drop(Substance),
}

impl SceneMesh {
    pub fn name(self) -> &'static str {
        match self {
            SceneMesh::Container => "container",
            SceneMesh::Liquid => "liquid",
            SceneMesh::LiquidContainer => "liquidContainer",
            SceneMesh::Water => "water",
            SceneMesh::GasContainer => "gasContainer",
            SceneMesh::Tube(Substance::Oil) => "oilTube",
            SceneMesh::Tube(Substance::Water) => "waterTube",
            SceneMesh::Drop(Substance::Oil) => "oilDrop",
            SceneMesh::Drop(Substance::Water) => "waterDrop",
        }
    }
}

/// Logical particle emitters of the three scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneEmitter {
    Gas,
    ThermalLiquid,
    ThermalGas,
    Flow(Substance),
}

impl SceneEmitter {
    pub fn name(self) -> &'static str {
        match self {
            SceneEmitter::Gas => "gasEmitter",
            SceneEmitter::ThermalLiquid => "liquidParticles",
            SceneEmitter::ThermalGas => "gasParticles",
            SceneEmitter::Flow(Substance::Oil) => "oilParticles",
            SceneEmitter::Flow(Substance::Water) => "waterParticles",
        }
    }
}

/// Which surface handle backs each logical scene object.
///
/// Filled once when the scene is built; the owner of the surface keeps it and
/// lends it to every tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandleTable {
    meshes: HashMap<SceneMesh, MeshHandle>,
    emitters: HashMap<SceneEmitter, EmitterHandle>,
}

impl HandleTable {
    pub fn insert_mesh(&mut self, key: SceneMesh, handle: MeshHandle) {
        self.meshes.insert(key, handle);
    }

    pub fn insert_emitter(&mut self, key: SceneEmitter, handle: EmitterHandle) {
        self.emitters.insert(key, handle);
    }

    pub fn mesh(&self, key: SceneMesh) -> Option<MeshHandle> {
        let handle = self.meshes.get(&key).copied();
        if handle.is_none() {
            log::debug!("No mesh registered for {}", key.name());
        }
        handle
    }

    pub fn emitter(&self, key: SceneEmitter) -> Option<EmitterHandle> {
        let handle = self.emitters.get(&key).copied();
        if handle.is_none() {
            log::debug!("No emitter registered for {}", key.name());
        }
        handle
    }

    pub fn len(&self) -> usize {
        self.meshes.len() + self.emitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Surface that only records what it was asked to do.
#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum SurfaceCall {
        CreateMesh(MeshSpec),
        CreateEmitter(EmitterSpec),
        Scale(MeshHandle, Vec3),
        Position(MeshHandle, Vec3),
        EmitBounds(EmitterHandle, Vec3, Vec3),
        EmitRate(EmitterHandle, f32),
        PowerRange(EmitterHandle, f32, f32),
        SizeRange(EmitterHandle, f32, f32),
        Gravity(EmitterHandle, Vec3),
        SpeedScale(EmitterHandle, f32),
        CameraRadius(f32),
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<SurfaceCall>,
        next_id: u64,
    }

    impl RecordingSurface {
        pub fn take(&mut self) -> Vec<SurfaceCall> {
            std::mem::take(&mut self.calls)
        }

        fn next(&mut self) -> u64 {
            self.next_id += 1;
            self.next_id
        }
    }

    impl RenderSurface for RecordingSurface {
        fn create_mesh(&mut self, spec: MeshSpec) -> MeshHandle {
            self.calls.push(SurfaceCall::CreateMesh(spec));
            MeshHandle(self.next())
        }

        fn create_particle_emitter(&mut self, spec: EmitterSpec) -> EmitterHandle {
            self.calls.push(SurfaceCall::CreateEmitter(spec));
            EmitterHandle(self.next())
        }

        fn set_scale(&mut self, mesh: MeshHandle, scale: Vec3) {
            self.calls.push(SurfaceCall::Scale(mesh, scale));
        }

        fn set_position(&mut self, mesh: MeshHandle, position: Vec3) {
            self.calls.push(SurfaceCall::Position(mesh, position));
        }

        fn set_emit_bounds(&mut self, emitter: EmitterHandle, min: Vec3, max: Vec3) {
            self.calls.push(SurfaceCall::EmitBounds(emitter, min, max));
        }

        fn set_emit_rate(&mut self, emitter: EmitterHandle, per_second: f32) {
            self.calls.push(SurfaceCall::EmitRate(emitter, per_second));
        }

        fn set_emit_power_range(&mut self, emitter: EmitterHandle, min: f32, max: f32) {
            self.calls.push(SurfaceCall::PowerRange(emitter, min, max));
        }

        fn set_particle_size_range(&mut self, emitter: EmitterHandle, min: f32, max: f32) {
            self.calls.push(SurfaceCall::SizeRange(emitter, min, max));
        }

        fn set_emitter_gravity(&mut self, emitter: EmitterHandle, gravity: Vec3) {
            self.calls.push(SurfaceCall::Gravity(emitter, gravity));
        }

        fn set_emitter_speed_scale(&mut self, emitter: EmitterHandle, scale: f32) {
            self.calls.push(SurfaceCall::SpeedScale(emitter, scale));
        }

        fn set_camera_radius(&mut self, radius: f32) {
            self.calls.push(SurfaceCall::CameraRadius(radius));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recording::{RecordingSurface, SurfaceCall};
    use super::*;

    #[test]
    fn create_box_is_a_solid_box_at_origin() {
        let mut surface = RecordingSurface::default();
        let handle = surface.create_box("liquid", Vec3::new(4.5, 4.0, 4.5), [0.0; 4]);

        assert_eq!(handle, MeshHandle(1));
        let [SurfaceCall::CreateMesh(spec)] = surface.calls.as_slice() else {
            panic!("unexpected calls {:?}", surface.calls);
        };
        assert_eq!(spec.shape, MeshShape::Box { size: Vec3::new(4.5, 4.0, 4.5) });
        assert!(!spec.wireframe);
        assert_eq!(spec.position, Vec3::ZERO);
    }

    #[test]
    fn emitter_spec_copies_config() {
        let config = EmitterConfig {
            capacity: 42,
            min_size: 0.5,
            max_size: 0.7,
            ..EmitterConfig::default()
        };
        let spec = EmitterSpec::from_config("test", &config, Vec3::X)
            .with_emit_box(-Vec3::ONE, Vec3::ONE);

        assert_eq!(spec.capacity, 42);
        assert_eq!(spec.size_range, (0.5, 0.7));
        assert_eq!(spec.position, Vec3::X);
        assert_eq!(spec.emit_max, Vec3::ONE);
    }

    #[test]
    fn handle_table_lookup() {
        let mut table = HandleTable::default();
        assert!(table.is_empty());

        table.insert_mesh(SceneMesh::Drop(Substance::Water), MeshHandle(3));
        table.insert_emitter(SceneEmitter::Gas, EmitterHandle(4));

        assert_eq!(table.mesh(SceneMesh::Drop(Substance::Water)), Some(MeshHandle(3)));
        assert_eq!(table.mesh(SceneMesh::Drop(Substance::Oil)), None);
        assert_eq!(table.emitter(SceneEmitter::Gas), Some(EmitterHandle(4)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn scene_names_are_unique() {
        let meshes = [
            SceneMesh::Container,
            SceneMesh::Liquid,
            SceneMesh::LiquidContainer,
            SceneMesh::Water,
            SceneMesh::GasContainer,
            SceneMesh::Tube(Substance::Oil),
            SceneMesh::Tube(Substance::Water),
            SceneMesh::Drop(Substance::Oil),
            SceneMesh::Drop(Substance::Water),
        ];
        let mut names: Vec<_> = meshes.iter().map(|m| m.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), meshes.len());
    }
}
