// One running scenario: control state, dirty tracking, scene building and the per-frame tick

use crate::config::FluidLabConfig;
use crate::controls::{ContainerKind, Scenario, ScalarControlState, Substance};
use crate::drop::{DROP_TOP, DropState};
use crate::surface::{
    EmitterSpec, HandleTable, MeshShape, MeshSpec, RenderSurface, SceneEmitter, SceneMesh,
};
use crate::thermal::{compute_motion_params, thermal_layout};
use crate::viscosity::{compute_viscosity, flow_params};
use crate::volume::{BASE_CONTAINER_SIZE, BASE_LIQUID_HEIGHT, compute_geometry};
use glam::Vec3;

/// Derived-parameter groups that must be pushed to the surface on the next tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DirtyGroups {
    camera: bool,
    geometry: bool,
    liquid_motion: bool,
    gas_motion: bool,
    flow: bool,
}

impl DirtyGroups {
    fn all() -> Self {
        Self {
            camera: true,
            geometry: true,
            liquid_motion: true,
            gas_motion: true,
            flow: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Drops {
    oil: DropState,
    water: DropState,
}

impl Drops {
    fn get_mut(&mut self, substance: Substance) -> &mut DropState {
        match substance {
            Substance::Oil => &mut self.oil,
            Substance::Water => &mut self.water,
        }
    }

    fn get(&self, substance: Substance) -> DropState {
        match substance {
            Substance::Oil => self.oil,
            Substance::Water => self.water,
        }
    }
}

/// State of the scenario currently on screen.
///
/// UI code calls the setters; the host calls [`SimulationSession::build_scene`]
/// once and then [`SimulationSession::tick`] every frame.
#[derive(Debug, Clone)]
pub struct SimulationSession {
    config: FluidLabConfig,
    controls: ScalarControlState,
    dirty: DirtyGroups,
    drops: Drops,
}

impl SimulationSession {
    pub fn new(scenario: Scenario, config: FluidLabConfig) -> Self {
        let controls = ScalarControlState::new(scenario, &config);
        Self {
            config,
            controls,
            dirty: DirtyGroups::all(),
            drops: Drops::default(),
        }
    }

    pub fn scenario(&self) -> Scenario {
        self.controls.scenario()
    }

    pub fn controls(&self) -> &ScalarControlState {
        &self.controls
    }

    pub fn set_container_size(&mut self, size: f32) {
        if self.controls.set_container_size(size) {
            self.dirty.geometry = true;
        }
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        if self.controls.set_zoom(zoom) {
            self.dirty.camera = true;
        }
    }

    pub fn advance_step(&mut self) {
        match self.controls.advance_step() {
            Some(transition) => {
                log::debug!("Volume step advanced to {:?}", transition.next);
                self.dirty.geometry = true;
            }
            None => log::debug!("Already on the last volume step"),
        }
    }

    pub fn reset_simulation(&mut self) {
        self.controls.reset_simulation();
        self.dirty.geometry = true;
    }

    pub fn set_temperature(&mut self, substance: Substance, celsius: f32) {
        if self.controls.set_temperature(substance, celsius) {
            self.dirty.flow = true;
        }
    }

    pub fn set_temperature_level(&mut self, kind: ContainerKind, level: i32) {
        if self.controls.set_temperature_level(kind, level) {
            match kind {
                ContainerKind::Liquid => self.dirty.liquid_motion = true,
                ContainerKind::Gas => self.dirty.gas_motion = true,
            }
        }
    }

    pub fn set_liquid_fill(&mut self, fill: f32) {
        if self.controls.set_liquid_fill(fill) {
            self.dirty.geometry = true;
        }
    }

    pub fn set_gas_size(&mut self, size: f32) {
        if self.controls.set_gas_size(size) {
            self.dirty.geometry = true;
            self.dirty.gas_motion = true;
        }
    }

    /// Only changes which tube the UI highlights.
    pub fn select_tube(&mut self, substance: Substance) {
        self.controls.select_tube(substance);
    }

    pub fn step_caption(&self) -> &'static str {
        self.controls.step().caption()
    }

    pub fn viscosity(&self, substance: Substance) -> f32 {
        compute_viscosity(substance, self.controls.temperature(substance))
    }

    pub fn drop_position(&self, substance: Substance) -> f32 {
        self.drops.get(substance).position()
    }

    /// Create every mesh and emitter of the scenario and mark everything dirty,
    /// so the first tick pushes the full state.
    pub fn build_scene(&mut self, surface: &mut impl RenderSurface) -> HandleTable {
        let mut table = HandleTable::default();
        match self.scenario() {
            Scenario::Fluids => self.build_fluids(surface, &mut table),
            Scenario::Thermal => self.build_thermal(surface, &mut table),
            Scenario::Viscosity => self.build_viscosity(surface, &mut table),
        }
        self.dirty = DirtyGroups::all();
        self.drops = Drops::default();
        log::info!(
            "Built {:?} scene with {} surface objects",
            self.scenario(),
            table.len()
        );
        table
    }

    fn build_fluids(&self, surface: &mut impl RenderSurface, table: &mut HandleTable) {
        let volume = &self.config.volume;

        let container = surface.create_mesh(MeshSpec {
            name: SceneMesh::Container.name(),
            shape: MeshShape::Box {
                size: Vec3::splat(BASE_CONTAINER_SIZE),
            },
            color: volume.container_color,
            wireframe: true,
            position: Vec3::ZERO,
        });
        table.insert_mesh(SceneMesh::Container, container);

        let footprint = volume.liquid_footprint;
        let liquid = surface.create_box(
            SceneMesh::Liquid.name(),
            Vec3::new(footprint, BASE_LIQUID_HEIGHT, footprint),
            volume.liquid_color,
        );
        table.insert_mesh(SceneMesh::Liquid, liquid);

        let gas = surface.create_particle_emitter(EmitterSpec::from_config(
            SceneEmitter::Gas.name(),
            &volume.gas,
            Vec3::ZERO,
        ));
        table.insert_emitter(SceneEmitter::Gas, gas);
    }

    fn build_thermal(&self, surface: &mut impl RenderSurface, table: &mut HandleTable) {
        let thermal = &self.config.thermal;
        let edge = Vec3::splat(thermal.container_edge);
        let liquid_at = Vec3::new(thermal.liquid_container_x, 0.0, 0.0);
        let gas_at = Vec3::new(thermal.gas_container_x, 0.0, 0.0);

        let containers = [
            (SceneMesh::LiquidContainer, liquid_at),
            (SceneMesh::GasContainer, gas_at),
        ];
        for (key, position) in containers {
            let handle = surface.create_mesh(MeshSpec {
                name: key.name(),
                shape: MeshShape::Box { size: edge },
                color: thermal.container_color,
                wireframe: true,
                position,
            });
            table.insert_mesh(key, handle);
        }

        let water = surface.create_mesh(MeshSpec {
            name: SceneMesh::Water.name(),
            shape: MeshShape::Box { size: edge },
            color: thermal.water_color,
            wireframe: false,
            position: liquid_at,
        });
        table.insert_mesh(SceneMesh::Water, water);

        let emitters = [
            (SceneEmitter::ThermalLiquid, &thermal.liquid, liquid_at),
            (SceneEmitter::ThermalGas, &thermal.gas, gas_at),
        ];
        for (key, config, position) in emitters {
            let handle =
                surface.create_particle_emitter(EmitterSpec::from_config(key.name(), config, position));
            table.insert_emitter(key, handle);
        }
    }

    fn build_viscosity(&self, surface: &mut impl RenderSurface, table: &mut HandleTable) {
        let viscosity = &self.config.viscosity;

        for substance in Substance::ALL {
            let (x, tube_color, drop_color, flow) = match substance {
                Substance::Oil => (
                    viscosity.oil_x,
                    viscosity.oil_tube_color,
                    viscosity.oil_drop_color,
                    &viscosity.oil,
                ),
                Substance::Water => (
                    viscosity.water_x,
                    viscosity.water_tube_color,
                    viscosity.water_drop_color,
                    &viscosity.water,
                ),
            };

            let tube = surface.create_mesh(MeshSpec {
                name: SceneMesh::Tube(substance).name(),
                shape: MeshShape::Cylinder {
                    height: viscosity.tube_height,
                    diameter: viscosity.tube_diameter,
                },
                color: tube_color,
                wireframe: false,
                position: Vec3::new(x, 0.0, 0.0),
            });
            table.insert_mesh(SceneMesh::Tube(substance), tube);

            let drop = surface.create_mesh(MeshSpec {
                name: SceneMesh::Drop(substance).name(),
                shape: MeshShape::Sphere {
                    diameter: viscosity.drop_diameter,
                },
                color: drop_color,
                wireframe: false,
                position: Vec3::new(x, DROP_TOP, 0.0),
            });
            table.insert_mesh(SceneMesh::Drop(substance), drop);

            let half = viscosity.emit_half_extent;
            let spec = EmitterSpec::from_config(
                SceneEmitter::Flow(substance).name(),
                flow,
                Vec3::new(x, 0.0, 0.0),
            )
            .with_emit_box(-half, half);
            let emitter = surface.create_particle_emitter(spec);
            table.insert_emitter(SceneEmitter::Flow(substance), emitter);
        }
    }

    /// Push every dirty group to the surface, then advance the drops.
    pub fn tick(&mut self, dt: f32, table: &HandleTable, surface: &mut impl RenderSurface) {
        let dirty = std::mem::take(&mut self.dirty);

        if dirty.camera {
            surface.set_camera_radius(self.controls.zoom_level());
        }

        match self.scenario() {
            Scenario::Fluids => {
                if dirty.geometry {
                    self.apply_volume_geometry(table, surface);
                }
            }
            Scenario::Thermal => {
                if dirty.geometry {
                    self.apply_thermal_layout(table, surface);
                }
                if dirty.liquid_motion {
                    self.apply_motion(ContainerKind::Liquid, table, surface);
                }
                if dirty.gas_motion {
                    self.apply_motion(ContainerKind::Gas, table, surface);
                }
            }
            Scenario::Viscosity => {
                if dirty.flow {
                    self.apply_flow(table, surface);
                }
                self.advance_drops(dt, table, surface);
            }
        }
    }

    fn apply_volume_geometry(&self, table: &HandleTable, surface: &mut impl RenderSurface) {
        let geometry = compute_geometry(
            self.controls.container_size(),
            self.controls.step().liquid_height(),
        );

        if let Some(container) = table.mesh(SceneMesh::Container) {
            surface.set_scale(container, geometry.container_scale);
        }
        if let Some(liquid) = table.mesh(SceneMesh::Liquid) {
            surface.set_scale(liquid, geometry.liquid_scale);
            surface.set_position(liquid, Vec3::new(0.0, geometry.liquid_offset_y, 0.0));
        }
        if let Some(gas) = table.emitter(SceneEmitter::Gas) {
            surface.set_emit_bounds(gas, geometry.emit_box_min, geometry.emit_box_max);
        }
    }

    fn apply_thermal_layout(&self, table: &HandleTable, surface: &mut impl RenderSurface) {
        let layout = thermal_layout(
            self.controls.liquid_fill(),
            self.controls.gas_size(),
            &self.config.thermal,
        );

        for key in [SceneMesh::LiquidContainer, SceneMesh::Water] {
            if let Some(mesh) = table.mesh(key) {
                surface.set_scale(mesh, layout.liquid_scale);
            }
        }
        if let Some(gas) = table.mesh(SceneMesh::GasContainer) {
            surface.set_scale(gas, layout.gas_scale);
        }
        if let Some(emitter) = table.emitter(SceneEmitter::ThermalLiquid) {
            surface.set_emit_bounds(emitter, layout.liquid_emit_min, layout.liquid_emit_max);
        }
        if let Some(emitter) = table.emitter(SceneEmitter::ThermalGas) {
            surface.set_emit_bounds(emitter, layout.gas_emit_min, layout.gas_emit_max);
        }
    }

    fn apply_motion(&self, kind: ContainerKind, table: &HandleTable, surface: &mut impl RenderSurface) {
        let (key, container_size, base) = match kind {
            ContainerKind::Liquid => (SceneEmitter::ThermalLiquid, 1.0, &self.config.thermal.liquid),
            ContainerKind::Gas => (
                SceneEmitter::ThermalGas,
                self.controls.gas_size(),
                &self.config.thermal.gas,
            ),
        };
        let level = self.controls.temperature_level(kind) as f32;
        let params = compute_motion_params(kind, container_size, level);
        let Some(emitter) = table.emitter(key) else {
            return;
        };

        surface.set_emit_power_range(emitter, params.min_speed, params.max_speed);
        let (min_size, max_size) = params.size_range(base);
        surface.set_particle_size_range(emitter, min_size, max_size);
    }

    fn apply_flow(&self, table: &HandleTable, surface: &mut impl RenderSurface) {
        for substance in Substance::ALL {
            let Some(emitter) = table.emitter(SceneEmitter::Flow(substance)) else {
                continue;
            };
            let params = flow_params(self.viscosity(substance), &self.config.viscosity);
            surface.set_emit_rate(emitter, params.emit_rate);
            surface.set_emitter_gravity(emitter, Vec3::new(0.0, params.gravity_y, 0.0));
            surface.set_emitter_speed_scale(emitter, params.speed_scale);
        }
    }

    fn advance_drops(&mut self, dt: f32, table: &HandleTable, surface: &mut impl RenderSurface) {
        for substance in Substance::ALL {
            let viscosity = self.viscosity(substance);
            let y = self.drops.get_mut(substance).advance(dt, viscosity);
            let x = match substance {
                Substance::Oil => self.config.viscosity.oil_x,
                Substance::Water => self.config.viscosity.water_x,
            };
            if let Some(drop) = table.mesh(SceneMesh::Drop(substance)) {
                surface.set_position(drop, Vec3::new(x, y, 0.0));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{RecordingSurface, SurfaceCall};
    use crate::surface::{EmitterHandle, MeshHandle};
    use crate::volume::VolumeStep;
    use rstest::rstest;

    fn built(scenario: Scenario) -> (SimulationSession, HandleTable, RecordingSurface) {
        let mut session = SimulationSession::new(scenario, FluidLabConfig::default());
        let mut surface = RecordingSurface::default();
        let table = session.build_scene(&mut surface);
        surface.take();
        (session, table, surface)
    }

    fn mesh(table: &HandleTable, key: SceneMesh) -> MeshHandle {
        table.mesh(key).unwrap()
    }

    fn emitter(table: &HandleTable, key: SceneEmitter) -> EmitterHandle {
        table.emitter(key).unwrap()
    }

    #[test]
    fn fluids_scene_objects() {
        let (_, table, _) = built(Scenario::Fluids);
        assert_eq!(table.len(), 3);
        assert!(table.mesh(SceneMesh::Container).is_some());
        assert!(table.mesh(SceneMesh::Liquid).is_some());
        assert!(table.emitter(SceneEmitter::Gas).is_some());
    }

    #[test]
    fn build_creates_wireframe_container() {
        let mut session = SimulationSession::new(Scenario::Fluids, FluidLabConfig::default());
        let mut surface = RecordingSurface::default();
        session.build_scene(&mut surface);

        let SurfaceCall::CreateMesh(container) = &surface.calls[0] else {
            panic!("first call was {:?}", surface.calls[0]);
        };
        assert!(container.wireframe);
        assert_eq!(container.name, "container");
    }

    #[test]
    fn first_tick_pushes_initial_geometry() {
        let (mut session, table, mut surface) = built(Scenario::Fluids);
        session.tick(0.016, &table, &mut surface);

        let container = mesh(&table, SceneMesh::Container);
        let liquid = mesh(&table, SceneMesh::Liquid);
        let gas = emitter(&table, SceneEmitter::Gas);
        let calls = surface.take();

        assert!(calls.contains(&SurfaceCall::CameraRadius(25.0)));
        assert!(calls.contains(&SurfaceCall::Scale(container, Vec3::ONE)));
        assert!(calls.contains(&SurfaceCall::Scale(liquid, Vec3::ONE)));
        assert!(calls.contains(&SurfaceCall::Position(liquid, Vec3::new(0.0, -0.5, 0.0))));
        assert!(calls.iter().any(|call| matches!(call, SurfaceCall::EmitBounds(e, _, _) if *e == gas)));
    }

    #[test]
    fn quiet_tick_writes_nothing() {
        let (mut session, table, mut surface) = built(Scenario::Fluids);
        session.tick(0.016, &table, &mut surface);
        surface.take();

        session.tick(0.016, &table, &mut surface);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn setters_mark_only_their_groups() {
        let (mut session, table, mut surface) = built(Scenario::Thermal);
        session.tick(0.016, &table, &mut surface);

        session.set_zoom(40.0);
        assert_eq!(
            session.dirty,
            DirtyGroups {
                camera: true,
                ..DirtyGroups::default()
            }
        );
        session.tick(0.016, &table, &mut surface);

        session.set_temperature_level(ContainerKind::Liquid, 3);
        assert_eq!(
            session.dirty,
            DirtyGroups {
                liquid_motion: true,
                ..DirtyGroups::default()
            }
        );
        session.tick(0.016, &table, &mut surface);

        session.set_gas_size(2.0);
        assert_eq!(
            session.dirty,
            DirtyGroups {
                geometry: true,
                gas_motion: true,
                ..DirtyGroups::default()
            }
        );
    }

    #[test]
    fn unchanged_value_stays_clean() {
        let (mut session, table, mut surface) = built(Scenario::Fluids);
        session.tick(0.016, &table, &mut surface);

        session.set_container_size(5.0);
        session.select_tube(Substance::Water);
        assert_eq!(session.dirty, DirtyGroups::default());
    }

    #[test]
    fn advancing_steps_reshapes_the_scene() {
        let (mut session, table, mut surface) = built(Scenario::Fluids);
        session.tick(0.016, &table, &mut surface);
        surface.take();

        session.advance_step();
        assert_eq!(session.step_caption(), "Step 2: Container expanded");
        session.tick(0.016, &table, &mut surface);

        let container = mesh(&table, SceneMesh::Container);
        let liquid = mesh(&table, SceneMesh::Liquid);
        let calls = surface.take();
        assert!(calls.contains(&SurfaceCall::Scale(container, Vec3::splat(2.0))));
        assert!(calls.contains(&SurfaceCall::Scale(liquid, Vec3::new(1.0, 0.5, 1.0))));
        assert!(calls.contains(&SurfaceCall::Position(liquid, Vec3::new(0.0, -4.0, 0.0))));

        session.advance_step();
        session.advance_step();
        assert_eq!(session.controls().container_size(), 10.0);
        assert_eq!(session.step_caption(), "Step 3: Final result");

        session.reset_simulation();
        assert_eq!(session.controls().container_size(), 5.0);
        assert!(session.step_caption().starts_with("Step 1"));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    fn reset_restores_first_step_scene(#[case] advances: usize) {
        let (mut session, table, mut surface) = built(Scenario::Fluids);
        for _ in 0..advances {
            session.advance_step();
        }
        session.tick(0.016, &table, &mut surface);
        surface.take();

        session.reset_simulation();
        session.tick(0.016, &table, &mut surface);

        let container = mesh(&table, SceneMesh::Container);
        let liquid = mesh(&table, SceneMesh::Liquid);
        let calls = surface.take();
        assert_eq!(session.controls().step(), VolumeStep::Initial);
        assert!(calls.contains(&SurfaceCall::Scale(container, Vec3::ONE)));
        assert!(calls.contains(&SurfaceCall::Scale(liquid, Vec3::ONE)));
        assert!(calls.contains(&SurfaceCall::Position(liquid, Vec3::new(0.0, -0.5, 0.0))));
    }

    #[test]
    fn thermal_motion_follows_temperature() {
        let (mut session, table, mut surface) = built(Scenario::Thermal);
        session.tick(0.016, &table, &mut surface);
        surface.take();

        session.set_temperature_level(ContainerKind::Gas, 1);
        session.tick(0.016, &table, &mut surface);

        let gas = emitter(&table, SceneEmitter::ThermalGas);
        let calls = surface.take();
        let power = calls.iter().find_map(|call| match call {
            SurfaceCall::PowerRange(e, min, max) if *e == gas => Some((*min, *max)),
            _ => None,
        });
        let (min, max) = power.unwrap();
        assert!((min - 0.8).abs() < 1e-5);
        assert!((max - 1.7).abs() < 1e-5);
        // liquid emitter untouched
        let liquid = emitter(&table, SceneEmitter::ThermalLiquid);
        assert!(!calls.iter().any(|call| matches!(call, SurfaceCall::PowerRange(e, _, _) if *e == liquid)));
    }

    #[test]
    fn gas_size_rescales_container_and_emit_box() {
        let (mut session, table, mut surface) = built(Scenario::Thermal);
        session.tick(0.016, &table, &mut surface);
        surface.take();

        session.set_gas_size(2.0);
        session.tick(0.016, &table, &mut surface);

        let container = mesh(&table, SceneMesh::GasContainer);
        let gas = emitter(&table, SceneEmitter::ThermalGas);
        let calls = surface.take();
        assert!(calls.contains(&SurfaceCall::Scale(container, Vec3::splat(2.0))));
        let bounds = calls.iter().find_map(|call| match call {
            SurfaceCall::EmitBounds(e, _, max) if *e == gas => Some(*max),
            _ => None,
        });
        assert!((bounds.unwrap().x - 9.8).abs() < 1e-5);
    }

    #[test]
    fn viscosity_scene_moves_drops_every_frame() {
        let (mut session, table, mut surface) = built(Scenario::Viscosity);
        session.tick(0.5, &table, &mut surface);
        surface.take();

        session.tick(0.5, &table, &mut surface);
        let water = mesh(&table, SceneMesh::Drop(Substance::Water));
        let calls = surface.take();
        // water at 20 C has viscosity 1.5, two frames of 0.5s
        let expected = DROP_TOP - 2.0 * 0.5 / 1.5;
        let position = calls.iter().find_map(|call| match call {
            SurfaceCall::Position(m, p) if *m == water => Some(*p),
            _ => None,
        });
        let position = position.unwrap();
        assert!((position.y - expected).abs() < 1e-5);
        assert_eq!(position.x, 2.0);
        assert!(session.drop_position(Substance::Oil) > session.drop_position(Substance::Water));
    }

    #[test]
    fn temperature_change_updates_flow_and_keeps_drops() {
        let (mut session, table, mut surface) = built(Scenario::Viscosity);
        session.tick(1.0, &table, &mut surface);
        let before = session.drop_position(Substance::Oil);
        surface.take();

        session.set_temperature(Substance::Oil, 100.0);
        assert_eq!(session.viscosity(Substance::Oil), 5.0);
        assert_eq!(session.drop_position(Substance::Oil), before);

        session.tick(0.0, &table, &mut surface);
        let oil = emitter(&table, SceneEmitter::Flow(Substance::Oil));
        let calls = surface.take();
        assert!(calls.contains(&SurfaceCall::EmitRate(oil, 20.0)));
        assert!(calls.contains(&SurfaceCall::SpeedScale(oil, 0.2)));
    }

    #[test]
    fn stale_table_is_ignored() {
        let mut session = SimulationSession::new(Scenario::Fluids, FluidLabConfig::default());
        let mut surface = RecordingSurface::default();
        let empty = HandleTable::default();

        session.tick(0.016, &empty, &mut surface);
        assert_eq!(surface.calls, vec![SurfaceCall::CameraRadius(25.0)]);
    }
}
