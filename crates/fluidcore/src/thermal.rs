// Thermal motion: temperature level -> particle speed, container scale -> emission volume

use crate::config::{EmitterConfig, ThermalConfig};
use crate::controls::{ContainerKind, MAX_TEMPERATURE_LEVEL};
use glam::Vec3;

/// Containers smaller than this are treated as this size.
const MIN_CONTAINER_SIZE: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub min_speed: f32,
    pub max_speed: f32,
    /// Multiplier on the base particle size, keeps the apparent density constant.
    pub particle_size_scale: f32,
}

impl MotionParams {
    pub fn size_range(&self, emitter: &EmitterConfig) -> (f32, f32) {
        (
            emitter.min_size * self.particle_size_scale,
            emitter.max_size * self.particle_size_scale,
        )
    }
}

/// Speed range and size scale of the particles in one thermal container.
///
/// `container_size` is the container scale factor (1 = base cube), `level` the
/// temperature level, clamped to `0..=5`.
pub fn compute_motion_params(kind: ContainerKind, container_size: f32, level: f32) -> MotionParams {
    let t = if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, MAX_TEMPERATURE_LEVEL as f32)
    };
    match kind {
        ContainerKind::Liquid => MotionParams {
            min_speed: 0.05 + t * 0.05,
            max_speed: 0.1 + t * 0.1,
            particle_size_scale: 1.0,
        },
        ContainerKind::Gas => {
            let size = if container_size.is_nan() {
                1.0
            } else {
                container_size.max(MIN_CONTAINER_SIZE)
            };
            MotionParams {
                min_speed: 0.3 + t * 0.5,
                max_speed: 0.7 + t * 1.0,
                particle_size_scale: 1.0 / size,
            }
        }
    }
}

/// Transforms and emission volumes of the two thermal containers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalLayout {
    /// Shared by the liquid container and the water block inside it.
    pub liquid_scale: Vec3,
    pub gas_scale: Vec3,
    pub liquid_emit_min: Vec3,
    pub liquid_emit_max: Vec3,
    pub gas_emit_min: Vec3,
    pub gas_emit_max: Vec3,
}

/// Emit boxes are always derived from the base box, never from the previous box,
/// so repeated slider moves cannot make them drift.
pub fn thermal_layout(liquid_fill: f32, gas_size: f32, config: &ThermalConfig) -> ThermalLayout {
    let fill = liquid_fill.max(0.0);
    let gas = gas_size.max(0.0);
    let base = Vec3::splat(config.emit_half_extent.abs());

    let liquid_scale = Vec3::new(1.0, fill, 1.0);
    let gas_scale = Vec3::splat(gas);

    ThermalLayout {
        liquid_scale,
        gas_scale,
        liquid_emit_min: -base * liquid_scale,
        liquid_emit_max: base * liquid_scale,
        gas_emit_min: -base * gas_scale,
        gas_emit_max: base * gas_scale,
    }
}
