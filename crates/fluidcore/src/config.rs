use crate::error::ConfigError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

pub const CONFIG_PATH: &str = "fluidlab_config.toml";

static CONFIG: OnceLock<Mutex<FluidLabConfig>> = OnceLock::new();

/// Get a copy of the current configuration, loading it from [`CONFIG_PATH`] on first use.
///
/// A missing or broken file is not fatal: the built-in defaults are used instead.
pub fn get_config() -> FluidLabConfig {
    let config_mutex = CONFIG.get_or_init(|| Mutex::new(load_or_default(CONFIG_PATH)));
    match config_mutex.lock() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Re-read the config file so edits apply the next time a scenario starts.
pub fn reload_config() {
    let new_config = load_or_default(CONFIG_PATH);
    let config_mutex = CONFIG.get_or_init(|| Mutex::new(new_config.clone()));
    match config_mutex.lock() {
        Ok(mut config) => *config = new_config,
        Err(poisoned) => *poisoned.into_inner() = new_config,
    }
}

fn load_or_default(path: &str) -> FluidLabConfig {
    match FluidLabConfig::load_from_file(path) {
        Ok(config) => {
            log::info!("Loaded configuration from {path}");
            config
        }
        Err(err) => {
            log::warn!("Using built-in configuration, {path} could not be loaded: {err}");
            FluidLabConfig::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidLabConfig {
    pub camera: CameraConfig,
    pub volume: VolumeConfig,
    pub thermal: ThermalConfig,
    pub viscosity: ViscosityConfig,
}

/// Orbit camera shared by all scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Horizontal orbit angle in radians.
    pub alpha: f32,
    /// Polar angle from the +Y axis in radians.
    pub beta: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

/// Slider bounds and presentation of the gas/liquid volume scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    pub min_container_size: f32,
    pub max_container_size: f32,
    pub default_zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Width and depth of the liquid block at container size 5.
    pub liquid_footprint: f32,
    pub clear_color: [f32; 3],
    pub container_color: [f32; 4],
    pub liquid_color: [f32; 4],
    pub gas: EmitterConfig,
}

/// Layout and slider bounds of the thermal motion scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalConfig {
    pub container_edge: f32,
    pub liquid_container_x: f32,
    pub gas_container_x: f32,
    /// Half extent of the emit box before the container scale is applied.
    pub emit_half_extent: f32,
    pub min_liquid_fill: f32,
    pub max_liquid_fill: f32,
    pub min_gas_size: f32,
    pub max_gas_size: f32,
    pub default_zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub clear_color: [f32; 3],
    pub container_color: [f32; 4],
    pub water_color: [f32; 4],
    pub liquid: EmitterConfig,
    pub gas: EmitterConfig,
}

/// Layout of the viscosity scenario (two tubes with a falling drop each).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViscosityConfig {
    pub tube_height: f32,
    pub tube_diameter: f32,
    pub oil_x: f32,
    pub water_x: f32,
    pub drop_diameter: f32,
    pub default_temperature: f32,
    pub camera_radius: f32,
    /// Emission rate at viscosity 1; the live rate is this divided by viscosity.
    pub flow_rate: f32,
    /// Vertical gravity at viscosity 1.
    pub flow_gravity: f32,
    pub emit_half_extent: Vec3,
    pub clear_color: [f32; 3],
    pub oil_tube_color: [f32; 4],
    pub water_tube_color: [f32; 4],
    pub oil_drop_color: [f32; 4],
    pub water_drop_color: [f32; 4],
    pub oil: EmitterConfig,
    pub water: EmitterConfig,
}

/// Static settings of one particle emitter. Values the mapping engine drives
/// every frame (bounds, rate, power, size) start from these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub capacity: u32,
    pub emit_rate: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_lifetime: f32,
    pub max_lifetime: f32,
    pub min_power: f32,
    pub max_power: f32,
    pub direction1: Vec3,
    pub direction2: Vec3,
    pub gravity: Vec3,
    pub color1: [f32; 4],
    pub color2: [f32; 4],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            alpha: std::f32::consts::FRAC_PI_2,
            beta: std::f32::consts::FRAC_PI_3,
            min_radius: 5.0,
            max_radius: 100.0,
        }
    }
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            min_container_size: 2.0,
            max_container_size: 20.0,
            default_zoom: 25.0,
            min_zoom: 5.0,
            max_zoom: 100.0,
            liquid_footprint: 4.5,
            clear_color: [0.95, 0.95, 0.95],
            container_color: [0.2, 0.2, 0.2, 0.6],
            liquid_color: [0.1, 0.3, 0.8, 0.7],
            gas: EmitterConfig {
                capacity: 2000,
                emit_rate: 500.0,
                min_size: 0.1,
                max_size: 0.3,
                min_lifetime: 2.0,
                max_lifetime: 4.0,
                min_power: 1.0,
                max_power: 1.0,
                direction1: Vec3::Y,
                direction2: Vec3::Y,
                gravity: Vec3::new(0.0, -0.2, 0.0),
                color1: [1.0, 0.3, 0.3, 0.5],
                color2: [1.0, 0.5, 0.5, 0.3],
            },
        }
    }
}

impl Default for ThermalConfig {
    fn default() -> Self {
        let particle = EmitterConfig {
            capacity: 800,
            emit_rate: 800.0,
            min_lifetime: 1.0,
            max_lifetime: 1.0,
            min_power: 0.0,
            max_power: 0.0,
            gravity: Vec3::ZERO,
            ..EmitterConfig::default()
        };
        Self {
            container_edge: 10.0,
            liquid_container_x: -12.0,
            gas_container_x: 12.0,
            emit_half_extent: 4.9,
            min_liquid_fill: 0.2,
            max_liquid_fill: 1.5,
            min_gas_size: 0.2,
            max_gas_size: 2.0,
            default_zoom: 60.0,
            min_zoom: 20.0,
            max_zoom: 100.0,
            clear_color: [0.1, 0.1, 0.2],
            container_color: [1.0, 1.0, 1.0, 0.4],
            water_color: [0.2, 0.5, 1.0, 0.7],
            liquid: EmitterConfig {
                min_size: 0.2,
                max_size: 0.3,
                direction1: Vec3::splat(-0.5),
                direction2: Vec3::splat(0.5),
                color1: [0.2, 0.5, 1.0, 1.0],
                color2: [0.2, 0.5, 1.0, 1.0],
                ..particle.clone()
            },
            gas: EmitterConfig {
                min_size: 0.1,
                max_size: 0.2,
                direction1: Vec3::splat(-1.0),
                direction2: Vec3::splat(1.0),
                color1: [0.2, 1.0, 0.2, 1.0],
                color2: [0.2, 1.0, 0.2, 1.0],
                ..particle
            },
        }
    }
}

impl Default for ViscosityConfig {
    fn default() -> Self {
        let flow = EmitterConfig {
            capacity: 2000,
            emit_rate: 50.0,
            min_size: 0.02,
            max_size: 0.05,
            min_lifetime: 2.0,
            max_lifetime: 5.0,
            min_power: 0.1,
            max_power: 0.3,
            direction1: Vec3::splat(-0.5),
            direction2: Vec3::splat(0.5),
            gravity: Vec3::new(0.0, -0.1, 0.0),
            ..EmitterConfig::default()
        };
        Self {
            tube_height: 8.0,
            tube_diameter: 2.0,
            oil_x: -2.0,
            water_x: 2.0,
            drop_diameter: 0.8,
            default_temperature: 20.0,
            camera_radius: 10.0,
            flow_rate: 100.0,
            flow_gravity: -0.1,
            emit_half_extent: Vec3::new(0.5, 4.0, 0.5),
            clear_color: [0.2, 0.2, 0.3],
            oil_tube_color: [0.8, 0.8, 0.1, 0.3],
            water_tube_color: [0.1, 0.3, 0.8, 0.3],
            oil_drop_color: [0.9, 0.9, 0.2, 0.9],
            water_drop_color: [0.2, 0.4, 0.9, 0.9],
            oil: EmitterConfig {
                color1: [0.9, 0.9, 0.2, 1.0],
                color2: [0.72, 0.72, 0.16, 1.0],
                ..flow.clone()
            },
            water: EmitterConfig {
                color1: [0.2, 0.4, 0.9, 1.0],
                color2: [0.16, 0.32, 0.72, 1.0],
                ..flow
            },
        }
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            emit_rate: 100.0,
            min_size: 0.1,
            max_size: 0.2,
            min_lifetime: 1.0,
            max_lifetime: 1.0,
            min_power: 1.0,
            max_power: 1.0,
            direction1: Vec3::Y,
            direction2: Vec3::Y,
            gravity: Vec3::ZERO,
            color1: [1.0, 1.0, 1.0, 1.0],
            color2: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl FluidLabConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a config file layered over the built-in defaults.
    ///
    /// Fields missing from `content` keep the value of the section they belong to,
    /// so a partial `[thermal.gas]` table still inherits the thermal gas defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let overrides: toml::Table = toml::from_str(content)?;
        let mut merged = toml::Value::try_from(FluidLabConfig::default())?;
        merge_value(&mut merged, toml::Value::Table(overrides));
        let config: FluidLabConfig = merged.try_into()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Tables merge key by key; any other value replaces the base.
fn merge_value(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_value(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
