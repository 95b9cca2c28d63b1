// User-tunable scalar inputs of a simulation session

use crate::config::FluidLabConfig;
use crate::volume::{INITIAL_CONTAINER_SIZE, StepTransition, VolumeStep};

/// Highest thermal temperature level.
pub const MAX_TEMPERATURE_LEVEL: u8 = 5;
pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Fluids,
    Thermal,
    Viscosity,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Fluids, Scenario::Thermal, Scenario::Viscosity];

    pub fn title(self) -> &'static str {
        match self {
            Scenario::Fluids => "Gas and liquid volume",
            Scenario::Thermal => "Thermal motion",
            Scenario::Viscosity => "Viscosity and temperature",
        }
    }
}

/// Substance of a viscosity tube.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Substance {
    #[default]
    Oil,
    Water,
}

impl Substance {
    pub const ALL: [Substance; 2] = [Substance::Oil, Substance::Water];

    pub fn label(self) -> &'static str {
        match self {
            Substance::Oil => "Oil",
            Substance::Water => "Water",
        }
    }
}

/// One of the two containers of the thermal scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Liquid,
    Gas,
}

/// Closed interval a slider value is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub fn new(min: f32, max: f32) -> Self {
        // A config with swapped or NaN ends still yields a usable interval
        let min = if min.is_nan() { 0.0 } else { min };
        let max = if max.is_nan() { min } else { max };
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// NaN maps to the lower bound.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlLimits {
    pub container_size: Bounds,
    pub zoom: Bounds,
    pub liquid_fill: Bounds,
    pub gas_size: Bounds,
}

/// Current value of every user-tunable input.
///
/// Only the setters below change it; each one clamps its input and reports
/// whether the stored value actually changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarControlState {
    scenario: Scenario,
    container_size: f32,
    zoom_level: f32,
    step: VolumeStep,
    liquid_temp: u8,
    gas_temp: u8,
    oil_temp: f32,
    water_temp: f32,
    selected_tube: Substance,
    liquid_fill: f32,
    gas_size: f32,
    limits: ControlLimits,
}

impl ScalarControlState {
    pub fn new(scenario: Scenario, config: &FluidLabConfig) -> Self {
        let thermal = &config.thermal;
        let volume = &config.volume;
        let camera = &config.camera;

        let zoom = match scenario {
            Scenario::Fluids => Bounds::new(volume.min_zoom, volume.max_zoom),
            Scenario::Thermal => Bounds::new(thermal.min_zoom, thermal.max_zoom),
            Scenario::Viscosity => Bounds::new(camera.min_radius, camera.max_radius),
        };
        let default_zoom = match scenario {
            Scenario::Fluids => volume.default_zoom,
            Scenario::Thermal => thermal.default_zoom,
            Scenario::Viscosity => config.viscosity.camera_radius,
        };
        let limits = ControlLimits {
            container_size: Bounds::new(volume.min_container_size, volume.max_container_size),
            zoom,
            liquid_fill: Bounds::new(thermal.min_liquid_fill, thermal.max_liquid_fill),
            gas_size: Bounds::new(thermal.min_gas_size, thermal.max_gas_size),
        };
        let default_temperature =
            Bounds::new(MIN_TEMPERATURE, MAX_TEMPERATURE).clamp(config.viscosity.default_temperature);

        Self {
            scenario,
            container_size: INITIAL_CONTAINER_SIZE,
            zoom_level: limits.zoom.clamp(default_zoom),
            step: VolumeStep::Initial,
            liquid_temp: 0,
            gas_temp: 0,
            oil_temp: default_temperature,
            water_temp: default_temperature,
            selected_tube: Substance::Oil,
            liquid_fill: limits.liquid_fill.clamp(1.0),
            gas_size: limits.gas_size.clamp(1.0),
            limits,
        }
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn limits(&self) -> &ControlLimits {
        &self.limits
    }

    pub fn container_size(&self) -> f32 {
        self.container_size
    }

    pub fn zoom_level(&self) -> f32 {
        self.zoom_level
    }

    pub fn step(&self) -> VolumeStep {
        self.step
    }

    pub fn temperature(&self, substance: Substance) -> f32 {
        match substance {
            Substance::Oil => self.oil_temp,
            Substance::Water => self.water_temp,
        }
    }

    pub fn temperature_level(&self, kind: ContainerKind) -> u8 {
        match kind {
            ContainerKind::Liquid => self.liquid_temp,
            ContainerKind::Gas => self.gas_temp,
        }
    }

    pub fn selected_tube(&self) -> Substance {
        self.selected_tube
    }

    pub fn liquid_fill(&self) -> f32 {
        self.liquid_fill
    }

    pub fn gas_size(&self) -> f32 {
        self.gas_size
    }

    pub fn set_container_size(&mut self, size: f32) -> bool {
        let size = self.limits.container_size.clamp(size);
        replace_if_changed(&mut self.container_size, size)
    }

    pub fn set_zoom(&mut self, zoom: f32) -> bool {
        let zoom = self.limits.zoom.clamp(zoom);
        replace_if_changed(&mut self.zoom_level, zoom)
    }

    pub fn set_temperature(&mut self, substance: Substance, celsius: f32) -> bool {
        let celsius = Bounds::new(MIN_TEMPERATURE, MAX_TEMPERATURE).clamp(celsius);
        let slot = match substance {
            Substance::Oil => &mut self.oil_temp,
            Substance::Water => &mut self.water_temp,
        };
        replace_if_changed(slot, celsius)
    }

    pub fn set_temperature_level(&mut self, kind: ContainerKind, level: i32) -> bool {
        let level = level.clamp(0, MAX_TEMPERATURE_LEVEL as i32) as u8;
        let slot = match kind {
            ContainerKind::Liquid => &mut self.liquid_temp,
            ContainerKind::Gas => &mut self.gas_temp,
        };
        replace_if_changed(slot, level)
    }

    pub fn set_liquid_fill(&mut self, fill: f32) -> bool {
        let fill = self.limits.liquid_fill.clamp(fill);
        replace_if_changed(&mut self.liquid_fill, fill)
    }

    pub fn set_gas_size(&mut self, size: f32) -> bool {
        let size = self.limits.gas_size.clamp(size);
        replace_if_changed(&mut self.gas_size, size)
    }

    pub fn select_tube(&mut self, substance: Substance) -> bool {
        replace_if_changed(&mut self.selected_tube, substance)
    }

    /// Move the step machine forward. Returns the edge taken, `None` on the last step.
    pub fn advance_step(&mut self) -> Option<StepTransition> {
        let transition = self.step.transition()?;
        self.step = transition.next;
        if let Some(size) = transition.size_override {
            self.container_size = size;
        }
        Some(transition)
    }

    /// Back to step 1 with the initial container, whatever the current state.
    pub fn reset_simulation(&mut self) {
        self.step = VolumeStep::Initial;
        self.container_size = INITIAL_CONTAINER_SIZE;
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
