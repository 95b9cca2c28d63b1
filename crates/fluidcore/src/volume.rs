// Gas/liquid volume scenario: the three-step state machine and the geometry it drives

use glam::Vec3;

/// Edge length of the container mesh at scale 1.
pub const BASE_CONTAINER_SIZE: f32 = 5.0;
/// Height of the liquid mesh at scale 1.
pub const BASE_LIQUID_HEIGHT: f32 = 4.0;
/// Fraction of the container size used as the gas emit half extent.
pub const GAS_LIMIT_RATIO: f32 = 0.45;

pub const INITIAL_CONTAINER_SIZE: f32 = 5.0;
pub const EXPANDED_CONTAINER_SIZE: f32 = 10.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VolumeStep {
    #[default]
    Initial,
    Expanded,
    Final,
}

/// Edge of the step machine: where `advance` goes and whether it also resizes the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTransition {
    pub next: VolumeStep,
    pub size_override: Option<f32>,
}

struct StepRow {
    liquid_height: f32,
    caption: &'static str,
    advance: Option<StepTransition>,
}

// Indexed by `VolumeStep::index`. Only the first transition touches the container size.
static STEP_TABLE: [StepRow; 3] = [
    StepRow {
        liquid_height: 4.0,
        caption: "Step 1: Initial state - equal volume",
        advance: Some(StepTransition {
            next: VolumeStep::Expanded,
            size_override: Some(EXPANDED_CONTAINER_SIZE),
        }),
    },
    StepRow {
        liquid_height: 2.0,
        caption: "Step 2: Container expanded",
        advance: Some(StepTransition {
            next: VolumeStep::Final,
            size_override: None,
        }),
    },
    StepRow {
        liquid_height: 2.0,
        caption: "Step 3: Final result",
        advance: None,
    },
];

impl VolumeStep {
    fn index(self) -> usize {
        match self {
            VolumeStep::Initial => 0,
            VolumeStep::Expanded => 1,
            VolumeStep::Final => 2,
        }
    }

    fn row(self) -> &'static StepRow {
        &STEP_TABLE[self.index()]
    }

    pub fn liquid_height(self) -> f32 {
        self.row().liquid_height
    }

    pub fn caption(self) -> &'static str {
        self.row().caption
    }

    /// `None` on the terminal step.
    pub fn transition(self) -> Option<StepTransition> {
        self.row().advance
    }

    pub fn is_final(self) -> bool {
        self.transition().is_none()
    }
}

/// Render parameters derived from the container size and the current step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryParameters {
    pub container_scale: Vec3,
    pub liquid_scale: Vec3,
    pub liquid_offset_y: f32,
    pub emit_box_min: Vec3,
    pub emit_box_max: Vec3,
}

/// Map container size and liquid height onto mesh transforms and the gas emit box.
///
/// The liquid offset keeps the bottom of the liquid on the container floor
/// for every container size.
pub fn compute_geometry(container_size: f32, liquid_height: f32) -> GeometryParameters {
    let size = container_size.max(0.0);
    let height = liquid_height.max(0.0);
    let gas_limit = size * GAS_LIMIT_RATIO;

    GeometryParameters {
        container_scale: Vec3::splat(size / BASE_CONTAINER_SIZE),
        liquid_scale: Vec3::new(1.0, height / BASE_LIQUID_HEIGHT, 1.0),
        liquid_offset_y: -size / 2.0 + height / 2.0,
        emit_box_min: Vec3::splat(-gas_limit),
        emit_box_max: Vec3::splat(gas_limit),
    }
}
