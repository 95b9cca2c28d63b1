// Temperature-dependent viscosity and the tube flow it drives

use crate::config::ViscosityConfig;
use crate::controls::Substance;

/// Oil viscosity at 100 C.
const OIL_BASE: f32 = 5.0;
const OIL_SLOPE: f32 = 0.2;
/// Water stops thickening above this temperature.
const WATER_PLATEAU: f32 = 30.0;
const WATER_SLOPE: f32 = 0.05;

/// Viscosity of `substance` at `celsius`. Always strictly positive.
///
/// Out-of-range temperatures clamp to the modelled range and NaN counts as 0 C.
pub fn compute_viscosity(substance: Substance, celsius: f32) -> f32 {
    let celsius = if celsius.is_nan() { 0.0 } else { celsius };
    match substance {
        Substance::Oil => OIL_BASE + (100.0 - celsius.clamp(0.0, 100.0)) * OIL_SLOPE,
        Substance::Water => 1.0 + (WATER_PLATEAU - celsius.clamp(0.0, WATER_PLATEAU)) * WATER_SLOPE,
    }
}

/// Emitter parameters of the particle flow inside one tube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowParams {
    pub emit_rate: f32,
    pub gravity_y: f32,
    /// Particle time scale, thicker fluids move slower.
    pub speed_scale: f32,
}

pub fn flow_params(viscosity: f32, config: &ViscosityConfig) -> FlowParams {
    // compute_viscosity never goes below 1, this only protects hand-made values
    let viscosity = if viscosity.is_finite() {
        viscosity.max(f32::EPSILON)
    } else {
        1.0
    };
    FlowParams {
        emit_rate: config.flow_rate / viscosity,
        gravity_y: config.flow_gravity / viscosity,
        speed_scale: 1.0 / viscosity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 25.0)]
    #[case(20.0, 21.0)]
    #[case(50.0, 15.0)]
    #[case(100.0, 5.0)]
    #[case(-40.0, 25.0)]
    #[case(250.0, 5.0)]
    fn oil_viscosity(#[case] celsius: f32, #[case] expected: f32) {
        let v = compute_viscosity(Substance::Oil, celsius);
        assert!((v - expected).abs() < 1e-4, "oil at {celsius}: {v}");
    }

    #[rstest]
    #[case(0.0, 2.5)]
    #[case(20.0, 1.5)]
    #[case(30.0, 1.0)]
    #[case(80.0, 1.0)]
    #[case(-5.0, 2.5)]
    fn water_viscosity(#[case] celsius: f32, #[case] expected: f32) {
        let v = compute_viscosity(Substance::Water, celsius);
        assert!((v - expected).abs() < 1e-4, "water at {celsius}: {v}");
    }

    #[test]
    fn nan_reads_as_freezing() {
        assert_eq!(compute_viscosity(Substance::Oil, f32::NAN), 25.0);
        assert_eq!(compute_viscosity(Substance::Water, f32::NAN), 2.5);
    }

    #[test]
    fn oil_thins_monotonically() {
        let mut previous = f32::INFINITY;
        for celsius in 0..=100 {
            let v = compute_viscosity(Substance::Oil, celsius as f32);
            assert!(v > 0.0);
            assert!(v <= previous);
            previous = v;
        }
    }

    #[rstest]
    #[case(1.0, 100.0, -0.1, 1.0)]
    #[case(5.0, 20.0, -0.02, 0.2)]
    #[case(25.0, 4.0, -0.004, 0.04)]
    fn flow_slows_with_viscosity(
        #[case] viscosity: f32,
        #[case] rate: f32,
        #[case] gravity: f32,
        #[case] speed: f32,
    ) {
        let params = flow_params(viscosity, &ViscosityConfig::default());
        assert!((params.emit_rate - rate).abs() < 1e-4);
        assert!((params.gravity_y - gravity).abs() < 1e-6);
        assert!((params.speed_scale - speed).abs() < 1e-6);
    }

    #[test]
    fn degenerate_viscosity_stays_finite() {
        let params = flow_params(0.0, &ViscosityConfig::default());
        assert!(params.emit_rate.is_finite());
        let params = flow_params(f32::NAN, &ViscosityConfig::default());
        assert_eq!(params.speed_scale, 1.0);
    }
}
