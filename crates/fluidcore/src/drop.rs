// Falling drop inside a viscosity tube

/// Height a drop restarts from.
pub const DROP_TOP: f32 = 4.0;
/// Once a drop is at or below this height it wraps back to the top.
pub const DROP_FLOOR: f32 = -4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropState {
    position: f32,
}

impl Default for DropState {
    fn default() -> Self {
        Self { position: DROP_TOP }
    }
}

impl DropState {
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Advance by one frame, using viscosity as inverse drag.
    pub fn advance(&mut self, dt: f32, viscosity: f32) -> f32 {
        self.position = next_position(self.position, dt, viscosity);
        self.position
    }
}

/// `position - dt / viscosity` while above the floor, the top once it got there.
pub fn next_position(position: f32, dt: f32, viscosity: f32) -> f32 {
    if position <= DROP_FLOOR || position.is_nan() {
        return DROP_TOP;
    }
    let dt = if dt.is_nan() { 0.0 } else { dt.max(0.0) };
    let viscosity = if viscosity.is_finite() && viscosity > 0.0 {
        viscosity
    } else {
        1.0
    };
    position - dt / viscosity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_then_wraps_to_top() {
        let mut drop = DropState::default();
        let mut previous = drop.position();
        let mut frames = 0;

        while drop.position() > DROP_FLOOR {
            let next = drop.advance(1.0, 5.0);
            assert!(next < previous);
            previous = next;
            frames += 1;
            assert!(frames < 100);
        }

        // 4 -> -4 at 0.2 per frame, give or take float rounding
        assert!((39..=41).contains(&frames), "took {frames} frames");
        assert_eq!(drop.advance(1.0, 5.0), DROP_TOP);
    }

    #[test]
    fn thicker_fluid_falls_slower() {
        let oil = next_position(DROP_TOP, 0.5, 25.0);
        let water = next_position(DROP_TOP, 0.5, 1.0);
        assert!(oil > water);
        assert_eq!(water, 3.5);
    }

    #[test]
    fn bad_frame_times_do_not_move_the_drop() {
        assert_eq!(next_position(1.0, -3.0, 2.0), 1.0);
        assert_eq!(next_position(1.0, f32::NAN, 2.0), 1.0);
        assert_eq!(next_position(1.0, 0.0, 2.0), 1.0);
    }

    #[test]
    fn bad_viscosity_falls_back_to_unit_drag() {
        assert_eq!(next_position(1.0, 0.5, 0.0), 0.5);
        assert_eq!(next_position(1.0, 0.5, f32::NAN), 0.5);
    }

    #[test]
    fn overshoot_below_floor_still_wraps() {
        assert_eq!(next_position(-7.0, 1.0, 1.0), DROP_TOP);
    }
}
