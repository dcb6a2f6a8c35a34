//! Dial overlay geometry.
//!
//! Three rotating indicator hands (second, minute, hour) placed on a
//! circular dial by a pure, deterministic routine. The hand sweeps
//! clockwise from the 12-o'clock position as its counter grows, one full
//! revolution per 60 counter units.

use fluidspace_physics::PolygonShape;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Units per revolution for every hand.
pub const DIAL_PERIOD: f32 = 60.0;

/// Offset of a hand's center from the dial center, as a fraction of the
/// dial radius.
const CENTER_OFFSET: f32 = 0.38;

/// Hand half-lengths as fractions of the dial radius.
const SECOND_LENGTH: f32 = 0.35;
const MINUTE_LENGTH: f32 = 0.27;
const HOUR_LENGTH: f32 = 0.20;

/// Hand half-thicknesses as fractions of the border wall thickness.
/// The second hand is thinner.
const SECOND_THICKNESS: f32 = 1.0 / 80.0;
const MINUTE_THICKNESS: f32 = 1.0 / 30.0;
const HOUR_THICKNESS: f32 = 1.0 / 30.0;

/// Minute counter advance per elapsed second (60 s per minute unit).
const MINUTE_STEP: f32 = 1.0 / 60.0;
/// Hour counter advance per elapsed second (12 h dial: 720 s per unit).
const HOUR_STEP: f32 = 1.0 / 720.0;

/// Hand angle in radians for a counter value; wraps every
/// [`DIAL_PERIOD`] units back to 12 o'clock.
pub fn hand_angle(value: f32) -> f32 {
    TAU * (DIAL_PERIOD - value) / DIAL_PERIOD
}

fn hand(value: f32, radius: f32, half_length: f32, half_thickness: f32) -> PolygonShape {
    let angle = hand_angle(value);
    let (sin, cos) = angle.sin_cos();
    let center = Vec2::new(
        radius - radius * CENTER_OFFSET * sin,
        radius + radius * CENTER_OFFSET * cos,
    );
    PolygonShape::new(half_thickness, radius * half_length, center, angle)
}

/// Generate the three indicator shapes for the given counter values on
/// a dial of the given radius. Hand thickness scales with the border
/// wall thickness. Pure and side-effect-free; the previous frame's
/// shapes are discarded wholesale by the caller.
pub fn generate_hands(
    second: f32,
    minute: f32,
    hour: f32,
    radius: f32,
    wall_thickness: f32,
) -> [PolygonShape; 3] {
    [
        hand(second, radius, SECOND_LENGTH, wall_thickness * SECOND_THICKNESS),
        hand(minute, radius, MINUTE_LENGTH, wall_thickness * MINUTE_THICKNESS),
        hand(hour, radius, HOUR_LENGTH, wall_thickness * HOUR_THICKNESS),
    ]
}

/// Wrap-around counters advanced once per elapsed wall-clock second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DialCounters {
    pub second: u32,
    pub minute: f32,
    pub hour: f32,
}

impl DialCounters {
    /// Counters at 12 o'clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters starting at an arbitrary dial position. Values are
    /// wrapped into `[0, 60)`.
    pub fn starting_at(second: u32, minute: f32, hour: f32) -> Self {
        Self {
            second: second % DIAL_PERIOD as u32,
            minute: minute.rem_euclid(DIAL_PERIOD),
            hour: hour.rem_euclid(DIAL_PERIOD),
        }
    }

    /// Advance all three counters by one elapsed second, wrapping each
    /// modulo 60.
    pub fn advance(&mut self) {
        self.second += 1;
        if self.second >= DIAL_PERIOD as u32 {
            self.second = 0;
        }
        self.minute += MINUTE_STEP;
        if self.minute >= DIAL_PERIOD {
            self.minute = 0.0;
        }
        self.hour += HOUR_STEP;
        if self.hour >= DIAL_PERIOD {
            self.hour = 0.0;
        }
    }

    /// Overlay geometry for the current counters.
    pub fn hands(&self, radius: f32, wall_thickness: f32) -> [PolygonShape; 3] {
        generate_hands(self.second as f32, self.minute, self.hour, radius, wall_thickness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes_close(a: &PolygonShape, b: &PolygonShape, tol: f32) -> bool {
        (a.center - b.center).length() < tol
            && (a.half_width - b.half_width).abs() < tol
            && (a.half_height - b.half_height).abs() < tol
            && (a.angle.sin_cos().0 - b.angle.sin_cos().0).abs() < tol
            && (a.angle.sin_cos().1 - b.angle.sin_cos().1).abs() < tol
    }

    #[test]
    fn zero_counter_points_at_twelve() {
        let [second, _, _] = generate_hands(0.0, 0.0, 0.0, 10.0, 2.0);
        // center sits straight above the dial center at the offset radius
        assert!((second.center.x - 10.0).abs() < 1e-3);
        assert!((second.center.y - 13.8).abs() < 1e-3);
    }

    #[test]
    fn counters_are_periodic_in_sixty() {
        for v in [0.0_f32, 5.0, 17.5, 42.0, 59.9] {
            let a = generate_hands(v, v, v, 25.0, 2.0);
            let b = generate_hands(v + 60.0, v + 60.0, v + 60.0, 25.0, 2.0);
            for (x, y) in a.iter().zip(b.iter()) {
                assert!(shapes_close(x, y, 1e-2), "mismatch at v={v}");
            }
        }
    }

    #[test]
    fn quarter_revolution_lands_at_three_oclock() {
        let [second, _, _] = generate_hands(15.0, 0.0, 0.0, 10.0, 2.0);
        // clockwise sweep: 15 units puts the hand to the right of center
        assert!((second.center.x - 13.8).abs() < 1e-3);
        assert!((second.center.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn hand_lengths_scale_with_radius() {
        let [second, minute, hour] = generate_hands(10.0, 20.0, 30.0, 40.0, 2.0);
        assert!((second.half_height - 14.0).abs() < 1e-4);
        assert!((minute.half_height - 10.8).abs() < 1e-4);
        assert!((hour.half_height - 8.0).abs() < 1e-4);
        assert!(second.half_width < minute.half_width);
    }

    #[test]
    fn hand_thickness_scales_with_wall_thickness() {
        let [second, minute, hour] = generate_hands(0.0, 0.0, 0.0, 10.0, 2.0);
        assert!((second.half_width - 2.0 / 80.0).abs() < 1e-6);
        assert!((minute.half_width - 2.0 / 30.0).abs() < 1e-6);
        assert_eq!(minute.half_width, hour.half_width);

        let [thick, _, _] = generate_hands(0.0, 0.0, 0.0, 10.0, 4.0);
        assert!((thick.half_width - 4.0 / 80.0).abs() < 1e-6);
    }

    #[test]
    fn advance_wraps_second_at_sixty() {
        let mut dial = DialCounters::starting_at(59, 0.0, 0.0);
        dial.advance();
        assert_eq!(dial.second, 0);
    }

    #[test]
    fn sixty_advances_move_minute_one_unit() {
        let mut dial = DialCounters::new();
        for _ in 0..60 {
            dial.advance();
        }
        assert_eq!(dial.second, 0);
        assert!((dial.minute - 1.0).abs() < 1e-4);
        assert!((dial.hour - 60.0 * (1.0 / 720.0)).abs() < 1e-4);
    }

    #[test]
    fn minute_wraps_at_sixty() {
        let mut dial = DialCounters::starting_at(0, 59.999, 59.9999);
        dial.advance();
        assert_eq!(dial.minute, 0.0);
        assert_eq!(dial.hour, 0.0);
    }

    #[test]
    fn starting_at_wraps_inputs() {
        let dial = DialCounters::starting_at(75, 185.0, -20.0);
        assert_eq!(dial.second, 15);
        assert!((dial.minute - 5.0).abs() < 1e-4);
        assert!((dial.hour - 40.0).abs() < 1e-4);
    }

    #[test]
    fn generator_is_deterministic() {
        let a = generate_hands(12.0, 34.5, 40.0, 25.0, 2.0);
        let b = generate_hands(12.0, 34.5, 40.0, 25.0, 2.0);
        assert_eq!(a, b);
    }
}
