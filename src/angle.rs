//! Quadrant-decomposed direction of travel
//!
//! The ball's heading is stored as a quadrant index plus an in-quadrant
//! angle in [0°, 90°]. Reflections then reduce to swapping quadrants and
//! complementing the in-quadrant angle, which keeps the resolver free of
//! trigonometry.

use serde::{Deserialize, Serialize};

use crate::wrap_angle;

/// One of the four 90° angular sectors.
///
/// I covers 0°–90°, II 90°–180°, III 180°–270°, IV 270°–360°. Boundary
/// values resolve to the lower quadrant; an exact 360° is the top of
/// quadrant IV, not a wrapped 0°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    I,
    II,
    III,
    IV,
}

impl Quadrant {
    /// Zero-based index, used to recompose the full angle value.
    #[inline]
    pub fn index(self) -> u32 {
        match self {
            Quadrant::I => 0,
            Quadrant::II => 1,
            Quadrant::III => 2,
            Quadrant::IV => 3,
        }
    }

    /// Counterpart after reflecting across the horizontal axis.
    fn mirrored_horizontal(self) -> Self {
        match self {
            Quadrant::I => Quadrant::IV,
            Quadrant::II => Quadrant::III,
            Quadrant::III => Quadrant::II,
            Quadrant::IV => Quadrant::I,
        }
    }

    /// Counterpart after reflecting across the vertical axis.
    fn mirrored_vertical(self) -> Self {
        match self {
            Quadrant::I => Quadrant::II,
            Quadrant::II => Quadrant::I,
            Quadrant::III => Quadrant::IV,
            Quadrant::IV => Quadrant::III,
        }
    }
}

/// A direction in [0°, 360°], stored as quadrant + in-quadrant angle.
///
/// The full value is always `quadrant_angle + 90° * quadrant.index()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    quadrant: Quadrant,
    quadrant_angle: f32,
}

impl Angle {
    /// Build from radians, wrapping out-of-range values into [0°, 360°].
    pub fn new(radians: f32) -> Self {
        let value = wrap_angle(radians);
        let quadrant = quadrant_of(value);
        Self {
            quadrant,
            quadrant_angle: decompose(value, quadrant),
        }
    }

    pub fn from_degrees(degrees: f32) -> Self {
        Self::new(degrees.to_radians())
    }

    /// Full angle value in radians.
    #[inline]
    pub fn value(&self) -> f32 {
        self.quadrant_angle + 90.0_f32.to_radians() * self.quadrant.index() as f32
    }

    /// Replace the full value, wrapping into [0°, 360°] first.
    pub fn set_value(&mut self, radians: f32) {
        let value = wrap_angle(radians);
        self.quadrant = quadrant_of(value);
        self.quadrant_angle = decompose(value, self.quadrant);
    }

    #[inline]
    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    pub fn set_quadrant(&mut self, quadrant: Quadrant) {
        self.quadrant = quadrant;
    }

    /// Offset within the current quadrant, in [0°, 90°].
    #[inline]
    pub fn quadrant_angle(&self) -> f32 {
        self.quadrant_angle
    }

    /// Replace the in-quadrant angle.
    ///
    /// Out-of-range values are clamped into [0°, 90°] and reported through
    /// the logger; this is recoverable, unlike construction-time checks.
    pub fn set_quadrant_angle(&mut self, quadrant_angle: f32) {
        let limit = 90.0_f32.to_radians();
        if !(0.0..=limit).contains(&quadrant_angle) {
            log::warn!(
                "quadrant angle {quadrant_angle} rad outside [0°, 90°], clamping"
            );
            self.quadrant_angle = quadrant_angle.clamp(0.0, limit);
        } else {
            self.quadrant_angle = quadrant_angle;
        }
    }

    /// Reflect across the horizontal axis (I↔IV, II↔III).
    ///
    /// Used when the ball bounces off a top or bottom edge.
    pub fn mirror_horizontal(&mut self) {
        self.quadrant = self.quadrant.mirrored_horizontal();
        self.quadrant_angle = 90.0_f32.to_radians() - self.quadrant_angle;
    }

    /// Reflect across the vertical axis (I↔II, III↔IV).
    ///
    /// Used when the ball bounces off a left or right edge.
    pub fn mirror_vertical(&mut self) {
        self.quadrant = self.quadrant.mirrored_vertical();
        self.quadrant_angle = 90.0_f32.to_radians() - self.quadrant_angle;
    }
}

impl Default for Angle {
    fn default() -> Self {
        Self::new(0.0)
    }
}

fn quadrant_of(value: f32) -> Quadrant {
    assert!(
        (0.0..=360.0_f32.to_radians()).contains(&value),
        "quadrant lookup on unwrapped angle {value}"
    );
    if value <= 90.0_f32.to_radians() {
        Quadrant::I
    } else if value <= 180.0_f32.to_radians() {
        Quadrant::II
    } else if value <= 270.0_f32.to_radians() {
        Quadrant::III
    } else {
        Quadrant::IV
    }
}

fn decompose(value: f32, quadrant: Quadrant) -> f32 {
    let quadrant_angle = value - 90.0_f32.to_radians() * quadrant.index() as f32;
    // Rounding at a quadrant boundary can land one ulp outside the range.
    quadrant_angle.clamp(0.0, 90.0_f32.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-5;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    #[test]
    fn test_default_is_zero_in_quadrant_one() {
        let angle = Angle::default();
        assert_eq!(angle.value(), 0.0);
        assert_eq!(angle.quadrant(), Quadrant::I);
        assert_eq!(angle.quadrant_angle(), 0.0);
    }

    #[test]
    fn test_quadrant_boundary_table() {
        let table = [
            (0.0, Quadrant::I),
            (45.0, Quadrant::I),
            (90.0, Quadrant::I),
            (90.1, Quadrant::II),
            (135.0, Quadrant::II),
            (180.0, Quadrant::II),
            (180.1, Quadrant::III),
            (225.0, Quadrant::III),
            (270.0, Quadrant::III),
            (270.1, Quadrant::IV),
            (315.0, Quadrant::IV),
            (360.0, Quadrant::IV),
        ];
        for (degrees, quadrant) in table {
            assert_eq!(
                Angle::from_degrees(degrees).quadrant(),
                quadrant,
                "at {degrees}°"
            );
        }
    }

    #[test]
    fn test_wrapping_table() {
        let table = [
            (360.1, 0.1),
            (540.0, 180.0),
            (-0.1, 359.9),
            (-360.0, 0.0),
            (-540.0, 180.0),
        ];
        for (input, expected) in table {
            assert_close(
                Angle::from_degrees(input).value(),
                (expected as f32).to_radians(),
            );
        }
    }

    #[test]
    fn test_set_value_replaces_decomposition() {
        let mut angle = Angle::from_degrees(30.0);
        assert_close(angle.value(), 30.0_f32.to_radians());
        angle.set_value(245.0_f32.to_radians());
        assert_eq!(angle.quadrant(), Quadrant::III);
        assert_close(angle.value(), 245.0_f32.to_radians());
    }

    #[test]
    fn test_set_quadrant_angle_in_range() {
        let mut angle = Angle::from_degrees(30.0);
        angle.set_quadrant_angle(60.0_f32.to_radians());
        assert_close(angle.value(), 60.0_f32.to_radians());
        assert_close(angle.quadrant_angle(), 60.0_f32.to_radians());
    }

    #[test]
    fn test_set_quadrant_angle_clamps_out_of_range() {
        let mut angle = Angle::from_degrees(30.0);
        angle.set_quadrant_angle(120.0_f32.to_radians());
        assert_close(angle.quadrant_angle(), 90.0_f32.to_radians());
        angle.set_quadrant_angle(-1.0);
        assert_eq!(angle.quadrant_angle(), 0.0);
    }

    #[test]
    fn test_mirror_horizontal_table() {
        let table = [
            (30.0, Quadrant::I, 330.0, Quadrant::IV),
            (120.0, Quadrant::II, 240.0, Quadrant::III),
            (240.0, Quadrant::III, 120.0, Quadrant::II),
            (330.0, Quadrant::IV, 30.0, Quadrant::I),
        ];
        for (before, q_before, after, q_after) in table {
            let mut angle = Angle::from_degrees(before);
            assert_eq!(angle.quadrant(), q_before);
            angle.mirror_horizontal();
            assert_eq!(angle.quadrant(), q_after);
            assert_close(angle.value(), (after as f32).to_radians());
        }
    }

    #[test]
    fn test_mirror_vertical_table() {
        let table = [
            (30.0, Quadrant::I, 150.0, Quadrant::II),
            (150.0, Quadrant::II, 30.0, Quadrant::I),
            (210.0, Quadrant::III, 330.0, Quadrant::IV),
            (330.0, Quadrant::IV, 210.0, Quadrant::III),
        ];
        for (before, q_before, after, q_after) in table {
            let mut angle = Angle::from_degrees(before);
            assert_eq!(angle.quadrant(), q_before);
            angle.mirror_vertical();
            assert_eq!(angle.quadrant(), q_after);
            assert_close(angle.value(), (after as f32).to_radians());
        }
    }

    proptest! {
        #[test]
        fn prop_mirror_horizontal_is_involution(degrees in 0.0f32..360.0) {
            let original = Angle::from_degrees(degrees);
            let mut angle = original;
            angle.mirror_horizontal();
            angle.mirror_horizontal();
            prop_assert!((angle.value() - original.value()).abs() < EPS);
        }

        #[test]
        fn prop_mirror_vertical_is_involution(degrees in 0.0f32..360.0) {
            let original = Angle::from_degrees(degrees);
            let mut angle = original;
            angle.mirror_vertical();
            angle.mirror_vertical();
            prop_assert!((angle.value() - original.value()).abs() < EPS);
        }

        #[test]
        fn prop_value_round_trips(degrees in 0.0f32..360.0) {
            let radians = degrees.to_radians();
            let angle = Angle::new(radians);
            prop_assert!((angle.value() - radians).abs() < EPS);
        }
    }
}
