//! Linear algebra type aliases for the planar tracker
//!
//! Positions live in a local East/North frame in meters:
//! `x` is East, `y` is North.

use nalgebra::Vector2;

/// Local East/North position (meters)
pub type Position = Vector2<f64>;

/// Fix-to-fix displacement (meters)
pub type Displacement = Vector2<f64>;

/// Build a position from East/North components.
#[inline]
pub fn east_north(east: f64, north: f64) -> Position {
    Position::new(east, north)
}

/// Unit direction of travel for a heading measured clockwise from North.
#[inline]
pub fn heading_unit(heading: f64) -> Displacement {
    Displacement::new(heading.sin(), heading.cos())
}

/// Heading of a displacement, clockwise from North, with a zero
/// displacement mapped to 0 instead of a signed-zero artifact.
#[inline]
pub fn heading_of(delta: &Displacement) -> f64 {
    if delta.x == 0.0 && delta.y == 0.0 {
        return 0.0;
    }
    delta.x.atan2(delta.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_heading_axes() {
        assert_eq!(heading_of(&Displacement::new(0.0, 1.0)), 0.0);
        assert!((heading_of(&Displacement::new(1.0, 0.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!((heading_of(&Displacement::new(-1.0, 0.0)) + FRAC_PI_2).abs() < 1e-12);
        assert!((heading_of(&Displacement::new(0.0, -1.0)).abs() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_zero_displacement_heading() {
        assert_eq!(heading_of(&Displacement::new(0.0, 0.0)), 0.0);
        assert_eq!(heading_of(&Displacement::new(-0.0, -0.0)), 0.0);
    }

    #[test]
    fn test_heading_unit_round_trips_heading() {
        let h = 10f64.to_radians();
        let unit = heading_unit(h);
        assert!((unit.norm() - 1.0).abs() < 1e-12);
        assert!((heading_of(&unit) - h).abs() < 1e-12);
    }
}
