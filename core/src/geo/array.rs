use crate::session::ARRAY_COUNT;
use serde::{Deserialize, Serialize};

/// Planar easting/northing pair in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Seven swath positions for a center point and travel heading. The six
/// offsets run perpendicular to the heading at 1, 2 and 3 times `spacing`
/// on either side, ordered `[+1, -1, +2, center, -2, +3, -3]` so the
/// un-offset center occupies slot 4. Pure: identical inputs always yield
/// identical outputs.
pub fn project_array(
    center: PlanarPoint,
    heading_deg: f64,
    spacing: f64,
) -> [PlanarPoint; ARRAY_COUNT] {
    let angle = (heading_deg + 90.0).to_radians();
    let dx = spacing * angle.sin();
    let dy = spacing * angle.cos();
    let offset = |k: f64| PlanarPoint::new(center.x + k * dx, center.y + k * dy);
    [
        offset(1.0),
        offset(-1.0),
        offset(2.0),
        center,
        offset(-2.0),
        offset(3.0),
        offset(-3.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paired_offsets_are_symmetric_about_the_center() {
        let center = PlanarPoint::new(12.5, -3.25);
        let swath = project_array(center, 37.0, 1.7);
        for (plus, minus) in [(0, 1), (2, 4), (5, 6)] {
            let mid_x = (swath[plus].x + swath[minus].x) / 2.0;
            let mid_y = (swath[plus].y + swath[minus].y) / 2.0;
            assert!((mid_x - center.x).abs() < 1e-12);
            assert!((mid_y - center.y).abs() < 1e-12);
        }
    }

    #[test]
    fn center_occupies_the_fourth_slot() {
        let center = PlanarPoint::new(1.0, 2.0);
        let swath = project_array(center, 123.0, 2.5);
        assert_eq!(swath[3], center);
    }

    #[test]
    fn zero_heading_offsets_run_along_the_easting_axis() {
        let swath = project_array(PlanarPoint::new(0.0, 0.0), 0.0, 2.0);
        assert!((swath[0].x - 2.0).abs() < 1e-9);
        assert!(swath[0].y.abs() < 1e-9);
        assert!((swath[5].x - 6.0).abs() < 1e-9);
    }

    #[test]
    fn projection_is_deterministic() {
        let center = PlanarPoint::new(100.0, 200.0);
        let first = project_array(center, 271.3, 1.7);
        let second = project_array(center, 271.3, 1.7);
        assert_eq!(first, second);
    }
}
