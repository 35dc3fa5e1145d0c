//! Straight-line separation between Cartesian positions.

use crate::{Body, Position};

/// Euclidean distance between two positions, in the positions' units.
///
/// `separation_km(a, b) == separation_km(b, a)` holds exactly: the component
/// differences only change sign, and their squares are identical.
pub fn separation_km(a: &Position, b: &Position) -> f64 {
    (b - a).norm()
}

/// Convert both bodies to Cartesian coordinates and return their separation.
pub fn body_separation_km(a: &Body, b: &Body) -> f64 {
    separation_km(&a.position.to_cartesian(), &b.position.to_cartesian())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_four_five() {
        let a = Position::new(1.0, 1.0, 1.0);
        let b = Position::new(4.0, 5.0, 1.0);
        assert_eq!(separation_km(&a, &b), 5.0);
        assert_eq!(separation_km(&a, &a), 0.0);
    }

    #[test]
    fn symmetric_bit_for_bit() {
        let a = Position::new(6771.8123, -12.75, 3310.001);
        let b = Position::new(-402.5, 6512.25, 1.0e-3);
        assert_eq!(
            separation_km(&a, &b).to_bits(),
            separation_km(&b, &a).to_bits()
        );
    }

    #[test]
    fn same_ground_track_differs_by_altitude() {
        let a = Body::new("A", "1", 0.0, 0.0, 400.0);
        let b = Body::new("B", "2", 0.0, 0.0, 400.5);
        let d = body_separation_km(&a, &b);
        assert!((d - 0.5).abs() < 1e-9, "distance was {}", d);
    }
}
