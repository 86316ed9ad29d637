//! Grid snapping: quantize a continuous world point onto the building grid.
//!
//! X and Z are rounded to the nearest multiple of the cell size, Y is pinned to
//! the grid plane. Ties round half away from zero (`f32::round`), so with a
//! 0.5 cell `0.25` snaps to `0.5` and `-0.25` snaps to `-0.5`.

use bevy::prelude::*;

/// Snap `point` to the nearest grid point for a grid of `cell_size` cells.
///
/// `cell_size` must be positive and finite; `PlacementConfig::validated`
/// guarantees that for every configured grid.
#[inline]
pub fn snap_to_grid(point: Vec3, cell_size: f32) -> Vec3 {
    Vec3::new(
        (point.x / cell_size).round() * cell_size,
        0.0,
        (point.z / cell_size).round() * cell_size,
    )
}

/// Integer cell coordinates (x, z) of an already-snapped point.
#[inline]
pub fn grid_cell(snapped: Vec3, cell_size: f32) -> IVec2 {
    IVec2::new(
        (snapped.x / cell_size).round() as i32,
        (snapped.z / cell_size).round() as i32,
    )
}

/// World position of the grid point at integer cell coordinates.
#[inline]
pub fn cell_to_world(cell: IVec2, cell_size: f32) -> Vec3 {
    Vec3::new(cell.x as f32 * cell_size, 0.0, cell.y as f32 * cell_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: f32 = 0.5;

    #[test]
    fn test_snap_rounds_to_nearest_cell() {
        let snapped = snap_to_grid(Vec3::new(0.7, 3.0, -0.2), CELL);
        assert_eq!(snapped, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_snap_ties_round_away_from_zero() {
        assert_eq!(snap_to_grid(Vec3::new(0.25, 0.0, 0.0), CELL).x, 0.5);
        assert_eq!(snap_to_grid(Vec3::new(-0.25, 0.0, 0.0), CELL).x, -0.5);
        assert_eq!(snap_to_grid(Vec3::new(0.0, 0.0, 0.75), CELL).z, 1.0);
    }

    #[test]
    fn test_snap_pins_y_to_grid_plane() {
        let snapped = snap_to_grid(Vec3::new(1.0, 42.0, 1.0), CELL);
        assert_eq!(snapped.y, 0.0);
    }

    #[test]
    fn test_snap_is_idempotent() {
        let samples = [
            Vec3::new(0.13, 0.0, 9.87),
            Vec3::new(-3.26, 1.0, 0.24),
            Vec3::new(100.01, -5.0, -0.749),
            Vec3::new(0.25, 0.0, -0.25),
        ];
        for cell in [0.1, 0.5, 1.0, 3.0] {
            for p in samples {
                let once = snap_to_grid(p, cell);
                let twice = snap_to_grid(once, cell);
                assert_eq!(once, twice, "snap not idempotent for {:?} at cell {}", p, cell);
            }
        }
    }

    #[test]
    fn test_grid_cell_and_back() {
        let snapped = snap_to_grid(Vec3::new(1.6, 0.0, -0.9), CELL);
        let cell = grid_cell(snapped, CELL);
        assert_eq!(cell, IVec2::new(3, -2));
        assert_eq!(cell_to_world(cell, CELL), snapped);
    }
}
