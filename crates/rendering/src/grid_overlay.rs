//! Grid lines drawn around the pointer while the ground is the ray-cast
//! target.

use bevy::prelude::*;

use construction::controller::RaycastLayer;
use construction::grid_snap::{cell_to_world, grid_cell, snap_to_grid};
use construction::PlacementController;

/// Lines drawn on each side of the pointer's grid point.
const GRID_RADIUS_CELLS: i32 = 6;
const GRID_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.18);

/// Line segments of a square patch of grid lines through the snap points
/// around `center`.
pub fn grid_lines(center: Vec3, cell: f32, radius: i32) -> Vec<(Vec3, Vec3)> {
    let origin = grid_cell(snap_to_grid(center, cell), cell);
    let lift = Vec3::Y * 0.002;
    let mut lines = Vec::with_capacity((radius as usize * 2 + 1) * 2);
    for i in -radius..=radius {
        lines.push((
            cell_to_world(origin + IVec2::new(i, -radius), cell) + lift,
            cell_to_world(origin + IVec2::new(i, radius), cell) + lift,
        ));
        lines.push((
            cell_to_world(origin + IVec2::new(-radius, i), cell) + lift,
            cell_to_world(origin + IVec2::new(radius, i), cell) + lift,
        ));
    }
    lines
}

pub fn draw_grid_overlay(controller: Res<PlacementController>, mut gizmos: Gizmos) {
    let pointer = controller.pointer();
    if controller.layer() != RaycastLayer::Grid || !pointer.visible {
        return;
    }
    for (start, end) in grid_lines(pointer.position, controller.cell_size(), GRID_RADIUS_CELLS) {
        gizmos.line(start, end, GRID_COLOR);
    }
}
