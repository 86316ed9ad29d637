//! Ray casting from the cursor into the scene, filtered by the layer the
//! placement controller asks for.
//!
//! - Grid layer: intersection with the Y=0 ground plane.
//! - Modules layer: nearest module whose oriented bounding box the ray
//!   enters.

use bevy::prelude::*;

use construction::controller::RaycastLayer;
use construction::module::Module;
use construction::{ModuleRegistry, PlacementController, PointerHit, RayHit};

/// Ray-plane intersection against the Y=0 ground plane.
pub fn ground_hit(origin: Vec3, direction: Vec3) -> Option<Vec3> {
    if direction.y.abs() <= 0.001 {
        return None;
    }
    let t = -origin.y / direction.y;
    (t > 0.0).then(|| origin + direction * t)
}

/// Distance along the ray to the module's oriented bounding box (slab test
/// in the box's local frame).
pub fn module_hit_distance(origin: Vec3, direction: Vec3, module: &Module) -> Option<f32> {
    let transform = module.transform();
    let inverse = transform.rotation.inverse();
    let local_origin = inverse * (origin - module.center());
    let local_dir = inverse * direction;
    let half = module.extents() * 0.5;

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let (o, d, h) = (local_origin[axis], local_dir[axis], half[axis]);
        if d.abs() < f32::EPSILON {
            if o.abs() > h {
                return None;
            }
            continue;
        }
        let (t0, t1) = ((-h - o) / d, (h - o) / d);
        t_min = t_min.max(t0.min(t1));
        t_max = t_max.min(t0.max(t1));
        if t_min > t_max {
            return None;
        }
    }
    if t_max < 0.0 {
        return None;
    }
    Some(t_min.max(0.0))
}

/// Nearest module along the ray.
pub fn pick_module(registry: &ModuleRegistry, origin: Vec3, direction: Vec3) -> Option<RayHit> {
    registry
        .iter()
        .filter_map(|m| module_hit_distance(origin, direction, m).map(|t| (t, m.id())))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(t, id)| RayHit::module(origin + direction * t, id))
}

/// System: cast the cursor ray with the controller's current layer filter.
pub fn cast_pointer_ray(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    controller: Res<PlacementController>,
    registry: Res<ModuleRegistry>,
    mut hit: ResMut<PointerHit>,
) {
    hit.0 = None;
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };
    let Some(screen_pos) = window.cursor_position() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_transform, screen_pos) else {
        return;
    };
    let direction = Vec3::from(ray.direction);

    hit.0 = match controller.layer() {
        RaycastLayer::Grid => ground_hit(ray.origin, direction).map(RayHit::grid),
        RaycastLayer::Modules => pick_module(&registry, ray.origin, direction),
    };
}
