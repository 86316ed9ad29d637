use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use construction::PlacementController;

const PAN_SPEED: f32 = 1.5;
const ROTATE_SPEED: f32 = 1.8;
const ZOOM_SPEED: f32 = 0.12;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 60.0;
const MIN_PITCH: f32 = 10.0 * std::f32::consts::PI / 180.0;
const MAX_PITCH: f32 = 85.0 * std::f32::consts::PI / 180.0;
const ORBIT_SENSITIVITY: f32 = 0.005;
/// How far the focus may wander from the origin on either axis.
const FOCUS_LIMIT: f32 = 100.0;

/// Orbital camera model: camera orbits around a focus point on the ground.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Ground point the camera looks at
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle in radians (clamped between MIN_PITCH and MAX_PITCH)
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: 30.0_f32.to_radians(),
            pitch: 50.0_f32.to_radians(),
            distance: 12.0,
        }
    }
}

impl OrbitCamera {
    /// Camera position and look-at target.
    pub fn eye_and_target(&self) -> (Vec3, Vec3) {
        // Spherical to cartesian offset from focus
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        (self.focus + Vec3::new(x, y, z), self.focus)
    }

    /// Move the focus along the ground, `dir` relative to the current yaw
    /// (x = right, y = towards the camera).
    pub fn pan(&mut self, dir: Vec2, amount: f32) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let world_x = dir.x * cos_yaw + dir.y * sin_yaw;
        let world_z = -dir.x * sin_yaw + dir.y * cos_yaw;
        self.focus.x = (self.focus.x + world_x * amount).clamp(-FOCUS_LIMIT, FOCUS_LIMIT);
        self.focus.z = (self.focus.z + world_z * amount).clamp(-FOCUS_LIMIT, FOCUS_LIMIT);
    }

    pub fn zoom(&mut self, notches: f32) {
        let factor = 1.0 - notches * ZOOM_SPEED;
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw += delta.x * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch - delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
    }
}

#[derive(Resource, Default)]
pub struct CameraOrbitDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

pub fn setup_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    let (pos, look_at) = orbit.eye_and_target();

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(pos).looking_at(look_at, Vec3::Y),
    ));
    commands.insert_resource(orbit);
}

/// System: apply OrbitCamera state to the actual camera Transform each frame.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let (pos, look_at) = orbit.eye_and_target();
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = Transform::from_translation(pos).looking_at(look_at, Vec3::Y);
}

/// WASD/Arrow keys: pan focus along ground plane (direction relative to current yaw).
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }

    if dir != Vec2::ZERO {
        let amount = PAN_SPEED * orbit.distance * 0.1 * time.delta_secs();
        orbit.pan(dir.normalize(), amount);
    }
}

/// Q/E: rotate around the focus.
pub fn camera_rotate_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let mut turn = 0.0;
    if keys.pressed(KeyCode::KeyQ) {
        turn -= 1.0;
    }
    if keys.pressed(KeyCode::KeyE) {
        turn += 1.0;
    }
    if turn != 0.0 {
        orbit.yaw += turn * ROTATE_SPEED * time.delta_secs();
    }
}

/// Middle-mouse drag: orbit (horizontal = yaw, vertical = pitch). The left
/// and right buttons belong to the placement tools.
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut drag: ResMut<CameraOrbitDrag>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Middle) {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }

    if buttons.just_released(MouseButton::Middle) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            orbit.orbit(pos - drag.last_pos);
            drag.last_pos = pos;
        }
    }
}

/// Scroll wheel: zoom, unless the placement tools are using scroll to turn
/// a module.
pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    controller: Res<PlacementController>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if controller.wants_scroll() {
        scroll_evts.clear();
        return;
    }
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        orbit.zoom(dy);
    }
}
