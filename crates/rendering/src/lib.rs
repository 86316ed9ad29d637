use bevy::prelude::*;

use construction::ConstructionSet;

pub mod camera;
pub mod egui_input_guard;
pub mod grid_overlay;
pub mod input;
pub mod module_render;
pub mod picking;
pub mod pointer;

use camera::CameraOrbitDrag;
use module_render::ModuleEntityMap;

/// Half the edge length of the ground slab.
const GROUND_HALF_EXTENT: f32 = 50.0;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraOrbitDrag>()
            .init_resource::<ModuleEntityMap>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    setup_lighting,
                    setup_ground,
                    module_render::setup_module_mesh,
                    pointer::spawn_pointer_markers,
                ),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan_keyboard,
                    camera::camera_rotate_keyboard,
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::apply_orbit_camera,
                )
                    .chain()
                    .before(ConstructionSet::CollectInput),
            )
            .add_systems(
                Update,
                (input::collect_frame_input, picking::cast_pointer_ray)
                    .in_set(ConstructionSet::CollectInput),
            )
            .add_systems(
                Update,
                (
                    module_render::spawn_and_despawn_modules,
                    module_render::sync_module_visuals,
                    pointer::update_pointer_markers,
                    grid_overlay::draw_grid_overlay,
                )
                    .chain()
                    .after(ConstructionSet::Publish),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    // Ambient light for baseline illumination
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });

    // Directional light (sun) angled from above
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}

fn setup_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(
            GROUND_HALF_EXTENT * 2.0,
            GROUND_HALF_EXTENT * 2.0,
        ))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.32, 0.42, 0.28),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.001, 0.0),
    ));
}
