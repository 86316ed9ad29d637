use std::collections::HashMap;

use bevy::prelude::*;

use construction::module::{Module, ModuleKind, ModuleStatus};
use construction::{ModuleEvent, ModuleId, ModuleRegistry};

/// Alpha of modules that are not yet built, or are picked up.
const GHOST_ALPHA: f32 = 0.45;
const OVERLAP_COLOR: Srgba = Srgba::new(0.9, 0.15, 0.1, GHOST_ALPHA);

/// Scene entity for each live module.
#[derive(Resource, Default, Debug)]
pub struct ModuleEntityMap(pub HashMap<ModuleId, Entity>);

#[derive(Component, Debug, Clone, Copy)]
pub struct ModuleVisual {
    pub id: ModuleId,
}

/// Shared unit cube; each module scales it to its own extents.
#[derive(Resource)]
pub struct ModuleMeshHandle(pub Handle<Mesh>);

pub fn setup_module_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.insert_resource(ModuleMeshHandle(meshes.add(Cuboid::new(1.0, 1.0, 1.0))));
}

/// Palette per kind; the variant index picks a shade.
fn palette(kind: ModuleKind) -> &'static [Srgba] {
    const WALL: &[Srgba] = &[
        Srgba::rgb(0.86, 0.83, 0.78),
        Srgba::rgb(0.72, 0.42, 0.33),
        Srgba::rgb(0.55, 0.62, 0.70),
    ];
    const FLOOR: &[Srgba] = &[
        Srgba::rgb(0.62, 0.48, 0.33),
        Srgba::rgb(0.45, 0.45, 0.45),
        Srgba::rgb(0.80, 0.78, 0.70),
    ];
    const DOOR: &[Srgba] = &[Srgba::rgb(0.45, 0.30, 0.18), Srgba::rgb(0.20, 0.35, 0.25)];
    const WINDOW: &[Srgba] = &[Srgba::rgb(0.55, 0.75, 0.90), Srgba::rgb(0.35, 0.50, 0.60)];
    match kind {
        ModuleKind::Wall => WALL,
        ModuleKind::Floor => FLOOR,
        ModuleKind::Door => DOOR,
        ModuleKind::Window => WINDOW,
    }
}

/// Display color for a module. Overlap wins over everything; unbuilt and
/// grabbed modules are translucent.
pub fn module_color(module: &Module) -> Srgba {
    if module.is_overlapping() {
        return OVERLAP_COLOR;
    }
    let shades = palette(module.kind());
    let base = shades[module.visual_index() % shades.len()];
    match module.status() {
        ModuleStatus::Built => base,
        ModuleStatus::Provisional | ModuleStatus::Editing => base.with_alpha(GHOST_ALPHA),
    }
}

/// Scene transform: the unit cube centered on the module's box, scaled to
/// its extents.
pub fn module_transform(module: &Module) -> Transform {
    Transform {
        translation: module.center(),
        rotation: module.transform().rotation,
        scale: module.extents(),
    }
}

fn module_material(color: Srgba) -> StandardMaterial {
    StandardMaterial {
        base_color: color.into(),
        alpha_mode: if color.alpha < 1.0 {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        perceptual_roughness: 0.85,
        ..default()
    }
}

/// Spawn and despawn scene entities from the registry's lifecycle events.
pub fn spawn_and_despawn_modules(
    mut commands: Commands,
    mut events: EventReader<ModuleEvent>,
    registry: Res<ModuleRegistry>,
    mesh: Res<ModuleMeshHandle>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut map: ResMut<ModuleEntityMap>,
) {
    for event in events.read() {
        match *event {
            ModuleEvent::Created { id, .. } => {
                // Created and destroyed within one frame
                let Some(module) = registry.get(id) else {
                    continue;
                };
                let entity = commands
                    .spawn((
                        ModuleVisual { id },
                        Mesh3d(mesh.0.clone()),
                        MeshMaterial3d(materials.add(module_material(module_color(module)))),
                        module_transform(module),
                    ))
                    .id();
                map.0.insert(id, entity);
            }
            ModuleEvent::Destroyed { id } => {
                if let Some(entity) = map.0.remove(&id) {
                    commands.entity(entity).despawn_recursive();
                }
            }
            _ => {}
        }
    }
}

/// Copy pose and color from the registry onto the scene entities.
pub fn sync_module_visuals(
    registry: Res<ModuleRegistry>,
    mut query: Query<(
        &ModuleVisual,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !registry.is_changed() {
        return;
    }
    for (visual, mut transform, material) in &mut query {
        let Some(module) = registry.get(visual.id) else {
            continue;
        };
        let target = module_transform(module);
        if *transform != target {
            *transform = target;
        }
        let color = module_color(module);
        if let Some(mat) = materials.get_mut(&material.0) {
            if Srgba::from(mat.base_color) != color {
                *mat = module_material(color);
            }
        }
    }
}
