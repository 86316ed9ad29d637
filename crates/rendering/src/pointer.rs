//! World-space cursor markers, one per tool.

use bevy::prelude::*;

use construction::controller::{PointerIndicator, PointerKind};
use construction::PlacementController;

const INDICATOR_KINDS: [PointerKind; 4] = [
    PointerKind::Build,
    PointerKind::Grab,
    PointerKind::Paint,
    PointerKind::Demolish,
];

/// Marker for the indicator shown while `kind` is the active pointer.
#[derive(Component, Debug, Clone, Copy)]
pub struct PointerMarker {
    pub kind: PointerKind,
}

fn indicator_color(kind: PointerKind) -> Color {
    match kind {
        PointerKind::Build => Color::srgba(0.3, 0.8, 1.0, 0.6),
        PointerKind::Grab => Color::srgba(1.0, 0.85, 0.3, 0.6),
        PointerKind::Paint => Color::srgba(0.7, 0.4, 1.0, 0.6),
        PointerKind::Demolish => Color::srgba(1.0, 0.25, 0.2, 0.6),
    }
}

/// Whether the marker for `kind` should be drawn.
pub fn marker_visibility(pointer: &PointerIndicator, kind: PointerKind) -> Visibility {
    if pointer.visible && pointer.kind == kind {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

pub fn spawn_pointer_markers(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Sphere::new(0.08));
    for kind in INDICATOR_KINDS {
        let material = materials.add(StandardMaterial {
            base_color: indicator_color(kind),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });
        commands.spawn((
            PointerMarker { kind },
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material),
            Transform::default(),
            Visibility::Hidden,
        ));
    }
}

pub fn update_pointer_markers(
    controller: Res<PlacementController>,
    mut query: Query<(&PointerMarker, &mut Transform, &mut Visibility)>,
) {
    let pointer = controller.pointer();
    for (marker, mut transform, mut visibility) in &mut query {
        let wanted = marker_visibility(&pointer, marker.kind);
        if *visibility != wanted {
            *visibility = wanted;
        }
        if wanted == Visibility::Visible {
            transform.translation = pointer.position;
        }
    }
}
