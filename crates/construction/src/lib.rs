//! Grid-based placement and editing of modular building pieces.
//!
//! The `PlacementController` state machine turns per-frame pointer input and
//! ray-cast hits into module creation, moves, re-skins, and demolition. The
//! `ModuleRegistry` owns the modules themselves. Rendering and UI live in
//! host crates and talk to this one through resources and events only.

pub mod config;
pub mod construction_sets;
pub mod controller;
pub mod creation_buffer;
pub mod events;
pub mod grid_snap;
pub mod module;
pub mod prefabs;
pub mod registry;
pub mod systems;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

use bevy::prelude::*;

pub use config::PlacementConfig;
pub use construction_sets::ConstructionSet;
pub use controller::{FrameInput, PlacementController, PlacementMode, PointerHit, RayHit};
pub use events::{ModuleEvent, PlacementCommand};
pub use module::{ModuleId, ModuleKind};
pub use prefabs::PrefabCatalog;
pub use registry::ModuleRegistry;

pub struct ConstructionPlugin;

impl Plugin for ConstructionPlugin {
    fn build(&self, app: &mut App) {
        // A config inserted by the app before this plugin wins over defaults.
        app.init_resource::<PlacementConfig>();
        let config = app.world().resource::<PlacementConfig>().clone();
        info!(
            "Placement grid: cell size {}, {} prefab(s)",
            config.cell_size,
            config.prefabs.len()
        );

        app.insert_resource(PrefabCatalog::from_config(&config))
            .insert_resource(PlacementController::new(&config))
            .init_resource::<ModuleRegistry>()
            .init_resource::<FrameInput>()
            .init_resource::<PointerHit>()
            .add_event::<PlacementCommand>()
            .add_event::<ModuleEvent>()
            .configure_sets(
                Update,
                (
                    ConstructionSet::CollectInput,
                    ConstructionSet::Apply,
                    ConstructionSet::Publish,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    systems::apply_placement_commands,
                    systems::run_placement_controller,
                )
                    .chain()
                    .in_set(ConstructionSet::Apply),
            )
            .add_systems(
                Update,
                systems::publish_module_events.in_set(ConstructionSet::Publish),
            );
    }
}
