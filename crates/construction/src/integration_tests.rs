//! Integration tests driving `ConstructionPlugin` through the `TestSite`
//! harness: UI commands in, frame input and ray hits in, `ModuleEvent`s out.

mod create_scenarios;
mod edit_scenarios;

use bevy::prelude::*;

use crate::config::PlacementConfig;
use crate::controller::{FrameInput, PlacementController, PlacementMode, RaycastLayer};
use crate::events::{ModuleEvent, PlacementCommand};
use crate::module::ModuleKind;
use crate::prefabs::PrefabCatalog;
use crate::test_harness::TestSite;

// ===========================================================================
// Plugin bootstrap
// ===========================================================================

#[test]
fn test_plugin_inserts_resources() {
    let site = TestSite::new();
    assert_eq!(site.module_count(), 0);
    assert_eq!(site.controller().mode(), PlacementMode::Create);
    assert_eq!(site.resource::<PrefabCatalog>().iter().count(), 4);
    assert_eq!(site.resource::<PlacementConfig>().cell_size, 0.5);
}

#[test]
fn test_preinserted_config_wins() {
    let site = TestSite::with_config(PlacementConfig {
        cell_size: 1.0,
        ..default()
    });
    assert_eq!(site.controller().cell_size(), 1.0);
}

#[test]
fn test_invalid_config_is_clamped_before_use() {
    let site = TestSite::with_config(PlacementConfig {
        cell_size: -2.0,
        prefabs: Vec::new(),
        ..default()
    });
    assert!(site.controller().cell_size() > 0.0);
    for kind in ModuleKind::ALL {
        assert!(site.resource::<PrefabCatalog>().get(kind).is_some());
    }
}

// ===========================================================================
// Commands
// ===========================================================================

#[test]
fn test_mode_command_changes_layer() {
    let mut site = TestSite::new();
    site.set_mode(PlacementMode::Customize);
    assert_eq!(site.controller().mode(), PlacementMode::Customize);
    assert_eq!(site.controller().layer(), RaycastLayer::Modules);
}

#[test]
fn test_module_command_selects_catalog_prefab() {
    let site = TestSite::new().with_module(ModuleKind::Window);
    let prefab = site.controller().prefab().expect("window selected");
    assert_eq!(prefab.kind, ModuleKind::Window);
    assert_eq!(prefab.variant_count, 2);
}

#[test]
fn test_commands_in_one_frame_apply_in_order() {
    let mut site = TestSite::new();
    {
        let world = site.world_mut();
        world.send_event(PlacementCommand::SetMode(PlacementMode::Demolish));
        world.send_event(PlacementCommand::SetMode(PlacementMode::Move));
    }
    site.idle(1);
    assert_eq!(site.controller().mode(), PlacementMode::Move);
}

// ===========================================================================
// Input edges
// ===========================================================================

#[test]
fn test_input_edges_are_consumed() {
    let mut site = TestSite::new().with_module(ModuleKind::Wall);
    site.press_grid(Vec3::ZERO);
    assert!(site.controller().is_creating());
    assert!(!site.resource::<FrameInput>().primary.down);

    // No fresh host input: the press must not be replayed as a commit.
    site.step();
    site.step();
    assert!(site.controller().is_creating());
}

#[test]
fn test_frame_delta_reaches_controller() {
    let mut site = TestSite::new();
    site.idle(2);
    let delta = site.resource::<FrameInput>().delta_secs;
    assert!(delta > 0.0, "delta was {delta}");
}

// ===========================================================================
// Events
// ===========================================================================

#[test]
fn test_created_and_built_events_are_published() {
    let mut site = TestSite::new().with_module(ModuleKind::Floor);
    site.press_grid(Vec3::ZERO);
    site.hover_grid(Vec3::new(0.5, 0.0, 0.0));
    site.press_grid(Vec3::new(0.5, 0.0, 0.0));

    let created = site
        .events()
        .iter()
        .filter(|e| matches!(e, ModuleEvent::Created { kind: ModuleKind::Floor, .. }))
        .count();
    let built = site
        .events()
        .iter()
        .filter(|e| matches!(e, ModuleEvent::Built { .. }))
        .count();
    assert_eq!(created, 1);
    assert_eq!(built, 1);
}

#[test]
fn test_controller_resource_matches_plugin_config() {
    let site = TestSite::with_instant_rotation();
    let controller: &PlacementController = site.controller();
    assert_eq!(controller.cell_size(), 0.5);
    assert!(!controller.wants_scroll());
}
