use bevy::prelude::*;

use crate::controller::PlacementMode;
use crate::events::ModuleEvent;
use crate::module::{ModuleKind, ModuleStatus};
use crate::test_harness::TestSite;

// ====================================================================
// Batch creation through the plugin
// ====================================================================

#[test]
fn test_wall_run_scenario_builds_two_walls() {
    let mut site = TestSite::new().with_module(ModuleKind::Wall);
    site.press_grid(Vec3::ZERO);
    site.hover_grid(Vec3::new(1.0, 0.0, 0.0));
    site.press_grid(Vec3::new(1.0, 0.0, 0.0));

    site.assert_module_count(2);
    for id in site.ids_of(ModuleKind::Wall) {
        site.assert_built(id);
    }
    assert!(site.controller().buffer().is_empty());
    assert!(!site.controller().is_creating());
}

#[test]
fn test_second_click_in_a_new_cell_finishes_the_run() {
    let mut site = TestSite::new().with_module(ModuleKind::Wall);
    site.press_grid(Vec3::ZERO);
    site.press_grid(Vec3::new(1.0, 0.0, 0.0));

    site.assert_module_count(2);
    assert_eq!(site.built_count(), 2);
    assert!(!site.controller().is_creating());
}

#[test]
fn test_l_shaped_run_turns_the_corner() {
    let site = TestSite::new().with_run(
        ModuleKind::Wall,
        &[
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
        ],
    );
    // Two along X, two along Z.
    assert_eq!(site.built_count(), 4);
    let along_z = site
        .registry()
        .iter()
        .filter(|m| (m.transform().rotation * Vec3::Z).distance(Vec3::Z) < 1e-4)
        .count();
    assert_eq!(along_z, 2);
}

#[test]
fn test_floor_run_over_existing_floor_keeps_original() {
    let mut site = TestSite::new().with_run(
        ModuleKind::Floor,
        &[Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0)],
    );
    let original = site.ids_of(ModuleKind::Floor);
    assert_eq!(original.len(), 1);

    site.select(ModuleKind::Floor);
    site.press_grid(Vec3::ZERO);
    site.hover_grid(Vec3::new(1.0, 0.0, 0.0));
    site.press_grid(Vec3::new(1.0, 0.0, 0.0));

    // The duplicate at the origin was discarded; the one at 0.5 stands.
    assert_eq!(site.built_count(), 2);
    site.assert_built(original[0]);
    let destroyed = site
        .events()
        .iter()
        .filter(|e| matches!(e, ModuleEvent::Destroyed { .. }))
        .count();
    assert_eq!(destroyed, 1);
}

#[test]
fn test_abort_leaves_no_modules() {
    let mut site = TestSite::new().with_module(ModuleKind::Floor);
    site.press_grid(Vec3::ZERO);
    site.hover_grid(Vec3::new(0.0, 0.0, 2.0));
    assert_eq!(site.module_count(), 4);
    site.cancel();
    site.assert_module_count(0);
    assert!(site.controller().buffer().is_empty());
}

#[test]
fn test_switching_mode_mid_run_aborts() {
    let mut site = TestSite::new().with_module(ModuleKind::Wall);
    site.press_grid(Vec3::ZERO);
    site.hover_grid(Vec3::new(1.5, 0.0, 0.0));
    site.set_mode(PlacementMode::Demolish);
    site.assert_module_count(0);
    assert!(!site.controller().is_creating());
}

// ====================================================================
// Single creation through the plugin
// ====================================================================

#[test]
fn test_window_place_rotate_commit() {
    let mut site = TestSite::with_instant_rotation().with_module(ModuleKind::Window);
    site.press_grid(Vec3::new(0.2, 0.0, 0.2));
    let id = site.controller().buffer().first().expect("window placed");
    assert_eq!(site.module(id).unwrap().status(), ModuleStatus::Provisional);

    site.hold_grid(Vec3::new(1.1, 0.0, 0.0));
    site.scroll_grid(Vec3::new(1.1, 0.0, 0.0), -1.0);
    site.release_grid(Vec3::new(1.1, 0.0, 0.0));

    let module = site.module(id).unwrap();
    assert!(module.is_built());
    assert_eq!(module.transform().translation, Vec3::new(1.0, 0.0, 0.0));
    let expected = Quat::from_rotation_y(-45f32.to_radians());
    assert!(module.transform().rotation.angle_between(expected) < 1e-4);
}

#[test]
fn test_eased_rotation_finishes_over_frames() {
    let mut site = TestSite::new().with_module(ModuleKind::Door);
    site.press_grid(Vec3::ZERO);
    let id = site.controller().buffer().first().expect("door placed");
    site.scroll_grid(Vec3::ZERO, 1.0);
    assert!(site.module(id).unwrap().is_rotating());

    // A second notch while turning is dropped.
    site.scroll_grid(Vec3::ZERO, 1.0);
    for _ in 0..10 {
        site.hold_grid(Vec3::ZERO);
    }
    let module = site.module(id).unwrap();
    assert!(!module.is_rotating());
    let expected = Quat::from_rotation_y(45f32.to_radians());
    assert!(module.transform().rotation.angle_between(expected) < 1e-4);
}

#[test]
fn test_door_in_door_overlap_discarded_on_commit() {
    let mut site = TestSite::new().with_module(ModuleKind::Door);
    site.press_grid(Vec3::ZERO);
    site.release_grid(Vec3::ZERO);
    site.press_grid(Vec3::ZERO);
    let second = site.controller().buffer().first().expect("second door");

    let warned = site.events().iter().any(|e| {
        matches!(e, ModuleEvent::OverlapWarning { id, active: true } if *id == second)
    });
    assert!(warned);

    site.release_grid(Vec3::ZERO);
    site.assert_module_count(1);
    assert!(site.module(second).is_none());
}
