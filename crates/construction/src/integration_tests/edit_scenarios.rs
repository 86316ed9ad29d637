use bevy::prelude::*;

use crate::controller::{ButtonState, PlacementMode, RaycastLayer};
use crate::events::ModuleEvent;
use crate::module::{ModuleKind, ModuleStatus};
use crate::test_harness::TestSite;

fn walls(site: &TestSite) -> Vec<crate::module::ModuleId> {
    site.ids_of(ModuleKind::Wall)
}

// ====================================================================
// Move
// ====================================================================

#[test]
fn test_grab_then_cancel_restores_transform() {
    let mut site = TestSite::with_instant_rotation()
        .with_run(ModuleKind::Wall, &[Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0)])
        .with_mode(PlacementMode::Move);
    let id = walls(&site)[0];
    let before = site.module(id).unwrap().transform();

    site.on_module(id, ButtonState::pressed());
    assert_eq!(site.controller().editing(), Some(id));
    assert_eq!(site.controller().layer(), RaycastLayer::Grid);

    site.hold_grid(Vec3::new(3.0, 0.0, 2.0));
    site.scroll_grid(Vec3::new(3.0, 0.0, 2.0), 1.0);
    assert_ne!(site.module(id).unwrap().transform(), before);

    site.cancel();
    let module = site.module(id).unwrap();
    assert_eq!(module.transform(), before);
    assert!(module.is_built());
    assert_eq!(site.controller().editing(), None);
}

#[test]
fn test_drop_on_free_cell_keeps_new_position() {
    let mut site = TestSite::new()
        .with_run(ModuleKind::Wall, &[Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0)])
        .with_mode(PlacementMode::Move);
    let id = walls(&site)[0];

    site.on_module(id, ButtonState::pressed());
    site.hold_grid(Vec3::new(-2.0, 0.0, 0.0));
    site.release_grid(Vec3::new(-2.0, 0.0, 0.0));

    let module = site.module(id).unwrap();
    assert!(module.is_built());
    assert_eq!(module.transform().translation, Vec3::new(-2.0, 0.0, 0.0));
}

#[test]
fn test_drop_onto_wall_rolls_back() {
    let mut site = TestSite::new()
        .with_run(ModuleKind::Wall, &[Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)])
        .with_mode(PlacementMode::Move);
    let ids = walls(&site);
    let (moving, fixed) = (ids[1], ids[0]);
    let before = site.module(moving).unwrap().transform();
    let target = site.module(fixed).unwrap().transform().translation;

    site.on_module(moving, ButtonState::pressed());
    site.hold_grid(target);
    assert!(site.module(moving).unwrap().is_overlapping());
    site.release_grid(target);

    assert_eq!(site.module(moving).unwrap().transform(), before);
    site.assert_built(moving);
    site.assert_built(fixed);
    site.assert_module_count(2);
}

#[test]
fn test_floor_stays_put_in_move_mode() {
    let mut site = TestSite::new()
        .with_run(ModuleKind::Floor, &[Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0)])
        .with_mode(PlacementMode::Move);
    let id = site.ids_of(ModuleKind::Floor)[0];
    site.on_module(id, ButtonState::pressed());
    assert_eq!(site.controller().editing(), None);
    assert_eq!(site.module(id).unwrap().status(), ModuleStatus::Built);
}

#[test]
fn test_mode_switch_mid_grab_restores() {
    let mut site = TestSite::new()
        .with_run(ModuleKind::Wall, &[Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0)])
        .with_mode(PlacementMode::Move);
    let id = walls(&site)[0];
    let before = site.module(id).unwrap().transform();

    site.on_module(id, ButtonState::pressed());
    site.hold_grid(Vec3::new(0.0, 0.0, 3.0));
    site.set_mode(PlacementMode::Create);

    assert_eq!(site.module(id).unwrap().transform(), before);
    site.assert_built(id);
}

// ====================================================================
// Customize
// ====================================================================

#[test]
fn test_paint_drag_across_three_walls() {
    let mut site = TestSite::new()
        .with_run(
            ModuleKind::Wall,
            &[Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0)],
        )
        .with_mode(PlacementMode::Customize);
    let ids = walls(&site);
    assert_eq!(ids.len(), 3);

    site.on_module(ids[0], ButtonState::pressed());
    site.on_module(ids[1], ButtonState::holding());
    site.on_module(ids[2], ButtonState::holding());
    site.on_module(ids[2], ButtonState::released());

    let shown: Vec<_> = ids
        .iter()
        .map(|id| site.module(*id).unwrap().visual_index())
        .collect();
    assert_eq!(shown, vec![1, 1, 1]);

    let repaints = site
        .events()
        .iter()
        .filter(|e| matches!(e, ModuleEvent::VisualChanged { variant: Some(1), .. }))
        .count();
    assert_eq!(repaints, 3);
}

// ====================================================================
// Demolish
// ====================================================================

#[test]
fn test_demolish_removes_only_clicked_module() {
    let mut site = TestSite::new()
        .with_run(ModuleKind::Floor, &[Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)])
        .with_mode(PlacementMode::Demolish);
    let ids = site.ids_of(ModuleKind::Floor);
    assert_eq!(ids.len(), 2);

    site.on_module(ids[1], ButtonState::pressed());
    site.assert_module_count(1);
    assert!(site.module(ids[0]).is_some());
    assert!(site
        .events()
        .iter()
        .any(|e| *e == ModuleEvent::Destroyed { id: ids[1] }));
}
