use bevy::prelude::*;

use super::*;
use crate::config::default_prefabs;
use crate::prefabs::ModulePrefab;

fn prefab(kind: ModuleKind) -> ModulePrefab {
    default_prefabs(0.5)
        .into_iter()
        .find(|p| p.kind == kind)
        .expect("stock prefab")
}

fn module(id: u32, kind: ModuleKind) -> Module {
    Module::from_prefab(ModuleId(id), &prefab(kind), ModuleTransform::default(), 1.0)
}

fn peer(id: u32, kind: ModuleKind, status: ModuleStatus) -> ContactPeer {
    ContactPeer {
        id: ModuleId(id),
        kind,
        category: kind.category(),
        status,
    }
}

// ====================================================================
// Kinds and transforms
// ====================================================================

#[test]
fn test_kind_placement_styles() {
    assert_eq!(ModuleKind::Wall.placement_style(), PlacementStyle::Batch);
    assert_eq!(ModuleKind::Floor.placement_style(), PlacementStyle::Batch);
    assert_eq!(ModuleKind::Door.placement_style(), PlacementStyle::Single);
    assert_eq!(ModuleKind::Window.placement_style(), PlacementStyle::Single);
}

#[test]
fn test_facing_points_local_z_along_direction() {
    for dir in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::new(1.0, 0.0, 1.0)] {
        let t = ModuleTransform::facing(Vec3::ZERO, dir);
        let forward = t.rotation * Vec3::Z;
        assert!(
            forward.distance(dir.normalize()) < 1e-5,
            "facing {dir:?} gave {forward:?}"
        );
    }
    assert_eq!(
        ModuleTransform::facing(Vec3::ONE, Vec3::ZERO).rotation,
        Quat::IDENTITY
    );
}

#[test]
fn test_new_module_is_provisional_and_clear() {
    let m = module(0, ModuleKind::Wall);
    assert_eq!(m.status(), ModuleStatus::Provisional);
    assert!(!m.is_overlapping());
    assert_eq!(m.visual_index(), 0);
    assert_eq!(m.shown_variant(), None);
    assert_eq!(m.stretch(), 1.0);
}

#[test]
fn test_stretch_never_shrinks_below_one() {
    let m = Module::from_prefab(
        ModuleId(0),
        &prefab(ModuleKind::Wall),
        ModuleTransform::default(),
        0.3,
    );
    assert_eq!(m.stretch(), 1.0);
    let diagonal = Module::from_prefab(
        ModuleId(1),
        &prefab(ModuleKind::Wall),
        ModuleTransform::default(),
        std::f32::consts::SQRT_2,
    );
    assert!((diagonal.extents().z - 0.5 * std::f32::consts::SQRT_2).abs() < 1e-5);
}

// ====================================================================
// Build and editing
// ====================================================================

#[test]
fn test_build_marks_built() {
    let mut m = module(0, ModuleKind::Floor);
    assert_eq!(m.build(), BuildOutcome::Built);
    assert!(m.is_built());
}

#[test]
fn test_build_refuses_while_overlapping() {
    let mut m = module(0, ModuleKind::Door);
    m.on_contact(&peer(1, ModuleKind::Window, ModuleStatus::Built), ContactPhase::Enter);
    assert!(m.is_overlapping());
    assert_eq!(m.build(), BuildOutcome::Discarded);
    assert!(!m.is_built());
}

#[test]
fn test_restoring_edit_clears_overlap() {
    let mut m = module(0, ModuleKind::Wall);
    m.build();
    assert!(!m.set_editing(true));
    assert_eq!(m.status(), ModuleStatus::Editing);
    m.on_contact(&peer(1, ModuleKind::Wall, ModuleStatus::Built), ContactPhase::Enter);
    assert!(m.is_overlapping());
    assert!(m.set_editing(false));
    assert!(m.is_built());
    assert!(!m.is_overlapping());
}

// ====================================================================
// Contacts
// ====================================================================

#[test]
fn test_built_module_ignores_contacts() {
    let mut m = module(0, ModuleKind::Door);
    m.build();
    let (verdict, flipped) =
        m.on_contact(&peer(1, ModuleKind::Door, ModuleStatus::Provisional), ContactPhase::Enter);
    assert_eq!(verdict, ContactVerdict::Keep);
    assert!(!flipped);
    assert!(!m.is_overlapping());
}

#[test]
fn test_fresh_wall_discarded_on_same_category_enter() {
    let mut m = module(5, ModuleKind::Wall);
    let (verdict, _) =
        m.on_contact(&peer(1, ModuleKind::Wall, ModuleStatus::Built), ContactPhase::Enter);
    assert_eq!(verdict, ContactVerdict::Discard);
}

#[test]
fn test_older_fresh_wall_survives_younger_peer() {
    let mut older = module(1, ModuleKind::Wall);
    let (verdict, _) =
        older.on_contact(&peer(5, ModuleKind::Wall, ModuleStatus::Provisional), ContactPhase::Enter);
    assert_eq!(verdict, ContactVerdict::Keep);
    assert!(!older.is_overlapping());
}

#[test]
fn test_fresh_wall_ignores_other_categories() {
    let mut m = module(5, ModuleKind::Wall);
    for kind in [ModuleKind::Floor, ModuleKind::Door, ModuleKind::Window] {
        let (verdict, flipped) =
            m.on_contact(&peer(1, kind, ModuleStatus::Built), ContactPhase::Enter);
        assert_eq!(verdict, ContactVerdict::Keep);
        assert!(!flipped);
    }
}

#[test]
fn test_soft_pair_flags_until_last_exit() {
    let mut door = module(0, ModuleKind::Door);
    let window = peer(1, ModuleKind::Window, ModuleStatus::Built);
    let other_door = peer(2, ModuleKind::Door, ModuleStatus::Built);

    let (_, flipped) = door.on_contact(&window, ContactPhase::Enter);
    assert!(flipped);
    let (_, flipped) = door.on_contact(&other_door, ContactPhase::Enter);
    assert!(!flipped);
    door.on_contact(&window, ContactPhase::Stay);

    let (_, flipped) = door.on_contact(&window, ContactPhase::Exit);
    assert!(!flipped);
    assert!(door.is_overlapping());
    let (_, flipped) = door.on_contact(&other_door, ContactPhase::Exit);
    assert!(flipped);
    assert!(!door.is_overlapping());
}

#[test]
fn test_door_touching_wall_is_fine() {
    let mut door = module(0, ModuleKind::Door);
    let (verdict, flipped) =
        door.on_contact(&peer(1, ModuleKind::Wall, ModuleStatus::Built), ContactPhase::Enter);
    assert_eq!(verdict, ContactVerdict::Keep);
    assert!(!flipped);
}

// ====================================================================
// Footprints
// ====================================================================

#[test]
fn test_footprints_sharing_an_edge_do_not_overlap() {
    let mut a = module(0, ModuleKind::Floor);
    let mut b = module(1, ModuleKind::Floor);
    a.transform = ModuleTransform::at(Vec3::ZERO);
    b.transform = ModuleTransform::at(Vec3::new(0.5, 0.0, 0.0));
    assert!(!a.footprint().overlaps(&b.footprint()));
    b.transform = ModuleTransform::at(Vec3::new(0.4, 0.0, 0.0));
    assert!(a.footprint().overlaps(&b.footprint()));
}

#[test]
fn test_rotated_footprint_overlap() {
    let mut a = module(0, ModuleKind::Wall);
    let mut b = module(1, ModuleKind::Wall);
    // Crossing walls: one along X, one along Z, sharing a center.
    a.transform = ModuleTransform::facing(Vec3::ZERO, Vec3::X);
    b.transform = ModuleTransform::facing(Vec3::ZERO, Vec3::Z);
    assert!(a.footprint().overlaps(&b.footprint()));
    // Parallel walls one cell apart never meet.
    b.transform = ModuleTransform::facing(Vec3::new(0.0, 0.0, 0.5), Vec3::X);
    assert!(!a.footprint().overlaps(&b.footprint()));
}

// ====================================================================
// Visuals
// ====================================================================

#[test]
fn test_cycle_wraps_both_ways() {
    let mut v = VisualState::new(3);
    assert!(v.is_default());
    assert_eq!(v.cycle(true), 1);
    assert_eq!(v.cycle(true), 2);
    assert_eq!(v.cycle(true), 0);
    assert_eq!(v.cycle(false), 2);
    assert_eq!(v.shown(), Some(2));
}

#[test]
fn test_single_variant_cycle_stays_on_zero() {
    let mut v = VisualState::new(1);
    assert_eq!(v.cycle(true), 0);
    assert_eq!(v.cycle(false), 0);
    assert!(!v.is_default());
}

#[test]
fn test_mimic_default_source_is_noop() {
    let mut v = VisualState::new(3);
    v.cycle(true);
    assert!(!v.mimic(None));
    assert_eq!(v.shown(), Some(1));
}

#[test]
fn test_mimic_copies_index_modulo_count() {
    let mut v = VisualState::new(2);
    assert!(v.mimic(Some(1)));
    assert_eq!(v.shown(), Some(1));
    assert!(!v.mimic(Some(1)));
    assert!(v.mimic(Some(2)));
    assert_eq!(v.shown(), Some(0));
}

// ====================================================================
// Rotation tasks
// ====================================================================

#[test]
fn test_rotation_eases_to_target() {
    let mut task = RotationTask::new(Quat::IDENTITY, 90.0, 1.0);
    let RotationStep::Running(quarter) = task.step(0.25) else {
        panic!("rotation finished early");
    };
    // Smoothstep lags linear interpolation early on.
    let linear = Quat::IDENTITY.slerp(task.target(), 0.25);
    assert!(quarter.angle_between(Quat::IDENTITY) < linear.angle_between(Quat::IDENTITY));
    assert_eq!(task.step(1.0), RotationStep::Finished(task.target()));
}

#[test]
fn test_cancel_token_is_shared() {
    let mut task = RotationTask::new(Quat::IDENTITY, 45.0, 1.0);
    let token = task.token();
    token.cancel();
    assert!(token.is_cancelled());
    assert_eq!(task.step(0.1), RotationStep::Cancelled);
}
