use std::collections::BTreeSet;
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::rotation::RotationTask;
use super::visuals::VisualState;
use crate::prefabs::ModulePrefab;

/// Stable handle for a module owned by the `ModuleRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(pub u32);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    Wall,
    Floor,
    Door,
    Window,
}

/// How the creation tool lays a kind down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStyle {
    /// Drag across the grid; one module per cell left behind.
    Batch,
    /// One module that follows the cursor until release.
    Single,
}

/// Category tag used for same-kind collision and paint-drag matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleCategory {
    Walls,
    Floors,
    Doors,
    Windows,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 4] = [
        ModuleKind::Wall,
        ModuleKind::Floor,
        ModuleKind::Door,
        ModuleKind::Window,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModuleKind::Wall => "Wall",
            ModuleKind::Floor => "Floor",
            ModuleKind::Door => "Door",
            ModuleKind::Window => "Window",
        }
    }

    pub fn category(self) -> ModuleCategory {
        match self {
            ModuleKind::Wall => ModuleCategory::Walls,
            ModuleKind::Floor => ModuleCategory::Floors,
            ModuleKind::Door => ModuleCategory::Doors,
            ModuleKind::Window => ModuleCategory::Windows,
        }
    }

    pub fn placement_style(self) -> PlacementStyle {
        match self {
            ModuleKind::Wall | ModuleKind::Floor => PlacementStyle::Batch,
            ModuleKind::Door | ModuleKind::Window => PlacementStyle::Single,
        }
    }

    /// Soft-collidable kinds flag a mutual overlap as a warning instead of
    /// discarding the newcomer.
    pub fn is_soft_collidable(self) -> bool {
        matches!(self, ModuleKind::Door | ModuleKind::Window)
    }
}

/// Lifecycle status of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStatus {
    /// Created by a gesture and never committed.
    Provisional,
    Built,
    /// A built module picked up again by the move tool.
    Editing,
}

/// Position and yaw of a module. Modules stand on the grid plane, so only
/// rotations about +Y ever occur.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleTransform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for ModuleTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl ModuleTransform {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Transform whose local +Z axis points along `direction` (XZ plane).
    /// A zero direction keeps the identity orientation.
    pub fn facing(translation: Vec3, direction: Vec3) -> Self {
        let flat = Vec2::new(direction.x, direction.z);
        let rotation = if flat.length_squared() > f32::EPSILON {
            Quat::from_rotation_y(flat.x.atan2(flat.y))
        } else {
            Quat::IDENTITY
        };
        Self {
            translation,
            rotation,
        }
    }
}

/// One placed construction piece.
#[derive(Debug, Clone)]
pub struct Module {
    pub(crate) id: ModuleId,
    pub(crate) kind: ModuleKind,
    pub(crate) editable: bool,
    pub(crate) status: ModuleStatus,
    pub(crate) overlapping: bool,
    /// Peers this module currently conflicts with; `overlapping` mirrors
    /// whether the set is non-empty.
    pub(crate) conflicts: BTreeSet<ModuleId>,
    pub(crate) visual: VisualState,
    pub(crate) transform: ModuleTransform,
    /// Local size (x = width, y = height, z = length) before stretching.
    pub(crate) size: Vec3,
    pub(crate) elevation: f32,
    /// Multiplier on the local length; above 1 when a diagonal step is bridged.
    pub(crate) stretch: f32,
    pub(crate) rotation_task: Option<RotationTask>,
}

impl Module {
    pub(crate) fn from_prefab(
        id: ModuleId,
        prefab: &ModulePrefab,
        transform: ModuleTransform,
        stretch: f32,
    ) -> Self {
        Self {
            id,
            kind: prefab.kind,
            editable: prefab.editable,
            status: ModuleStatus::Provisional,
            overlapping: false,
            conflicts: BTreeSet::new(),
            visual: VisualState::new(prefab.variant_count),
            transform,
            size: Vec3::from_array(prefab.size),
            elevation: prefab.elevation,
            stretch: stretch.max(1.0),
            rotation_task: None,
        }
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    pub fn category(&self) -> ModuleCategory {
        self.kind.category()
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn status(&self) -> ModuleStatus {
        self.status
    }

    pub fn is_built(&self) -> bool {
        self.status == ModuleStatus::Built
    }

    pub fn is_overlapping(&self) -> bool {
        self.overlapping
    }

    pub fn visual_index(&self) -> usize {
        self.visual.index()
    }

    pub fn variant_count(&self) -> usize {
        self.visual.variant_count()
    }

    /// Variant currently shown, `None` while the default appearance is up.
    pub fn shown_variant(&self) -> Option<usize> {
        self.visual.shown()
    }

    pub fn transform(&self) -> ModuleTransform {
        self.transform
    }

    pub fn stretch(&self) -> f32 {
        self.stretch
    }

    pub fn is_rotating(&self) -> bool {
        self.rotation_task.is_some()
    }

    /// Full local extents with the stretch applied to the length axis.
    pub fn extents(&self) -> Vec3 {
        Vec3::new(self.size.x, self.size.y, self.size.z * self.stretch)
    }

    /// World-space center of the module's bounding box.
    pub fn center(&self) -> Vec3 {
        self.transform.translation + Vec3::Y * (self.elevation + self.size.y * 0.5)
    }

    /// Commit the module. An overlapping module refuses and must be destroyed
    /// by its owner.
    pub(crate) fn build(&mut self) -> BuildOutcome {
        if self.overlapping {
            return BuildOutcome::Discarded;
        }
        self.status = ModuleStatus::Built;
        BuildOutcome::Built
    }

    /// Suspend (`true`) or restore (`false`) the built status. Restoring
    /// clears every conflict. Returns whether the overlap flag changed.
    pub(crate) fn set_editing(&mut self, active: bool) -> bool {
        if active {
            self.status = ModuleStatus::Editing;
            return false;
        }
        self.status = ModuleStatus::Built;
        self.conflicts.clear();
        let was_overlapping = self.overlapping;
        self.overlapping = false;
        was_overlapping
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Built,
    /// The module was overlapping an incompatible peer and was destroyed.
    Discarded,
}
