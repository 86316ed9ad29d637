//! Overlap detection: what a module does when it touches a peer.
//!
//! Contacts arrive as enter/stay/exit events from the registry. Only modules
//! that are not built react. The rules:
//!
//! - two soft-collidable modules (doors, windows) conflict with each other;
//! - a fresh module touching a same-category ordinary module is discarded
//!   (between two fresh modules, the younger one);
//! - a grabbed (editing) module touching a same-category ordinary module
//!   conflicts instead, so releasing it rolls the move back.

use bevy::prelude::*;

use super::types::{Module, ModuleCategory, ModuleId, ModuleKind, ModuleStatus};
use crate::config::CONTACT_EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Enter,
    Stay,
    Exit,
}

/// What the registry must do with a module after a contact event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactVerdict {
    Keep,
    /// Destroy the module; it collided with a same-category peer before it
    /// was ever built.
    Discard,
}

/// The parts of a peer a module needs to judge a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactPeer {
    pub id: ModuleId,
    pub kind: ModuleKind,
    pub category: ModuleCategory,
    pub status: ModuleStatus,
}

impl From<&Module> for ContactPeer {
    fn from(module: &Module) -> Self {
        Self {
            id: module.id,
            kind: module.kind,
            category: module.category(),
            status: module.status,
        }
    }
}

impl Module {
    /// Whether touching `peer` is a conflict for this module right now.
    pub fn conflicts_with(&self, peer: &ContactPeer) -> bool {
        match self.status {
            ModuleStatus::Built => false,
            _ if self.kind.is_soft_collidable() && peer.kind.is_soft_collidable() => true,
            ModuleStatus::Editing => {
                !self.kind.is_soft_collidable() && self.category() == peer.category
            }
            ModuleStatus::Provisional => false,
        }
    }

    /// Apply one contact event. Returns the verdict and whether the overlap
    /// flag flipped.
    pub(crate) fn on_contact(
        &mut self,
        peer: &ContactPeer,
        phase: ContactPhase,
    ) -> (ContactVerdict, bool) {
        if self.is_built() {
            return (ContactVerdict::Keep, false);
        }
        let before = self.overlapping;
        match phase {
            ContactPhase::Enter | ContactPhase::Stay => {
                if phase == ContactPhase::Enter
                    && self.status == ModuleStatus::Provisional
                    && !self.kind.is_soft_collidable()
                    && self.category() == peer.category
                    && self.is_newer_than(peer)
                {
                    return (ContactVerdict::Discard, false);
                }
                if self.conflicts_with(peer) {
                    self.conflicts.insert(peer.id);
                }
            }
            ContactPhase::Exit => {
                self.conflicts.remove(&peer.id);
            }
        }
        self.overlapping = !self.conflicts.is_empty();
        (ContactVerdict::Keep, before != self.overlapping)
    }

    /// Between two fresh modules only the later one gives way.
    fn is_newer_than(&self, peer: &ContactPeer) -> bool {
        peer.status != ModuleStatus::Provisional || peer.id < self.id
    }

    /// Oriented rectangle this module covers on the grid plane.
    pub fn footprint(&self) -> Footprint {
        let extents = self.extents();
        let right = self.transform.rotation * Vec3::X;
        let forward = self.transform.rotation * Vec3::Z;
        Footprint {
            center: Vec2::new(self.transform.translation.x, self.transform.translation.z),
            axis_x: Vec2::new(right.x, right.z).normalize_or_zero(),
            axis_z: Vec2::new(forward.x, forward.z).normalize_or_zero(),
            half: Vec2::new(extents.x * 0.5, extents.z * 0.5),
        }
    }
}

/// Oriented rectangle in the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub center: Vec2,
    pub axis_x: Vec2,
    pub axis_z: Vec2,
    pub half: Vec2,
}

impl Footprint {
    fn projected_radius(&self, axis: Vec2) -> f32 {
        self.half.x * self.axis_x.dot(axis).abs() + self.half.y * self.axis_z.dot(axis).abs()
    }

    /// Separating-axis test. Rectangles that only share an edge, or overlap
    /// by no more than `CONTACT_EPSILON`, are not in contact.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        let offset = other.center - self.center;
        [self.axis_x, self.axis_z, other.axis_x, other.axis_z]
            .into_iter()
            .filter(|axis| axis.length_squared() > f32::EPSILON)
            .all(|axis| {
                let depth = self.projected_radius(axis) + other.projected_radius(axis)
                    - offset.dot(axis).abs();
                depth > CONTACT_EPSILON
            })
    }
}
