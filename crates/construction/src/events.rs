//! Events crossing the boundary between the placement core and its host.

use bevy::prelude::*;

use crate::controller::PlacementMode;
use crate::module::{ModuleId, ModuleKind};

/// Module lifecycle notifications for the rendering / scene-graph layers.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ModuleEvent {
    Created { id: ModuleId, kind: ModuleKind },
    Built { id: ModuleId },
    Destroyed { id: ModuleId },
    /// Translation or rotation changed.
    Transformed { id: ModuleId },
    /// `variant` is `None` while the default appearance is shown.
    VisualChanged { id: ModuleId, variant: Option<usize> },
    /// Status changed between provisional, built, and editing.
    StatusChanged { id: ModuleId },
    OverlapWarning { id: ModuleId, active: bool },
}

impl ModuleEvent {
    pub fn id(&self) -> ModuleId {
        match *self {
            ModuleEvent::Created { id, .. }
            | ModuleEvent::Built { id }
            | ModuleEvent::Destroyed { id }
            | ModuleEvent::Transformed { id }
            | ModuleEvent::VisualChanged { id, .. }
            | ModuleEvent::StatusChanged { id }
            | ModuleEvent::OverlapWarning { id, .. } => id,
        }
    }
}

/// Commands from the UI layer.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementCommand {
    SetMode(PlacementMode),
    SetModuleToBuild(ModuleKind),
}
