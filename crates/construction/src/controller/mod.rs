//! The placement state machine.
//!
//! One `PlacementController::update` runs per frame with the frame's ray-cast
//! hit and input snapshot. The active mode's handler runs, then rotation
//! tasks are stepped and contacts resolved so overlap flags are current
//! before the next frame.
//!
//! - `create`: batch (wall/floor) and single (door/window) creation
//! - `move_tool`: grab, drag, rotate, release or cancel
//! - `customize`: visual cycling and paint drags
//! - `demolish`: click to destroy

mod create;
mod customize;
mod demolish;
mod move_tool;
pub mod types;


pub use types::{
    ButtonState, FrameInput, GrabOutcome, HitTarget, PlacementMode, PointerHit, PointerIndicator,
    PointerKind, RayHit, RaycastLayer,
};

use bevy::prelude::*;

use crate::config::PlacementConfig;
use crate::creation_buffer::CreationBuffer;
use crate::grid_snap::snap_to_grid;
use crate::module::{ModuleId, ModuleKind, ModuleStatus, ModuleTransform, PlacementStyle};
use crate::prefabs::ModulePrefab;
use crate::registry::ModuleRegistry;

#[derive(Resource, Debug)]
pub struct PlacementController {
    mode: PlacementMode,
    prefab: Option<ModulePrefab>,
    /// A creation gesture is open; the buffer may still be empty while a
    /// batch drag has not left its first cell.
    creating: bool,
    buffer: CreationBuffer,
    /// Grabbed module (move) or last touched module (customize).
    editing: Option<ModuleId>,
    last_snapped: Option<Vec3>,
    edit_return: Option<ModuleTransform>,
    layer: RaycastLayer,
    pointer: PointerIndicator,
    cell_size: f32,
    rotation_step: f32,
    rotation_duration: f32,
}

impl Default for PlacementController {
    fn default() -> Self {
        Self::new(&PlacementConfig::default())
    }
}

impl PlacementController {
    pub fn new(config: &PlacementConfig) -> Self {
        let mode = PlacementMode::default();
        Self {
            mode,
            prefab: None,
            creating: false,
            buffer: CreationBuffer::default(),
            editing: None,
            last_snapped: None,
            edit_return: None,
            layer: mode.layer(),
            pointer: PointerIndicator {
                kind: mode.pointer_kind(),
                ..default()
            },
            cell_size: config.cell_size,
            rotation_step: config.rotation_step_degrees,
            rotation_duration: config.rotation_duration_secs,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    pub fn prefab(&self) -> Option<&ModulePrefab> {
        self.prefab.as_ref()
    }

    pub fn selected_kind(&self) -> Option<ModuleKind> {
        self.prefab.as_ref().map(|p| p.kind)
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn buffer(&self) -> &CreationBuffer {
        &self.buffer
    }

    pub fn editing(&self) -> Option<ModuleId> {
        self.editing
    }

    pub fn edit_return(&self) -> Option<ModuleTransform> {
        self.edit_return
    }

    pub fn last_snapped(&self) -> Option<Vec3> {
        self.last_snapped
    }

    pub fn layer(&self) -> RaycastLayer {
        self.layer
    }

    pub fn pointer(&self) -> PointerIndicator {
        self.pointer
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Whether scroll input is being used to rotate something, so the host
    /// camera should not zoom.
    pub fn wants_scroll(&self) -> bool {
        match self.mode {
            PlacementMode::Create => {
                self.creating
                    && self
                        .selected_kind()
                        .is_some_and(|k| k.placement_style() == PlacementStyle::Single)
            }
            PlacementMode::Move => self.editing.is_some(),
            PlacementMode::Customize | PlacementMode::Demolish => false,
        }
    }

    // -----------------------------------------------------------------------
    // External commands
    // -----------------------------------------------------------------------

    /// Switch modes. Any open creation is aborted and a grabbed module is put
    /// back where it was picked up.
    pub fn set_mode(&mut self, mode: PlacementMode, registry: &mut ModuleRegistry) {
        self.abort_creation(registry);
        self.release_editing(registry);
        if mode != self.mode {
            info!("Placement mode: {} -> {}", self.mode.label(), mode.label());
        }
        self.mode = mode;
        self.layer = mode.layer();
        self.pointer.kind = mode.pointer_kind();
        self.last_snapped = None;
    }

    /// Select the prefab the create tool instantiates. An open gesture using
    /// the previous prefab is aborted.
    pub fn set_module_to_build(&mut self, prefab: ModulePrefab, registry: &mut ModuleRegistry) {
        if self.creating {
            debug!("Module selection changed mid-gesture, aborting creation");
            self.abort_creation(registry);
        }
        debug!("Selected {} for creation", prefab.kind.label());
        self.prefab = Some(prefab);
    }

    // -----------------------------------------------------------------------
    // Per-frame update
    // -----------------------------------------------------------------------

    /// Run one frame of the state machine.
    pub fn update(
        &mut self,
        registry: &mut ModuleRegistry,
        hit: Option<RayHit>,
        input: &FrameInput,
    ) {
        let hit = hit.as_ref();
        match self.mode {
            PlacementMode::Create => self.handle_create(registry, hit, input),
            PlacementMode::Move => self.handle_move(registry, hit, input),
            PlacementMode::Customize => self.handle_customize(registry, hit, input),
            PlacementMode::Demolish => self.handle_demolish(registry, hit, input),
        }
        self.update_pointer(hit);
        registry.tick_rotations(input.delta_secs);
        registry.update_contacts();
    }

    fn update_pointer(&mut self, hit: Option<&RayHit>) {
        let Some(hit) = hit else {
            self.pointer.visible = false;
            return;
        };
        self.pointer.visible = true;
        self.pointer.position = match self.layer {
            RaycastLayer::Grid => self.snap(hit.point),
            RaycastLayer::Modules => hit.point,
        };
    }

    fn snap(&self, point: Vec3) -> Vec3 {
        snap_to_grid(point, self.cell_size)
    }

    /// Scroll-driven rotation shared by the single-creation and move tools.
    fn rotate_by_scroll(&self, registry: &mut ModuleRegistry, id: ModuleId, scroll: f32) {
        if scroll == 0.0 {
            return;
        }
        let degrees = self.rotation_step * scroll.signum();
        if !registry.rotate(id, degrees, self.rotation_duration) {
            debug!("{} is already rotating, ignoring scroll", id);
        }
    }

    /// Drop the editing reference. A module still grabbed by the move tool
    /// goes back to its pre-grab transform and is rebuilt.
    fn release_editing(&mut self, registry: &mut ModuleRegistry) {
        let Some(id) = self.editing else {
            return;
        };
        let grabbed = registry
            .get(id)
            .is_some_and(|m| m.status() == ModuleStatus::Editing);
        if grabbed {
            self.cancel_grab(registry, id);
        } else {
            self.editing = None;
            self.edit_return = None;
        }
    }
}
