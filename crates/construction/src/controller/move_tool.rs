//! Move mode: pick up a built module, drag it over the grid, release to drop
//! it or cancel to put it back.

use bevy::prelude::*;

use super::types::{FrameInput, GrabOutcome, RayHit, RaycastLayer};
use super::PlacementController;
use crate::module::ModuleId;
use crate::registry::ModuleRegistry;

impl PlacementController {
    pub(super) fn handle_move(
        &mut self,
        registry: &mut ModuleRegistry,
        hit: Option<&RayHit>,
        input: &FrameInput,
    ) {
        let Some(id) = self.editing else {
            if input.primary.down {
                match self.try_grab(registry, hit) {
                    GrabOutcome::Grabbed(id) => debug!("Grabbed {}", id),
                    outcome => debug!("Grab ignored: {:?}", outcome),
                }
            }
            return;
        };

        if !registry.contains(id) {
            debug!("Grabbed {} no longer exists, releasing", id);
            self.clear_grab();
            return;
        }

        // Cancel wins over a release arriving in the same frame.
        if input.secondary.down {
            self.cancel_grab(registry, id);
            return;
        }

        if let Some(hit) = hit {
            let snapped = self.snap(hit.point);
            self.last_snapped = Some(snapped);
            registry.set_translation(id, snapped);
        }
        self.rotate_by_scroll(registry, id, input.scroll);

        if input.primary.up {
            self.finish_grab(registry, id);
        }
    }

    /// Pick up the module under the pointer if it may be edited.
    pub(super) fn try_grab(
        &mut self,
        registry: &mut ModuleRegistry,
        hit: Option<&RayHit>,
    ) -> GrabOutcome {
        let Some(id) = hit.and_then(RayHit::module_id) else {
            return GrabOutcome::NoTarget;
        };
        let Some(module) = registry.get(id) else {
            return GrabOutcome::Missing(id);
        };
        if !module.is_editable() {
            return GrabOutcome::NotEditable(id);
        }
        self.edit_return = Some(module.transform());
        registry.set_editing(id, true);
        self.editing = Some(id);
        self.layer = RaycastLayer::Grid;
        GrabOutcome::Grabbed(id)
    }

    /// Drop the grabbed module. A module overlapping a peer is put back
    /// where it was picked up.
    fn finish_grab(&mut self, registry: &mut ModuleRegistry, id: ModuleId) {
        registry.finish_rotation(id);
        registry.update_contacts();
        let overlapping = registry.get(id).is_some_and(|m| m.is_overlapping());
        if overlapping {
            info!("{} overlaps a neighbour, returning it", id);
            if let Some(transform) = self.edit_return {
                registry.set_transform(id, transform);
            }
        }
        registry.set_editing(id, false);
        self.clear_grab();
    }

    /// Restore the grabbed module's pre-grab transform and rebuild it.
    pub(super) fn cancel_grab(&mut self, registry: &mut ModuleRegistry, id: ModuleId) {
        debug!("Move of {} cancelled", id);
        if let Some(transform) = self.edit_return {
            registry.set_transform(id, transform);
        }
        registry.set_editing(id, false);
        self.clear_grab();
    }

    fn clear_grab(&mut self) {
        self.editing = None;
        self.edit_return = None;
        self.layer = self.mode.layer();
    }
}
