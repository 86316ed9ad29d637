use bevy::prelude::*;

use super::types::{FrameInput, RayHit};
use super::PlacementController;
use crate::registry::ModuleRegistry;

impl PlacementController {
    /// Destroy the module under the pointer on press. No confirmation.
    pub(super) fn handle_demolish(
        &mut self,
        registry: &mut ModuleRegistry,
        hit: Option<&RayHit>,
        input: &FrameInput,
    ) {
        if !input.primary.down {
            return;
        }
        let Some(id) = hit.and_then(RayHit::module_id) else {
            return;
        };
        if registry.despawn(id) {
            debug!("Demolished {}", id);
        }
    }
}
