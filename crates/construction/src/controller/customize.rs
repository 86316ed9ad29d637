//! Customize mode: click to cycle a module's look, drag across same-category
//! modules to paint that look onto them.

use bevy::prelude::*;

use super::types::{FrameInput, RayHit};
use super::PlacementController;
use crate::module::ModuleId;
use crate::registry::ModuleRegistry;

impl PlacementController {
    pub(super) fn handle_customize(
        &mut self,
        registry: &mut ModuleRegistry,
        hit: Option<&RayHit>,
        input: &FrameInput,
    ) {
        let target = hit
            .and_then(RayHit::module_id)
            .filter(|id| registry.contains(*id));

        if let Some(id) = target {
            if input.primary.down || input.secondary.down {
                if let Some(index) = registry.cycle_visual(id, input.primary.down) {
                    debug!("{} now shows variant {}", id, index);
                }
                self.editing = Some(id);
            } else if input.any_button_held() {
                self.paint(registry, id);
            }
        }

        if input.any_button_up() {
            self.editing = None;
        }
    }

    /// Copy the last touched module's look onto `id` when both share a
    /// category, then make `id` the one to copy from.
    fn paint(&mut self, registry: &mut ModuleRegistry, id: ModuleId) {
        let Some(last) = self.editing.filter(|last| *last != id) else {
            return;
        };
        let same_category = match (registry.get(last), registry.get(id)) {
            (Some(source), Some(target)) => source.category() == target.category(),
            _ => false,
        };
        if !same_category {
            return;
        }
        registry.mimic_visual(id, last);
        self.editing = Some(id);
    }
}
