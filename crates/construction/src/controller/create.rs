//! Create mode: batch runs for walls and floors, single placement for doors
//! and windows.

use bevy::prelude::*;

use super::types::{FrameInput, RayHit};
use super::PlacementController;
use crate::grid_snap::{grid_cell, snap_to_grid};
use crate::module::{BuildOutcome, ModuleTransform, PlacementStyle};
use crate::prefabs::ModulePrefab;
use crate::registry::ModuleRegistry;

impl PlacementController {
    pub(super) fn handle_create(
        &mut self,
        registry: &mut ModuleRegistry,
        hit: Option<&RayHit>,
        input: &FrameInput,
    ) {
        if input.secondary.down && self.creating {
            debug!("Creation cancelled with {} module(s)", self.buffer.len());
            self.abort_creation(registry);
            return;
        }

        let Some(prefab) = self.prefab.clone() else {
            if input.primary.down {
                debug!("No module selected for creation, ignoring click");
            }
            return;
        };

        match prefab.kind.placement_style() {
            PlacementStyle::Batch => self.create_batch(registry, &prefab, hit, input),
            PlacementStyle::Single => self.create_single(registry, &prefab, hit, input),
        }
    }

    /// Drag-to-place: the first press opens the run, every grid cell the
    /// pointer leaves gets a module, the second press commits.
    fn create_batch(
        &mut self,
        registry: &mut ModuleRegistry,
        prefab: &ModulePrefab,
        hit: Option<&RayHit>,
        input: &FrameInput,
    ) {
        let Some(hit) = hit else {
            return;
        };
        let snapped = self.snap(hit.point);

        // A cell change is laid before a press in the same frame commits.
        let previous = self.last_snapped.replace(snapped);
        if self.creating {
            if let Some(previous) = previous.filter(|p| *p != snapped) {
                self.lay_run(registry, prefab, previous, snapped);
            }
        }

        if input.primary.down {
            if self.creating {
                self.commit_creation(registry);
            } else {
                self.creating = true;
            }
        }
    }

    /// Fill the cells between `from` and `to` with modules facing the overall
    /// direction of travel, one per Chebyshev grid step. `to` itself is left
    /// for the next step.
    fn lay_run(
        &mut self,
        registry: &mut ModuleRegistry,
        prefab: &ModulePrefab,
        from: Vec3,
        to: Vec3,
    ) {
        let cells = grid_cell(to, self.cell_size) - grid_cell(from, self.cell_size);
        let steps = cells.x.abs().max(cells.y.abs()).max(1);
        let step = (to - from) / steps as f32;
        let stretch = step.length() / self.cell_size;
        let direction = to - from;

        for i in 0..steps {
            let at = snap_to_grid(from + step * i as f32, self.cell_size);
            let id = registry.spawn(prefab, ModuleTransform::facing(at, direction), stretch);
            self.buffer.push(id);
        }
    }

    /// Press to drop one module, drag it around, scroll to turn it, release
    /// to commit.
    fn create_single(
        &mut self,
        registry: &mut ModuleRegistry,
        prefab: &ModulePrefab,
        hit: Option<&RayHit>,
        input: &FrameInput,
    ) {
        if input.primary.down && !self.creating {
            match hit {
                Some(hit) => {
                    let snapped = self.snap(hit.point);
                    let id = registry.spawn(prefab, ModuleTransform::at(snapped), 1.0);
                    self.buffer.push(id);
                    self.creating = true;
                    self.last_snapped = Some(snapped);
                }
                None => debug!("Press missed the grid, nothing placed"),
            }
        }

        if !self.creating {
            return;
        }
        let Some(id) = self.buffer.first().filter(|id| registry.contains(*id)) else {
            debug!("Placed module vanished mid-gesture, aborting");
            self.abort_creation(registry);
            return;
        };

        if let Some(hit) = hit {
            let snapped = self.snap(hit.point);
            self.last_snapped = Some(snapped);
            registry.set_translation(id, snapped);
        }
        self.rotate_by_scroll(registry, id, input.scroll);

        if input.primary.up {
            self.commit_creation(registry);
        }
    }

    /// Build every buffered module that still exists. Overlapping ones are
    /// destroyed instead.
    pub(super) fn commit_creation(&mut self, registry: &mut ModuleRegistry) {
        // Judge the final orientation, not a pose halfway through a turn
        for id in self.buffer.iter() {
            registry.finish_rotation(id);
        }
        registry.update_contacts();
        let mut built = 0usize;
        let mut discarded = 0usize;
        for id in self.buffer.drain() {
            match registry.build(id) {
                Some(BuildOutcome::Built) => built += 1,
                Some(BuildOutcome::Discarded) => discarded += 1,
                None => {}
            }
        }
        self.creating = false;
        if discarded > 0 {
            info!(
                "Committed {} module(s), discarded {} overlapping",
                built, discarded
            );
        } else {
            debug!("Committed {} module(s)", built);
        }
    }

    /// Destroy every buffered module without building it.
    pub(super) fn abort_creation(&mut self, registry: &mut ModuleRegistry) {
        let ids = self.buffer.drain();
        if !ids.is_empty() {
            debug!("Aborting creation of {} module(s)", ids.len());
        }
        for id in ids {
            registry.despawn(id);
        }
        self.creating = false;
    }
}
