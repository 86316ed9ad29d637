//! The scene-side collection of modules.
//!
//! The registry owns every module and is the only place they are created or
//! destroyed. Each state change queues a `ModuleEvent` for the host, drained
//! once per frame by `publish_module_events`.

use std::collections::{BTreeMap, BTreeSet};

use bevy::prelude::*;

use crate::events::ModuleEvent;
use crate::module::{
    BuildOutcome, ContactPeer, ContactPhase, ContactVerdict, Module, ModuleId, ModuleTransform,
    RotationStep, RotationTask,
};
use crate::prefabs::ModulePrefab;

/// Unordered pair of modules in contact, stored smaller id first.
type ContactPair = (ModuleId, ModuleId);

fn pair(a: ModuleId, b: ModuleId) -> ContactPair {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[derive(Resource, Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<ModuleId, Module>,
    next_id: u32,
    contacts: BTreeSet<ContactPair>,
    events: Vec<ModuleEvent>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Instantiate `prefab` as a provisional module.
    pub fn spawn(
        &mut self,
        prefab: &ModulePrefab,
        transform: ModuleTransform,
        stretch: f32,
    ) -> ModuleId {
        let id = ModuleId(self.next_id);
        self.next_id += 1;
        self.modules
            .insert(id, Module::from_prefab(id, prefab, transform, stretch));
        self.events.push(ModuleEvent::Created {
            id,
            kind: prefab.kind,
        });
        id
    }

    /// Destroy a module. Peers it was touching receive a contact exit.
    /// Returns `false` for ids that no longer exist.
    pub fn despawn(&mut self, id: ModuleId) -> bool {
        let Some(module) = self.modules.remove(&id) else {
            return false;
        };
        if let Some(task) = &module.rotation_task {
            task.cancel();
        }
        let touching: Vec<ContactPair> = self
            .contacts
            .iter()
            .copied()
            .filter(|(a, b)| *a == id || *b == id)
            .collect();
        for key in touching {
            self.contacts.remove(&key);
            let peer_id = if key.0 == id { key.1 } else { key.0 };
            let peer = ContactPeer::from(&module);
            self.dispatch_contact(peer_id, &peer, ContactPhase::Exit);
        }
        self.events.push(ModuleEvent::Destroyed { id });
        true
    }

    /// Commit a module. Overlapping modules are destroyed instead.
    pub fn build(&mut self, id: ModuleId) -> Option<BuildOutcome> {
        let outcome = self.modules.get_mut(&id)?.build();
        match outcome {
            BuildOutcome::Built => self.events.push(ModuleEvent::Built { id }),
            BuildOutcome::Discarded => {
                debug!("{} overlapping at build time, discarding", id);
                self.despawn(id);
            }
        }
        Some(outcome)
    }

    /// Suspend or restore a module's built status. Returns `false` for
    /// unknown ids.
    pub fn set_editing(&mut self, id: ModuleId, active: bool) -> bool {
        let Some(module) = self.modules.get_mut(&id) else {
            return false;
        };
        let cleared = module.set_editing(active);
        self.events.push(ModuleEvent::StatusChanged { id });
        if cleared {
            self.events
                .push(ModuleEvent::OverlapWarning { id, active: false });
        }
        true
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(&id)
    }

    pub fn get_mut(&mut self, id: ModuleId) -> Option<&mut Module> {
        self.modules.get_mut(&id)
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        self.modules.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn built_count(&self) -> usize {
        self.modules.values().filter(|m| m.is_built()).count()
    }

    // -----------------------------------------------------------------------
    // Transform and appearance
    // -----------------------------------------------------------------------

    /// Overwrite a module's transform, cancelling any rotation in flight.
    pub fn set_transform(&mut self, id: ModuleId, transform: ModuleTransform) -> bool {
        let Some(module) = self.modules.get_mut(&id) else {
            return false;
        };
        if let Some(task) = module.rotation_task.take() {
            task.cancel();
        }
        module.transform = transform;
        self.events.push(ModuleEvent::Transformed { id });
        true
    }

    /// Move a module without touching its orientation.
    pub fn set_translation(&mut self, id: ModuleId, translation: Vec3) -> bool {
        let Some(module) = self.modules.get_mut(&id) else {
            return false;
        };
        if module.transform.translation != translation {
            module.transform.translation = translation;
            self.events.push(ModuleEvent::Transformed { id });
        }
        true
    }

    /// Cycle a module's appearance. Returns the newly shown index.
    pub fn cycle_visual(&mut self, id: ModuleId, forward: bool) -> Option<usize> {
        let module = self.modules.get_mut(&id)?;
        let index = module.visual.cycle(forward);
        self.events.push(ModuleEvent::VisualChanged {
            id,
            variant: Some(index),
        });
        Some(index)
    }

    /// Make `target` show the variant `source` shows. No-op when `source`
    /// is still on its default appearance.
    pub fn mimic_visual(&mut self, target: ModuleId, source: ModuleId) -> bool {
        let Some(shown) = self.modules.get(&source).map(Module::shown_variant) else {
            return false;
        };
        let Some(module) = self.modules.get_mut(&target) else {
            return false;
        };
        if !module.visual.mimic(shown) {
            return false;
        }
        self.events.push(ModuleEvent::VisualChanged {
            id: target,
            variant: module.shown_variant(),
        });
        true
    }

    // -----------------------------------------------------------------------
    // Rotation tasks
    // -----------------------------------------------------------------------

    /// Start rotating a module by `degrees` about +Y. Ignored (returns
    /// `false`) while another rotation on the same module is in flight.
    pub fn rotate(&mut self, id: ModuleId, degrees: f32, duration: f32) -> bool {
        let Some(module) = self.modules.get_mut(&id) else {
            return false;
        };
        if module.rotation_task.is_some() {
            return false;
        }
        let task = RotationTask::new(module.transform.rotation, degrees, duration);
        if duration <= 0.0 {
            module.transform.rotation = task.target();
            self.events.push(ModuleEvent::Transformed { id });
        } else {
            module.rotation_task = Some(task);
        }
        true
    }

    /// Stop a module's rotation where it is.
    pub fn cancel_rotation(&mut self, id: ModuleId) {
        if let Some(task) = self
            .modules
            .get_mut(&id)
            .and_then(|m| m.rotation_task.as_ref())
        {
            task.cancel();
        }
    }

    /// Jump a rotation in flight straight to its target orientation.
    /// Returns whether one was running.
    pub fn finish_rotation(&mut self, id: ModuleId) -> bool {
        let Some(task) = self
            .modules
            .get_mut(&id)
            .and_then(|m| m.rotation_task.take())
        else {
            return false;
        };
        if task.token().is_cancelled() {
            return false;
        }
        if let Some(module) = self.modules.get_mut(&id) {
            module.transform.rotation = task.target();
        }
        self.events.push(ModuleEvent::Transformed { id });
        true
    }

    /// Advance every rotation in flight by `dt` seconds.
    pub fn tick_rotations(&mut self, dt: f32) {
        for module in self.modules.values_mut() {
            let Some(task) = module.rotation_task.as_mut() else {
                continue;
            };
            match task.step(dt) {
                RotationStep::Running(rotation) => {
                    module.transform.rotation = rotation;
                }
                RotationStep::Finished(rotation) => {
                    module.transform.rotation = rotation;
                    module.rotation_task = None;
                }
                RotationStep::Cancelled => {
                    module.rotation_task = None;
                    continue;
                }
            }
            self.events.push(ModuleEvent::Transformed { id: module.id });
        }
    }

    // -----------------------------------------------------------------------
    // Contacts
    // -----------------------------------------------------------------------

    /// Recompute which footprints touch and deliver enter/stay/exit events to
    /// every module that is not built. Modules that answer `Discard` are
    /// destroyed.
    pub fn update_contacts(&mut self) {
        let footprints: Vec<_> = self
            .modules
            .values()
            .map(|m| (m.id, m.is_built(), m.footprint()))
            .collect();

        let mut current: BTreeSet<ContactPair> = BTreeSet::new();
        for (id, built, footprint) in &footprints {
            if *built {
                continue;
            }
            for (other, _, other_footprint) in &footprints {
                if other == id {
                    continue;
                }
                let key = pair(*id, *other);
                if current.contains(&key) {
                    continue;
                }
                if footprint.overlaps(other_footprint) {
                    current.insert(key);
                }
            }
        }

        let previous = std::mem::take(&mut self.contacts);
        let mut discarded: BTreeSet<ModuleId> = BTreeSet::new();

        let phases = previous
            .difference(&current)
            .map(|key| (*key, ContactPhase::Exit))
            .chain(
                current
                    .difference(&previous)
                    .map(|key| (*key, ContactPhase::Enter)),
            )
            .chain(
                current
                    .intersection(&previous)
                    .map(|key| (*key, ContactPhase::Stay)),
            )
            .collect::<Vec<_>>();

        for ((a, b), phase) in phases {
            for (target, peer_id) in [(a, b), (b, a)] {
                if discarded.contains(&target) || discarded.contains(&peer_id) {
                    continue;
                }
                let Some(peer) = self.modules.get(&peer_id).map(ContactPeer::from) else {
                    continue;
                };
                if self.dispatch_contact(target, &peer, phase) == Some(ContactVerdict::Discard) {
                    discarded.insert(target);
                }
            }
        }

        self.contacts = current;
        for id in discarded {
            debug!("{} collided with a same-category module, discarding", id);
            self.despawn(id);
        }
    }

    fn dispatch_contact(
        &mut self,
        target: ModuleId,
        peer: &ContactPeer,
        phase: ContactPhase,
    ) -> Option<ContactVerdict> {
        let module = self.modules.get_mut(&target)?;
        let (verdict, flipped) = module.on_contact(peer, phase);
        if flipped {
            self.events.push(ModuleEvent::OverlapWarning {
                id: target,
                active: module.is_overlapping(),
            });
        }
        Some(verdict)
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Take every event queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<ModuleEvent> {
        std::mem::take(&mut self.events)
    }
}
