//! Ordered list of modules created by the gesture in progress.

use crate::module::ModuleId;

/// Modules awaiting commit or abort, in creation order. Ids are never
/// repeated.
#[derive(Debug, Clone, Default)]
pub struct CreationBuffer {
    ids: Vec<ModuleId>,
}

impl CreationBuffer {
    pub fn push(&mut self, id: ModuleId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn first(&self) -> Option<ModuleId> {
        self.ids.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.ids.iter().copied()
    }

    /// Empty the buffer, returning its members in creation order.
    pub fn drain(&mut self) -> Vec<ModuleId> {
        std::mem::take(&mut self.ids)
    }
}
