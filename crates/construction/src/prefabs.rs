//! Module prefabs: the templates the creation tool instantiates.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::PlacementConfig;
use crate::module::ModuleKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulePrefab {
    pub kind: ModuleKind,
    /// Number of appearance variants; at least 1.
    pub variant_count: usize,
    /// Whether a built module may be picked up by the move tool.
    pub editable: bool,
    /// Local extents: width (x), height (y), length along facing (z).
    pub size: [f32; 3],
    /// Height of the module's base above the grid plane.
    pub elevation: f32,
}

impl ModulePrefab {
    pub(crate) fn validated(mut self) -> Self {
        if self.variant_count == 0 {
            warn!(
                "ModulePrefab {:?}: variant_count must be at least 1",
                self.kind
            );
            self.variant_count = 1;
        }
        for extent in &mut self.size {
            if !extent.is_finite() || *extent <= 0.0 {
                warn!(
                    "ModulePrefab {:?}: invalid extent {}, using 0.1",
                    self.kind, extent
                );
                *extent = 0.1;
            }
        }
        if !self.elevation.is_finite() {
            self.elevation = 0.0;
        }
        self
    }
}

/// Prefabs offered by the toolbar, one per module kind.
#[derive(Resource, Debug, Clone)]
pub struct PrefabCatalog {
    prefabs: Vec<ModulePrefab>,
}

impl Default for PrefabCatalog {
    fn default() -> Self {
        Self::from_config(&PlacementConfig::default())
    }
}

impl PrefabCatalog {
    pub fn from_config(config: &PlacementConfig) -> Self {
        Self {
            prefabs: config.prefabs.clone(),
        }
    }

    pub fn get(&self, kind: ModuleKind) -> Option<&ModulePrefab> {
        self.prefabs.iter().find(|p| p.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModulePrefab> {
        self.prefabs.iter()
    }
}
