//! Placement configuration: grid cell size, interactive rotation tuning, and
//! the prefab list offered for creation.
//!
//! Values can be overridden from a JSON file; anything missing falls back to
//! the defaults below and anything invalid is clamped with a warning.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::module::ModuleKind;
use crate::prefabs::ModulePrefab;

pub const DEFAULT_CELL_SIZE: f32 = 0.5;
pub const DEFAULT_ROTATION_STEP_DEGREES: f32 = 45.0;
pub const DEFAULT_ROTATION_DURATION_SECS: f32 = 0.15;

/// Footprints must overlap by more than this (world units) to count as a
/// contact. Modules that merely share an edge are neighbours, not conflicts.
pub const CONTACT_EPSILON: f32 = 1e-3;

/// Wall thickness and heights are fractions of the cell size so that a
/// config with a different grid keeps sensible proportions.
const WALL_THICKNESS_RATIO: f32 = 0.2;
const WALL_HEIGHT_RATIO: f32 = 2.0;
const FLOOR_THICKNESS_RATIO: f32 = 0.1;
const OPENING_WIDTH_RATIO: f32 = 0.8;
const OPENING_DEPTH_RATIO: f32 = 0.3;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Edge length of one grid cell in world units.
    pub cell_size: f32,
    /// Yaw increment applied per scroll notch while orienting a module.
    pub rotation_step_degrees: f32,
    /// Length of the eased rotation. Zero rotates instantly.
    pub rotation_duration_secs: f32,
    /// Kinds absent from a loaded file get the stock prefab scaled to
    /// `cell_size` during validation.
    #[serde(default)]
    pub prefabs: Vec<ModulePrefab>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            rotation_step_degrees: DEFAULT_ROTATION_STEP_DEGREES,
            rotation_duration_secs: DEFAULT_ROTATION_DURATION_SECS,
            prefabs: default_prefabs(DEFAULT_CELL_SIZE),
        }
    }
}

/// The stock prefab set for a given cell size.
pub fn default_prefabs(cell: f32) -> Vec<ModulePrefab> {
    let wall_height = cell * WALL_HEIGHT_RATIO;
    vec![
        ModulePrefab {
            kind: ModuleKind::Wall,
            variant_count: 3,
            editable: true,
            size: [cell * WALL_THICKNESS_RATIO, wall_height, cell],
            elevation: 0.0,
        },
        ModulePrefab {
            kind: ModuleKind::Floor,
            variant_count: 3,
            editable: false,
            size: [cell, cell * FLOOR_THICKNESS_RATIO, cell],
            elevation: 0.0,
        },
        ModulePrefab {
            kind: ModuleKind::Door,
            variant_count: 2,
            editable: true,
            size: [
                cell * OPENING_WIDTH_RATIO,
                wall_height * 0.85,
                cell * OPENING_DEPTH_RATIO,
            ],
            elevation: 0.0,
        },
        ModulePrefab {
            kind: ModuleKind::Window,
            variant_count: 2,
            editable: true,
            size: [
                cell * OPENING_WIDTH_RATIO,
                wall_height * 0.4,
                cell * OPENING_DEPTH_RATIO,
            ],
            elevation: wall_height * 0.35,
        },
    ]
}

impl PlacementConfig {
    /// Parse a JSON document. Fields that are absent keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    /// Read the config at `path`, falling back to defaults (with a warning)
    /// when the file is missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "PlacementConfig: cannot read {:?}, using defaults: {}",
                    path, e
                );
                return Self::default();
            }
        };
        match Self::from_json_str(&text) {
            Ok(config) => {
                info!("PlacementConfig: loaded {:?}", path);
                config
            }
            Err(e) => {
                warn!(
                    "PlacementConfig: malformed {:?}, using defaults: {}",
                    path, e
                );
                Self::default()
            }
        }
    }

    /// Clamp every field into its legal range and make sure each module kind
    /// has exactly one prefab.
    pub fn validated(mut self) -> Self {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            warn!(
                "PlacementConfig: invalid cell_size {}, using {}",
                self.cell_size, DEFAULT_CELL_SIZE
            );
            self.cell_size = DEFAULT_CELL_SIZE;
        }
        if !self.rotation_step_degrees.is_finite() || self.rotation_step_degrees == 0.0 {
            warn!(
                "PlacementConfig: invalid rotation_step_degrees {}, using {}",
                self.rotation_step_degrees, DEFAULT_ROTATION_STEP_DEGREES
            );
            self.rotation_step_degrees = DEFAULT_ROTATION_STEP_DEGREES;
        }
        if !self.rotation_duration_secs.is_finite() || self.rotation_duration_secs < 0.0 {
            warn!(
                "PlacementConfig: invalid rotation_duration_secs {}, rotating instantly",
                self.rotation_duration_secs
            );
            self.rotation_duration_secs = 0.0;
        }

        let mut prefabs: Vec<ModulePrefab> = Vec::with_capacity(ModuleKind::ALL.len());
        for prefab in self.prefabs.drain(..) {
            if prefabs.iter().any(|p| p.kind == prefab.kind) {
                warn!(
                    "PlacementConfig: duplicate prefab for {:?}, keeping the first",
                    prefab.kind
                );
                continue;
            }
            prefabs.push(prefab.validated());
        }
        let stock = default_prefabs(self.cell_size);
        for kind in ModuleKind::ALL {
            if !prefabs.iter().any(|p| p.kind == kind) {
                if let Some(fallback) = stock.iter().find(|p| p.kind == kind) {
                    prefabs.push(fallback.clone());
                }
            }
        }
        self.prefabs = prefabs;
        self
    }
}
