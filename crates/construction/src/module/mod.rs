//! Construction modules: walls, floors, doors, and windows placed on the grid.
//!
//! - `types`: ids, kinds, status, transform, and the `Module` itself
//! - `visuals`: cyclic appearance variants
//! - `overlap`: contact handling and footprint intersection
//! - `rotation`: eased, cancellable yaw rotation tasks

pub mod overlap;
pub mod rotation;
pub mod types;
pub mod visuals;

#[cfg(test)]
mod tests;

pub use overlap::{ContactPeer, ContactPhase, ContactVerdict, Footprint};
pub use rotation::{CancelToken, RotationStep, RotationTask};
pub use types::{
    BuildOutcome, Module, ModuleCategory, ModuleId, ModuleKind, ModuleStatus, ModuleTransform,
    PlacementStyle,
};
pub use visuals::VisualState;
