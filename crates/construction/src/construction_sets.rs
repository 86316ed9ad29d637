//! Per-frame ordering of the placement pipeline in the `Update` schedule.
//!
//! ```text
//! CollectInput  →  Apply  →  Publish
//! ```
//!
//! * **CollectInput** – Host systems fill `FrameInput` and `PointerHit` from
//!   the input backend and the ray cast. Nothing in this crate runs here.
//! * **Apply** – UI commands are applied, then the placement controller runs
//!   exactly once against the frame's input.
//! * **Publish** – Registry events are re-sent as `ModuleEvent`s. Rendering
//!   and UI systems that read them should run after this set.

use bevy::prelude::*;

/// Ordered phases for the placement systems. Configured as a chain by
/// `ConstructionPlugin`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstructionSet {
    CollectInput,
    Apply,
    Publish,
}
