use bevy::prelude::*;

use crate::module::ModuleId;

/// Exclusive editing mode of the placement controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlacementMode {
    #[default]
    Create,
    Move,
    Customize,
    Demolish,
}

impl PlacementMode {
    pub const ALL: [PlacementMode; 4] = [
        PlacementMode::Create,
        PlacementMode::Move,
        PlacementMode::Customize,
        PlacementMode::Demolish,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PlacementMode::Create => "Create",
            PlacementMode::Move => "Move",
            PlacementMode::Customize => "Customize",
            PlacementMode::Demolish => "Demolish",
        }
    }

    /// Ray-cast filter the mode starts with. The move tool switches to the
    /// grid while something is grabbed.
    pub fn layer(self) -> RaycastLayer {
        match self {
            PlacementMode::Create => RaycastLayer::Grid,
            PlacementMode::Move | PlacementMode::Customize | PlacementMode::Demolish => {
                RaycastLayer::Modules
            }
        }
    }

    pub fn pointer_kind(self) -> PointerKind {
        match self {
            PlacementMode::Create => PointerKind::Build,
            PlacementMode::Move => PointerKind::Grab,
            PlacementMode::Customize => PointerKind::Paint,
            PlacementMode::Demolish => PointerKind::Demolish,
        }
    }
}

/// Which colliders the host's ray cast should consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaycastLayer {
    /// The ground plane; hits are snapped to the grid.
    #[default]
    Grid,
    /// Placed modules only.
    Modules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Build,
    Grab,
    Paint,
    Demolish,
}

/// Cursor marker the host draws in the world.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerIndicator {
    pub kind: PointerKind,
    pub visible: bool,
    /// Snapped while ray casting against the grid, raw otherwise.
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Grid,
    Module(ModuleId),
}

/// One ray-cast result supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub target: HitTarget,
}

impl RayHit {
    pub fn grid(point: Vec3) -> Self {
        Self {
            point,
            target: HitTarget::Grid,
        }
    }

    pub fn module(point: Vec3, id: ModuleId) -> Self {
        Self {
            point,
            target: HitTarget::Module(id),
        }
    }

    pub fn module_id(&self) -> Option<ModuleId> {
        match self.target {
            HitTarget::Module(id) => Some(id),
            HitTarget::Grid => None,
        }
    }
}

/// Ray-cast result for the current frame, written by the host.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerHit(pub Option<RayHit>);

/// Edges and level of one pointer button during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub down: bool,
    pub held: bool,
    pub up: bool,
}

impl ButtonState {
    pub fn pressed() -> Self {
        Self {
            down: true,
            held: true,
            up: false,
        }
    }

    pub fn holding() -> Self {
        Self {
            down: false,
            held: true,
            up: false,
        }
    }

    pub fn released() -> Self {
        Self {
            down: false,
            held: false,
            up: true,
        }
    }
}

/// Input snapshot for one frame, decoupled from any input backend.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    pub primary: ButtonState,
    pub secondary: ButtonState,
    /// Signed scroll notches. Only the sign matters to the controller.
    pub scroll: f32,
    pub delta_secs: f32,
}

impl FrameInput {
    /// Forget one-frame edges so they are never replayed.
    pub fn clear_edges(&mut self) {
        self.primary.down = false;
        self.primary.up = false;
        self.secondary.down = false;
        self.secondary.up = false;
        self.scroll = 0.0;
    }

    pub fn any_button_up(&self) -> bool {
        self.primary.up || self.secondary.up
    }

    pub fn any_button_held(&self) -> bool {
        self.primary.held || self.secondary.held
    }
}

/// Result of trying to pick up a module with the move tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabOutcome {
    Grabbed(ModuleId),
    /// The ray missed or hit the grid.
    NoTarget,
    /// The hit module no longer exists.
    Missing(ModuleId),
    NotEditable(ModuleId),
}
