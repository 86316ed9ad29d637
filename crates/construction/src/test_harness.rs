//! # TestSite: headless integration test harness
//!
//! Wraps `bevy::app::App` + `ConstructionPlugin` so placement scenarios can be
//! driven frame by frame through the same resources and events a real host
//! uses: `PlacementCommand` for the UI, `FrameInput` and `PointerHit` for the
//! input and ray-cast layers.

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::config::PlacementConfig;
use crate::construction_sets::ConstructionSet;
use crate::controller::{
    ButtonState, FrameInput, PlacementController, PlacementMode, PointerHit, RayHit,
};
use crate::events::{ModuleEvent, PlacementCommand};
use crate::module::{Module, ModuleId, ModuleKind};
use crate::registry::ModuleRegistry;
use crate::ConstructionPlugin;

/// Fixed frame length used by the harness clock.
pub const FRAME_DT: Duration = Duration::from_millis(50);

/// Every `ModuleEvent` published since the site was created, oldest first.
#[derive(Resource, Default, Debug)]
pub struct ModuleEventLog(pub Vec<ModuleEvent>);

fn record_module_events(mut reader: EventReader<ModuleEvent>, mut log: ResMut<ModuleEventLog>) {
    log.0.extend(reader.read().copied());
}

/// A headless Bevy App wrapping `ConstructionPlugin`.
pub struct TestSite {
    app: App,
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSite {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A site with the default configuration (0.5 cell, eased rotation).
    pub fn new() -> Self {
        Self::with_config(PlacementConfig::default())
    }

    /// A site using `config`, validated the way a loaded file would be.
    pub fn with_config(config: PlacementConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME_DT));
        app.insert_resource(config.validated());
        app.add_plugins(ConstructionPlugin);
        app.init_resource::<ModuleEventLog>();
        app.add_systems(Update, record_module_events.after(ConstructionSet::Publish));
        app.update();
        Self { app }
    }

    /// A site whose rotations complete on the frame they are triggered.
    pub fn with_instant_rotation() -> Self {
        Self::with_config(PlacementConfig {
            rotation_duration_secs: 0.0,
            ..default()
        })
    }

    // -----------------------------------------------------------------------
    // Setup (builder pattern, consumes and returns Self)
    // -----------------------------------------------------------------------

    pub fn with_mode(mut self, mode: PlacementMode) -> Self {
        self.set_mode(mode);
        self
    }

    pub fn with_module(mut self, kind: ModuleKind) -> Self {
        self.select(kind);
        self
    }

    /// Lay a batch run through `points` and commit it.
    pub fn with_run(mut self, kind: ModuleKind, points: &[Vec3]) -> Self {
        let mode = self.controller().mode();
        self.set_mode(PlacementMode::Create);
        self.select(kind);
        if let Some((first, rest)) = points.split_first() {
            self.press_grid(*first);
            for point in rest {
                self.hover_grid(*point);
            }
            let last = rest.last().unwrap_or(first);
            self.press_grid(*last);
        }
        self.set_mode(mode);
        self
    }

    // -----------------------------------------------------------------------
    // UI commands
    // -----------------------------------------------------------------------

    pub fn set_mode(&mut self, mode: PlacementMode) {
        self.send(PlacementCommand::SetMode(mode));
    }

    pub fn select(&mut self, kind: ModuleKind) {
        self.send(PlacementCommand::SetModuleToBuild(kind));
    }

    /// Send a command and run one idle frame so it is applied.
    pub fn send(&mut self, command: PlacementCommand) {
        self.app.world_mut().send_event(command);
        self.frame(None, FrameInput::default());
    }

    // -----------------------------------------------------------------------
    // Frames
    // -----------------------------------------------------------------------

    /// Run one frame with the given ray-cast result and input snapshot.
    pub fn frame(&mut self, hit: Option<RayHit>, input: FrameInput) {
        let world = self.app.world_mut();
        world.resource_mut::<PointerHit>().0 = hit;
        *world.resource_mut::<FrameInput>() = input;
        self.app.update();
    }

    /// Run one frame leaving `FrameInput` and `PointerHit` as they are.
    pub fn step(&mut self) {
        self.app.update();
    }

    /// Run `n` frames with no pointer activity.
    pub fn idle(&mut self, n: u32) {
        for _ in 0..n {
            self.frame(None, FrameInput::default());
        }
    }

    pub fn hover_grid(&mut self, point: Vec3) {
        self.frame(Some(RayHit::grid(point)), FrameInput::default());
    }

    pub fn press_grid(&mut self, point: Vec3) {
        self.frame(Some(RayHit::grid(point)), primary(ButtonState::pressed()));
    }

    pub fn hold_grid(&mut self, point: Vec3) {
        self.frame(Some(RayHit::grid(point)), primary(ButtonState::holding()));
    }

    pub fn release_grid(&mut self, point: Vec3) {
        self.frame(Some(RayHit::grid(point)), primary(ButtonState::released()));
    }

    /// Scroll while holding the primary button over `point`.
    pub fn scroll_grid(&mut self, point: Vec3, notches: f32) {
        let input = FrameInput {
            scroll: notches,
            ..primary(ButtonState::holding())
        };
        self.frame(Some(RayHit::grid(point)), input);
    }

    /// Press the secondary button with the ray missing everything.
    pub fn cancel(&mut self) {
        let input = FrameInput {
            secondary: ButtonState::pressed(),
            ..default()
        };
        self.frame(None, input);
    }

    /// Hit `id` at its own position with the given primary button state.
    pub fn on_module(&mut self, id: ModuleId, button: ButtonState) {
        let point = self
            .module(id)
            .map(|m| m.transform().translation)
            .unwrap_or_default();
        self.frame(Some(RayHit::module(point, id)), primary(button));
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn registry(&self) -> &ModuleRegistry {
        self.resource::<ModuleRegistry>()
    }

    pub fn controller(&self) -> &PlacementController {
        self.resource::<PlacementController>()
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.registry().get(id)
    }

    pub fn module_count(&self) -> usize {
        self.registry().len()
    }

    pub fn built_count(&self) -> usize {
        self.registry().built_count()
    }

    /// Ids of every module of `kind`, ascending.
    pub fn ids_of(&self, kind: ModuleKind) -> Vec<ModuleId> {
        self.registry()
            .iter()
            .filter(|m| m.kind() == kind)
            .map(Module::id)
            .collect()
    }

    pub fn events(&self) -> &[ModuleEvent] {
        &self.resource::<ModuleEventLog>().0
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_module_count(&self, expected: usize) {
        let count = self.module_count();
        assert_eq!(count, expected, "Expected {expected} module(s), got {count}");
    }

    pub fn assert_built(&self, id: ModuleId) {
        let module = self
            .module(id)
            .unwrap_or_else(|| panic!("{id} should exist"));
        assert!(module.is_built(), "{id} should be built, is {:?}", module.status());
    }
}

fn primary(button: ButtonState) -> FrameInput {
    FrameInput {
        primary: button,
        ..default()
    }
}
