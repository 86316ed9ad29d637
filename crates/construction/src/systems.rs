use bevy::prelude::*;

use crate::controller::{FrameInput, PlacementController, PointerHit};
use crate::events::{ModuleEvent, PlacementCommand};
use crate::prefabs::PrefabCatalog;
use crate::registry::ModuleRegistry;

/// Apply mode and prefab selections sent by the UI this frame.
pub fn apply_placement_commands(
    mut commands: EventReader<PlacementCommand>,
    catalog: Res<PrefabCatalog>,
    mut controller: ResMut<PlacementController>,
    mut registry: ResMut<ModuleRegistry>,
) {
    for command in commands.read() {
        match *command {
            PlacementCommand::SetMode(mode) => controller.set_mode(mode, &mut registry),
            PlacementCommand::SetModuleToBuild(kind) => match catalog.get(kind) {
                Some(prefab) => controller.set_module_to_build(prefab.clone(), &mut registry),
                None => warn!("No prefab registered for {}", kind.label()),
            },
        }
    }
}

/// Run the state machine once with this frame's input and ray hit. Edges
/// are consumed so a frame without fresh host input never replays them.
pub fn run_placement_controller(
    time: Res<Time>,
    hit: Res<PointerHit>,
    mut input: ResMut<FrameInput>,
    mut controller: ResMut<PlacementController>,
    mut registry: ResMut<ModuleRegistry>,
) {
    input.delta_secs = time.delta_secs();
    let frame = *input;
    controller.update(&mut registry, hit.0, &frame);
    input.clear_edges();
}

/// Re-send the registry's queued lifecycle events as Bevy events.
pub fn publish_module_events(
    mut registry: ResMut<ModuleRegistry>,
    mut events: EventWriter<ModuleEvent>,
) {
    for event in registry.drain_events() {
        events.send(event);
    }
}
