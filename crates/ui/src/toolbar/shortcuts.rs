use bevy::prelude::*;
use bevy_egui::EguiContexts;

use construction::{ModuleKind, PlacementCommand, PlacementController, PlacementMode};

// ---------------------------------------------------------------------------
// Placement keybinds (F1-F4 modes, 1-4 modules)
// ---------------------------------------------------------------------------

pub fn mode_for_key(key: KeyCode) -> Option<PlacementMode> {
    match key {
        KeyCode::F1 => Some(PlacementMode::Create),
        KeyCode::F2 => Some(PlacementMode::Move),
        KeyCode::F3 => Some(PlacementMode::Customize),
        KeyCode::F4 => Some(PlacementMode::Demolish),
        _ => None,
    }
}

pub fn module_for_key(key: KeyCode) -> Option<ModuleKind> {
    match key {
        KeyCode::Digit1 => Some(ModuleKind::Wall),
        KeyCode::Digit2 => Some(ModuleKind::Floor),
        KeyCode::Digit3 => Some(ModuleKind::Door),
        KeyCode::Digit4 => Some(ModuleKind::Window),
        _ => None,
    }
}

/// Module keys only act in CREATE, matching the toolbar which only shows
/// module buttons there.
pub fn placement_keybinds(
    keyboard: Res<ButtonInput<KeyCode>>,
    controller: Res<PlacementController>,
    mut contexts: EguiContexts,
    mut commands: EventWriter<PlacementCommand>,
) {
    if contexts.ctx_mut().wants_keyboard_input() {
        return;
    }

    for key in keyboard.get_just_pressed() {
        if let Some(mode) = mode_for_key(*key) {
            commands.send(PlacementCommand::SetMode(mode));
        } else if let Some(kind) = module_for_key(*key) {
            if controller.mode() == PlacementMode::Create {
                commands.send(PlacementCommand::SetModuleToBuild(kind));
            }
        }
    }
}
