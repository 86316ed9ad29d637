use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use construction::{ModuleKind, ModuleRegistry, PlacementCommand, PlacementController, PlacementMode};

use super::widgets::{status_line, tool_button};

fn mode_hint(mode: PlacementMode) -> &'static str {
    match mode {
        PlacementMode::Create => "F1: place new modules",
        PlacementMode::Move => "F2: drag built modules, scroll to turn, right-click to cancel",
        PlacementMode::Customize => "F3: click to cycle appearance, drag to paint it onto others",
        PlacementMode::Demolish => "F4: click to remove a module",
    }
}

// ---------------------------------------------------------------------------
// Main toolbar system
// ---------------------------------------------------------------------------

pub fn toolbar_ui(
    mut contexts: EguiContexts,
    controller: Res<PlacementController>,
    registry: Res<ModuleRegistry>,
    mut commands: EventWriter<PlacementCommand>,
) {
    let current = controller.mode();

    egui::TopBottomPanel::top("placement_toolbar")
        .exact_height(36.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 8.0;

                for mode in PlacementMode::ALL {
                    if tool_button(ui, mode.label(), mode_hint(mode), mode == current) {
                        commands.send(PlacementCommand::SetMode(mode));
                    }
                }

                if current == PlacementMode::Create {
                    ui.separator();
                    let selected = controller.selected_kind();
                    for (i, kind) in ModuleKind::ALL.into_iter().enumerate() {
                        let hint = format!("{}: {}", i + 1, kind.label());
                        if tool_button(ui, kind.label(), &hint, selected == Some(kind)) {
                            commands.send(PlacementCommand::SetModuleToBuild(kind));
                        }
                    }
                }
            });
        });

    egui::TopBottomPanel::bottom("placement_status")
        .exact_height(24.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    egui::RichText::new(status_line(&controller, &registry))
                        .color(egui::Color32::from_rgb(200, 200, 200)),
                );
            });
        });
}
