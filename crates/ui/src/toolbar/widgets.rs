use bevy_egui::egui;

use construction::{ModuleRegistry, PlacementController, PlacementMode};

const SELECTED_FILL: egui::Color32 = egui::Color32::from_rgb(90, 140, 200);

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

/// One-line summary of what the active tool is doing.
pub fn status_line(controller: &PlacementController, registry: &ModuleRegistry) -> String {
    let activity = match controller.mode() {
        PlacementMode::Create => match controller.selected_kind() {
            None => "pick a module (1-4)".to_string(),
            Some(kind) if controller.is_creating() => {
                format!("placing {} x{}", kind.label(), controller.buffer().len())
            }
            Some(kind) => format!("{} selected", kind.label()),
        },
        PlacementMode::Move => match controller.editing() {
            Some(id) => format!("moving {id}"),
            None => "drag a module to move it".to_string(),
        },
        PlacementMode::Customize => match controller.editing() {
            Some(id) => format!("painting from {id}"),
            None => "click to cycle, drag to paint".to_string(),
        },
        PlacementMode::Demolish => "click a module to remove it".to_string(),
    };
    format!(
        "{}: {} | {} built / {} total",
        controller.mode().label(),
        activity,
        registry.built_count(),
        registry.len()
    )
}

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

/// A toolbar button that stays highlighted while `selected`.
pub(crate) fn tool_button(ui: &mut egui::Ui, label: &str, hint: &str, selected: bool) -> bool {
    let mut button = egui::Button::new(label).min_size(egui::vec2(72.0, 24.0));
    if selected {
        button = button.fill(SELECTED_FILL);
    }
    ui.add(button).on_hover_text(hint).clicked()
}
