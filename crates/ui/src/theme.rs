use bevy_egui::{egui, EguiContexts};

/// Slate panels with a blueprint-blue accent.
pub fn apply_workshop_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let panel = egui::Color32::from_rgb(32, 36, 44);
    let inactive = egui::Color32::from_rgb(48, 54, 66);
    let hover = egui::Color32::from_rgb(66, 78, 98);
    let accent = egui::Color32::from_rgb(90, 140, 200);

    for (visuals, fill) in [
        (&mut style.visuals.widgets.inactive, inactive),
        (&mut style.visuals.widgets.hovered, hover),
        (&mut style.visuals.widgets.active, accent),
    ] {
        visuals.bg_fill = fill;
        visuals.weak_bg_fill = fill;
        visuals.corner_radius = egui::CornerRadius::same(4);
    }

    style.visuals.panel_fill = panel;
    style.visuals.window_fill = panel;
    style.visuals.selection.bg_fill = accent;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, accent);

    ctx.set_style(style);
}
