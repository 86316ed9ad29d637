use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use construction::ConstructionSet;

pub mod theme;
pub mod toolbar;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, theme::apply_workshop_theme)
            .add_systems(
                Update,
                (toolbar::placement_keybinds, toolbar::toolbar_ui)
                    .before(ConstructionSet::Apply),
            );
    }
}
