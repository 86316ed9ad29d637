use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use construction::PlacementConfig;

/// Environment variable naming a JSON placement config file.
const CONFIG_ENV: &str = "MODULAR_BUILD_CONFIG";

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Modular Build".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    });

    // Must be inserted before ConstructionPlugin builds, or defaults win
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        info!("Loading placement config from {path}");
        app.insert_resource(PlacementConfig::load_or_default(path));
    }

    app.add_plugins((
        construction::ConstructionPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    app.run();
}
