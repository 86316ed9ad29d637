//! Fills the placement crate's `FrameInput` from Bevy's mouse state.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use construction::controller::ButtonState;
use construction::FrameInput;

use crate::egui_input_guard::egui_wants_pointer;

/// Sample one mouse button. Presses are dropped while the pointer is over
/// the UI; holds and releases are always reported.
pub fn sample_button(
    buttons: &ButtonInput<MouseButton>,
    button: MouseButton,
    over_ui: bool,
) -> ButtonState {
    ButtonState {
        down: buttons.just_pressed(button) && !over_ui,
        held: buttons.pressed(button),
        up: buttons.just_released(button),
    }
}

/// Convert a wheel event into notches.
pub fn scroll_notches(event: &MouseWheel) -> f32 {
    match event.unit {
        MouseScrollUnit::Line => event.y,
        MouseScrollUnit::Pixel => event.y / 100.0,
    }
}

pub fn collect_frame_input(
    buttons: Res<ButtonInput<MouseButton>>,
    mut wheel: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    mut input: ResMut<FrameInput>,
) {
    let over_ui = egui_wants_pointer(&mut contexts);
    let scroll: f32 = wheel.read().map(scroll_notches).sum();

    input.primary = sample_button(&buttons, MouseButton::Left, over_ui);
    input.secondary = sample_button(&buttons, MouseButton::Right, over_ui);
    input.scroll = if over_ui { 0.0 } else { scroll };
}
