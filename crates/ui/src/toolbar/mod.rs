//! Placement toolbar, split into sub-modules:
//!
//! - `shortcuts`: F1-F4 mode keys and 1-4 module keys
//! - `ui_system`: the `toolbar_ui` egui system
//! - `widgets`: status line text and button helpers

mod shortcuts;
mod ui_system;
mod widgets;

pub use shortcuts::{mode_for_key, module_for_key, placement_keybinds};
pub use ui_system::toolbar_ui;
pub use widgets::status_line;
