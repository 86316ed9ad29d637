//! Egui input guard: prevents click-through from UI elements to the world.
//!
//! While the pointer is over the toolbar, a click must not also place,
//! grab, re-skin or demolish a module underneath it.

use bevy_egui::EguiContexts;

/// Returns `true` when egui wants the pointer, i.e. the cursor is over an
/// egui panel or egui is actively handling a drag/click. Press edges and
/// scroll should be dropped when this is `true`; releases still go through
/// so a gesture started in the world can end over the UI.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}
