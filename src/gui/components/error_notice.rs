// src/gui/components/error_notice.rs

use eframe::egui::{self, Align2, RichText};

use crate::gui::app::App;

/// Blocking notification for a failed database call. Sync actions stay
/// disabled until it is dismissed; the session keeps whatever state it
/// had before the failed action.
pub fn draw(ctx: &egui::Context, app: &mut App) {
    let Some(message) = app.controller.last_error().map(String::from) else { return };

    let mut dismiss = false;
    egui::Window::new("Sync problem")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 60.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(message.as_str()).strong());
            ui.separator();
            if ui.button("Dismiss").clicked() {
                dismiss = true;
            }
        });

    if dismiss {
        logd!("UI: sync error dismissed");
        app.controller.dismiss_error();
    }
}
