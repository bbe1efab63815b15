// src/gui/components/sync_actions.rs

use eframe::egui::{self, widgets::Spinner, RichText};

use crate::gui::app::App;
use crate::sync::SyncState;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let mut open_dialog = false;

    ui.horizontal(|ui| {
        let green = egui::Color32::from_rgb(30, 140, 60);
        let white = egui::Color32::WHITE;

        let can_create = app.controller.permissions().can_create
            && !app.controller.busy()
            && app.controller.last_error().is_none();

        let button_add = ui.add_enabled(
            can_create,
            egui::Button::new(
                RichText::new("ADD PART")
                    .color(white)
                    .strong())
                .fill(green));

        if button_add.clicked() {
            open_dialog = true;
        }

        if app.controller.action_in_flight() {
            ui.add(Spinner::new().size(16.0));
            ui.label("Syncing…");
        } else if let SyncState::Matched(_) = app.controller.state() {
            let n = app.controller.permissions().updatable_fields.len();
            if n > 0 {
                ui.weak(format!("{n} field(s) can be pushed from this page"));
            }
        }
    });

    if open_dialog && !app.controller.open_dialog() {
        logd!("UI: dialog request refused");
    }
}
