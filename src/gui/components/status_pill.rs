// src/gui/components/status_pill.rs

use eframe::egui::{self, widgets::Spinner, RichText};

use crate::gui::app::App;
use crate::sync::SyncState;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        if app.attached.is_none() {
            ui.weak("No page attached");
        } else {
            match app.controller.state() {
                SyncState::Loading => {
                    if app.controller.busy() {
                        ui.add(Spinner::new().size(14.0));
                    }
                    ui.label("Loading…");
                }
                SyncState::Matched(ipn) => {
                    let green = egui::Color32::from_rgb(40, 160, 60);
                    ui.label(RichText::new(ipn.as_str()).color(green).strong())
                        .on_hover_text("IPN (Internal Part Number)");
                }
                SyncState::Unmatched => {
                    let amber = egui::Color32::from_rgb(200, 140, 20);
                    ui.label(RichText::new("Unknown part").color(amber).strong())
                        .on_hover_text("Part not found in the database");
                }
            }
        }

        ui.separator();
        ui.label(&app.status);
    });
}
