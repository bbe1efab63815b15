// src/gui/components/address_bar.rs

use eframe::egui::{self, widgets::Spinner};

use crate::gui::app::App;
use crate::vendors::{self, AttachMode};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let mut go = false;

    ui.horizontal(|ui| {
        ui.label("Address:");

        ui.add(
            egui::TextEdit::singleline(&mut app.address_text)
                .desired_width(ui.available_width() - 160.0)
                .font(egui::TextStyle::Monospace),
        );

        let vendor = vendors::for_url(app.address_text.trim());

        let button_go = ui.add_enabled(
            vendor.is_some() && !app.go_in_flight,
            egui::Button::new("Go"),
        );
        if button_go.clicked() {
            go = true;
        }

        if app.go_in_flight {
            ui.add(Spinner::new().size(16.0));
        }

        // Which extractor the address maps to, if any; watched vendors
        // attach on their own once the address settles.
        match vendor {
            Some(v) if v.attach_mode() == AttachMode::WatchAddress => {
                ui.weak(format!("{} (auto)", v.name()));
            }
            Some(v) => {
                ui.weak(v.name());
            }
            None => {
                ui.weak("no extractor");
            }
        }
    });

    // Handle Go after the borrow ends
    if go {
        app.attach_current_address();
    }
}
