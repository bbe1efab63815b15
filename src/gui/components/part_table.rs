// src/gui/components/part_table.rs

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::gui::app::App;
use crate::ipn;
use crate::sync::SyncState;

/// Side-by-side field comparison: what the page says, what the
/// database says. Rows whose page value may be pushed get a button.
pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(web) = app.controller.web_record() else {
        ui.weak("Attach a product page to see its fields.");
        return;
    };
    let stored = app.controller.stored_record();
    let perms = app.controller.permissions();
    let blocked = app.controller.busy() || app.controller.last_error().is_some();

    // Page fields in extraction order, stored-only fields after, the
    // latter in the matched category's schema order.
    let mut names: Vec<String> = web.field_names().map(String::from).collect();
    if let Some(stored) = stored {
        let schema = match app.controller.state() {
            SyncState::Matched(ipn) => app.controller.schemas().get(ipn::category_of(ipn)),
            _ => None,
        };
        let mut add = |name: &str| {
            if !names.iter().any(|n| n == name) {
                names.push(s!(name));
            }
        };
        if let Some(schema) = schema {
            for name in schema {
                if stored.get(name).is_some() {
                    add(name);
                }
            }
        }
        for name in stored.field_names() {
            add(name);
        }
    }

    let mut push: Option<String> = None;

    TableBuilder::new(ui)
        .striped(true)
        .id_salt("part_fields")
        .column(Column::initial(170.0).at_least(120.0))
        .column(Column::remainder())
        .column(Column::remainder())
        .column(Column::auto())
        .header(20.0, |mut header| {
            header.col(|ui| { ui.strong("Field"); });
            header.col(|ui| { ui.strong("Page"); });
            header.col(|ui| { ui.strong("Database"); });
            header.col(|_ui| {});
        })
        .body(|mut body| {
            for name in &names {
                let web_value = web.get(name).unwrap_or("");
                let stored_value = stored.and_then(|r| r.get(name)).unwrap_or("");
                let updatable = perms.updatable_fields.iter().any(|f| f == name);
                let differs = updatable && web_value != stored_value;
                body.row(20.0, |mut row| {
                    row.col(|ui| { ui.label(name); });
                    row.col(|ui| {
                        if differs {
                            let amber = egui::Color32::from_rgb(200, 140, 20);
                            ui.label(egui::RichText::new(web_value).color(amber));
                        } else {
                            ui.label(web_value);
                        }
                    });
                    row.col(|ui| { ui.label(stored_value); });
                    row.col(|ui| {
                        if updatable && !blocked
                            && ui.small_button("Push")
                                .on_hover_text("Copy the page value into the database")
                                .clicked()
                        {
                            push = Some(name.clone());
                        }
                    });
                });
            }
        });

    if let Some(field) = push {
        if let Err(e) = app.controller.update_field(&field) {
            loge!("UI: push refused: {e}");
            app.status = e;
        }
    }
}
