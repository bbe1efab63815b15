// src/gui/components/ipn_modal.rs

use eframe::egui::{self, Align2, RichText};

use crate::gui::app::App;

/// The "new part number" window. Category comes from the schema list;
/// the two typed pieces are rechecked on every keystroke and OK stays
/// disabled until the whole candidate passes.
pub fn draw(ctx: &egui::Context, app: &mut App) {
    let Some(dialog) = app.controller.dialog() else { return };

    // Snapshot for rendering; edits go back through the controller.
    let categories = dialog.categories().to_vec();
    let category = s!(dialog.category());
    let mut sequence = s!(dialog.sequence());
    let mut variation = s!(dialog.variation());
    let error = dialog.error().map(|e| e.to_string());
    let candidate = dialog.candidate();
    let valid = dialog.is_valid();

    let mut picked: Option<String> = None;
    let mut sequence_changed = false;
    let mut variation_changed = false;
    let mut confirm = false;
    let mut cancel = false;

    egui::Window::new("New part number")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                egui::ComboBox::from_id_salt("ipn_category")
                    .selected_text(category.as_str())
                    .show_ui(ui, |ui| {
                        for c in &categories {
                            if ui.selectable_label(*c == category, c.as_str()).clicked() {
                                picked = Some(c.clone());
                            }
                        }
                    });
                ui.label("-");
                sequence_changed = ui
                    .add(
                        egui::TextEdit::singleline(&mut sequence)
                            .char_limit(4)
                            .desired_width(48.0)
                            .hint_text("0000"),
                    )
                    .changed();
                ui.label("-");
                variation_changed = ui
                    .add(
                        egui::TextEdit::singleline(&mut variation)
                            .char_limit(4)
                            .desired_width(48.0)
                            .hint_text("0000"),
                    )
                    .changed();
            });

            match &error {
                Some(message) => {
                    let red = egui::Color32::from_rgb(200, 60, 40);
                    ui.colored_label(red, message);
                }
                None => {
                    ui.label(RichText::new(candidate.as_str()).strong());
                }
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.add_enabled(valid, egui::Button::new("OK")).clicked() {
                    confirm = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if let Some(category) = picked {
        app.controller.set_dialog_category(category);
    }
    if sequence_changed {
        app.controller.set_dialog_sequence(sequence);
    }
    if variation_changed {
        app.controller.set_dialog_variation(variation);
    }
    if confirm && !app.controller.confirm_dialog() {
        logd!("UI: create request refused");
    }
    if cancel {
        app.controller.cancel_dialog();
    }
}
