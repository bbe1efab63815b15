// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use eframe::egui::{ IconData, ViewportBuilder };
use plm_scrape::config::{consts::PREFS_FILE, prefs};
use plm_scrape::gui;

fn app_icon() -> IconData {
    let rgba = image::load_from_memory(include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/assets/plm_scrape.png"
    )))
    .unwrap()
    .to_rgba8();
    let (w, h) = rgba.dimensions();
    IconData { rgba: rgba.into_raw(), width: w, height: h }
}

fn main() {
    let state = prefs::load(PREFS_FILE);
    let options = eframe::NativeOptions {
        // eframe 0.32: icon set via viewport builder
        viewport: ViewportBuilder::default()
            .with_icon(app_icon())
            .with_inner_size([state.gui.window_w as f32, state.gui.window_h as f32]),
        ..Default::default()
    };

    if let Err(e) = gui::run(options, state) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
