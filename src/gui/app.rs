// src/gui/app.rs
use std::{
    error::Error,
    sync::{mpsc::{self, Receiver, Sender}, Arc},
    thread,
    time::Duration,
};

use eframe::egui;

use crate::{
    api::{HttpPartsApi, PartsApi},
    config::{
        consts::{PREFS_FILE, WATCH_INTERVAL_MS},
        prefs,
        state::AppState,
    },
    core::net,
    sync::{Fetcher, SyncController, UrlWatcher, WatchOutcome},
    vendors,
};

pub fn run(options: eframe::NativeOptions, state: AppState) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "PLM Scrape",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(state)))),
    )?;
    Ok(())
}

/// A page the app is currently showing fields for.
pub struct Attached {
    pub url: String,
    pub vendor: &'static str,
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // database session for the attached page
    pub controller: SyncController,

    // background re-capture for single-page-app vendors
    pub watcher: UrlWatcher,

    // one-shot Go captures answer here
    attach_tx: Sender<WatchOutcome>,
    attach_rx: Receiver<WatchOutcome>,

    pub address_text: String,
    pub attached: Option<Attached>,
    pub status: String,
    pub go_in_flight: bool,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let api: Arc<dyn PartsApi> =
            Arc::new(HttpPartsApi::new(&state.options.api_base_normalized()));
        let controller = SyncController::new(api);

        let fetcher: Fetcher = Arc::new(|url: &str| {
            net::fetch_page(url).map_err(|e| e.to_string())
        });
        let watcher = UrlWatcher::start(Duration::from_millis(WATCH_INTERVAL_MS), fetcher);

        let (attach_tx, attach_rx) = mpsc::channel();
        let address_text = state.gui.last_address.clone();

        logf!(
            "Init: api={}, watching the address bar every {}ms",
            state.options.api_base_normalized(),
            WATCH_INTERVAL_MS
        );

        Self {
            state,
            controller,
            watcher,
            attach_tx,
            attach_rx,
            address_text,
            attached: None,
            status: s!("Idle"),
            go_in_flight: false,
        }
    }

    /// Fetch and extract the address bar's page on a worker thread.
    pub fn attach_current_address(&mut self) {
        let url = s!(self.address_text.trim());
        if url.is_empty() || self.go_in_flight {
            return;
        }
        logf!("UI: Go pressed for {url}");
        self.go_in_flight = true;
        self.status = s!("Fetching page…");
        let tx = self.attach_tx.clone();
        thread::spawn(move || {
            let fetch = |u: &str| net::fetch_page(u).map_err(|e| e.to_string());
            let outcome = match vendors::capture(&url, &fetch) {
                Ok((vendor, record)) => {
                    WatchOutcome::Attached { url, vendor: vendor.name(), record }
                }
                Err(error) => WatchOutcome::Failed { url, error },
            };
            let _ = tx.send(outcome);
        });
    }

    /// Worker answers, watcher hits and window metrics, once per frame.
    fn pump(&mut self, ctx: &egui::Context) {
        self.controller.poll();
        self.watcher.set_current(self.address_text.trim());

        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.attach_rx.try_recv() {
            self.go_in_flight = false;
            outcomes.push(outcome);
        }
        while let Some(outcome) = self.watcher.try_next() {
            outcomes.push(outcome);
        }
        for outcome in outcomes {
            self.apply_outcome(outcome);
        }

        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.state.gui.window_w = rect.width() as u32;
            self.state.gui.window_h = rect.height() as u32;
        }
    }

    fn apply_outcome(&mut self, outcome: WatchOutcome) {
        match outcome {
            WatchOutcome::Attached { url, vendor, record } => {
                logf!("Attached {vendor} page: {url}");
                self.watcher.mark_attached(&url);
                self.status = match record.mpn() {
                    Some(mpn) => format!("{vendor} part {mpn}"),
                    None => format!("{vendor} page without an MPN"),
                };
                self.address_text = url.clone();
                self.state.gui.last_address = url.clone();
                self.attached = Some(Attached { url, vendor });
                self.save_prefs();
                self.controller.begin_session(record);
            }
            WatchOutcome::Failed { url, error } => {
                loge!("Attach failed for {url}: {error}");
                self.status = error;
            }
        }
    }

    pub fn save_prefs(&self) {
        prefs::save(PREFS_FILE, &self.state);
        logd!("Prefs saved");
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump(ctx);

        eframe::egui::TopBottomPanel::top("address").show(ctx, |ui| {
            crate::gui::components::address_bar::draw(ui, self);
        });

        eframe::egui::TopBottomPanel::bottom("statusline").show(ctx, |ui| {
            crate::gui::components::status_pill::draw(ui, self);
        });

        eframe::egui::CentralPanel::default().show(ctx, |ui| {
            crate::gui::components::sync_actions::draw(ui, self);

            ui.separator();

            crate::gui::components::part_table::draw(ui, self);
        });

        crate::gui::components::ipn_modal::draw(ctx, self);
        crate::gui::components::error_notice::draw(ctx, self);

        if self.controller.busy() || self.go_in_flight {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
