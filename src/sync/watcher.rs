// src/sync/watcher.rs
//
// Polling address watcher for single-page-app vendors. The GUI pushes
// the current address in; a background thread compares it against the
// last attached one on a fixed interval and re-captures on change.
// Only vendors that declare AttachMode::WatchAddress take part;
// foreign and Navigate-mode addresses are left alone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::record::PartRecord;
use crate::vendors::{self, AttachMode};

/// Page fetch shared with the watcher thread.
pub type Fetcher = Arc<dyn Fn(&str) -> Result<String, String> + Send + Sync>;

#[derive(Debug)]
pub enum WatchOutcome {
    Attached {
        url: String,
        vendor: &'static str,
        record: PartRecord,
    },
    Failed {
        url: String,
        error: String,
    },
}

struct Shared {
    current: Mutex<String>,
    attached: Mutex<String>,
    stop: AtomicBool,
}

pub struct UrlWatcher {
    shared: Arc<Shared>,
    rx: Receiver<WatchOutcome>,
    handle: Option<JoinHandle<()>>,
}

impl UrlWatcher {
    pub fn start(interval: Duration, fetcher: Fetcher) -> Self {
        let shared = Arc::new(Shared {
            current: Mutex::new(s!()),
            attached: Mutex::new(s!()),
            stop: AtomicBool::new(false),
        });
        let (tx, rx) = mpsc::channel();
        let handle = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || run(interval, shared, fetcher, tx))
        };
        Self { shared, rx, handle: Some(handle) }
    }

    /// Tell the watcher what the address bar shows right now.
    pub fn set_current(&self, url: &str) {
        if let Ok(mut current) = self.shared.current.lock() {
            if *current != url {
                *current = s!(url);
            }
        }
    }

    /// Mark `url` as already attached so the watcher will not fire for
    /// it. Used when the user attaches by hand with Go.
    pub fn mark_attached(&self, url: &str) {
        if let Ok(mut attached) = self.shared.attached.lock() {
            *attached = s!(url);
        }
    }

    pub fn try_next(&self) -> Option<WatchOutcome> {
        self.rx.try_recv().ok()
    }

    /// Stop the thread and wait for it. Safe to call twice.
    pub fn stop(&mut self) {
        self.shared.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for UrlWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(interval: Duration, shared: Arc<Shared>, fetcher: Fetcher, tx: Sender<WatchOutcome>) {
    loop {
        thread::sleep(interval);
        if shared.stop.load(Ordering::Relaxed) {
            return;
        }

        let url = match shared.current.lock() {
            Ok(current) => current.clone(),
            Err(_) => return,
        };
        if url.is_empty() {
            continue;
        }
        let same = match shared.attached.lock() {
            Ok(attached) => *attached == url,
            Err(_) => return,
        };
        if same {
            continue;
        }
        let watchable = vendors::for_url(&url)
            .is_some_and(|v| v.attach_mode() == AttachMode::WatchAddress);
        if !watchable {
            continue;
        }

        logf!("Address changed, re-attaching: {url}");
        // Mark before reporting so a failing page is not retried every
        // tick; the user can still re-attach by hand.
        if let Ok(mut attached) = shared.attached.lock() {
            *attached = url.clone();
        }
        let outcome = match vendors::capture(&url, &*fetcher) {
            Ok((vendor, record)) => WatchOutcome::Attached {
                url: url.clone(),
                vendor: vendor.name(),
                record,
            },
            Err(error) => WatchOutcome::Failed { url: url.clone(), error },
        };
        if tx.send(outcome).is_err() {
            return;
        }
    }
}
