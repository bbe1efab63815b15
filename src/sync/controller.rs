// src/sync/controller.rs
//
// Session state machine between a captured page record and the parts
// database. API calls run on worker threads and answer over a channel;
// every answer carries the session token it was spawned under, and
// answers from a superseded session are dropped unapplied.
//
// Entering a page runs the MPN lookup and the IPN listing in parallel.
// The category schemas ride along with the first entry and are kept
// for the life of the controller; a failed fetch is retried on the
// next entry.

use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::api::PartsApi;
use crate::ipn;
use crate::record::{CategorySchemas, PartRecord};
use crate::sync::dialog::IpnDialog;
use crate::sync::SyncState;

enum SyncEvent {
    Entry {
        token: u64,
        stored: Result<Option<PartRecord>, String>,
        ipns: Result<HashSet<String>, String>,
        schemas: Option<Result<CategorySchemas, String>>,
    },
    Created {
        token: u64,
        ipn: String,
        outcome: Result<(), String>,
    },
    Updated {
        token: u64,
        field: String,
        outcome: Result<(), String>,
    },
}

/// What the current state allows. Creation only while Unmatched;
/// updates only while Matched, restricted to fields the page actually
/// populated, in the matched category's schema order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Permissions {
    pub can_create: bool,
    pub updatable_fields: Vec<String>,
}

pub struct SyncController {
    api: Arc<dyn PartsApi>,
    tx: Sender<SyncEvent>,
    rx: Receiver<SyncEvent>,
    token: u64,
    state: SyncState,
    web_record: Option<PartRecord>,
    stored_record: Option<PartRecord>,
    known_ipns: HashSet<String>,
    schemas: CategorySchemas,
    dialog: Option<IpnDialog>,
    entry_in_flight: bool,
    action_in_flight: bool,
    last_error: Option<String>,
}

impl SyncController {
    pub fn new(api: Arc<dyn PartsApi>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            api,
            tx,
            rx,
            token: 0,
            state: SyncState::Loading,
            web_record: None,
            stored_record: None,
            known_ipns: HashSet::new(),
            schemas: CategorySchemas::new(),
            dialog: None,
            entry_in_flight: false,
            action_in_flight: false,
            last_error: None,
        }
    }

    /// Start over on a freshly captured page record.
    pub fn begin_session(&mut self, record: PartRecord) {
        self.web_record = Some(record);
        self.dialog = None;
        self.last_error = None;
        self.action_in_flight = false;
        self.reenter();
    }

    /// New lookup round for the current page. Bumps the token first so
    /// whatever an older round still delivers is ignored.
    fn reenter(&mut self) {
        self.token += 1;
        self.state = SyncState::Loading;
        self.stored_record = None;
        self.entry_in_flight = false;
        let mpn = match self.web_record.as_ref().and_then(|r| r.mpn()) {
            Some(m) => s!(m),
            None => {
                loge!("Session {}: captured record has no MPN", self.token);
                self.last_error = Some(s!("Captured record has no MPN"));
                return;
            }
        };
        logf!("Session {}: looking up MPN {}", self.token, mpn);
        self.spawn_entry(mpn);
    }

    fn spawn_entry(&mut self, mpn: String) {
        self.entry_in_flight = true;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let token = self.token;
        let need_schemas = self.schemas.is_empty();
        thread::spawn(move || {
            let lookup = {
                let api = Arc::clone(&api);
                thread::spawn(move || api.part_by_mpn(&mpn).map_err(|e| e.to_string()))
            };
            let ipns = api.list_ipns().map_err(|e| e.to_string());
            let schemas =
                need_schemas.then(|| api.category_schemas().map_err(|e| e.to_string()));
            let stored = match lookup.join() {
                Ok(res) => res,
                Err(_) => Err(s!("record lookup thread panicked")),
            };
            let _ = tx.send(SyncEvent::Entry { token, stored, ipns, schemas });
        });
    }

    /// Drain pending worker answers. Returns whether anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event);
            changed = true;
        }
        changed
    }

    /// Block until no work is in flight or `timeout` runs out.
    pub fn wait_settled(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.busy() {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return false;
            }
            match self.rx.recv_timeout(left) {
                Ok(event) => self.apply(event),
                Err(_) => return false,
            }
        }
        true
    }

    fn apply(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Entry { token, stored, ipns, schemas } => {
                if token != self.token {
                    logd!("Dropping stale entry answer (session {token}, now {})", self.token);
                    return;
                }
                self.entry_in_flight = false;
                if let Some(fetched) = schemas {
                    match fetched {
                        Ok(s) => self.schemas = s,
                        Err(e) => {
                            loge!("Schema fetch failed: {e}");
                            self.last_error = Some(join!("Schema fetch failed: ", &e));
                        }
                    }
                }
                self.apply_entry(stored, ipns);
            }
            SyncEvent::Created { token, ipn, outcome } => {
                if token != self.token {
                    logd!("Dropping stale create answer for {ipn}");
                    return;
                }
                self.action_in_flight = false;
                match outcome {
                    Ok(()) => {
                        logf!("Created {ipn}");
                        self.known_ipns.insert(ipn);
                        self.reenter();
                    }
                    Err(e) => {
                        loge!("Create {ipn} failed: {e}");
                        self.last_error = Some(e);
                    }
                }
            }
            SyncEvent::Updated { token, field, outcome } => {
                if token != self.token {
                    logd!("Dropping stale update answer for {field}");
                    return;
                }
                self.action_in_flight = false;
                match outcome {
                    Ok(()) => {
                        logf!("Updated {field}");
                        self.reenter();
                    }
                    Err(e) => {
                        loge!("Update {field} failed: {e}");
                        self.last_error = Some(e);
                    }
                }
            }
        }
    }

    fn apply_entry(
        &mut self,
        stored: Result<Option<PartRecord>, String>,
        ipns: Result<HashSet<String>, String>,
    ) {
        match (stored, ipns) {
            (Ok(stored), Ok(ipns)) => {
                self.known_ipns = ipns;
                match stored {
                    Some(record) => match record.ipn().map(String::from) {
                        Some(ipn) => {
                            logf!("Session {}: matched {ipn}", self.token);
                            self.stored_record = Some(record);
                            self.state = SyncState::Matched(ipn);
                        }
                        None => {
                            loge!("Session {}: stored record has no IPN", self.token);
                            self.last_error = Some(s!("Stored record is missing its IPN"));
                        }
                    },
                    None => {
                        logf!("Session {}: no stored record", self.token);
                        self.state = SyncState::Unmatched;
                    }
                }
            }
            (stored, ipns) => {
                let mut problems = Vec::new();
                if let Err(e) = stored {
                    problems.push(e);
                }
                if let Err(e) = ipns {
                    problems.push(e);
                }
                let message = problems.join("; ");
                loge!("Session {} entry failed: {message}", self.token);
                self.last_error = Some(message);
            }
        }
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn web_record(&self) -> Option<&PartRecord> {
        self.web_record.as_ref()
    }

    pub fn stored_record(&self) -> Option<&PartRecord> {
        self.stored_record.as_ref()
    }

    pub fn known_ipns(&self) -> &HashSet<String> {
        &self.known_ipns
    }

    pub fn schemas(&self) -> &CategorySchemas {
        &self.schemas
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    pub fn entry_in_flight(&self) -> bool {
        self.entry_in_flight
    }

    pub fn action_in_flight(&self) -> bool {
        self.action_in_flight
    }

    pub fn busy(&self) -> bool {
        self.entry_in_flight || self.action_in_flight
    }

    pub fn permissions(&self) -> Permissions {
        match &self.state {
            SyncState::Loading => Permissions::default(),
            SyncState::Unmatched => Permissions { can_create: true, updatable_fields: Vec::new() },
            SyncState::Matched(ipn) => {
                let mut updatable = Vec::new();
                let schema = self.schemas.get(ipn::category_of(ipn));
                if let (Some(web), Some(schema)) = (self.web_record.as_ref(), schema) {
                    for field in schema {
                        if web.get(field).is_some() {
                            updatable.push(field.clone());
                        }
                    }
                }
                Permissions { can_create: false, updatable_fields: updatable }
            }
        }
    }

    pub fn dialog(&self) -> Option<&IpnDialog> {
        self.dialog.as_ref()
    }

    /// One dialog at a time, only while creation is permitted and no
    /// error waits for dismissal.
    pub fn open_dialog(&mut self) -> bool {
        if self.dialog.is_some() || self.action_in_flight || self.last_error.is_some() {
            return false;
        }
        if !self.permissions().can_create {
            return false;
        }
        let categories: Vec<String> = self.schemas.keys().cloned().collect();
        self.dialog = Some(IpnDialog::new(categories, &self.known_ipns));
        true
    }

    pub fn cancel_dialog(&mut self) {
        if self.dialog.take().is_some() {
            logd!("IPN dialog cancelled");
        }
    }

    pub fn set_dialog_category(&mut self, category: String) {
        self.edit_dialog(|d| d.set_category(category));
    }

    pub fn set_dialog_sequence(&mut self, sequence: String) {
        self.edit_dialog(|d| *d.sequence_mut() = sequence);
    }

    pub fn set_dialog_variation(&mut self, variation: String) {
        self.edit_dialog(|d| *d.variation_mut() = variation);
    }

    fn edit_dialog(&mut self, edit: impl FnOnce(&mut IpnDialog)) {
        if let Some(dialog) = self.dialog.as_mut() {
            edit(dialog);
            dialog.revalidate(&self.known_ipns);
        }
    }

    /// Accept the dialog's candidate and start the create call.
    pub fn confirm_dialog(&mut self) -> bool {
        if self.action_in_flight || !self.permissions().can_create {
            return false;
        }
        let Some(dialog) = self.dialog.as_ref() else { return false };
        if !dialog.is_valid() {
            return false;
        }
        let ipn = dialog.candidate();
        self.dialog = None;
        self.spawn_create(ipn)
    }

    /// Create under an explicitly chosen identifier, dialog bypassed.
    pub fn create_as(&mut self, ipn: &str) -> Result<(), String> {
        if self.action_in_flight {
            return Err(s!("an action is already running"));
        }
        if !self.permissions().can_create {
            return Err(s!("creation is only possible for an unmatched part"));
        }
        ipn::validate(ipn, &self.known_ipns).map_err(|e| e.to_string())?;
        if self.spawn_create(s!(ipn)) {
            Ok(())
        } else {
            Err(s!("nothing captured to create from"))
        }
    }

    fn spawn_create(&mut self, ipn: String) -> bool {
        let Some(record) = self.web_record.clone() else {
            loge!("Session {}: create without a captured record", self.token);
            return false;
        };
        logf!("Session {}: creating {ipn}", self.token);
        self.action_in_flight = true;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let token = self.token;
        thread::spawn(move || {
            let outcome = api.create_part(&ipn, &record).map_err(|e| e.to_string());
            let _ = tx.send(SyncEvent::Created { token, ipn, outcome });
        });
        true
    }

    /// Push one field's page value into the matched stored record.
    pub fn update_field(&mut self, field: &str) -> Result<(), String> {
        if self.action_in_flight {
            return Err(s!("an action is already running"));
        }
        if self.last_error.is_some() {
            return Err(s!("dismiss the pending error first"));
        }
        let SyncState::Matched(ipn) = &self.state else {
            return Err(s!("updates are only possible for a matched part"));
        };
        let ipn = ipn.clone();
        if !self.permissions().updatable_fields.iter().any(|f| f == field) {
            return Err(join!(field, " is not updatable here"));
        }
        let value = match self.web_record.as_ref().and_then(|r| r.get(field)) {
            Some(v) => s!(v),
            None => return Err(join!("page has no value for ", field)),
        };
        let mut fields = PartRecord::new();
        fields.set(field, Some(value));
        logf!("Session {}: updating {field} on {ipn}", self.token);
        self.action_in_flight = true;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let token = self.token;
        let field = s!(field);
        thread::spawn(move || {
            let outcome = api.update_part(&ipn, &fields).map_err(|e| e.to_string());
            let _ = tx.send(SyncEvent::Updated { token, field, outcome });
        });
        Ok(())
    }
}
