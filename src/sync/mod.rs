// src/sync/mod.rs
//
// Everything between a captured page and the parts database: session
// state, permissions, the create-IPN dialog and the address watcher.

pub mod controller;
pub mod dialog;
pub mod watcher;

pub use controller::{Permissions, SyncController};
pub use dialog::IpnDialog;
pub use watcher::{Fetcher, UrlWatcher, WatchOutcome};

/// Where the current page's part stands against the database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncState {
    /// Lookup in flight, or failed; nothing is permitted yet.
    Loading,
    /// A stored record with this IPN carries the page's MPN.
    Matched(String),
    /// Lookup finished and found nothing; creation is permitted.
    Unmatched,
}
