// tests/watch_loop.rs
//
// Address watcher behavior with an injected fetcher, no network. A
// minimal DigiKey page body is enough for the extractor to produce a
// non-empty record.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use plm_scrape::sync::{UrlWatcher, WatchOutcome};

const TICK: Duration = Duration::from_millis(20);
const PATIENCE: Duration = Duration::from_secs(5);

const PAGE: &str = concat!(
    "<html><body>",
    "<span data-testid=\"mfr-number\">RC0603FR-0710KL</span>",
    "</body></html>"
);

fn counting_fetcher(calls: Arc<AtomicUsize>) -> plm_scrape::sync::Fetcher {
    Arc::new(move |_url: &str| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(PAGE.to_string())
    })
}

fn next_outcome(watcher: &UrlWatcher) -> Option<WatchOutcome> {
    let deadline = Instant::now() + PATIENCE;
    while Instant::now() < deadline {
        if let Some(outcome) = watcher.try_next() {
            return Some(outcome);
        }
        thread::sleep(Duration::from_millis(5));
    }
    None
}

fn settle() {
    // A few ticks' worth, enough for any pending attach to fire.
    thread::sleep(TICK * 10);
}

#[test]
fn digikey_addresses_attach_on_their_own() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut watcher = UrlWatcher::start(TICK, counting_fetcher(calls.clone()));

    watcher.set_current("https://www.digikey.com/en/products/detail/yageo/RC0603FR-0710KL/726880");
    let outcome = next_outcome(&watcher).expect("watcher attaches");
    match outcome {
        WatchOutcome::Attached { url, vendor, record } => {
            assert!(url.contains("digikey.com"));
            assert_eq!(vendor, "DigiKey");
            assert_eq!(record.mpn(), Some("RC0603FR-0710KL"));
        }
        WatchOutcome::Failed { error, .. } => panic!("unexpected failure: {error}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Same address again: no refetch.
    settle();
    assert!(watcher.try_next().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    watcher.stop();
}

#[test]
fn only_watchable_addresses_trigger_a_fetch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut watcher = UrlWatcher::start(TICK, counting_fetcher(calls.clone()));

    // Nothing set yet.
    settle();
    assert!(watcher.try_next().is_none());

    // A host without an extractor.
    watcher.set_current("https://example.com/somewhere");
    settle();
    assert!(watcher.try_next().is_none());

    // Mouser attaches by explicit navigation, not from the watcher.
    watcher.set_current("https://www.mouser.com/ProductDetail/ABRACON/ABM8-16");
    settle();
    assert!(watcher.try_next().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // Moving on to a DigiKey address finally fires.
    watcher.set_current("https://www.digikey.com/en/products/detail/x/y/1");
    assert!(next_outcome(&watcher).is_some());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    watcher.stop();
}

#[test]
fn each_address_change_reattaches() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut watcher = UrlWatcher::start(TICK, counting_fetcher(calls.clone()));

    watcher.set_current("https://www.digikey.com/en/products/detail/x/first/1");
    let first = next_outcome(&watcher).expect("first attach");
    watcher.set_current("https://www.digikey.com/en/products/detail/x/second/2");
    let second = next_outcome(&watcher).expect("second attach");

    match (first, second) {
        (WatchOutcome::Attached { url: a, .. }, WatchOutcome::Attached { url: b, .. }) => {
            assert!(a.contains("first"));
            assert!(b.contains("second"));
        }
        other => panic!("expected two attaches, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    watcher.stop();
}

#[test]
fn a_failing_page_is_reported_once_not_hammered() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let fetcher: plm_scrape::sync::Fetcher = Arc::new(move |_url: &str| {
        counted.fetch_add(1, Ordering::SeqCst);
        Err("HTTP 503 Service Unavailable".to_string())
    });
    let mut watcher = UrlWatcher::start(TICK, fetcher);

    watcher.set_current("https://www.digikey.com/en/products/detail/x/y/1");
    match next_outcome(&watcher).expect("failure is reported") {
        WatchOutcome::Failed { error, .. } => assert!(error.contains("503"), "got: {error}"),
        WatchOutcome::Attached { url, .. } => panic!("unexpected attach to {url}"),
    }

    // The address has not changed, so the watcher must not retry it.
    settle();
    assert!(watcher.try_next().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    watcher.stop();
}
