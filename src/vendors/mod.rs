// src/vendors/mod.rs
//
// One extractor per supported distributor site. Each knows which hosts
// it serves, how a page lands in it (direct navigation vs. address
// watching), and how to lift a PartRecord out of raw product HTML.

pub mod digikey;
pub mod mouser;

use crate::core::html;
use crate::core::net;
use crate::core::sanitize;
use crate::core::units;
use crate::record::PartRecord;

/// A fetched product page: the address it came from plus its markup.
pub struct PageDoc {
    pub url: String,
    pub html: String,
}

/// How pages from a vendor reach the extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachMode {
    /// User pastes an address and hits Go.
    Navigate,
    /// Background watcher re-captures whenever the address changes.
    WatchAddress,
}

pub trait Vendor: Send + Sync {
    fn name(&self) -> &'static str;
    fn matches_host(&self, host: &str) -> bool;
    fn attach_mode(&self) -> AttachMode;
    fn extract(&self, page: &PageDoc) -> PartRecord;

    /// Vendor-specific order-number field, e.g. "Mouser-PN".
    fn pn_field(&self) -> String {
        join!(self.name(), "-PN")
    }
}

pub static VENDORS: [&dyn Vendor; 2] = [&mouser::Mouser, &digikey::DigiKey];

pub fn for_host(host: &str) -> Option<&'static dyn Vendor> {
    VENDORS.iter().copied().find(|v| v.matches_host(host))
}

pub fn for_url(url: &str) -> Option<&'static dyn Vendor> {
    for_host(net::host_of(url))
}

/// Fetch `url` and run the matching extractor over it.
///
/// `fetch` is injected so the GUI, the CLI and tests can share this
/// path; errors come back as plain text ready for the status line.
pub fn capture(
    url: &str,
    fetch: &dyn Fn(&str) -> Result<String, String>,
) -> Result<(&'static dyn Vendor, PartRecord), String> {
    let vendor = match for_url(url) {
        Some(v) => v,
        None => return Err(s!("no extractor for this address")),
    };
    logf!("Capturing {} page: {}", vendor.name(), url);
    let html = match fetch(url) {
        Ok(h) => h,
        Err(e) => {
            loge!("Fetch failed: {e}");
            return Err(e);
        }
    };
    let record = vendor.extract(&PageDoc { url: s!(url), html });
    if record.is_empty() {
        loge!("{} page yielded no fields: {}", vendor.name(), url);
        return Err(s!("page has no readable part attributes"));
    }
    logf!("Extracted {} fields from {} page", record.len(), vendor.name());
    Ok((vendor, record))
}

/// Markup fragment to displayable text: tags out, entities decoded,
/// surrounding whitespace dropped. Empty results become None.
pub(crate) fn clean_text(raw: &str) -> Option<String> {
    let text = sanitize::normalize_entities(&html::strip_tags(raw));
    let text = text.trim();
    if text.is_empty() { None } else { Some(s!(text)) }
}

/// Inner text of the first element whose opener carries `marker`.
pub(crate) fn elem_text(doc: &str, marker: &str) -> Option<String> {
    clean_text(html::marker_inner(doc, marker)?)
}

/// Site tolerance cells hold either a percentage or a PPM figure;
/// anything else is noise and stays out of the record.
pub(crate) fn tolerance(raw: Option<String>) -> Option<String> {
    let raw = raw?;
    if raw.contains('%') {
        return units::normalize(Some(&raw), "%");
    }
    if raw.to_uppercase().contains("PPM") {
        return units::normalize(Some(&raw), "PPM");
    }
    None
}
