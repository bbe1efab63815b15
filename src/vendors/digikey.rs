// src/vendors/digikey.rs
//
// DigiKey product pages. Identity fields carry data-testid markers;
// the attribute table is the element with id="product-attributes",
// one <tr> per attribute with the value in a cell whose data-testid
// ends in "-tableCellDescription".
//
// DigiKey is a single-page app, so navigation between parts never
// reloads the page; pages from here attach through the address
// watcher instead of a one-shot Go.

use super::{clean_text, elem_text, tolerance, AttachMode, PageDoc, Vendor};
use crate::core::html;
use crate::core::net;
use crate::core::units;
use crate::record::{fields, PartRecord};

const HOSTS: [&str; 2] = ["www.digikey.", "info.digikey."];

pub struct DigiKey;

impl Vendor for DigiKey {
    fn name(&self) -> &'static str {
        "DigiKey"
    }

    fn matches_host(&self, host: &str) -> bool {
        HOSTS.iter().any(|h| host.starts_with(h))
    }

    fn attach_mode(&self) -> AttachMode {
        AttachMode::WatchAddress
    }

    fn extract(&self, page: &PageDoc) -> PartRecord {
        let doc = &page.html;
        let attrs = html::marker_block(doc, "id=\"product-attributes\"").unwrap_or("");
        let mut rec = PartRecord::new();

        rec.set(
            fields::MANUFACTURER,
            elem_text(doc, "data-testid=\"overview-manufacturer\""),
        );
        rec.set(
            fields::MPN,
            elem_text(doc, "data-testid=\"mfr-number\"").map(|t| t.replace(' ', "")),
        );
        rec.set(
            fields::DESCRIPTION,
            elem_text(doc, "track-data=\"ref_page_event=Copy Expand Description\""),
        );
        rec.set(
            fields::DATASHEET,
            html::marker_attr(doc, "data-testid=\"datasheet-download\"", "href")
                .map(|href| net::resolve_href(&page.url, &href)),
        );
        rec.set(&self.pn_field(), vendor_pn(doc));

        rec.set(fields::RESISTANCE, normalized(attrs, "Resistance", "Ω"));
        rec.set(fields::CAPACITANCE, normalized(attrs, "Capacitance", "F"));
        rec.set(fields::INDUCTANCE, normalized(attrs, "Inductance", "H"));
        rec.set(fields::FREQUENCY, normalized(attrs, "Frequency", "Hz"));
        rec.set(fields::FREQUENCY_STABILITY, normalized(attrs, "Frequency Stability", "PPM"));
        rec.set(fields::LOAD_CAPACITANCE, normalized(attrs, "Load Capacitance", "F"));
        rec.set(fields::VOLTAGE, normalized(attrs, "Voltage - Rated", "V"));
        rec.set(fields::CURRENT, normalized(attrs, "Current Rating (Amps)", "A"));
        rec.set(fields::POWER, normalized(attrs, "Power (Watts)", "W"));
        rec.set(
            fields::TOLERANCE,
            tolerance(
                prod_attr(attrs, "Tolerance", false)
                    .or_else(|| prod_attr(attrs, "Frequency Tolerance", false)),
            ),
        );

        // Class 2 ceramic capacitors list their dielectric under
        // "Temperature Coefficient", so for capacitors that cell is
        // the material, not a PPM/°C figure.
        let is_capacitor = prod_attr(attrs, "Category", false)
            .is_some_and(|c| c.contains("Capacitors"));
        if is_capacitor {
            rec.set(fields::MATERIAL, prod_attr(attrs, "Temperature Coefficient", false));
        } else {
            rec.set(
                fields::TEMPERATURE_COEFFICIENT,
                normalized(attrs, "Temperature Coefficient", "PPM/°C"),
            );
        }

        rec.set(fields::PACKAGE, prod_attr(attrs, "Supplier Device Package", true));
        rec.set(fields::PINS, normalized(attrs, "Number of Positions", ""));
        rec.set(fields::COLOR, prod_attr(attrs, "Color", false));
        rec.set(fields::WAVELENGTH, normalized(attrs, "Wavelength - Dominant", "m"));
        rec.set(fields::I_FORWARD_MAX, normalized(attrs, "Current - Test", "A"));
        rec.set(fields::V_FORWARD, normalized(attrs, "Voltage - Forward (Vf) (Typ)", "V"));
        rec.set(fields::BRIGHTNESS, normalized(attrs, "Millicandela Rating", "cd"));

        rec
    }
}

/// DigiKey order number. The copy widgets list one number per packaging
/// option; prefer the Cut Tape row, else take the first, and keep only
/// the number itself (first word).
fn vendor_pn(doc: &str) -> Option<String> {
    let texts: Vec<String> = html::marker_inner_all(
        doc,
        "track-data=\"ref_page_event=Copy Report Part Number\"",
    )
    .into_iter()
    .filter_map(clean_text)
    .collect();
    let pick = texts
        .iter()
        .find(|t| t.contains("Cut Tape"))
        .or_else(|| texts.first())?;
    pick.split_whitespace().next().map(String::from)
}

/// Attribute-table lookup: scan rows for one whose label cell text is
/// exactly `name`, then read the description cell. `first_word_only`
/// drops packaging chatter like "0603 (1608 Metric)" down to "0603".
fn prod_attr(table: &str, name: &str, first_word_only: bool) -> Option<String> {
    let mut pos = 0;
    while let Some((rs, re)) = html::next_tag_block_ci(table, "<tr", "</tr>", pos) {
        pos = re;
        let row = &table[rs..re];
        if !row_label_matches(row, name) {
            continue;
        }
        let (ds, de) = html::block_with_marker(row, "div", "-tableCellDescription")?;
        let inner = html::inner_after_open_tag(&row[ds..de]);
        let text = clean_text(&inner)?;
        if first_word_only {
            return text.split_whitespace().next().map(String::from);
        }
        return Some(text);
    }
    None
}

fn normalized(table: &str, name: &str, unit: &str) -> Option<String> {
    units::normalize(prod_attr(table, name, false).as_deref(), unit)
}

fn row_label_matches(row: &str, name: &str) -> bool {
    let mut pos = 0;
    while let Some((ds, de)) = html::next_tag_block_ci(row, "<div", "</div>", pos) {
        // Step one past the opener so nested divs surface too.
        pos = ds + 1;
        let inner = html::inner_after_open_tag(&row[ds..de]);
        if clean_text(&inner).as_deref() == Some(name) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = concat!(
        "<table id=\"product-attributes\"><tbody>",
        "<tr><td><div>Voltage - Rated</div></td>",
        "<td><div data-testid=\"attr-14-tableCellDescription\">50V</div></td></tr>",
        "<tr><td><div>Supplier Device Package</div></td>",
        "<td><div data-testid=\"attr-9-tableCellDescription\">0603 (1608 Metric)</div></td></tr>",
        "</tbody></table>",
    );

    #[test]
    fn rows_are_matched_on_exact_label() {
        assert_eq!(prod_attr(TABLE, "Voltage - Rated", false), Some(s!("50V")));
        assert_eq!(prod_attr(TABLE, "Voltage", false), None);
    }

    #[test]
    fn first_word_mode_trims_packaging_noise() {
        assert_eq!(
            prod_attr(TABLE, "Supplier Device Package", true),
            Some(s!("0603"))
        );
        assert_eq!(
            prod_attr(TABLE, "Supplier Device Package", false),
            Some(s!("0603 (1608 Metric)"))
        );
    }
}
