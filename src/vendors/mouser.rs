// src/vendors/mouser.rs
//
// Mouser product pages. Identity fields sit in elements with stable
// ids; the attribute table is mirrored into hidden inputs named
// `..NameAndValue` whose value is "Name:Value", which is far easier
// to read than the visible table markup.

use super::{clean_text, elem_text, tolerance, AttachMode, PageDoc, Vendor};
use crate::core::html;
use crate::core::net;
use crate::core::units;
use crate::record::{fields, PartRecord};

const HOSTS: [&str; 2] = ["www.mouser.", "eu.mouser.com"];

pub struct Mouser;

impl Vendor for Mouser {
    fn name(&self) -> &'static str {
        "Mouser"
    }

    fn matches_host(&self, host: &str) -> bool {
        HOSTS.iter().any(|h| host.starts_with(h))
    }

    fn attach_mode(&self) -> AttachMode {
        AttachMode::Navigate
    }

    fn extract(&self, page: &PageDoc) -> PartRecord {
        let doc = &page.html;
        let mut rec = PartRecord::new();

        rec.set(fields::MANUFACTURER, prod_attr(doc, "Manufacturer"));
        rec.set(
            fields::MPN,
            elem_text(doc, "id=\"spnManufacturerPartNumber\"").map(|t| t.replace(' ', "")),
        );
        rec.set(fields::DESCRIPTION, elem_text(doc, "id=\"spnDescription\""));
        rec.set(
            fields::DATASHEET,
            html::marker_attr(doc, "id=\"pdp-datasheet_0\"", "href")
                .map(|href| net::resolve_href(&page.url, &href)),
        );
        rec.set(
            &self.pn_field(),
            elem_text(doc, "id=\"spnMouserPartNumFormattedForProdInfo\"")
                .map(|t| t.replace(' ', "")),
        );

        rec.set(fields::RESISTANCE, normalized(doc, "Resistance", "Ω"));
        rec.set(fields::CAPACITANCE, normalized(doc, "Capacitance", "F"));
        rec.set(fields::INDUCTANCE, normalized(doc, "Inductance", "H"));
        rec.set(fields::FREQUENCY, normalized(doc, "Frequency", "Hz"));
        rec.set(fields::FREQUENCY_STABILITY, normalized(doc, "Frequency Stability", "PPM"));
        rec.set(fields::LOAD_CAPACITANCE, normalized(doc, "Load Capacitance", "F"));
        rec.set(
            fields::VOLTAGE,
            first_normalized(
                doc,
                &["Voltage Rating", "Voltage Rating DC", "Output Voltage"],
                "V",
            ),
        );
        rec.set(
            fields::CURRENT,
            first_normalized(
                doc,
                &["Current Rating", "Maximum DC Current", "Output Current"],
                "A",
            ),
        );
        rec.set(fields::POWER, normalized(doc, "Power Rating", "W"));
        rec.set(fields::TOLERANCE, tolerance(prod_attr(doc, "Tolerance")));
        rec.set(
            fields::TEMPERATURE_COEFFICIENT,
            normalized(doc, "Temperature Coefficient", "PPM/°C"),
        );
        rec.set(fields::MATERIAL, prod_attr(doc, "Dielectric"));
        rec.set(fields::PACKAGE, prod_attr(doc, "Case Code - in"));
        rec.set(fields::PINS, normalized(doc, "Number of Positions", ""));
        rec.set(fields::COLOR, prod_attr(doc, "Illumination Color"));
        rec.set(fields::WAVELENGTH, normalized(doc, "Wavelength/Color Temperature", "m"));
        rec.set(fields::I_FORWARD_MAX, normalized(doc, "If - Forward Current", "A"));
        rec.set(fields::V_FORWARD, normalized(doc, "Vf - Forward Voltage", "V"));
        rec.set(fields::BRIGHTNESS, normalized(doc, "Luminous Intensity", "cd"));

        rec
    }
}

/// Attribute-table lookup via the hidden mirror inputs. The value
/// attribute holds "Name:Value"; everything after the first colon up
/// to the next is the payload.
fn prod_attr(doc: &str, name: &str) -> Option<String> {
    let wanted = join!(name, ":");
    let mut pos = 0;
    while let Some((start, end)) = html::next_opener_ci(doc, "input", pos) {
        pos = end;
        let opener = &doc[start..end];
        let input_name = match html::opener_attr(opener, "name") {
            Some(n) => n,
            None => continue,
        };
        if !input_name.ends_with("NameAndValue") {
            continue;
        }
        let value = html::opener_attr(opener, "value").unwrap_or_default();
        if !value.starts_with(&wanted) {
            continue;
        }
        let payload = value.split(':').nth(1).unwrap_or_default();
        return clean_text(payload);
    }
    None
}

fn normalized(doc: &str, name: &str, unit: &str) -> Option<String> {
    units::normalize(prod_attr(doc, name).as_deref(), unit)
}

fn first_normalized(doc: &str, names: &[&str], unit: &str) -> Option<String> {
    names.iter().find_map(|n| normalized(doc, n, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = concat!(
        "<input type=\"hidden\" name=\"attrs[0].NameAndValue\" value=\"Resistance:100 kOhms\">",
        "<input type=\"hidden\" name=\"attrs[1].NameAndValue\" value=\"Tolerance:&#177;1%\">",
        "<input type=\"hidden\" name=\"other\" value=\"Resistance:bogus\">",
    );

    #[test]
    fn mirror_inputs_are_matched_by_name_suffix() {
        assert_eq!(prod_attr(DOC, "Resistance"), Some(s!("100 kOhms")));
        assert_eq!(prod_attr(DOC, "Tolerance"), Some(s!("±1%")));
        assert_eq!(prod_attr(DOC, "Capacitance"), None);
    }

    #[test]
    fn attribute_prefix_must_match_whole_name() {
        // "Resistance" must not answer a query for "Res".
        assert_eq!(prod_attr(DOC, "Res"), None);
    }
}
