// tests/vendor_digikey.rs
use plm_scrape::record::fields;
use plm_scrape::vendors::{for_url, AttachMode, PageDoc};

const RESISTOR_URL: &str =
    "https://www.digikey.com/en/products/detail/yageo/RC0603FR-0710KL/726880";
const CAPACITOR_URL: &str =
    "https://www.digikey.com/en/products/detail/samsung-electro-mechanics/CL10B105KO8NNNC/3886757";

fn capture(url: &str, html: &str) -> plm_scrape::record::PartRecord {
    let vendor = for_url(url).expect("DigiKey extractor");
    assert_eq!(vendor.name(), "DigiKey");
    vendor.extract(&PageDoc { url: url.to_string(), html: html.to_string() })
}

fn resistor() -> plm_scrape::record::PartRecord {
    capture(RESISTOR_URL, include_str!("fixtures/digikey.html"))
}

fn capacitor() -> plm_scrape::record::PartRecord {
    capture(CAPACITOR_URL, include_str!("fixtures/digikey_capacitor.html"))
}

#[test]
fn identity_fields_come_from_the_overview() {
    let rec = resistor();
    assert_eq!(rec.get(fields::MANUFACTURER), Some("YAGEO"));
    assert_eq!(rec.get(fields::MPN), Some("RC0603FR-0710KL"));
    assert_eq!(rec.get(fields::DESCRIPTION), Some("RES 10K OHM 1% 1/10W 0603"));
}

#[test]
fn order_number_prefers_the_cut_tape_packaging() {
    let rec = resistor();
    assert_eq!(rec.get("DigiKey-PN"), Some("311-10.0KHRCT-ND"));
}

#[test]
fn scheme_relative_datasheet_link_becomes_https() {
    let rec = resistor();
    assert_eq!(
        rec.get(fields::DATASHEET),
        Some("https://www.yageo.com/upload/media/product/products/datasheet/rchip/PYu-RC_Group_51_RoHS_L_12.pdf")
    );
}

#[test]
fn resistor_attributes_are_normalized() {
    let rec = resistor();
    assert_eq!(rec.get(fields::RESISTANCE), Some("10kΩ"));
    assert_eq!(rec.get(fields::TOLERANCE), Some("1%"));
    assert_eq!(rec.get(fields::POWER), Some("0.1W"));
    assert_eq!(rec.get(fields::VOLTAGE), Some("75V"));
    assert_eq!(rec.get(fields::PACKAGE), Some("0603"));
    assert_eq!(rec.get(fields::TEMPERATURE_COEFFICIENT), Some("100 PPM/°C"));
    assert_eq!(rec.get(fields::MATERIAL), None);
}

#[test]
fn capacitor_temperature_coefficient_is_its_dielectric() {
    let rec = capacitor();
    assert_eq!(rec.get(fields::CAPACITANCE), Some("1µF"));
    assert_eq!(rec.get(fields::VOLTAGE), Some("16V"));
    assert_eq!(rec.get(fields::TOLERANCE), Some("10%"));
    // Class 2 ceramics: the coefficient cell holds the material code.
    assert_eq!(rec.get(fields::MATERIAL), Some("X7R"));
    assert_eq!(rec.get(fields::TEMPERATURE_COEFFICIENT), None);
}

#[test]
fn digikey_pages_attach_through_the_address_watcher() {
    let vendor = for_url(RESISTOR_URL).expect("DigiKey extractor");
    assert_eq!(vendor.attach_mode(), AttachMode::WatchAddress);
    assert!(vendor.matches_host("www.digikey.de"));
    assert!(vendor.matches_host("info.digikey.com"));
    assert!(!vendor.matches_host("www.mouser.com"));
}
