// tests/vendor_mouser.rs
use plm_scrape::record::fields;
use plm_scrape::vendors::{for_url, PageDoc};

const PAGE_URL: &str = "https://www.mouser.com/ProductDetail/ABRACON/ABM8-16.000MHZ-B2-T";

fn capture_fixture() -> plm_scrape::record::PartRecord {
    let vendor = for_url(PAGE_URL).expect("Mouser extractor");
    assert_eq!(vendor.name(), "Mouser");
    vendor.extract(&PageDoc {
        url: PAGE_URL.to_string(),
        html: include_str!("fixtures/mouser.html").to_string(),
    })
}

#[test]
fn identity_fields_come_from_the_page_header() {
    let rec = capture_fixture();
    assert_eq!(rec.get(fields::MPN), Some("ABM8-16.000MHZ-B2-T"));
    assert_eq!(rec.get(fields::MANUFACTURER), Some("Abracon"));
    assert_eq!(
        rec.get(fields::DESCRIPTION),
        Some("Crystals 16 MHz 18pF -40°C +85°C")
    );
    assert_eq!(rec.get("Mouser-PN"), Some("815-ABM8-16-B2T"));
}

#[test]
fn datasheet_link_is_absolutized_against_the_page() {
    let rec = capture_fixture();
    assert_eq!(
        rec.get(fields::DATASHEET),
        Some("https://www.mouser.com/datasheet/2/3/ABM8-16-000MHZ-B2-T-3216969.pdf")
    );
}

#[test]
fn crystal_attributes_are_normalized() {
    let rec = capture_fixture();
    assert_eq!(rec.get(fields::FREQUENCY), Some("16MHz"));
    assert_eq!(rec.get(fields::FREQUENCY_STABILITY), Some("20 PPM"));
    assert_eq!(rec.get(fields::LOAD_CAPACITANCE), Some("18pF"));
    assert_eq!(rec.get(fields::TOLERANCE), Some("10 PPM"));
}

#[test]
fn attributes_without_a_field_stay_out() {
    let rec = capture_fixture();
    // ESR and the temperature range are on the page but have no field.
    assert_eq!(rec.get("ESR"), None);
    assert_eq!(rec.get("Operating Temperature Range"), None);
    assert_eq!(rec.get(fields::RESISTANCE), None);
    assert_eq!(rec.get(fields::VOLTAGE), None);
    assert_eq!(rec.get(fields::PACKAGE), None);
}

#[test]
fn hosts_route_to_the_extractor() {
    let vendor = for_url(PAGE_URL).expect("Mouser extractor");
    assert!(vendor.matches_host("www.mouser.com"));
    assert!(vendor.matches_host("www.mouser.de"));
    assert!(vendor.matches_host("eu.mouser.com"));
    assert!(!vendor.matches_host("www.digikey.com"));
    assert!(!vendor.matches_host("mouser.com.evil.example"));
}
