// src/core/units.rs
//
// Canonical value rendering: "<number><prefix><unit>", e.g. "2.2kΩ".
// Raw vendor strings arrive as "2.2 kOhms", "±1%", "100ppm", "12 V DC".

/// Magnitude prefixes recognized as the first suffix character.
const PREFIXES: &str = "fpnµumkMGT";

/// Render a raw vendor value against a canonical unit. None means the
/// field stays unset; this never fails louder than that.
pub fn normalize(raw: Option<&str>, unit: &str) -> Option<String> {
    let raw = raw?;
    // Whitespace never carries meaning; a leading ± marker is noise.
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let compact = compact.trim_start_matches('±');
    if compact.is_empty() {
        return None;
    }
    let text = canonicalize_ppm(compact);

    let digits_end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    let (value, suffix) = text.split_at(digits_end);
    if !value.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if suffix.starts_with("PPM") {
        // Parts-per-million count; spaced so the P cannot read as pico.
        return Some(format!("{value} {unit}"));
    }
    match suffix.chars().next() {
        Some(c) if PREFIXES.contains(c) => Some(format!("{value}{c}{unit}")),
        _ => Some(format!("{value}{unit}")),
    }
}

/// Case-insensitive "ppm" → "PPM".
fn canonicalize_ppm(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while !rest.is_empty() {
        if rest.len() >= 3 && rest.is_char_boundary(3) && rest[..3].eq_ignore_ascii_case("ppm") {
            out.push_str("PPM");
            rest = &rest[3..];
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_kept_and_unit_swapped_in() {
        assert_eq!(normalize(Some("2.2k"), "Ω").as_deref(), Some("2.2kΩ"));
        assert_eq!(normalize(Some("2.2 kOhms"), "Ω").as_deref(), Some("2.2kΩ"));
        assert_eq!(normalize(Some("100 µF"), "F").as_deref(), Some("100µF"));
        assert_eq!(normalize(Some("100uF"), "F").as_deref(), Some("100uF"));
        assert_eq!(normalize(Some("32.768 MHz"), "Hz").as_deref(), Some("32.768MHz"));
    }

    #[test]
    fn plain_values_get_the_unit_appended() {
        assert_eq!(normalize(Some("±1%"), "%").as_deref(), Some("1%"));
        assert_eq!(normalize(Some("± 0.5 %"), "%").as_deref(), Some("0.5%"));
        assert_eq!(normalize(Some("12 V DC"), "V").as_deref(), Some("12V"));
        assert_eq!(normalize(Some("8"), "").as_deref(), Some("8"));
    }

    #[test]
    fn ppm_suffix_is_spaced_not_pico() {
        assert_eq!(normalize(Some("100 ppm"), "PPM/°C").as_deref(), Some("100 PPM/°C"));
        assert_eq!(normalize(Some("±10ppm"), "PPM").as_deref(), Some("10 PPM"));
        assert_eq!(normalize(Some("30PPM"), "PPM").as_deref(), Some("30 PPM"));
        // lowercase p without the ppm token still means pico
        assert_eq!(normalize(Some("22pF"), "F").as_deref(), Some("22pF"));
    }

    #[test]
    fn unparsable_input_yields_none() {
        assert_eq!(normalize(None, "V"), None);
        assert_eq!(normalize(Some(""), "V"), None);
        assert_eq!(normalize(Some("   "), "V"), None);
        assert_eq!(normalize(Some("n/a"), "V"), None);
        assert_eq!(normalize(Some("-"), "V"), None);
        assert_eq!(normalize(Some("."), "V"), None);
        assert_eq!(normalize(Some("±"), "V"), None);
    }

    #[test]
    fn leading_number_survives_verbatim() {
        for raw in ["0.047 uF", "4700pF", "1.5", "0805", "10 kΩ"] {
            let out = normalize(Some(raw), "X").expect("leading number parses");
            let digits: String = raw
                .chars()
                .filter(|c| !c.is_whitespace())
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            assert!(out.starts_with(&digits), "{out} should start with {digits}");
        }
    }
}
