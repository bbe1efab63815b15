// src/ipn.rs
//
// Internal part numbers: CCC-NNNN-VVVV. Three uppercase letters name
// the category, four digits the sequence, four alphanumerics the
// variation. Uniqueness is judged against the session's known set.

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

pub const PATTERN: &str = "^[A-Z]{3}-[0-9]{4}-[A-Za-z0-9]{4}$";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IpnError {
    InvalidFormat,
    Duplicate,
}

impl fmt::Display for IpnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpnError::InvalidFormat => write!(f, "Invalid IPN"),
            IpnError::Duplicate => write!(f, "This IPN already exists"),
        }
    }
}

impl std::error::Error for IpnError {}

fn pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PATTERN).expect("IPN pattern compiles"))
}

/// Structural check first, then uniqueness.
pub fn validate(candidate: &str, known: &HashSet<String>) -> Result<(), IpnError> {
    if !pattern().is_match(candidate) {
        return Err(IpnError::InvalidFormat);
    }
    if known.contains(candidate) {
        return Err(IpnError::Duplicate);
    }
    Ok(())
}

/// Category code of an identifier (first segment).
pub fn category_of(ipn: &str) -> &str {
    ipn.split('-').next().unwrap_or(ipn)
}

pub fn compose(category: &str, sequence: &str, variation: &str) -> String {
    format!("{category}-{sequence}-{variation}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn structure_is_checked_first() {
        let none = known(&[]);
        assert_eq!(validate("AB-1234-WXYZ", &none), Err(IpnError::InvalidFormat));
        assert_eq!(validate("RES-123-WXYZ", &none), Err(IpnError::InvalidFormat));
        assert_eq!(validate("res-1234-WXYZ", &none), Err(IpnError::InvalidFormat));
        assert_eq!(validate("RES-1234-WXY", &none), Err(IpnError::InvalidFormat));
        assert_eq!(validate("RES-1234-WXYZ1", &none), Err(IpnError::InvalidFormat));
        assert_eq!(validate("RES_1234_WXYZ", &none), Err(IpnError::InvalidFormat));
        assert_eq!(validate("", &none), Err(IpnError::InvalidFormat));
    }

    #[test]
    fn uniqueness_after_structure() {
        let taken = known(&["RES-1234-ABCD"]);
        assert_eq!(validate("RES-1234-ABCD", &known(&[])), Ok(()));
        assert_eq!(validate("RES-1234-ABCD", &taken), Err(IpnError::Duplicate));
        assert_eq!(validate("RES-1234-abcd", &taken), Ok(()));
        // a malformed duplicate still reports the format problem
        assert_eq!(validate("ab-1234-ABCD", &known(&["ab-1234-ABCD"])), Err(IpnError::InvalidFormat));
    }

    #[test]
    fn category_prefix() {
        assert_eq!(category_of("RES-1234-ABCD"), "RES");
        assert_eq!(compose("CAP", "0001", "a0b1"), "CAP-0001-a0b1");
    }
}
