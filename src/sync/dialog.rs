// src/sync/dialog.rs
//
// State behind the "new IPN" dialog. The category comes from a fixed
// list, so a malformed candidate can only arise from the two typed-in
// pieces; validation runs on every edit and the verdict gates OK.

use std::collections::HashSet;

use crate::ipn::{self, IpnError};

pub struct IpnDialog {
    categories: Vec<String>,
    category: String,
    sequence: String,
    variation: String,
    validation: Result<(), IpnError>,
}

impl IpnDialog {
    pub fn new(categories: Vec<String>, known: &HashSet<String>) -> Self {
        let category = categories.first().cloned().unwrap_or_default();
        let mut dialog = Self {
            categories,
            category,
            sequence: s!(),
            variation: s!(),
            validation: Ok(()),
        };
        dialog.revalidate(known);
        dialog
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn sequence_mut(&mut self) -> &mut String {
        &mut self.sequence
    }

    pub fn variation(&self) -> &str {
        &self.variation
    }

    pub fn variation_mut(&mut self) -> &mut String {
        &mut self.variation
    }

    pub fn set_category(&mut self, category: String) {
        self.category = category;
    }

    /// Candidate IPN as currently typed, valid or not.
    pub fn candidate(&self) -> String {
        ipn::compose(&self.category, &self.sequence, &self.variation)
    }

    pub fn revalidate(&mut self, known: &HashSet<String>) {
        self.validation = ipn::validate(&self.candidate(), known);
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_ok()
    }

    pub fn error(&self) -> Option<&IpnError> {
        self.validation.as_ref().err()
    }
}
