// src/record.rs
//
// Captured attribute data: ordered name→value pairs. Only populated
// fields exist; a failed extraction never leaves a blank behind.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Field vocabulary shared with the parts database.
pub mod fields {
    pub const IPN: &str = "IPN";
    pub const MANUFACTURER: &str = "Manufacturer";
    pub const MPN: &str = "MPN";
    pub const DESCRIPTION: &str = "Description";
    pub const DATASHEET: &str = "Datasheet";
    pub const RESISTANCE: &str = "Resistance";
    pub const CAPACITANCE: &str = "Capacitance";
    pub const INDUCTANCE: &str = "Inductance";
    pub const FREQUENCY: &str = "Frequency";
    pub const FREQUENCY_STABILITY: &str = "Frequency Stability";
    pub const LOAD_CAPACITANCE: &str = "Load Capacitance";
    pub const VOLTAGE: &str = "Voltage";
    pub const CURRENT: &str = "Current";
    pub const POWER: &str = "Power";
    pub const TOLERANCE: &str = "Tolerance";
    pub const TEMPERATURE_COEFFICIENT: &str = "Temperature Coefficient";
    pub const MATERIAL: &str = "Material";
    pub const PACKAGE: &str = "Package";
    pub const PINS: &str = "Pins";
    pub const COLOR: &str = "Color";
    pub const WAVELENGTH: &str = "Wavelength";
    pub const I_FORWARD_MAX: &str = "I-forward-max";
    pub const V_FORWARD: &str = "V-forward";
    pub const BRIGHTNESS: &str = "Brightness";
}

/// Category code → ordered field names of that category's store table.
pub type CategorySchemas = BTreeMap<String, Vec<String>>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartRecord {
    fields: Vec<(String, String)>,
}

impl PartRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. None and empty values are dropped.
    pub fn set<S: Into<String>>(&mut self, name: &str, value: Option<S>) {
        let Some(value) = value else { return };
        let value = value.into();
        if value.is_empty() {
            return;
        }
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name.to_string(), value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn mpn(&self) -> Option<&str> {
        self.get(fields::MPN)
    }

    pub fn ipn(&self) -> Option<&str> {
        self.get(fields::IPN)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (n, v) in &self.fields {
            map.insert(n.clone(), Value::String(v.clone()));
        }
        Value::Object(map)
    }

    /// Build from a JSON object. Non-string scalars render as text;
    /// null and empty values are skipped like any other absent field.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let mut rec = PartRecord::new();
        for (name, v) in obj {
            let text = match v {
                Value::String(s) => s.clone(),
                Value::Null => continue,
                other => other.to_string(),
            };
            rec.set(name, Some(text));
        }
        Some(rec)
    }
}
