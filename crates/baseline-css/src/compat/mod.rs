//! Browser compatibility data model.
//!
//! A [`CompatDatabase`] maps canonical, lower-cased feature keys to
//! [`CompatRecord`]s, scoped by syntax kind. The database is read-only
//! during analysis and may be shared across parallel analyses without
//! synchronization. Absent entries mean "no compatibility concern": the
//! analyzer treats unknown features as supported.

mod data;

use std::collections::HashMap;

/// Cross-browser availability classification of a web-platform feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaselineStatus {
    /// Not available in every major browser.
    NotBaseline,
    /// Recently became available everywhere.
    Newly,
    /// Long-established everywhere.
    Widely,
}

/// Availability record for one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatRecord {
    pub status: BaselineStatus,
    /// Year the feature first became baseline-available, when dated.
    /// `None` for features that are not baseline at all.
    pub since_year: Option<u16>,
}

impl CompatRecord {
    pub fn new(status: BaselineStatus, since_year: Option<u16>) -> Self {
        Self { status, since_year }
    }
}

/// Read-only mapping from feature keys to availability records, one table
/// per syntax kind.
#[derive(Debug, Clone, Default)]
pub struct CompatDatabase {
    properties: HashMap<String, CompatRecord>,
    property_values: HashMap<String, HashMap<String, CompatRecord>>,
    at_rules: HashMap<String, CompatRecord>,
    selectors: HashMap<String, CompatRecord>,
    functions: HashMap<String, CompatRecord>,
    media_conditions: HashMap<String, CompatRecord>,
}

impl CompatDatabase {
    /// Create an empty database. Hosts with their own versioned data can
    /// populate it through the `insert_*` methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled snapshot derived from the public web-features dataset.
    pub fn bundled() -> &'static CompatDatabase {
        &data::BUNDLED
    }

    pub fn insert_property(&mut self, name: &str, record: CompatRecord) {
        self.properties.insert(name.to_ascii_lowercase(), record);
    }

    pub fn insert_property_value(&mut self, property: &str, value: &str, record: CompatRecord) {
        self.property_values
            .entry(property.to_ascii_lowercase())
            .or_default()
            .insert(value.to_ascii_lowercase(), record);
    }

    pub fn insert_at_rule(&mut self, name: &str, record: CompatRecord) {
        self.at_rules.insert(name.to_ascii_lowercase(), record);
    }

    pub fn insert_selector(&mut self, name: &str, record: CompatRecord) {
        self.selectors.insert(name.to_ascii_lowercase(), record);
    }

    pub fn insert_function(&mut self, name: &str, record: CompatRecord) {
        self.functions.insert(name.to_ascii_lowercase(), record);
    }

    pub fn insert_media_condition(&mut self, name: &str, record: CompatRecord) {
        self.media_conditions
            .insert(name.to_ascii_lowercase(), record);
    }

    /// Look up a property by its lower-cased key.
    pub fn property(&self, key: &str) -> Option<&CompatRecord> {
        self.properties.get(key)
    }

    /// Look up a value keyword tied to a specific property.
    pub fn property_value(&self, property: &str, value: &str) -> Option<&CompatRecord> {
        self.property_values
            .get(property)
            .and_then(|values| values.get(value))
    }

    pub fn at_rule(&self, key: &str) -> Option<&CompatRecord> {
        self.at_rules.get(key)
    }

    pub fn selector(&self, key: &str) -> Option<&CompatRecord> {
        self.selectors.get(key)
    }

    pub fn function(&self, key: &str) -> Option<&CompatRecord> {
        self.functions.get(key)
    }

    pub fn media_condition(&self, key: &str) -> Option<&CompatRecord> {
        self.media_conditions.get(key)
    }
}
