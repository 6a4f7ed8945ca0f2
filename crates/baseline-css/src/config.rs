//! Analyzer configuration.

use std::fmt;

use serde::de::{Error as DeError, Unexpected, Visitor};
use serde::{Deserialize, Deserializer};

use crate::compat::{BaselineStatus, CompatRecord};
use crate::diagnostic::Availability;
use crate::{Error, Result};

/// The minimum availability a used feature must meet to avoid a diagnostic.
///
/// Deserializes from `"widely"`, `"newly"`, or an integer year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    /// Long-established everywhere (the default).
    Widely,
    /// Available everywhere, however recently.
    Newly,
    /// Became baseline-available no later than the given year.
    Year(u16),
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::Widely
    }
}

impl Threshold {
    /// Whether a compatibility record satisfies this threshold.
    ///
    /// A `not-baseline` record has no `since_year` and never satisfies any
    /// threshold.
    pub fn permits(&self, record: &CompatRecord) -> bool {
        match self {
            Threshold::Widely => record.status == BaselineStatus::Widely,
            Threshold::Newly => {
                matches!(record.status, BaselineStatus::Widely | BaselineStatus::Newly)
            }
            Threshold::Year(year) => record.since_year.is_some_and(|since| since <= *year),
        }
    }

    /// The availability value reported in diagnostics produced under this
    /// threshold.
    pub fn availability(&self) -> Availability {
        match self {
            Threshold::Widely => Availability::Widely,
            Threshold::Newly => Availability::Newly,
            Threshold::Year(year) => Availability::Year(*year),
        }
    }
}

impl<'de> Deserialize<'de> for Threshold {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ThresholdVisitor;

        impl Visitor<'_> for ThresholdVisitor {
            type Value = Threshold;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "\"widely\", \"newly\", or an integer year")
            }

            fn visit_str<E: DeError>(self, v: &str) -> std::result::Result<Threshold, E> {
                match v {
                    "widely" => Ok(Threshold::Widely),
                    "newly" => Ok(Threshold::Newly),
                    _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
                }
            }

            fn visit_u64<E: DeError>(self, v: u64) -> std::result::Result<Threshold, E> {
                u16::try_from(v)
                    .map(Threshold::Year)
                    .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: DeError>(self, v: i64) -> std::result::Result<Threshold, E> {
                u16::try_from(v)
                    .map(Threshold::Year)
                    .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
            }
        }

        deserializer.deserialize_any(ThresholdVisitor)
    }
}

/// Analyzer configuration.
///
/// Allow-list matches are case-sensitive as configured; at-rule names are
/// the exception and match case-insensitively, since CSS treats the
/// keywords themselves as case-insensitive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Configuration {
    /// Availability threshold. Defaults to [`Threshold::Widely`].
    pub available: Threshold,
    /// Property names that never produce diagnostics.
    pub allow_properties: Vec<String>,
    /// At-rule names (without `@`) that never produce diagnostics.
    pub allow_at_rules: Vec<String>,
    /// Selector feature keys (e.g. `has`, `nesting`) that never produce
    /// diagnostics.
    pub allow_selectors: Vec<String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_available(mut self, available: Threshold) -> Self {
        self.available = available;
        self
    }

    pub fn allow_property(mut self, property: impl Into<String>) -> Self {
        self.allow_properties.push(property.into());
        self
    }

    pub fn allow_at_rule(mut self, at_rule: impl Into<String>) -> Self {
        self.allow_at_rules.push(at_rule.into());
        self
    }

    pub fn allow_selector(mut self, selector: impl Into<String>) -> Self {
        self.allow_selectors.push(selector.into());
        self
    }

    /// Parse and validate a configuration from its JSON shape, e.g.
    /// `{"available": 2023, "allowSelectors": ["has"]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Configuration =
            serde_json::from_str(json).map_err(|e| Error::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject invalid configuration shapes before traversal begins.
    pub fn validate(&self) -> Result<()> {
        if let Threshold::Year(year) = self.available {
            if !(2000..=2100).contains(&year) {
                return Err(Error::invalid_config(format!(
                    "available year {year} is out of range (2000..=2100)"
                )));
            }
        }
        Ok(())
    }
}
