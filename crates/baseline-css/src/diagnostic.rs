//! Diagnostics reported by the analyzer.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::ast::SourceSpan;

/// The availability value embedded in a diagnostic.
///
/// This echoes the configured threshold, not the feature's own baseline
/// data: a year threshold of 2021 reports `2021` even when the feature
/// itself became available in 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    Widely,
    Newly,
    Year(u16),
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Widely => write!(f, "widely"),
            Availability::Newly => write!(f, "newly"),
            Availability::Year(year) => write!(f, "{}", year),
        }
    }
}

impl Serialize for Availability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Availability::Widely => serializer.serialize_str("widely"),
            Availability::Newly => serializer.serialize_str("newly"),
            Availability::Year(year) => serializer.serialize_u16(*year),
        }
    }
}

/// What was flagged, with the offending feature name(s) as written in the
/// source. Lookups use lower-cased keys; diagnostics preserve the author's
/// casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum DiagnosticKind {
    #[serde(rename = "notBaselineProperty")]
    Property { property: String },

    #[serde(rename = "notBaselinePropertyValue")]
    PropertyValue { property: String, value: String },

    #[serde(rename = "notBaselineAtRule")]
    AtRule {
        #[serde(rename = "atRule")]
        at_rule: String,
    },

    #[serde(rename = "notBaselineSelector")]
    Selector { selector: String },

    #[serde(rename = "notBaselineFunction")]
    Function { function: String },

    #[serde(rename = "notBaselineMediaCondition")]
    MediaCondition { condition: String },
}

impl DiagnosticKind {
    /// Stable identifier for the diagnostic kind.
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::Property { .. } => "notBaselineProperty",
            DiagnosticKind::PropertyValue { .. } => "notBaselinePropertyValue",
            DiagnosticKind::AtRule { .. } => "notBaselineAtRule",
            DiagnosticKind::Selector { .. } => "notBaselineSelector",
            DiagnosticKind::Function { .. } => "notBaselineFunction",
            DiagnosticKind::MediaCondition { .. } => "notBaselineMediaCondition",
        }
    }
}

/// A single finding: one offending construct, its availability context, and
/// its exact source span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    pub availability: Availability,
    #[serde(flatten)]
    pub span: SourceSpan,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::Property { property } => write!(
                f,
                "Property '{}' is not a {} available baseline feature.",
                property, self.availability
            ),
            DiagnosticKind::PropertyValue { property, value } => write!(
                f,
                "Value '{}' of property '{}' is not a {} available baseline feature.",
                value, property, self.availability
            ),
            DiagnosticKind::AtRule { at_rule } => write!(
                f,
                "At-rule '@{}' is not a {} available baseline feature.",
                at_rule, self.availability
            ),
            DiagnosticKind::Selector { selector } => write!(
                f,
                "Selector '{}' is not a {} available baseline feature.",
                selector, self.availability
            ),
            DiagnosticKind::Function { function } => write!(
                f,
                "Function '{}' is not a {} available baseline feature.",
                function, self.availability
            ),
            DiagnosticKind::MediaCondition { condition } => write!(
                f,
                "Media condition '{}' is not a {} available baseline feature.",
                condition, self.availability
            ),
        }
    }
}
