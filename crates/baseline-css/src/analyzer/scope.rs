//! Conditional-support scope tracking.
//!
//! An `@supports` rule that tests a feature guards its block against the
//! feature's absence, so uses of that feature inside the block are exempt
//! from reporting. A [`ScopeStack`] frame records which feature keys the
//! active `@supports` chain asserts; nested frames inherit the assertions
//! of their parent.
//!
//! Only positive assertions count. `not` and `or` terms do not guarantee
//! support, so they contribute nothing.

use std::collections::{HashMap, HashSet};

use crate::ast::{SelectorComponent, SupportsCondition, ValueComponent};

/// The feature keys positively asserted by one `@supports` condition,
/// merged with those of the enclosing frames. All keys are lower-cased.
#[derive(Debug, Clone, Default)]
pub(crate) struct SupportsAssertions {
    properties: HashSet<String>,
    property_values: HashMap<String, HashSet<String>>,
    functions: HashSet<String>,
    selectors: HashSet<String>,
}

impl SupportsAssertions {
    pub(crate) fn from_condition(condition: &SupportsCondition) -> Self {
        let mut assertions = Self::default();
        assertions.collect(condition);
        assertions
    }

    fn collect(&mut self, condition: &SupportsCondition) {
        match condition {
            SupportsCondition::And(terms) => {
                for term in terms {
                    self.collect(term);
                }
            }
            SupportsCondition::Declaration { property, value } => {
                let property = property.to_ascii_lowercase();
                for component in value {
                    self.collect_value(&property, component);
                }
                self.properties.insert(property);
            }
            SupportsCondition::Selector(components) => {
                self.collect_selectors(components);
            }
            // Negations and disjunctions do not guarantee support.
            SupportsCondition::Not(_)
            | SupportsCondition::Or(_)
            | SupportsCondition::Unknown => {}
        }
    }

    fn collect_value(&mut self, property: &str, component: &ValueComponent) {
        match component {
            ValueComponent::Keyword { value, .. } => {
                self.property_values
                    .entry(property.to_owned())
                    .or_default()
                    .insert(value.to_ascii_lowercase());
            }
            ValueComponent::Function {
                name, arguments, ..
            } => {
                self.functions.insert(name.to_ascii_lowercase());
                for argument in arguments {
                    self.collect_value(property, argument);
                }
            }
        }
    }

    fn collect_selectors(&mut self, components: &[SelectorComponent]) {
        for component in components {
            match component {
                SelectorComponent::PseudoClass {
                    name, arguments, ..
                }
                | SelectorComponent::PseudoElement {
                    name, arguments, ..
                } => {
                    self.selectors.insert(name.to_ascii_lowercase());
                    self.collect_selectors(arguments);
                }
                SelectorComponent::Nesting { .. } => {
                    self.selectors.insert("nesting".to_owned());
                }
            }
        }
    }

    fn merge(&mut self, other: &SupportsAssertions) {
        self.properties.extend(other.properties.iter().cloned());
        for (property, values) in &other.property_values {
            self.property_values
                .entry(property.clone())
                .or_default()
                .extend(values.iter().cloned());
        }
        self.functions.extend(other.functions.iter().cloned());
        self.selectors.extend(other.selectors.iter().cloned());
    }
}

/// Stack of `@supports` assertion frames. The top frame holds the union of
/// every assertion on the path from the stylesheet root to the current
/// block.
#[derive(Debug, Default)]
pub(crate) struct ScopeStack {
    frames: Vec<SupportsAssertions>,
}

impl ScopeStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, condition: &SupportsCondition) {
        let mut assertions = SupportsAssertions::from_condition(condition);
        if let Some(active) = self.frames.last() {
            assertions.merge(active);
        }
        self.frames.push(assertions);
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }

    pub(crate) fn supports_property(&self, key: &str) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.properties.contains(key))
    }

    pub(crate) fn supports_property_value(&self, property: &str, value: &str) -> bool {
        self.frames.last().is_some_and(|frame| {
            frame
                .property_values
                .get(property)
                .is_some_and(|values| values.contains(value))
        })
    }

    pub(crate) fn supports_function(&self, key: &str) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.functions.contains(key))
    }

    pub(crate) fn supports_selector(&self, key: &str) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.selectors.contains(key))
    }
}
