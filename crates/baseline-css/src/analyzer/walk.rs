//! Syntax tree traversal and feature checks.

use super::scope::ScopeStack;
use crate::ast::{
    AtRule, AtRulePrelude, Block, BlockItem, Declaration, MediaFeature, Rule, SelectorComponent,
    SourceSpan, StyleRule, Stylesheet, ValueComponent,
};
use crate::compat::{CompatDatabase, CompatRecord};
use crate::config::Configuration;
use crate::diagnostic::{Diagnostic, DiagnosticKind};

/// Checks every feature-bearing construct in a stylesheet against a
/// compatibility database and an availability threshold.
///
/// Feature names are looked up by their lower-cased keys; diagnostics
/// preserve the author's casing. Vendor-prefixed names (including custom
/// properties) and names absent from the database are never flagged.
pub struct Analyzer<'a> {
    config: &'a Configuration,
    database: &'a CompatDatabase,
}

impl<'a> Analyzer<'a> {
    pub fn new(config: &'a Configuration, database: &'a CompatDatabase) -> Self {
        Self { config, database }
    }

    /// Walk the stylesheet and collect diagnostics in source order.
    pub fn analyze(&self, stylesheet: &Stylesheet) -> Vec<Diagnostic> {
        let mut walk = Walk {
            config: self.config,
            database: self.database,
            scope: ScopeStack::new(),
            diagnostics: vec![],
        };
        walk.rules(&stylesheet.rules);
        tracing::debug!(count = walk.diagnostics.len(), "analysis complete");
        walk.diagnostics
    }
}

struct Walk<'a> {
    config: &'a Configuration,
    database: &'a CompatDatabase,
    scope: ScopeStack,
    diagnostics: Vec<Diagnostic>,
}

impl Walk<'_> {
    fn rules(&mut self, rules: &[Rule]) {
        for rule in rules {
            self.rule(rule);
        }
    }

    fn rule(&mut self, rule: &Rule) {
        match rule {
            Rule::Style(style) => self.style_rule(style),
            Rule::At(at) => self.at_rule(at),
        }
    }

    fn style_rule(&mut self, rule: &StyleRule) {
        self.selector_components(&rule.selectors);
        self.block(&rule.block);
    }

    fn block(&mut self, block: &Block) {
        for item in &block.items {
            match item {
                BlockItem::Declaration(declaration) => self.declaration(declaration),
                BlockItem::Rule(rule) => self.rule(rule),
            }
        }
    }

    fn at_rule(&mut self, rule: &AtRule) {
        self.at_rule_name(rule);

        if let AtRulePrelude::Media(features) = &rule.prelude {
            for feature in features {
                self.media_feature(feature);
            }
        }

        if let AtRulePrelude::Supports(condition) = &rule.prelude {
            self.scope.push(condition);
            if let Some(block) = &rule.block {
                self.block(block);
            }
            self.scope.pop();
        } else if let Some(block) = &rule.block {
            self.block(block);
        }
    }

    fn at_rule_name(&mut self, rule: &AtRule) {
        if rule.name.starts_with('-') {
            return;
        }
        if self
            .config
            .allow_at_rules
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&rule.name))
        {
            return;
        }
        let key = rule.name.to_ascii_lowercase();
        if self.below_threshold(self.database.at_rule(&key)) {
            self.report(
                DiagnosticKind::AtRule {
                    at_rule: rule.name.clone(),
                },
                rule.name_span,
            );
        }
    }

    fn media_feature(&mut self, feature: &MediaFeature) {
        if feature.name.starts_with('-') {
            return;
        }
        let key = feature.name.to_ascii_lowercase();
        if self.below_threshold(self.database.media_condition(&key)) {
            self.report(
                DiagnosticKind::MediaCondition {
                    condition: feature.name.clone(),
                },
                feature.span,
            );
        }
    }

    fn declaration(&mut self, declaration: &Declaration) {
        let property = &declaration.property;
        // Vendor-prefixed properties and custom properties both start with
        // a dash and carry no baseline data.
        let prefixed = property.starts_with('-');
        let allowed = self
            .config
            .allow_properties
            .iter()
            .any(|name| name == property);
        let key = property.to_ascii_lowercase();

        if !prefixed
            && !allowed
            && !self.scope.supports_property(&key)
            && self.below_threshold(self.database.property(&key))
        {
            self.report(
                DiagnosticKind::Property {
                    property: property.clone(),
                },
                declaration.property_span,
            );
        }

        let check_keywords = !prefixed && !allowed;
        for component in &declaration.value {
            self.value_component(property, &key, check_keywords, component);
        }
    }

    /// Check one value component. Keywords and functions are both checked
    /// at any nesting depth, mirroring what an `@supports` feature test
    /// asserts for the same value.
    fn value_component(
        &mut self,
        property: &str,
        property_key: &str,
        check_keywords: bool,
        component: &ValueComponent,
    ) {
        match component {
            ValueComponent::Keyword { value, span } => {
                if !check_keywords {
                    return;
                }
                let value_key = value.to_ascii_lowercase();
                if self.scope.supports_property_value(property_key, &value_key) {
                    return;
                }
                if self.below_threshold(self.database.property_value(property_key, &value_key)) {
                    self.report(
                        DiagnosticKind::PropertyValue {
                            property: property.to_owned(),
                            value: value.clone(),
                        },
                        *span,
                    );
                }
            }
            ValueComponent::Function {
                name,
                span,
                arguments,
            } => {
                if !name.starts_with('-') {
                    let key = name.to_ascii_lowercase();
                    if !self.scope.supports_function(&key)
                        && self.below_threshold(self.database.function(&key))
                    {
                        self.report(
                            DiagnosticKind::Function {
                                function: name.clone(),
                            },
                            *span,
                        );
                    }
                }
                for argument in arguments {
                    self.value_component(property, property_key, check_keywords, argument);
                }
            }
        }
    }

    fn selector_components(&mut self, components: &[SelectorComponent]) {
        for component in components {
            match component {
                SelectorComponent::PseudoClass {
                    name,
                    span,
                    arguments,
                }
                | SelectorComponent::PseudoElement {
                    name,
                    span,
                    arguments,
                } => {
                    self.selector_feature(name, *span);
                    self.selector_components(arguments);
                }
                SelectorComponent::Nesting { span } => self.selector_feature("nesting", *span),
            }
        }
    }

    fn selector_feature(&mut self, name: &str, span: SourceSpan) {
        if name.starts_with('-') {
            return;
        }
        let key = name.to_ascii_lowercase();
        if self.config.allow_selectors.iter().any(|s| s == &key) {
            return;
        }
        if self.scope.supports_selector(&key) {
            return;
        }
        if self.below_threshold(self.database.selector(&key)) {
            self.report(DiagnosticKind::Selector { selector: key }, span);
        }
    }

    fn below_threshold(&self, record: Option<&CompatRecord>) -> bool {
        record.is_some_and(|record| !self.config.available.permits(record))
    }

    fn report(&mut self, kind: DiagnosticKind, span: SourceSpan) {
        self.diagnostics.push(Diagnostic {
            kind,
            availability: self.config.available.availability(),
            span,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Threshold;
    use crate::diagnostic::Availability;

    fn analyze(css: &str, config: Configuration) -> Vec<Diagnostic> {
        let stylesheet = Stylesheet::parse(css).unwrap();
        Analyzer::new(&config, CompatDatabase::bundled()).analyze(&stylesheet)
    }

    fn widely(css: &str) -> Vec<Diagnostic> {
        analyze(css, Configuration::new())
    }

    fn newly(css: &str) -> Vec<Diagnostic> {
        analyze(css, Configuration::new().with_available(Threshold::Newly))
    }

    #[test]
    fn widely_available_features_pass() {
        assert!(widely("a { color: red; background: blue; }").is_empty());
    }

    #[test]
    fn flags_not_baseline_property() {
        let diagnostics = widely("a { accent-color: bisque; }");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::Property {
                property: "accent-color".into(),
            }
        );
        assert_eq!(diagnostics[0].availability, Availability::Widely);
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 5, 1, 17));
        assert_eq!(
            diagnostics[0].to_string(),
            "Property 'accent-color' is not a widely available baseline feature."
        );
    }

    #[test]
    fn newly_available_property_depends_on_threshold() {
        let css = ".box { backdrop-filter: blur(2px); }";

        let diagnostics = widely(css);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 8, 1, 23));

        assert!(newly(css).is_empty());
    }

    #[test]
    fn year_threshold_compares_against_baseline_year() {
        let css = "a { overscroll-behavior: contain; }";

        let diagnostics = analyze(
            css,
            Configuration::new().with_available(Threshold::Year(2018)),
        );
        assert_eq!(diagnostics.len(), 1);
        // The diagnostic reports the configured year, not the feature's.
        assert_eq!(diagnostics[0].availability, Availability::Year(2018));
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 5, 1, 24));

        assert!(
            analyze(
                css,
                Configuration::new().with_available(Threshold::Year(2019)),
            )
            .is_empty()
        );
    }

    #[test]
    fn flags_not_baseline_property_value() {
        let diagnostics = widely("a { clip-path: fill-box; }");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::PropertyValue {
                property: "clip-path".into(),
                value: "fill-box".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 16, 1, 24));

        assert!(newly("a { clip-path: fill-box; }").is_empty());
    }

    #[test]
    fn unknown_features_are_never_flagged() {
        assert!(widely("a { gibberish-prop: wat; unknown: 12; }").is_empty());
    }

    #[test]
    fn vendor_prefixed_and_custom_properties_are_skipped() {
        let css = "a { -webkit-backdrop-filter: none; --accent-color: auto; }";
        assert!(widely(css).is_empty());
    }

    #[test]
    fn flags_not_baseline_at_rule() {
        let diagnostics = widely("@view-transition { navigation: auto; }");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::AtRule {
                at_rule: "view-transition".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 1, 1, 17));
    }

    #[test]
    fn newly_available_at_rule_depends_on_threshold() {
        let css = "@property --fade { syntax: \"<color>\"; }";

        let diagnostics = widely(css);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 1, 1, 10));

        assert!(newly(css).is_empty());
    }

    #[test]
    fn allowed_at_rules_match_case_insensitively() {
        let config = Configuration::new().allow_at_rule("VIEW-TRANSITION");
        assert!(analyze("@view-transition { navigation: auto; }", config).is_empty());
    }

    #[test]
    fn flags_not_baseline_selector() {
        let css = "h1:has(+ h2) { margin: 0; }";

        let diagnostics = widely(css);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::Selector {
                selector: "has".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 3, 1, 7));

        assert!(newly(css).is_empty());
    }

    #[test]
    fn flags_not_baseline_pseudo_element() {
        let diagnostics = newly("details::details-content { color: red; }");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::Selector {
                selector: "details-content".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 8, 1, 25));
    }

    #[test]
    fn flags_nesting_selector() {
        let css = ".a { & > .b { color: red; } }";

        let diagnostics = widely(css);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::Selector {
                selector: "nesting".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 6, 1, 7));

        assert!(newly(css).is_empty());
    }

    #[test]
    fn allowed_selectors_are_skipped() {
        let config = Configuration::new().allow_selector("has");
        assert!(analyze("h1:has(+ h2) { margin: 0; }", config).is_empty());
    }

    #[test]
    fn vendor_prefixed_pseudo_classes_are_skipped() {
        assert!(widely("a:-moz-focusring { color: red; }").is_empty());
    }

    #[test]
    fn flags_not_baseline_function() {
        let diagnostics = widely("a { width: abs(20% - 100px); }");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::Function {
                function: "abs".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 12, 1, 28));
    }

    #[test]
    fn flags_functions_nested_in_arguments() {
        let diagnostics = widely("a { width: calc(abs(6px)); }");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::Function {
                function: "abs".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 17, 1, 25));
    }

    #[test]
    fn newly_available_function_depends_on_threshold() {
        let css = "a { color: color-mix(in srgb, red, blue); }";

        let diagnostics = widely(css);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 12, 1, 41));

        assert!(newly(css).is_empty());
    }

    #[test]
    fn keywords_are_checked_inside_function_arguments() {
        let diagnostics = widely("a { clip-path: path(fill-box); }");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::PropertyValue {
                property: "clip-path".into(),
                value: "fill-box".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 21, 1, 29));
    }

    #[test]
    fn supports_exempts_tested_property() {
        let css = "@supports (accent-color: auto) { a { accent-color: auto; } }";
        assert!(widely(css).is_empty());
    }

    #[test]
    fn negated_supports_exempts_nothing() {
        let css = "@supports not (accent-color: auto) { a { accent-color: auto; } }";
        let diagnostics = widely(css);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::Property {
                property: "accent-color".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 42, 1, 54));
    }

    #[test]
    fn supports_value_exemption_is_per_keyword() {
        let exempt = "@supports (clip-path: fill-box) { a { clip-path: fill-box; } }";
        assert!(widely(exempt).is_empty());

        let other = "@supports (clip-path: fill-box) { a { clip-path: stroke-box; } }";
        let diagnostics = widely(other);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::PropertyValue {
                property: "clip-path".into(),
                value: "stroke-box".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 50, 1, 60));
    }

    #[test]
    fn supports_exempts_tested_functions() {
        let exempt = "@supports (width: abs(1px)) { a { width: abs(2px); } }";
        assert!(widely(exempt).is_empty());

        let other = "@supports (width: abs(1px)) { a { width: sign(2px); } }";
        let diagnostics = widely(other);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::Function {
                function: "sign".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 42, 1, 51));
    }

    #[test]
    fn supports_selector_exempts_tested_selector() {
        let css = "@supports selector(:has(a)) { h1:has(+ h2) { top: 0; } }";
        assert!(widely(css).is_empty());
    }

    #[test]
    fn nested_supports_frames_accumulate() {
        let css = "@supports (accent-color: auto) {\n  \
                   @supports (backdrop-filter: blur(2px)) {\n    \
                   a { accent-color: auto; backdrop-filter: blur(2px); }\n  }\n}";
        assert!(widely(css).is_empty());
    }

    #[test]
    fn inner_supports_exemption_ends_before_the_outer_block_does() {
        let css = "@supports (accent-color: auto) {\n  \
                   @supports (backdrop-filter: blur(2px)) {\n    \
                   a { backdrop-filter: blur(2px); }\n  }\n  \
                   b { backdrop-filter: blur(2px); }\n}";
        let diagnostics = widely(css);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::Property {
                property: "backdrop-filter".into(),
            }
        );
        // The use after the inner block but still inside the outer one.
        assert_eq!(diagnostics[0].span, SourceSpan::new(5, 7, 5, 22));
    }

    #[test]
    fn disjunction_exempts_nothing() {
        let css = "@supports (accent-color: auto) or (color: red) { a { accent-color: auto; } }";
        let diagnostics = widely(css);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::Property {
                property: "accent-color".into(),
            }
        );
    }

    #[test]
    fn supports_exemption_ends_with_the_block() {
        let css = "@supports (accent-color: auto) { } a { accent-color: auto; }";
        let diagnostics = widely(css);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 40, 1, 52));
    }

    #[test]
    fn flags_not_baseline_media_condition() {
        let diagnostics = widely("@media (inverted-colors: inverted) { a { color: red; } }");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::MediaCondition {
                condition: "inverted-colors".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 9, 1, 24));
    }

    #[test]
    fn media_condition_year_threshold() {
        let css = "@media (color-gamut: srgb) {}";

        let diagnostics = analyze(
            css,
            Configuration::new().with_available(Threshold::Year(2022)),
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].availability, Availability::Year(2022));
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 9, 1, 20));

        assert!(
            analyze(
                css,
                Configuration::new().with_available(Threshold::Year(2023)),
            )
            .is_empty()
        );
    }

    #[test]
    fn only_the_offending_media_condition_is_flagged() {
        let css = "@media (min-width: 100px) and (device-posture: folded) { a { color: red; } }";
        let diagnostics = widely(css);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::MediaCondition {
                condition: "device-posture".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 32, 1, 46));
    }

    #[test]
    fn at_rule_keywords_match_case_insensitively() {
        let css = "@MEDIA (color-gamut: srgb) {}";
        let diagnostics = analyze(
            css,
            Configuration::new().with_available(Threshold::Year(2022)),
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::MediaCondition {
                condition: "color-gamut".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 9, 1, 20));

        let css = "@SUPPORTS (accent-color: auto) { a { accent-color: auto; } }";
        assert!(widely(css).is_empty());
    }

    #[test]
    fn multiple_offending_properties_report_in_source_order() {
        let diagnostics = widely("a { accent-color: bar; backdrop-filter: auto }");
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::Property {
                property: "accent-color".into(),
            }
        );
        assert_eq!(diagnostics[0].span, SourceSpan::new(1, 5, 1, 17));
        assert_eq!(
            diagnostics[1].kind,
            DiagnosticKind::Property {
                property: "backdrop-filter".into(),
            }
        );
        assert_eq!(diagnostics[1].span, SourceSpan::new(1, 24, 1, 39));
    }

    #[test]
    fn diagnostics_come_in_source_order() {
        let diagnostics = widely("a { accent-color: auto; width: abs(1px); }");
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::Property {
                property: "accent-color".into(),
            }
        );
        assert_eq!(
            diagnostics[1].kind,
            DiagnosticKind::Function {
                function: "abs".into(),
            }
        );
        assert_eq!(diagnostics[1].span, SourceSpan::new(1, 32, 1, 40));
    }

    #[test]
    fn allowed_properties_match_exactly() {
        let config = Configuration::new().allow_property("accent-color");
        assert!(analyze("a { accent-color: auto; }", config).is_empty());

        // The allow list matches the name as written.
        let config = Configuration::new().allow_property("accent-color");
        let diagnostics = analyze("a { Accent-Color: auto; }", config);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::Property {
                property: "Accent-Color".into(),
            }
        );
    }
}
