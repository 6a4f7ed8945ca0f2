//! Syntax tree node definitions.

use super::SourceSpan;

/// A parsed stylesheet: an ordered list of top-level rules.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    /// Parse a stylesheet from CSS text.
    pub fn parse(css: &str) -> crate::Result<Self> {
        crate::parser::parse_stylesheet(css)
    }
}

/// A rule: either a style rule (`selector { ... }`) or an at-rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Style(StyleRule),
    At(AtRule),
}

/// A style rule.
///
/// Only the feature-bearing components of the selector list are retained
/// (pseudo-classes, pseudo-elements, the nesting selector), in source order.
/// Type, class, id, and attribute selectors carry no baseline data.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub selectors: Vec<SelectorComponent>,
    pub block: Block,
}

/// An at-rule (`@media`, `@supports`, `@font-face`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// The rule name as written, without the leading `@`.
    pub name: String,
    /// Span of the keyword, including the leading `@`.
    pub name_span: SourceSpan,
    pub prelude: AtRulePrelude,
    pub block: Option<Block>,
}

/// The parsed prelude of an at-rule.
#[derive(Debug, Clone, PartialEq)]
pub enum AtRulePrelude {
    /// No prelude at all (e.g. `@font-face`).
    None,
    /// An `@supports` condition tree.
    Supports(SupportsCondition),
    /// The media features referenced by a media query list.
    Media(Vec<MediaFeature>),
    /// A prelude the analyzer has no use for (kept only to record presence).
    Raw,
}

/// The body of a rule: declarations interleaved with nested rules, in
/// source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub items: Vec<BlockItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockItem {
    Declaration(Declaration),
    Rule(Rule),
}

/// A property declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name as written.
    pub property: String,
    /// Span of the property-name token.
    pub property_span: SourceSpan,
    /// Identifier and function components of the value, in source order.
    /// Numbers, strings, and other tokens carry no baseline data and are
    /// dropped at parse time.
    pub value: Vec<ValueComponent>,
}

/// A feature-bearing component of a declaration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueComponent {
    /// An identifier keyword (e.g. `fill-box`).
    Keyword { value: String, span: SourceSpan },
    /// A function invocation. The span runs from the function name through
    /// the closing parenthesis.
    Function {
        name: String,
        span: SourceSpan,
        arguments: Vec<ValueComponent>,
    },
}

/// A feature-bearing component of a selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// A pseudo-class (`:has`, `:hover`). The span covers the colon and the
    /// name; functional arguments are parsed recursively but excluded from
    /// the span.
    PseudoClass {
        name: String,
        span: SourceSpan,
        arguments: Vec<SelectorComponent>,
    },
    /// A pseudo-element (`::details-content`). The span covers both colons
    /// and the name.
    PseudoElement {
        name: String,
        span: SourceSpan,
        arguments: Vec<SelectorComponent>,
    },
    /// The nesting selector `&`.
    Nesting { span: SourceSpan },
}

/// A media feature referenced inside a media query condition, e.g.
/// `inverted-colors` in `@media (inverted-colors: inverted)`. The span
/// covers the feature-name token only.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFeature {
    pub name: String,
    pub span: SourceSpan,
}

/// An `@supports` condition, parsed into a boolean expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SupportsCondition {
    Not(Box<SupportsCondition>),
    And(Vec<SupportsCondition>),
    Or(Vec<SupportsCondition>),
    /// A feature test: `(property: value)`.
    Declaration {
        property: String,
        value: Vec<ValueComponent>,
    },
    /// A selector test: `selector(<selector>)`.
    Selector(Vec<SelectorComponent>),
    /// Anything the condition grammar cannot classify (general-enclosed,
    /// malformed input). Asserts nothing.
    Unknown,
}
