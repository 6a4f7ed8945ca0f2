//! The syntax tree consumed by the analyzer.
//!
//! The tree keeps exactly what baseline analysis needs: feature-bearing
//! constructs and their source spans. Hosts with their own CSS parser can
//! build it directly; [`crate::parser`] builds it from CSS text.

mod node;
mod span;

pub use node::{
    AtRule, AtRulePrelude, Block, BlockItem, Declaration, MediaFeature, Rule, SelectorComponent,
    StyleRule, Stylesheet, SupportsCondition, ValueComponent,
};
pub use span::SourceSpan;

pub(crate) use span::utf16_len;
