//! CSS parsing module.

mod css_parser;
mod supports;

pub use css_parser::parse_stylesheet;
