//! Baseline availability analyzer for CSS.
//!
//! Walks a CSS syntax tree and flags features that fall below a configured
//! cross-browser availability threshold: properties, property values,
//! at-rules, selectors, value functions, and media conditions. `@supports`
//! blocks that test a feature exempt uses of that feature inside them, and
//! allow lists silence individual features entirely.
//!
//! # Example
//!
//! ```
//! use baseline_css::{Configuration, analyze_css};
//!
//! let config = Configuration::new();
//! let diagnostics = analyze_css("a { accent-color: bisque; }", &config).unwrap();
//!
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(
//!     diagnostics[0].to_string(),
//!     "Property 'accent-color' is not a widely available baseline feature.",
//! );
//! ```

pub mod analyzer;
pub mod ast;
pub mod compat;
pub mod config;
pub mod diagnostic;
pub mod parser;

mod error;

pub use analyzer::Analyzer;
pub use compat::{BaselineStatus, CompatDatabase, CompatRecord};
pub use config::{Configuration, Threshold};
pub use diagnostic::{Availability, Diagnostic, DiagnosticKind};
pub use error::{Error, Result};

/// Analyze an already-parsed stylesheet against a compatibility database.
pub fn analyze(
    stylesheet: &ast::Stylesheet,
    config: &Configuration,
    database: &CompatDatabase,
) -> Result<Vec<Diagnostic>> {
    config.validate()?;
    Ok(Analyzer::new(config, database).analyze(stylesheet))
}

/// Parse CSS text and analyze it against the bundled compatibility snapshot.
pub fn analyze_css(css: &str, config: &Configuration) -> Result<Vec<Diagnostic>> {
    config.validate()?;
    let stylesheet = ast::Stylesheet::parse(css)?;
    Ok(Analyzer::new(config, CompatDatabase::bundled()).analyze(&stylesheet))
}

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::analyzer::Analyzer;
    pub use crate::ast::{SourceSpan, Stylesheet};
    pub use crate::compat::{BaselineStatus, CompatDatabase, CompatRecord};
    pub use crate::config::{Configuration, Threshold};
    pub use crate::diagnostic::{Availability, Diagnostic, DiagnosticKind};
    pub use crate::{analyze, analyze_css};
}
