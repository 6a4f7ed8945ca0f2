//! Baseline availability analysis.

mod scope;
mod walk;

pub use walk::Analyzer;
