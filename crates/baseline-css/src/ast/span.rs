//! Source position types.

use cssparser::SourceLocation;
use serde::Serialize;

/// A half-open source range with 1-based lines and columns.
///
/// Columns count UTF-16 code units, matching the position reporting of
/// mainstream CSS tooling. `end_column` points one past the last character
/// of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSpan {
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceSpan {
    pub fn new(line: u32, column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            line,
            column,
            end_line,
            end_column,
        }
    }

    /// Span between two tokenizer locations. `cssparser` lines are 0-based;
    /// its columns are already 1-based.
    pub(crate) fn from_locations(start: SourceLocation, end: SourceLocation) -> Self {
        Self {
            line: start.line + 1,
            column: start.column,
            end_line: end.line + 1,
            end_column: end.column,
        }
    }

    /// Span starting at `start` covering `width` UTF-16 units on one line.
    pub(crate) fn from_width(start: SourceLocation, width: u32) -> Self {
        Self {
            line: start.line + 1,
            column: start.column,
            end_line: start.line + 1,
            end_column: start.column + width,
        }
    }
}

pub(crate) fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_width_stays_on_one_line() {
        let start = SourceLocation { line: 2, column: 5 };
        let span = SourceSpan::from_width(start, 4);
        assert_eq!(span, SourceSpan::new(3, 5, 3, 9));
    }

    #[test]
    fn utf16_width() {
        assert_eq!(utf16_len("width"), 5);
        assert_eq!(utf16_len("\u{1f600}"), 2);
    }
}
