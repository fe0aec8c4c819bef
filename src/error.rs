//! Error types for template reformatting

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Errors raised by the reformatting passes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A line's leading indentation is not a whole number of indent units
    #[error("line '{line}' not indented in {unit} spaces")]
    Misindented {
        /// 0-based index of the line in the template
        line_index: usize,
        /// Text of the offending line
        line: String,
        /// Number of leading spaces found
        indent: usize,
        /// Indent unit the line was checked against
        unit: usize,
    },

    /// An indentation unit of zero spaces, or wider than
    /// [`crate::format::MAX_INDENT_UNIT`], was requested
    #[error("invalid indentation unit: {unit} (must be between 1 and 64)")]
    InvalidUnit { unit: usize },
}

impl FormatError {
    /// Create a misindentation error for the line at `line_index`
    pub fn misindented(
        line_index: usize,
        line: impl Into<String>,
        indent: usize,
        unit: usize,
    ) -> Self {
        Self::Misindented {
            line_index,
            line: line.into(),
            indent,
            unit,
        }
    }

    /// Text of the offending line, if the error concerns one
    pub fn line(&self) -> Option<&str> {
        match self {
            Self::Misindented { line, .. } => Some(line),
            Self::InvalidUnit { .. } => None,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// `source` is the serialized template the error was raised on (see
    /// [`crate::Template::text`]). Falls back to the plain message when the
    /// error does not point at a line of `source`.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Self::Misindented {
            line_index,
            indent,
            unit,
            ..
        } = self
        else {
            return self.to_string();
        };

        // ariadne spans count chars, not bytes
        let mut lines = source.split('\n');
        let start: usize = lines
            .by_ref()
            .take(*line_index)
            .map(|l| l.chars().count() + 1)
            .sum();
        if lines.next().is_none() {
            return self.to_string();
        }
        let span = start..start + indent;

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(format!(
                        "{} leading spaces, expected a multiple of {}",
                        indent, unit
                    ))
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_misindented_display() {
        let err = FormatError::misindented(2, "  x = 1;", 2, 4);
        assert_eq!(err.to_string(), "line '  x = 1;' not indented in 4 spaces");
        assert_eq!(err.line(), Some("  x = 1;"));
    }

    #[test]
    fn test_invalid_unit_has_no_line() {
        let err = FormatError::InvalidUnit { unit: 0 };
        assert!(err.line().is_none());
        assert!(err.to_string().contains("invalid indentation unit"));
    }

    #[test]
    fn test_format_points_at_line() {
        let source = "int f()\n{\n  return 0;\n}\n";
        let err = FormatError::misindented(2, "  return 0;", 2, 4);
        let report = err.format(source, "f.c");
        assert!(report.contains("not indented in 4 spaces"));
        assert!(report.contains("return 0;"));
    }

    #[test]
    fn test_format_out_of_range_falls_back() {
        let err = FormatError::misindented(10, "  x", 2, 4);
        assert_eq!(err.format("a\n", "t"), err.to_string());
    }
}
