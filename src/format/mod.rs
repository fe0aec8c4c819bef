//! Reformatting passes over a template's lines
//!
//! Both passes run after composition is finished: indentation rescaling
//! (4-space levels to 8-space levels by default) and conversion of Allman
//! bracing (opening brace on its own line) to K&R bracing.

pub mod config;

pub use config::{BraceStyle, ConfigError, FormatConfig, IndentRescale};

use crate::error::FormatError;
use crate::template::Template;

/// Widest indentation unit the rescaling pass accepts
pub const MAX_INDENT_UNIT: usize = 64;

/// Number of leading space characters in `line`
fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Whether `line` is a single `{` after its indentation
fn is_lone_brace(line: &str) -> bool {
    line.trim_start_matches(' ') == "{"
}

impl Template {
    /// Double every indentation level of 4 spaces
    ///
    /// Lines whose indentation is not a multiple of 4 are left untouched, or
    /// rejected when `strict` is set. See [`Template::rescale_indent`].
    pub fn change_indent_4_to_8(&mut self, strict: bool) -> Result<(), FormatError> {
        self.rescale_indent(4, 8, strict)
    }

    /// Turn each indentation level of `from` spaces into `to` spaces
    ///
    /// Lines that are empty keep their shape. A line indented by something
    /// other than a multiple of `from` is skipped, unless `strict` is set: then
    /// the call fails on the first such line and the template is unchanged.
    pub fn rescale_indent(
        &mut self,
        from: usize,
        to: usize,
        strict: bool,
    ) -> Result<(), FormatError> {
        if from == 0 || from > MAX_INDENT_UNIT {
            return Err(FormatError::InvalidUnit { unit: from });
        }
        if to > MAX_INDENT_UNIT {
            return Err(FormatError::InvalidUnit { unit: to });
        }

        if strict {
            let misindented = self
                .lines()
                .iter()
                .enumerate()
                .find(|(_, line)| !line.is_empty() && leading_spaces(line) % from != 0);
            if let Some((index, line)) = misindented {
                return Err(FormatError::misindented(
                    index,
                    line.as_str(),
                    leading_spaces(line),
                    from,
                ));
            }
        }

        let mut changed = 0usize;
        for line in self.lines_mut() {
            let indent = leading_spaces(line);
            if indent == line.len() || indent % from != 0 {
                continue;
            }
            let target = indent / from * to;
            if target != indent {
                line.replace_range(..indent, &" ".repeat(target));
                changed += 1;
            }
        }

        tracing::debug!(from, to, changed, "rescaled indentation");
        Ok(())
    }

    /// Move every lone opening brace to the end of the line before it
    ///
    /// The line that received a brace stays the anchor, so a run of lone
    /// braces all collapse onto it. A lone brace on the first line has no
    /// predecessor and is kept.
    pub fn allman_to_kr(&mut self) {
        let lines = self.lines_mut();
        let before = lines.len();

        let mut merged: Vec<String> = Vec::with_capacity(before);
        for line in lines.drain(..) {
            if is_lone_brace(&line) {
                if let Some(prev) = merged.last_mut() {
                    prev.push_str(" {");
                    continue;
                }
            }
            merged.push(line);
        }
        *lines = merged;

        tracing::debug!(merged = before - lines.len(), "converted Allman bracing");
    }

    /// Apply the passes selected by `config`: indentation first, then braces
    pub fn reformat(&mut self, config: &FormatConfig) -> Result<(), FormatError> {
        if let Some(IndentRescale { from, to }) = config.indent {
            self.rescale_indent(from, to, config.strict_indent)?;
        }
        if config.brace_style == BraceStyle::KAndR {
            self.allman_to_kr();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_spaces() {
        assert_eq!(leading_spaces(""), 0);
        assert_eq!(leading_spaces("x"), 0);
        assert_eq!(leading_spaces("    x"), 4);
    }

    #[test]
    fn test_lone_brace() {
        assert!(is_lone_brace("{"));
        assert!(is_lone_brace("        {"));
        assert!(!is_lone_brace("{ x"));
        assert!(!is_lone_brace("{{"));
        assert!(!is_lone_brace("}"));
        assert!(!is_lone_brace(""));
    }

    #[test]
    fn test_indent_doubles_levels() {
        let mut t = Template::from_lines(["a", "    b", "        c", "", "d"]);
        t.change_indent_4_to_8(false).unwrap();
        assert_eq!(t.lines(), ["a", "        b", "                c", "", "d"]);
    }

    #[test]
    fn test_indent_lenient_skips_odd_lines() {
        let mut t = Template::from_lines(["    a", "  b", "      c"]);
        t.change_indent_4_to_8(false).unwrap();
        assert_eq!(t.lines(), ["        a", "  b", "      c"]);
    }

    #[test]
    fn test_indent_strict_fails_without_changes() {
        let mut t = Template::from_lines(["    a", "  b"]);
        let err = t.change_indent_4_to_8(true).unwrap_err();
        assert_eq!(err, FormatError::misindented(1, "  b", 2, 4));
        assert_eq!(t.lines(), ["    a", "  b"]);
    }

    #[test]
    fn test_rescale_custom_units() {
        let mut t = Template::from_lines(["  a", "    b", "   c"]);
        t.rescale_indent(2, 4, false).unwrap();
        assert_eq!(t.lines(), ["    a", "        b", "   c"]);
    }

    #[test]
    fn test_rescale_zero_unit() {
        let mut t = Template::from("x");
        assert_eq!(
            t.rescale_indent(0, 8, false),
            Err(FormatError::InvalidUnit { unit: 0 })
        );
    }

    #[test]
    fn test_rescale_rejects_oversized_unit() {
        let mut t = Template::from_lines(["    x"]);
        assert_eq!(
            t.rescale_indent(4, usize::MAX, false),
            Err(FormatError::InvalidUnit { unit: usize::MAX })
        );
        assert_eq!(
            t.rescale_indent(MAX_INDENT_UNIT + 1, 8, false),
            Err(FormatError::InvalidUnit {
                unit: MAX_INDENT_UNIT + 1
            })
        );
        assert_eq!(t.lines(), ["    x"]);
    }

    #[test]
    fn test_rescale_widest_unit() {
        let mut t = Template::from_lines(["    x"]);
        t.rescale_indent(4, MAX_INDENT_UNIT, true).unwrap();
        assert_eq!(t.lines()[0].len(), MAX_INDENT_UNIT + 1);
    }

    #[test]
    fn test_allman_to_kr() {
        let mut t = Template::from_lines([
            "int main(void)",
            "{",
            "    if (x)",
            "    {",
            "    }",
            "}",
        ]);
        t.allman_to_kr();
        assert_eq!(t.lines(), ["int main(void) {", "    if (x) {", "    }", "}"]);
    }

    #[test]
    fn test_allman_consecutive_braces_share_anchor() {
        let mut t = Template::from_lines(["a", "{", "  {", "b"]);
        t.allman_to_kr();
        assert_eq!(t.lines(), ["a { {", "b"]);
    }

    #[test]
    fn test_allman_first_line_brace_kept() {
        let mut t = Template::from_lines(["{", "x", "{"]);
        t.allman_to_kr();
        assert_eq!(t.lines(), ["{", "x {"]);
    }

    #[test]
    fn test_reformat_with_config() {
        let mut t = Template::from_lines(["f()", "{", "    g();", "}"]);
        t.reformat(&FormatConfig::default()).unwrap();
        assert_eq!(t.lines(), ["f() {", "        g();", "}"]);
    }

    #[test]
    fn test_reformat_nothing_selected() {
        let mut t = Template::from_lines(["f()", "{", "    g();", "}"]);
        let config = FormatConfig::new()
            .without_indent()
            .with_brace_style(BraceStyle::Allman);
        t.reformat(&config).unwrap();
        assert_eq!(t.lines(), ["f()", "{", "    g();", "}"]);
    }
}
