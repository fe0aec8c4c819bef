//! Text templates built from lines
//!
//! A [`Template`] is an ordered list of lines, each stored without trailing
//! spaces. Templates are populated through a [`LineBuilder`], composed by
//! substituting placeholders with other templates or strings, reformatted
//! (see [`crate::format`]) and finally serialized with [`Template::text`].
//!
//! # Example
//!
//! ```rust
//! use str_templates::Template;
//!
//! let mut main = Template::new();
//! main.open_append()
//!     .line("$1")
//!     .line("int main(void)")
//!     .line("{")
//!     .line("    int x = f($2);")
//!     .line("}");
//!
//! main.replace(1, Template::from("//hdr"));
//! main.replace(2, "\"hello\"");
//!
//! assert_eq!(
//!     main.text(),
//!     "//hdr\nint main(void)\n{\n    int x = f(\"hello\");\n}\n"
//! );
//! ```

mod builder;
mod placeholder;
mod substitute;

use std::fmt;
use std::ops::AddAssign;

pub use builder::LineBuilder;
pub use placeholder::{scan, Placeholder};
pub use substitute::RemoveMode;

/// Strip trailing space characters from a line
pub(crate) fn rtrim(line: &str) -> &str {
    line.trim_end_matches(' ')
}

/// An ordered, mutable sequence of text lines
///
/// Templates are move-only: composing one template into another consumes the
/// source, so two templates never share lines.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Template {
    lines: Vec<String>,
}

impl Template {
    /// Create an empty template
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a template from a list of lines, trimming each one
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut template = Self::new();
        template.open_append().lines(lines);
        template
    }

    /// Open an append session; its lines land at the end of this template
    /// when the builder is committed or dropped
    pub fn open_append(&mut self) -> LineBuilder<'_> {
        LineBuilder::new(self)
    }

    /// Append all of `other`'s lines, in order, to the end of this template
    pub fn concatenate(&mut self, other: Template) {
        self.lines.extend(other.lines);
    }

    /// The stored lines, in order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the template, returning its lines
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Number of stored lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the template holds no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether `placeholder` still occurs anywhere in the template
    pub fn contains(&self, placeholder: impl Into<Placeholder>) -> bool {
        let placeholder = placeholder.into();
        self.lines.iter().any(|line| placeholder.is_in(line))
    }

    /// Distinct placeholders still present, in order of first appearance
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut found = Vec::new();
        for placeholder in self.lines.iter().flat_map(|line| scan(line)) {
            if !found.contains(&placeholder) {
                found.push(placeholder);
            }
        }
        found
    }

    /// Serialize to text, each line terminated by `\n`
    pub fn text(&self) -> String {
        let capacity = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut output = String::with_capacity(capacity);
        for line in &self.lines {
            output.push_str(line);
            output.push('\n');
        }
        output
    }

    pub(crate) fn lines_mut(&mut self) -> &mut Vec<String> {
        &mut self.lines
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl AddAssign<Template> for Template {
    fn add_assign(&mut self, other: Template) {
        self.concatenate(other);
    }
}

impl From<&str> for Template {
    /// A single-line template
    fn from(line: &str) -> Self {
        Self {
            lines: vec![rtrim(line).to_string()],
        }
    }
}

impl From<String> for Template {
    fn from(line: String) -> Self {
        Self::from(line.as_str())
    }
}

impl<S: AsRef<str>> FromIterator<S> for Template {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_lines(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_template() {
        let template = Template::new();
        assert!(template.is_empty());
        assert_eq!(template.text(), "");
    }

    #[test]
    fn test_lines_are_right_trimmed() {
        let template = Template::from_lines(["int x;   ", "   ", "  y"]);
        assert_eq!(template.lines(), ["int x;", "", "  y"]);
    }

    #[test]
    fn test_text_terminates_every_line() {
        let template = Template::from_lines(["a", "", "b"]);
        assert_eq!(template.text(), "a\n\nb\n");
        assert_eq!(template.text(), template.to_string());
    }

    #[test]
    fn test_text_is_repeatable() {
        let template = Template::from_lines(["x", "y"]);
        assert_eq!(template.text(), template.text());
    }

    #[test]
    fn test_concatenate_moves_lines() {
        let mut a = Template::from_lines(["1", "2"]);
        let b = Template::from_lines(["3"]);
        a.concatenate(b);
        a += Template::from("4  ");
        assert_eq!(a.lines(), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_from_string_is_single_line() {
        let template = Template::from(String::from("\"hello\"  "));
        assert_eq!(template.lines(), ["\"hello\""]);
    }

    #[test]
    fn test_collect() {
        let template: Template = vec!["a ", "b"].into_iter().collect();
        assert_eq!(template.into_lines(), vec!["a", "b"]);
    }

    #[test]
    fn test_placeholders_in_order() {
        let template = Template::from_lines(["$1", "f($2, $name$)", "$1 $10"]);
        assert_eq!(
            template.placeholders(),
            vec![
                Placeholder::Index(1),
                Placeholder::Index(2),
                Placeholder::Named("name".to_string()),
                Placeholder::Index(10),
            ]
        );
        assert!(template.contains("name"));
        assert!(!template.contains(3));
    }
}
