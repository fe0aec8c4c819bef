//! Str Templates - Composable line-based code templates
//!
//! This library builds multi-line text fragments, composes them by
//! substituting `$name$` or `$N` placeholders with other fragments or
//! literal strings, and reformats the result (indentation rescaling,
//! Allman to K&R bracing) before emitting the final text.
//!
//! # Example
//!
//! ```rust
//! use str_templates::{render, FormatConfig, Template};
//!
//! let mut body = Template::new();
//! body.open_append().line("if (i == 0)").line("{").line("    f2($1);").line("}");
//! body.replace(1, "1+1");
//!
//! let mut main = Template::new();
//! main.open_append()
//!     .line("int main(void)")
//!     .line("{")
//!     .line("    $body$")
//!     .line("}");
//! main.replace("body", body);
//!
//! let text = render(main, &FormatConfig::default()).unwrap();
//! assert_eq!(
//!     text,
//!     "int main(void) {\n        if (i == 0) {\n                f2(1+1);\n        }\n}\n"
//! );
//! ```

pub mod error;
pub mod format;
pub mod template;

pub use error::FormatError;
pub use format::{BraceStyle, ConfigError, FormatConfig, IndentRescale};
pub use template::{LineBuilder, Placeholder, RemoveMode, Template};

/// Reformat a finished template with `config` and serialize it
pub fn render(mut template: Template, config: &FormatConfig) -> Result<String, FormatError> {
    template.reformat(config)?;
    Ok(template.text())
}
