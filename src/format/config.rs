//! Configuration for the reformatting passes

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::MAX_INDENT_UNIT;

/// Errors that can occur when loading a formatting configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read format config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse format config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid format config: {reason}")]
    Invalid { reason: String },
}

/// Placement of opening braces in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum BraceStyle {
    /// Leave braces where they are
    #[serde(rename = "allman")]
    Allman,
    /// Move lone opening braces onto the preceding line
    #[default]
    #[serde(rename = "kr")]
    KAndR,
}

/// Indentation conversion: every level of `from` spaces becomes `to` spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IndentRescale {
    pub from: usize,
    pub to: usize,
}

impl Default for IndentRescale {
    fn default() -> Self {
        Self { from: 4, to: 8 }
    }
}

/// Which reformatting passes [`crate::Template::reformat`] applies
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    /// Indentation rescaling; `None` skips the pass
    pub indent: Option<IndentRescale>,

    /// Fail on lines not indented in whole `indent.from` units
    pub strict_indent: bool,

    /// Brace placement
    pub brace_style: BraceStyle,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: Some(IndentRescale::default()),
            strict_indent: false,
            brace_style: BraceStyle::KAndR,
        }
    }
}

impl FormatConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a configuration from a TOML string
    ///
    /// Keys left out keep their default values.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: FormatConfig = toml::from_str(content)?;
        if let Some(IndentRescale { from, to }) = config.indent {
            if from == 0 {
                return Err(ConfigError::Invalid {
                    reason: "indent.from must be at least 1".to_string(),
                });
            }
            if from > MAX_INDENT_UNIT || to > MAX_INDENT_UNIT {
                return Err(ConfigError::Invalid {
                    reason: format!("indent widths must not exceed {}", MAX_INDENT_UNIT),
                });
            }
        }
        Ok(config)
    }

    /// Set the indentation conversion
    pub fn with_indent(mut self, from: usize, to: usize) -> Self {
        self.indent = Some(IndentRescale { from, to });
        self
    }

    /// Skip indentation rescaling
    pub fn without_indent(mut self) -> Self {
        self.indent = None;
        self
    }

    /// Set whether misindented lines are an error
    pub fn with_strict_indent(mut self, strict: bool) -> Self {
        self.strict_indent = strict;
        self
    }

    /// Set the brace placement
    pub fn with_brace_style(mut self, style: BraceStyle) -> Self {
        self.brace_style = style;
        self
    }
}
