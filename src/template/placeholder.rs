//! Placeholder tokens and the lexer used to scan for them

use std::fmt;

use logos::Logos;

/// A marker inside a template line that substitution replaces or removes
///
/// Named placeholders are written `$name$`. Numbered placeholders are written
/// `$N` with no closing marker; they only match where the digits are not
/// followed by another digit, so `$1` never matches inside `$10`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Named(String),
    Index(u32),
}

impl Placeholder {
    /// The literal text searched for in template lines
    pub fn token(&self) -> String {
        self.to_string()
    }

    /// Byte offset of the first match in `line` at or after `from`
    pub(crate) fn find_in(&self, line: &str, from: usize) -> Option<usize> {
        let haystack = line.get(from..)?;
        let token = self.token();
        match self {
            Self::Named(_) => haystack.find(&token).map(|pos| pos + from),
            Self::Index(_) => haystack
                .match_indices(&token)
                .map(|(pos, _)| pos + from)
                .find(|&pos| {
                    !line[pos + token.len()..]
                        .starts_with(|c: char| c.is_ascii_digit())
                }),
        }
    }

    /// Whether `line` contains at least one match
    pub fn is_in(&self, line: &str) -> bool {
        self.find_in(line, 0).is_some()
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "${}$", name),
            Self::Index(n) => write!(f, "${}", n),
        }
    }
}

impl From<&str> for Placeholder {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for Placeholder {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<u32> for Placeholder {
    fn from(n: u32) -> Self {
        Self::Index(n)
    }
}

/// Tokens recognized when scanning a line for placeholders
///
/// Only identifier-like names are recognized by the scanner; `replace` and
/// `remove` accept any name.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[^$]+")]
enum Token {
    #[regex(r"\$[0-9]+", |lex| lex.slice()[1..].parse::<u32>().ok())]
    Index(u32),

    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*\$", |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    Named(String),
}

/// Scan a line for placeholders, in order of appearance
///
/// Stray `$` characters that do not start a placeholder are ignored.
pub fn scan(line: &str) -> impl Iterator<Item = Placeholder> + '_ {
    Token::lexer(line).filter_map(|tok| match tok.ok()? {
        Token::Index(n) => Some(Placeholder::Index(n)),
        Token::Named(name) => Some(Placeholder::Named(name)),
    })
}
