//! Append sessions for populating a template

use super::{rtrim, Template};

/// Write-only accumulator that appends lines to a [`Template`]
///
/// Lines are right-trimmed as they are pushed and held until the session
/// ends. Committing (or dropping) the builder appends them, in order, to the
/// end of the template it was opened on. [`LineBuilder::discard`] ends the
/// session without touching the template.
pub struct LineBuilder<'a> {
    lines: Vec<String>,
    parent: Option<&'a mut Template>,
}

impl<'a> LineBuilder<'a> {
    pub(super) fn new(parent: &'a mut Template) -> Self {
        Self {
            lines: Vec::new(),
            parent: Some(parent),
        }
    }

    /// Append one line, right-trimmed
    pub fn append(mut self, line: impl AsRef<str>) -> Self {
        self.push(line);
        self
    }

    /// Same as [`LineBuilder::append`]
    pub fn line(self, line: impl AsRef<str>) -> Self {
        self.append(line)
    }

    /// Push several lines, in order
    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend(lines);
        self
    }

    /// Push one line through a mutable reference
    pub fn push(&mut self, line: impl AsRef<str>) {
        self.lines.push(rtrim(line.as_ref()).to_string());
    }

    /// Number of lines waiting to be appended
    pub fn pending(&self) -> usize {
        self.lines.len()
    }

    /// End the session, appending all pending lines
    pub fn commit(self) {
        drop(self);
    }

    /// End the session without appending anything
    pub fn discard(mut self) {
        self.parent = None;
    }

    fn flush(&mut self) {
        if let Some(parent) = self.parent.take() {
            parent.lines_mut().append(&mut self.lines);
        }
    }
}

impl<S: AsRef<str>> Extend<S> for LineBuilder<'_> {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for line in iter {
            self.push(line);
        }
    }
}

impl Drop for LineBuilder<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}
