//! Placeholder substitution and removal

use super::{rtrim, Placeholder, Template};

/// What [`Template::remove_with`] does with a line the removal leaves blank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemoveMode {
    /// Delete the line from the template
    #[default]
    DropBlankLine,
    /// Keep the line as an empty line
    KeepBlankLine,
}

/// Where the next search starts: the rest of `row` from byte `col`, then
/// every line from `next_row` on
#[derive(Debug, Clone, Copy)]
struct Cursor {
    row: usize,
    col: usize,
    next_row: usize,
}

impl Cursor {
    const START: Self = Self {
        row: 0,
        col: 0,
        next_row: 1,
    };
}

impl Template {
    /// Replace every occurrence of `placeholder` with `value`
    ///
    /// The first line of `value` is spliced in at the placeholder's column.
    /// Each further line is inserted below, padded with spaces up to that
    /// column; empty lines stay empty. The scan restarts from the top after
    /// each replacement until no occurrence is left, so placeholders
    /// reintroduced by a replacement are expanded too.
    ///
    /// When `value` itself contains `placeholder`, or a splice forms a new
    /// occurrence together with the text around it, that would never finish;
    /// from then on the scan continues past each spliced region instead, so
    /// only occurrences outside replaced text are expanded.
    ///
    /// Returns whether anything was replaced.
    pub fn replace(
        &mut self,
        placeholder: impl Into<Placeholder>,
        value: impl Into<Template>,
    ) -> bool {
        let placeholder = placeholder.into();
        let value = value.into();
        let token_len = placeholder.token().len();

        let mut single_pass = value.lines.iter().any(|line| placeholder.is_in(line));
        if single_pass {
            tracing::warn!(
                %placeholder,
                "replacement contains its own placeholder, expanding once"
            );
        }

        let mut cursor = Cursor::START;
        let mut count = 0usize;
        while let Some((row, col)) = self.find(&placeholder, cursor) {
            tracing::trace!(%placeholder, row, col, "splicing replacement");
            let (resume, inserted) = self.splice(row, col, token_len, &value.lines);
            if !single_pass && self.crosses_splice(&placeholder, row, col, resume) {
                tracing::warn!(
                    %placeholder,
                    row,
                    "replacement forms a new placeholder with surrounding text, expanding once"
                );
                single_pass = true;
            }
            cursor = if !single_pass {
                Cursor::START
            } else if row == cursor.row {
                // lines inserted earlier on this row were pushed down
                Cursor {
                    row,
                    col: resume,
                    next_row: cursor.next_row + inserted,
                }
            } else {
                Cursor {
                    row,
                    col: resume,
                    next_row: row + 1 + inserted,
                }
            };
            count += 1;
        }

        if count > 0 {
            tracing::debug!(%placeholder, count, "replaced placeholder");
        }
        count > 0
    }

    /// Remove every occurrence of `placeholder`, deleting lines left blank
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, placeholder: impl Into<Placeholder>) -> bool {
        self.remove_with(placeholder, RemoveMode::default())
    }

    /// Remove every occurrence of `placeholder`, treating lines left blank
    /// according to `mode`
    pub fn remove_with(
        &mut self,
        placeholder: impl Into<Placeholder>,
        mode: RemoveMode,
    ) -> bool {
        let placeholder = placeholder.into();
        let token_len = placeholder.token().len();

        let mut count = 0usize;
        while let Some((row, col)) = self.find(&placeholder, Cursor::START) {
            let line = &mut self.lines[row];
            line.replace_range(col..col + token_len, "");
            let trimmed = rtrim(line).len();
            line.truncate(trimmed);

            if line.is_empty() && mode == RemoveMode::DropBlankLine {
                tracing::trace!(%placeholder, row, "dropping blank line");
                self.lines.remove(row);
            }
            count += 1;
        }

        if count > 0 {
            tracing::debug!(%placeholder, count, ?mode, "removed placeholder");
        }
        count > 0
    }

    fn find(&self, placeholder: &Placeholder, from: Cursor) -> Option<(usize, usize)> {
        if let Some(col) = self
            .lines
            .get(from.row)
            .and_then(|line| placeholder.find_in(line, from.col))
        {
            return Some((from.row, col));
        }

        self.lines
            .iter()
            .enumerate()
            .skip(from.next_row)
            .find_map(|(row, line)| placeholder.find_in(line, 0).map(|col| (row, col)))
    }

    /// Whether an occurrence in `row` starts before `resume` and reaches past
    /// `col`, i.e. overlaps the text just spliced in or straddles `col` when
    /// nothing was spliced
    fn crosses_splice(
        &self,
        placeholder: &Placeholder,
        row: usize,
        col: usize,
        resume: usize,
    ) -> bool {
        let Some(line) = self.lines.get(row) else {
            return false;
        };
        let token_len = placeholder.token().len();

        let mut from = 0;
        while let Some(pos) = placeholder.find_in(line, from) {
            if pos >= resume {
                return false;
            }
            if pos + token_len > col {
                return true;
            }
            // tokens start with an ASCII `$`
            from = pos + 1;
        }
        false
    }

    /// Splice `value` over the `token_len` bytes at `row`/`col`, returning
    /// the byte column just past the spliced text and the number of lines
    /// inserted below `row`
    fn splice(
        &mut self,
        row: usize,
        col: usize,
        token_len: usize,
        value: &[String],
    ) -> (usize, usize) {
        let line = &mut self.lines[row];
        let rest = line.split_off(col + token_len);
        line.truncate(col);

        let (resume, continuation) = match value.split_first() {
            Some((first, tail)) => {
                let pad = " ".repeat(line.chars().count());
                line.push_str(first);
                let continuation: Vec<String> = tail
                    .iter()
                    .map(|l| {
                        if l.is_empty() {
                            String::new()
                        } else {
                            format!("{}{}", pad, l)
                        }
                    })
                    .collect();
                (line.len(), continuation)
            }
            None => (col, Vec::new()),
        };

        line.push_str(&rest);
        let trimmed = rtrim(line).len();
        line.truncate(trimmed);

        let inserted = continuation.len();
        self.lines.splice(row + 1..row + 1, continuation);
        (resume, inserted)
    }
}
