//! A forward-only cursor over the lines of a file

use crate::frontend::line::SourceLine;

/// Reads the lines of a file one at a time. The last read can be undone when a line turns out to
/// belong to an enclosing scope.
#[derive(Debug)]
pub struct LineCursor<'a, S> {
    lines: &'a [S],
    position: usize,
}

impl<'a, S: AsRef<str>> LineCursor<'a, S> {
    /// Creates a new cursor positioned before the first line
    pub fn new(lines: &'a [S]) -> Self {
        Self { lines, position: 0 }
    }

    /// Reads the next line, if there is one
    pub fn next_line(&mut self) -> Option<SourceLine<'a>> {
        let lines = self.lines;
        let text = lines.get(self.position)?;
        let line = SourceLine::classify(text.as_ref(), self.position);
        self.position += 1;
        Some(line)
    }

    /// Un-reads the most recently read line
    pub fn undo(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// The 1-based number of the most recently read line, or 0 if nothing was read yet
    pub fn line_number(&self) -> usize {
        self.position
    }

    /// Whether every line has been read
    pub fn is_finished(&self) -> bool {
        self.position >= self.lines.len()
    }
}
