//! Turns the indentation of a wlisp file into parentheses.
//!
//! Lines are read through a single forward cursor. Every line deeper than the current scope starts
//! a subtree whose children are the lines nested below it; a line that is not deeper belongs to an
//! enclosing scope and is handed back by undoing the read.

use crate::compiler::error::{CompileError, ErrorKind};
use crate::frontend::cursor::LineCursor;
use crate::frontend::line::{Indentation, SourceLine};
use crate::frontend::tokens::count_tokens;
use tracing::trace;

/// The state of compiling a single file
#[derive(Debug)]
pub struct Compilation<'a, S> {
    file_name: &'a str,
    cursor: LineCursor<'a, S>,
    indentation: Indentation,
}

impl<'a, S: AsRef<str>> Compilation<'a, S> {
    /// Creates a new compilation of `lines`. `file_name` is only used in diagnostics.
    pub fn new(file_name: &'a str, lines: &'a [S]) -> Self {
        Self {
            file_name,
            cursor: LineCursor::new(lines),
            indentation: Indentation::new(),
        }
    }

    /// Compiles every line, returning one record per top level subtree
    pub fn compile(mut self) -> Result<Vec<String>, CompileError> {
        self.collect_children(None)
    }

    /// Aborts with an error at the current line
    fn fail(&self, kind: ErrorKind) -> CompileError {
        CompileError::new(self.file_name, self.cursor.line_number(), kind)
    }

    /// Collects and compiles the children of a scope whose lines are indented by `parent`. The
    /// root scope has no indentation at all, so every line is deeper than it.
    fn collect_children(&mut self, parent: Option<usize>) -> Result<Vec<String>, CompileError> {
        let mut children = vec![];
        let mut subtree_width = None;
        while let Some(line) = self.cursor.next_line() {
            if line.is_skipped() {
                continue;
            }
            let width = self
                .indentation
                .observe(&line)
                .map_err(|kind| self.fail(kind))?;
            if parent.map_or(true, |parent| width > parent) {
                let expected = *subtree_width.get_or_insert(width);
                if width != expected {
                    return Err(self.fail(ErrorKind::InconsistentIndentation));
                }
                children.push(self.compile_subtree(line)?);
            } else if parent == Some(width) && line.is_continuation() {
                children.push(self.continuation(line));
            } else {
                self.cursor.undo();
                break;
            }
        }
        Ok(children)
    }

    fn compile_subtree(&mut self, line: SourceLine<'a>) -> Result<String, CompileError> {
        let token_count = count_tokens(line.content()).map_err(|kind| self.fail(kind))?;
        let children = self.collect_children(Some(line.leading_width()))?;
        let needs_parens = children.len() + token_count > 1;
        trace!(
            line = line.number(),
            token_count,
            children = children.len(),
            needs_parens,
            "compiled subtree"
        );

        let joined = children.join("\n");
        let mut text = String::from(line.indentation());
        if needs_parens {
            text.push('(');
        }
        if line.is_block_header() {
            text.push_str(joined.trim_start());
        } else {
            text.push_str(line.content());
            if !children.is_empty() {
                text.push('\n');
            }
            text.push_str(&joined);
        }
        if needs_parens {
            text.push(')');
        }
        Ok(text)
    }

    /// Passes a continuation line through, with its marker replaced by the indentation character.
    /// Nothing replaces the marker if no line of the file has been indented yet.
    fn continuation(&self, line: SourceLine<'a>) -> String {
        let rest = &line.content()[1..];
        let mut text = String::with_capacity(line.text().len());
        text.push_str(line.indentation());
        if let Some(indent_char) = self.indentation.indent_char() {
            text.push(indent_char.as_char());
        }
        text.push_str(rest);
        text
    }
}

/// Compiles the lines of one file, returning one record per top level subtree.
pub fn compile_lines<S: AsRef<str>>(
    file_name: &str,
    lines: &[S],
) -> Result<Vec<String>, CompileError> {
    Compilation::new(file_name, lines).compile()
}

/// Compiles the full text of one file. Both `\n` and `\r\n` line endings are accepted.
pub fn compile_str(file_name: &str, source: &str) -> Result<Vec<String>, CompileError> {
    let lines = source.lines().collect::<Vec<_>>();
    compile_lines(file_name, &lines)
}

/// Lays out compiled records the way they are written to a file, each followed by a line break.
pub fn render<S: AsRef<str>>(records: &[S]) -> String {
    records.iter().fold(String::new(), |mut text, record| {
        text.push_str(record.as_ref());
        text.push('\n');
        text
    })
}
