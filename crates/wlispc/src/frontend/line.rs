//! Classification of raw source lines by their indentation

use crate::compiler::error::ErrorKind;
use regex::Regex;
use std::sync::LazyLock;

/// Starts a comment running to the end of the line
pub const COMMENT_MARKER: char = ';';
/// Marks a continuation line when placed at its parent's indentation
pub const CONTINUATION_MARKER: char = '|';

static BLOCK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\.+|-+|_+|‾+)$").expect("block header pattern should be valid")
});

/// A character that may be used for indentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndentChar {
    Space,
    Tab,
}

impl IndentChar {
    /// Gets the indent char for `c`, if it is one
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(IndentChar::Space),
            '\t' => Some(IndentChar::Tab),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            IndentChar::Space => ' ',
            IndentChar::Tab => '\t',
        }
    }
}

/// A raw line of a source file, along with what can be told about it without any context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    text: &'a str,
    index: usize,
    leading_width: usize,
    blank: bool,
    comment_only: bool,
}

impl<'a> SourceLine<'a> {
    /// Classifies the line at 0-based `index`
    pub fn classify(text: &'a str, index: usize) -> Self {
        let leading_width = text
            .chars()
            .take_while(|&c| IndentChar::from_char(c).is_some())
            .count();
        let blank = text.chars().all(char::is_whitespace);
        let comment_only = !blank && text.trim_start().starts_with(COMMENT_MARKER);
        Self {
            text,
            index,
            leading_width,
            blank,
            comment_only,
        }
    }

    /// The raw text of the line
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The 0-based index of this line in its file
    pub fn index(&self) -> usize {
        self.index
    }

    /// The 1-based line number
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// The count of leading space and tab characters
    pub fn leading_width(&self) -> usize {
        self.leading_width
    }

    pub fn is_blank(&self) -> bool {
        self.blank
    }

    pub fn is_comment_only(&self) -> bool {
        self.comment_only
    }

    /// Blank and comment only lines never take part in compilation
    pub fn is_skipped(&self) -> bool {
        self.blank || self.comment_only
    }

    /// The leading indentation of this line, verbatim
    pub fn indentation(&self) -> &'a str {
        // indentation chars are all single byte
        &self.text[..self.leading_width]
    }

    /// Everything after the leading indentation
    pub fn content(&self) -> &'a str {
        &self.text[self.leading_width..]
    }

    /// Whether the content of this line starts with [CONTINUATION_MARKER]
    pub fn is_continuation(&self) -> bool {
        self.content().starts_with(CONTINUATION_MARKER)
    }

    /// A block header is a line made of one repeated separator character, `.`, `-`, `_` or `‾`.
    pub fn is_block_header(&self) -> bool {
        BLOCK_HEADER.is_match(self.text.trim())
    }

    fn leading_chars(&self) -> impl Iterator<Item = IndentChar> + 'a {
        self.text.chars().map_while(IndentChar::from_char)
    }
}

/// The indentation character of a file. It is fixed by the first leading whitespace character seen
/// and never changes afterward.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Indentation {
    indent_char: Option<IndentChar>,
}

impl Indentation {
    /// Creates an indentation with no established character
    pub fn new() -> Self {
        Self::default()
    }

    /// The established indentation character, if any line has been indented yet
    pub fn indent_char(&self) -> Option<IndentChar> {
        self.indent_char
    }

    /// Checks the leading whitespace of `line` against the file's indentation character, fixing it
    /// if this is the first indented line. Returns the leading width of the line.
    pub fn observe(&mut self, line: &SourceLine<'_>) -> Result<usize, ErrorKind> {
        for c in line.leading_chars() {
            let expected = *self.indent_char.get_or_insert(c);
            if expected != c {
                return Err(ErrorKind::MixedIndentation);
            }
        }
        Ok(line.leading_width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_classify_indented_line() {
        let line = SourceLine::classify("    foo bar", 3);
        assert_eq!(line.leading_width(), 4);
        assert_eq!(line.number(), 4);
        assert_eq!(line.indentation(), "    ");
        assert_eq!(line.content(), "foo bar");
        assert!(!line.is_skipped());
    }

    #[test]
    fn test_classify_blank_lines() {
        assert!(SourceLine::classify("", 0).is_blank());
        assert!(SourceLine::classify(" \t  ", 0).is_blank());
        assert!(!SourceLine::classify("  x", 0).is_blank());
    }

    #[test]
    fn test_classify_comment_lines() {
        let line = SourceLine::classify("\t\t; a comment", 0);
        assert!(line.is_comment_only());
        assert!(line.is_skipped());
        assert!(!SourceLine::classify("foo ; trailing", 0).is_comment_only());
    }

    #[test]
    fn test_block_headers() {
        for header in ["-", "----", "....", "__", "‾‾‾", "  ---  "] {
            assert!(SourceLine::classify(header, 0).is_block_header(), "{header:?}");
        }
        for not_header in ["-.-", "--x", "foo", "==", ""] {
            assert!(!SourceLine::classify(not_header, 0).is_block_header(), "{not_header:?}");
        }
    }

    #[test]
    fn test_continuation() {
        assert!(SourceLine::classify("  |bar", 0).is_continuation());
        assert!(!SourceLine::classify("  bar|", 0).is_continuation());
    }

    #[test]
    fn test_first_indent_char_is_kept() {
        let mut indentation = Indentation::new();
        assert_eq!(indentation.observe(&SourceLine::classify("foo", 0)), Ok(0));
        assert_eq!(indentation.indent_char(), None);
        assert_eq!(indentation.observe(&SourceLine::classify("\t\tfoo", 1)), Ok(2));
        assert_eq!(indentation.indent_char(), Some(IndentChar::Tab));
        assert_eq!(
            indentation.observe(&SourceLine::classify("  foo", 2)),
            Err(ErrorKind::MixedIndentation)
        );
        assert_eq!(indentation.indent_char(), Some(IndentChar::Tab));
    }

    #[test]
    fn test_mixed_within_one_line() {
        let mut indentation = Indentation::new();
        assert_eq!(
            indentation.observe(&SourceLine::classify(" \tfoo", 0)),
            Err(ErrorKind::MixedIndentation)
        );
    }
}
