//! Counting of the top level tokens of a line.
//!
//! Strings and groups of parentheses written inside a line are opaque: each counts as exactly one
//! token, whatever it contains.

use crate::compiler::error::ErrorKind;
use crate::frontend::line::COMMENT_MARKER;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Stands in for a masked string literal
const STRING_PLACEHOLDER: &str = "s";
/// Stands in for a folded parenthesized group
const GROUP_PLACEHOLDER: char = 'p';

static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(\\\\|\\"|.)*?""#).expect("string literal pattern should be valid")
});

/// Counts the top level tokens of `content`, the text of a line after its indentation.
///
/// # Error
/// Returns [ErrorKind::MismatchedParentheses] if a `)` has no matching `(` or a `(` is never
/// closed. Parentheses inside strings and comments are ignored.
pub fn count_tokens(content: &str) -> Result<usize, ErrorKind> {
    let masked = mask_strings(content);
    let folded = fold_groups(strip_comment(&masked))?;
    Ok(folded.split(' ').filter(|s| !s.is_empty()).count())
}

/// Replaces every string literal with a single placeholder character. Unterminated strings are
/// left alone.
fn mask_strings(content: &str) -> Cow<'_, str> {
    STRING_LITERAL.replace_all(content, STRING_PLACEHOLDER)
}

fn strip_comment(content: &str) -> &str {
    match content.find(COMMENT_MARKER) {
        Some(index) => &content[..index],
        None => content,
    }
}

/// Collapses every top level parenthesized group into a single placeholder character.
fn fold_groups(content: &str) -> Result<String, ErrorKind> {
    let mut folded = String::with_capacity(content.len());
    let mut depth = 0_usize;
    for c in content.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(ErrorKind::MismatchedParentheses)?;
                if depth == 0 {
                    folded.push(GROUP_PLACEHOLDER);
                }
            }
            c if depth == 0 => folded.push(c),
            _ => {}
        }
    }
    if depth > 0 {
        return Err(ErrorKind::MismatchedParentheses);
    }
    Ok(folded)
}
