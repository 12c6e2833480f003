//! Errors produced while compiling wlisp files

use itertools::Itertools as _;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinError;

/// The reason a single file could not be compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A line is nested deeper than its parent but not as deep as its first sibling
    #[error("Inconsistent indentation")]
    InconsistentIndentation,
    /// Both tabs and spaces are used as indentation in one file
    #[error("Mixed use of tabs and spaces")]
    MixedIndentation,
    /// A line closes a parenthesis it never opened, or leaves one open
    #[error("Mismatched parentheses")]
    MismatchedParentheses,
}

/// A fatal error in a single file, located at the line where it was detected.
///
/// Displayed as `<file name>:<line>: <message>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file_name}:{line}: {kind}")]
pub struct CompileError {
    file_name: String,
    line: usize,
    kind: ErrorKind,
}

impl CompileError {
    /// Creates a new compile error at a 1-based line number
    pub fn new(file_name: impl Into<String>, line: usize, kind: ErrorKind) -> Self {
        Self {
            file_name: file_name.into(),
            line,
            kind,
        }
    }

    /// The name of the file the error occurred in
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The 1-based line number
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// The kind of error
#[derive(Debug, Error)]
pub enum WlispCErrorKind {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("{}", .0.iter().join("\n"))]
    Multi(Vec<WlispCError>),
    #[error("compile task failed: {0}")]
    Join(#[from] JoinError),
}

/// An error occurred while attempting to compile wlisp files
#[derive(Debug, Error)]
#[error(transparent)]
pub struct WlispCError(Box<WlispCErrorKind>);

impl WlispCError {
    /// Creates an io error that occurred while accessing `path`
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        WlispCErrorKind::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
        .into()
    }

    /// Gets the kind of this error
    pub fn kind(&self) -> &WlispCErrorKind {
        &self.0
    }

    /// Iterates over every compile error contained in this error
    pub fn compile_errors(&self) -> Vec<&CompileError> {
        match self.kind() {
            WlispCErrorKind::Compile(error) => vec![error],
            WlispCErrorKind::Multi(errors) => {
                errors.iter().flat_map(|e| e.compile_errors()).collect()
            }
            _ => vec![],
        }
    }
}

impl<T> From<T> for WlispCError
where
    WlispCErrorKind: From<T>,
{
    fn from(value: T) -> Self {
        Self(Box::new(WlispCErrorKind::from(value)))
    }
}

impl From<Vec<WlispCError>> for WlispCErrorKind {
    fn from(value: Vec<WlispCError>) -> Self {
        WlispCErrorKind::Multi(value)
    }
}

/// A type alias for general results in wlispc
pub type WlispCResult<T> = Result<T, WlispCError>;
