#![doc = include_str!("../README.md")]

pub mod frontend;
mod compiler;
pub use compiler::*;

/// Extension of wlisp source files
pub const SOURCE_EXTENSION: &str = "wlisp";
/// Extension given to compiled files
pub const TARGET_EXTENSION: &str = "lisp";
