//! The frontend of the compiler, used for ingesting source lines and measuring them before they
//! are arranged into subtrees.

pub mod cursor;
pub mod line;
pub mod tokens;
