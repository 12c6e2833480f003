//! Resolves the input given on the command line into the sources to compile

use std::path::{Path, PathBuf};
use thiserror::Error;
use wlisp_files::{has_extension, source_tree, FileCollection};
use wlispc::SOURCE_EXTENSION;

/// The input can not be compiled
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{}: File or directory not found", .0.display())]
    NotFound(PathBuf),
    #[error("{}: Incorrect file extension", .0.display())]
    IncorrectExtension(PathBuf),
}

/// Gets every source file named by `input`. A file must be a wlisp source itself, a directory is
/// searched recursively for wlisp sources.
pub fn sources(input: &Path) -> Result<Vec<PathBuf>, InputError> {
    if !input.exists() {
        return Err(InputError::NotFound(input.to_path_buf()));
    }
    if input.is_file() && !has_extension(input, SOURCE_EXTENSION) {
        return Err(InputError::IncorrectExtension(input.to_path_buf()));
    }
    Ok(source_tree([input], SOURCE_EXTENSION)
        .files()
        .into_iter()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_directory_is_searched() {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        fs::create_dir_all(dir.path().join("lib")).expect("could not create dir");
        for file in ["main.wlisp", "notes.txt", "lib/util.wlisp", "lib/util.lisp"] {
            fs::write(dir.path().join(file), "").expect("could not write file");
        }
        let sources = sources(dir.path()).expect("directory should be accepted");
        assert_eq!(
            sources,
            vec![dir.path().join("lib/util.wlisp"), dir.path().join("main.wlisp")]
        );
    }

    #[test]
    fn test_single_source_file() {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let file = dir.path().join("main.wlisp");
        fs::write(&file, "").expect("could not write file");
        assert_eq!(sources(&file).expect("file should be accepted"), vec![file]);
    }

    #[test]
    fn test_incorrect_extension() {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let file = dir.path().join("main.lisp");
        fs::write(&file, "").expect("could not write file");
        assert!(matches!(sources(&file), Err(InputError::IncorrectExtension(_))));
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let error = sources(&dir.path().join("missing")).expect_err("should not exist");
        assert!(matches!(error, InputError::NotFound(_)));
        assert!(error.to_string().ends_with("File or directory not found"));
    }
}
