#![doc = include_str!("../README.md")]

mod file_collection;
mod file_tree;

pub use self::{
    file_collection::FileCollection,
    file_tree::{has_extension, FileTree, FilteredFileTree, SimpleFileTree, UnionFileTree},
};
use std::path::{Path, PathBuf};

/// Creates a file tree from a starting file
pub fn file_tree<'a>(src: &'a Path) -> impl FileTree<Path = PathBuf> + 'a {
    SimpleFileTree::new(src)
}

/// Creates a file tree over every file below `srcs` that has the given extension.
pub fn source_tree<I>(srcs: I, extension: &str) -> FilteredFileTree<UnionFileTree<'static, PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    srcs.into_iter()
        .map(|src| SimpleFileTree::new(src.as_ref().to_path_buf()))
        .collect::<UnionFileTree<_>>()
        .with_extension(extension)
}

#[cfg(test)]
mod tests {
    use crate::{file_tree, source_tree, FileCollection};
    use std::path::Path;

    #[test]
    fn test_file_tree() {
        let src = Path::new(env!("CARGO_MANIFEST_DIR"));
        let file_tree = file_tree(src);
        let flattened = file_tree.files().into_iter().collect::<Vec<_>>();
        assert!(flattened.len() > 0);
        assert!(flattened.iter().all(|i| i.is_file()), "all must be files");
        assert!(flattened.contains(&src.join("Cargo.toml")));
    }

    #[test]
    fn test_source_tree() {
        let src = Path::new(env!("CARGO_MANIFEST_DIR"));
        let rust_files = source_tree([src.join("src")], "rs").files();
        assert!(rust_files.contains(&src.join("src").join("lib.rs")));
        assert!(rust_files.iter().all(|i| i.extension().unwrap() == "rs"));
    }
}
