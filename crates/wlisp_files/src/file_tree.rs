use crate::FileCollection;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Used for representing a hierarchy of files. It extends the [`FileCollection`] trait to add hierarchy
/// query and manipulation methods.
pub trait FileTree {
    type Path: AsRef<Path> + Ord;

    fn flatten(&self) -> BTreeSet<Self::Path>;

    /// Only keeps the files of this tree whose extension is `extension` (without the leading dot).
    fn with_extension(self, extension: impl Into<String>) -> FilteredFileTree<Self>
    where
        Self: Sized,
    {
        FilteredFileTree {
            tree: self,
            extension: extension.into(),
        }
    }
}

impl<F: FileTree> FileCollection for F {
    type Path = F::Path;

    fn files(&self) -> BTreeSet<Self::Path> {
        self.flatten()
    }
}

/// Checks whether the path has exactly the given extension. The comparison is case-sensitive.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension() == Some(OsStr::new(extension))
}

/// A tree rooted at a single path, which is either a file or a directory that is walked recursively.
#[derive(Debug)]
pub struct SimpleFileTree<P: AsRef<Path>> {
    src: P,
}

impl<P: AsRef<Path>> SimpleFileTree<P> {
    pub fn new(src: P) -> Self {
        Self { src }
    }
}

impl<P: AsRef<Path>> FileTree for SimpleFileTree<P> {
    type Path = PathBuf;

    fn flatten(&self) -> BTreeSet<Self::Path> {
        let mut stack = vec![self.src.as_ref().to_path_buf()];
        let mut visited = BTreeSet::new();
        let mut files = BTreeSet::new();

        while let Some(path) = stack.pop() {
            if visited.contains(&path) {
                continue;
            }
            visited.insert(path.clone());
            if path.is_file() {
                files.insert(path);
            } else if path.is_dir() {
                if let Ok(read_dir) = std::fs::read_dir(path) {
                    read_dir
                        .into_iter()
                        .filter_map(|i| i.ok())
                        .for_each(|entry| {
                            let path = entry.path();
                            stack.push(path);
                        })
                }
            }
        }

        files
    }
}

/// A tree made of other trees
pub struct UnionFileTree<'a, P: AsRef<Path> + Ord + 'a> {
    trees: Vec<Box<dyn FileTree<Path = P> + 'a>>,
}

impl<'a, P, F> FromIterator<F> for UnionFileTree<'a, P>
where
    P: AsRef<Path> + Ord + 'a,
    F: FileTree<Path = P> + 'a,
{
    fn from_iter<T: IntoIterator<Item = F>>(iter: T) -> Self {
        Self {
            trees: iter
                .into_iter()
                .map(|f| Box::new(f) as Box<dyn FileTree<Path = P>>)
                .collect(),
        }
    }
}

impl<'a, P: AsRef<Path> + Ord + 'a> Default for UnionFileTree<'a, P> {
    fn default() -> Self {
        Self { trees: Vec::new() }
    }
}

impl<'a, P: AsRef<Path> + Ord + 'a> FileTree for UnionFileTree<'a, P> {
    type Path = P;

    fn flatten(&self) -> BTreeSet<Self::Path> {
        self.trees.iter().flat_map(|t| t.flatten()).collect()
    }
}

/// A tree that hides every file not ending in a given extension
#[derive(Debug)]
pub struct FilteredFileTree<T> {
    tree: T,
    extension: String,
}

impl<T: FileTree> FileTree for FilteredFileTree<T> {
    type Path = T::Path;

    fn flatten(&self) -> BTreeSet<Self::Path> {
        self.tree
            .flatten()
            .into_iter()
            .filter(|path| has_extension(path.as_ref(), &self.extension))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("could not create parent");
        }
        fs::write(path, "").expect("could not write file");
    }

    #[test]
    fn test_filtered_tree_walks_directories() {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        touch(&dir.path().join("a.wlisp"));
        touch(&dir.path().join("b.lisp"));
        touch(&dir.path().join("nested/deeper/c.wlisp"));
        touch(&dir.path().join("nested/d.WLISP"));

        let tree = SimpleFileTree::new(dir.path()).with_extension("wlisp");
        let files = tree.files().into_iter().collect::<Vec<_>>();
        assert_eq!(
            files,
            vec![
                dir.path().join("a.wlisp"),
                dir.path().join("nested/deeper/c.wlisp"),
            ]
        );
    }

    #[test]
    fn test_union_deduplicates() {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let file = dir.path().join("a.wlisp");
        touch(&file);

        let union = [dir.path().to_path_buf(), file.clone()]
            .into_iter()
            .map(SimpleFileTree::new)
            .collect::<UnionFileTree<_>>();
        assert_eq!(union.files().into_iter().collect::<Vec<_>>(), vec![file]);
    }

    #[test]
    fn test_missing_path_is_empty() {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let tree = SimpleFileTree::new(dir.path().join("missing"));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("dir/file.wlisp"), "wlisp"));
        assert!(!has_extension(Path::new("dir/file.lisp"), "wlisp"));
        assert!(!has_extension(Path::new("dir/wlisp"), "wlisp"));
    }
}
