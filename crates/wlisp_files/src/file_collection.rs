//! file collection trait

use std::collections::BTreeSet;
use std::path::Path;

/// A [`FileCollection`](FileCollection) represents a collection of file system locations which can
/// be queried in certain ways.
///
/// Files are always returned in sorted order so that anything driven by a collection
/// happens in the same order from run to run.
pub trait FileCollection {
    type Path: AsRef<Path> + Ord;

    /// Gets the files of this set
    fn files(&self) -> BTreeSet<Self::Path>;

    /// Returns true if this collection is empty
    fn is_empty(&self) -> bool {
        self.files().into_iter().next().is_none()
    }
}

impl<P: AsRef<Path> + Ord + Clone> FileCollection for BTreeSet<P> {
    type Path = P;

    fn files(&self) -> BTreeSet<Self::Path> {
        self.clone()
    }
}
