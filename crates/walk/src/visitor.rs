use std::path::Path;

use crate::entry::{DirMeta, FileMeta, SymlinkMeta};

/// What the traversal should do after visiting a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirAction {
    /// Read and recurse into this directory's contents.
    Descend,
    /// Record the directory itself but do not read its contents.
    Skip,
}

/// Callbacks the traversal invokes for every entry it visits, in
/// depth-first, left-first, sorted-by-name order.
pub trait Visitor {
    /// A regular file was found at `relative`.
    fn on_file(&mut self, relative: &Path, meta: &FileMeta);

    /// A symlink was found at `relative`.
    ///
    /// Default: ignored. Callers that care about symlinks (every caller in
    /// this workspace) override this.
    fn on_symlink(&mut self, _relative: &Path, _meta: &SymlinkMeta) {}

    /// A directory was found at `relative`. The return value decides
    /// whether the traversal descends into it.
    fn on_directory(&mut self, relative: &Path, meta: &DirMeta) -> DirAction;

    /// Reading `relative` as a directory failed after retry was declined.
    /// The entire subtree beneath it is pruned.
    fn on_dir_error(&mut self, _relative: &Path, _error: &std::io::Error) {}

    /// Reading a single entry at `relative` failed after retry was
    /// declined. Only this entry is skipped; siblings continue.
    fn on_item_error(&mut self, _relative: &Path, _error: &std::io::Error) {}
}
