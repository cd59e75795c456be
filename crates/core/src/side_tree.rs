//! Buffers one side's traversal before merging (§4.3).
//!
//! `walk::Visitor` delivers a single flat, depth-first stream of
//! full relative paths; merging needs random access to "this side's
//! children of this folder", one level at a time. [`SideTreeBuilder`]
//! collects that stream into a [`SideDir`] tree so [`crate::merge`] can
//! walk both sides' trees in lockstep afterwards.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use walk::{DirAction, DirMeta, FileMeta, SymlinkMeta, Visitor};

/// One side's raw file facts, as read from the filesystem.
#[derive(Debug, Clone, Copy)]
pub struct SideFile {
    /// Facts read directly off the filesystem entry.
    pub meta: FileMeta,
}

/// One side's raw symlink facts.
#[derive(Debug, Clone, Copy)]
pub struct SideSymlink {
    /// Facts read directly off the filesystem entry.
    pub meta: SymlinkMeta,
}

/// One side's unpaired view of a single directory: the "folder container"
/// of §4.3, before it has been merged against the other side.
#[derive(Debug, Clone, Default)]
pub struct SideDir {
    /// This directory's own facts, `None` for the traversal root (which has
    /// no short name of its own to pair on).
    pub meta: Option<DirMeta>,
    /// Child files, keyed by short name, in traversal order.
    pub files: IndexMap<String, SideFile>,
    /// Child symlinks, keyed by short name, in traversal order.
    pub symlinks: IndexMap<String, SideSymlink>,
    /// Child directories, keyed by short name, in traversal order.
    pub dirs: IndexMap<String, SideDir>,
}

impl SideDir {
    fn dir_mut(&mut self, relative: &Path) -> &mut Self {
        let mut node = self;
        for component in relative.components() {
            let name = component.as_os_str().to_string_lossy().into_owned();
            node = node.dirs.entry(name).or_default();
        }
        node
    }
}

/// A [`walk::Visitor`] that records every entry into a [`SideDir`] tree
/// instead of acting on it directly, and keeps its own list of entries
/// this side's traversal could not read (§7: non-fatal, recorded rather
/// than propagated).
#[derive(Default)]
pub struct SideTreeBuilder {
    root: SideDir,
    /// Directories that failed to read; their whole subtree was pruned.
    pub failed_dirs: Vec<PathBuf>,
    /// Individual entries that failed to stat.
    pub failed_items: Vec<PathBuf>,
}

impl SideTreeBuilder {
    /// Consumes the builder, returning the tree it accumulated.
    #[must_use]
    pub fn into_tree(self) -> SideDir {
        self.root
    }
}

fn split(relative: &Path) -> (&Path, String) {
    let parent = relative.parent().unwrap_or_else(|| Path::new(""));
    let name = relative
        .file_name()
        .expect("walk only reports entries with a final path component")
        .to_string_lossy()
        .into_owned();
    (parent, name)
}

impl Visitor for SideTreeBuilder {
    fn on_file(&mut self, relative: &Path, meta: &FileMeta) {
        let (parent, name) = split(relative);
        self.root.dir_mut(parent).files.insert(name, SideFile { meta: *meta });
    }

    fn on_symlink(&mut self, relative: &Path, meta: &SymlinkMeta) {
        let (parent, name) = split(relative);
        self.root.dir_mut(parent).symlinks.insert(name, SideSymlink { meta: *meta });
    }

    fn on_directory(&mut self, relative: &Path, meta: &DirMeta) -> DirAction {
        self.root.dir_mut(relative).meta = Some(*meta);
        DirAction::Descend
    }

    fn on_dir_error(&mut self, relative: &Path, _error: &std::io::Error) {
        self.failed_dirs.push(relative.to_path_buf());
    }

    fn on_item_error(&mut self, relative: &Path, _error: &std::io::Error) {
        self.failed_items.push(relative.to_path_buf());
    }
}
