//! Implements [`resolve::DbLookup`] over an in-memory [`InSyncDir`] tree by
//! descending path components, so the resolver never has to know this
//! crate's on-disk representation exists.

use model::{FileDescriptor, Side, SymlinkDescriptor};
use platform::file_id::FileId;
use resolve::{DbFileEntry, DbLookup, DbSymlinkEntry};

use crate::record::InSyncDir;

/// Borrows a loaded tree and answers [`DbLookup`] queries against it.
#[derive(Debug, Clone, Copy)]
pub struct DirLookup<'a> {
    root: &'a InSyncDir,
}

impl<'a> DirLookup<'a> {
    /// Wraps a tree for lookup.
    #[must_use]
    pub const fn new(root: &'a InSyncDir) -> Self {
        Self { root }
    }

    fn descend(&self, relative_path: &str) -> Option<(&'a InSyncDir, &'a str)> {
        let mut dir = self.root;
        let mut components = relative_path.split('/').filter(|c| !c.is_empty()).peekable();
        while let Some(component) = components.next() {
            if components.peek().is_none() {
                return Some((dir, component));
            }
            dir = dir.dirs.get(component)?;
        }
        None
    }
}

impl DbLookup for DirLookup<'_> {
    fn file(&self, relative_path: &str) -> Option<DbFileEntry> {
        let (dir, name) = self.descend(relative_path)?;
        let record = dir.files.get(name)?;
        Some(DbFileEntry {
            left: FileDescriptor { mtime: record.left.mtime, size: record.size, file_id: record.left.file_id, followed_symlink: false },
            right: FileDescriptor { mtime: record.right.mtime, size: record.size, file_id: record.right.file_id, followed_symlink: false },
        })
    }

    fn symlink(&self, relative_path: &str) -> Option<DbSymlinkEntry> {
        let (dir, name) = self.descend(relative_path)?;
        let record = dir.symlinks.get(name)?;
        Some(DbSymlinkEntry {
            left: SymlinkDescriptor { mtime: record.left.mtime },
            right: SymlinkDescriptor { mtime: record.right.mtime },
        })
    }

    fn file_id(&self, relative_path: &str, side: Side) -> Option<FileId> {
        let (dir, name) = self.descend(relative_path)?;
        let record = dir.files.get(name)?;
        match side {
            Side::Left => record.left.file_id,
            Side::Right => record.right.file_id,
        }
    }
}
