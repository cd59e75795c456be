#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Shared fixtures for building a left/right directory pair in tests.
//!
//! A scenario test almost always starts the same way: two scratch
//! directories, a handful of files/symlinks/directories placed into one or
//! both, sometimes with a specific modification time so a timestamp-based
//! category is exercised deterministically. [`Pair`] collects that
//! boilerplate in one place instead of every test crate rolling its own.

use std::fs;
#[cfg(unix)]
use std::os::unix::fs::symlink as unix_symlink;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use filetime::{set_file_mtime, FileTime};
use tempfile::TempDir;

/// A left/right scratch directory pair, torn down together when dropped.
pub struct Pair {
    /// The left root.
    pub left: TempDir,
    /// The right root.
    pub right: TempDir,
}

impl Pair {
    /// Creates two empty, independent scratch directories.
    #[must_use]
    pub fn new() -> Self {
        Self {
            left: tempfile::tempdir().expect("create left scratch directory"),
            right: tempfile::tempdir().expect("create right scratch directory"),
        }
    }

    /// Writes `contents` at `relative` under the left root, creating any
    /// parent directories needed.
    pub fn left_file(&self, relative: &str, contents: &[u8]) -> PathBuf {
        write_file(self.left.path(), relative, contents)
    }

    /// Writes `contents` at `relative` under the right root, creating any
    /// parent directories needed.
    pub fn right_file(&self, relative: &str, contents: &[u8]) -> PathBuf {
        write_file(self.right.path(), relative, contents)
    }

    /// Writes the same `contents` at `relative` on both sides.
    pub fn both_file(&self, relative: &str, contents: &[u8]) {
        self.left_file(relative, contents);
        self.right_file(relative, contents);
    }

    /// Creates `relative` as a directory under the left root.
    pub fn left_dir(&self, relative: &str) -> PathBuf {
        make_dir(self.left.path(), relative)
    }

    /// Creates `relative` as a directory under the right root.
    pub fn right_dir(&self, relative: &str) -> PathBuf {
        make_dir(self.right.path(), relative)
    }

    /// Creates `relative` as a directory on both sides.
    pub fn both_dir(&self, relative: &str) {
        self.left_dir(relative);
        self.right_dir(relative);
    }

    /// Creates a symlink at `relative` under the left root pointing at
    /// `target`.
    #[cfg(unix)]
    pub fn left_symlink(&self, relative: &str, target: &str) -> PathBuf {
        make_symlink(self.left.path(), relative, target)
    }

    /// Creates a symlink at `relative` under the right root pointing at
    /// `target`.
    #[cfg(unix)]
    pub fn right_symlink(&self, relative: &str, target: &str) -> PathBuf {
        make_symlink(self.right.path(), relative, target)
    }

    /// Sets `path`'s modification time to `offset` relative to now.
    /// A negative offset moves the mtime into the past, matching the
    /// "newer"/"older" wording scenarios are phrased with.
    pub fn set_mtime(path: &Path, offset: Duration, into_past: bool) {
        let now = SystemTime::now();
        let target = if into_past { now - offset } else { now + offset };
        set_file_mtime(path, FileTime::from_system_time(target)).expect("set mtime");
    }
}

impl Default for Pair {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(root: &Path, relative: &str, contents: &[u8]) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(&path, contents).expect("write fixture file");
    path
}

fn make_dir(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(&path).expect("create fixture directory");
    path
}

#[cfg(unix)]
fn make_symlink(root: &Path, relative: &str, target: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    unix_symlink(target, &path).expect("create fixture symlink");
    path
}
