//! Stable per-file identity, used by `resolve`'s move detector to recognize
//! that a `create`+`delete` pair is really the same file that moved.

use std::fs::Metadata;

/// Filesystem-assigned identity for a single file.
///
/// On Unix this is `(device, inode)`; both stay stable across renames
/// within the same filesystem but are not comparable across filesystems or
/// after the file is recreated. Callers must still fall back to a
/// size+timestamp heuristic when no two descriptors share a `FileId`
/// (`resolve`'s `detect_renaming` module does exactly this).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId {
    device: u64,
    inode: u64,
}

impl FileId {
    /// Extracts the identity of an already-`stat`ed file.
    #[cfg(unix)]
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self {
            device: metadata.dev(),
            inode: metadata.ino(),
        })
    }

    /// Extracts the identity of an already-queried file.
    ///
    /// Windows file indexes require `GetFileInformationByHandle`, which
    /// needs an open handle rather than the `Metadata` this crate is given;
    /// until that plumbing exists this reports no identity, which routes
    /// callers straight to the size+timestamp move-detection fallback.
    #[cfg(windows)]
    #[must_use]
    pub fn from_metadata(_metadata: &Metadata) -> Option<Self> {
        None
    }

    /// Decomposes the identity into its raw `(device, inode)` components,
    /// for on-disk persistence (`syncdb`'s per-file record).
    #[must_use]
    pub const fn as_raw(self) -> (u64, u64) {
        (self.device, self.inode)
    }

    /// Reconstructs an identity from raw `(device, inode)` components read
    /// back from storage.
    #[must_use]
    pub const fn from_raw(device: u64, inode: u64) -> Self {
        Self { device, inode }
    }
}
