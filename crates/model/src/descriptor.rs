use platform::file_id::FileId;

/// Everything known about a regular file on one side of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Last-write time, seconds since the Unix epoch.
    pub mtime: i64,
    /// File size in bytes.
    pub size: u64,
    /// Opaque filesystem identity, when available.
    pub file_id: Option<FileId>,
    /// Whether this entry was reached by following a symlink.
    pub followed_symlink: bool,
}

/// Everything known about a symlink on one side of a pair.
///
/// The link's own mtime is tracked; the target is never dereferenced here
/// (that only happens under [`crate::SymlinkPolicy::Follow`], which
/// replaces the symlink with the file/folder it points to before it ever
/// reaches a [`crate::PairedItem`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymlinkDescriptor {
    /// Last-write time of the link itself, seconds since the Unix epoch.
    pub mtime: i64,
}

/// Everything known about a folder on one side of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FolderDescriptor {
    /// Whether this entry was reached by following a symlink.
    pub followed_symlink: bool,
}
