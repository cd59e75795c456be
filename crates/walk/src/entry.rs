use platform::file_id::FileId;

/// Raw facts about a regular file, as read directly from the filesystem.
///
/// `model` turns this into a `FileDescriptor` once it knows which side the
/// entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMeta {
    /// Last-write time, seconds since the Unix epoch.
    pub mtime: i64,
    /// File size in bytes.
    pub size: u64,
    /// Filesystem identity, when the platform exposes one.
    pub file_id: Option<FileId>,
    /// Whether this entry was reached by following a symlink.
    pub followed_symlink: bool,
}

/// Raw facts about a symlink, as read without following it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymlinkMeta {
    /// Last-write time of the link itself, seconds since the Unix epoch.
    pub mtime: i64,
}

/// Raw facts about a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirMeta {
    /// Whether this entry was reached by following a symlink.
    pub followed_symlink: bool,
}
