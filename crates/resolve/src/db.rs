use model::{FileDescriptor, SymlinkDescriptor};
use platform::file_id::FileId;

/// The last-known-in-sync descriptors for a file pair, as recorded by the
/// database (§4.6). Always carries both sides: an entry is only ever
/// written when the pair was `Category::Equal` at the end of a prior run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbFileEntry {
    /// How the file looked on the left at the end of the prior run.
    pub left: FileDescriptor,
    /// How the file looked on the right at the end of the prior run.
    pub right: FileDescriptor,
}

/// The last-known-in-sync descriptors for a symlink pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbSymlinkEntry {
    /// How the link looked on the left at the end of the prior run.
    pub left: SymlinkDescriptor,
    /// How the link looked on the right at the end of the prior run.
    pub right: SymlinkDescriptor,
}

/// Read-only access to a base-pair's in-sync database, keyed by relative
/// path (the same key on both sides).
///
/// Kept as a trait rather than a concrete type from the `syncdb` crate so
/// resolution logic never has to know about the on-disk format, session
/// GUIDs, or compression — only `syncdb`'s loader does.
pub trait DbLookup {
    /// The recorded entry for the file at `relative_path`, if any.
    fn file(&self, relative_path: &str) -> Option<DbFileEntry>;

    /// The recorded entry for the symlink at `relative_path`, if any.
    fn symlink(&self, relative_path: &str) -> Option<DbSymlinkEntry>;

    /// The file identity the database last associated with
    /// `relative_path` on the given side — consulted by move detection.
    fn file_id(&self, relative_path: &str, side: model::Side) -> Option<FileId>;
}

/// A [`DbLookup`] with nothing recorded, for first-time syncs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyDb;

impl DbLookup for EmptyDb {
    fn file(&self, _relative_path: &str) -> Option<DbFileEntry> {
        None
    }

    fn symlink(&self, _relative_path: &str) -> Option<DbSymlinkEntry> {
        None
    }

    fn file_id(&self, _relative_path: &str, _side: model::Side) -> Option<FileId> {
        None
    }
}
