//! The artificial hierarchy recording the last synchronized state (§4.6):
//! a standalone tree, independent of [`model::BasePair`], built from the
//! same relative-path keys but surviving across runs.

use indexmap::IndexMap;
use platform::file_id::FileId;

/// Which equality rule produced an in-sync record: a byte-for-byte content
/// comparison, or merely matching size and modification time under the
/// timestamp-and-size variant. Kept per record (not globally) because a
/// user can switch variants between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InSyncType {
    /// Content was compared byte-for-byte and found equal.
    BinaryEqual,
    /// Only size and modification time were compared.
    AttributesEqual,
}

/// The last-known-in-sync descriptor for one side of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRecord {
    /// Last-write time at the moment this side was last confirmed in sync.
    pub mtime: i64,
    /// Filesystem identity at that moment, if one was available.
    pub file_id: Option<FileId>,
}

/// The last-known-in-sync descriptor for one side of a symlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRecord {
    /// Last-write time of the link itself at the moment it was last
    /// confirmed in sync.
    pub mtime: i64,
}

/// A file pair's recorded last-synchronized state. `size` is recorded once
/// since both sides are equal by definition when this record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InSyncFile {
    /// State on the left at last sync.
    pub left: FileRecord,
    /// State on the right at last sync.
    pub right: FileRecord,
    /// How equality was established.
    pub sync_type: InSyncType,
    /// Size in bytes, identical on both sides.
    pub size: u64,
}

/// A symlink pair's recorded last-synchronized state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InSyncSymlink {
    /// State on the left at last sync.
    pub left: LinkRecord,
    /// State on the right at last sync.
    pub right: LinkRecord,
}

/// Whether a directory node reflects a real prior in-sync state, or exists
/// only to give still-in-sync descendants somewhere to attach.
///
/// A directory can be `left_only`/`right_only` categorized (so it has no
/// in-sync state of its own) while still containing files that are
/// `equal` — e.g. both sides happen to already contain an identical
/// `readme.txt` inside directories that otherwise differ. Without a
/// placeholder node, those files would have no parent to record under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    /// This directory itself was `equal` (or `different_metadata`, reusing
    /// a real prior entry) at the end of the run that wrote it.
    InSync,
    /// No real prior state for this directory; it exists only as a
    /// container for descendants.
    StrawMan,
}

/// One node of the last-synchronized-state tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InSyncDir {
    /// Whether this node is a genuine record or a straw-man container.
    pub status: DirStatus,
    /// Child file records, keyed by short name.
    pub files: IndexMap<String, InSyncFile>,
    /// Child symlink records, keyed by short name.
    pub symlinks: IndexMap<String, InSyncSymlink>,
    /// Child directory records, keyed by short name.
    pub dirs: IndexMap<String, InSyncDir>,
}

impl InSyncDir {
    /// Creates an empty node with the given status.
    #[must_use]
    pub fn new(status: DirStatus) -> Self {
        Self {
            status,
            files: IndexMap::new(),
            symlinks: IndexMap::new(),
            dirs: IndexMap::new(),
        }
    }

    /// The root of a fresh tree, e.g. before the first successful sync.
    #[must_use]
    pub fn root() -> Self {
        Self::new(DirStatus::InSync)
    }
}
