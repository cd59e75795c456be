//! A single flattened, displayable row over a paired tree: a file,
//! symlink, or folder pair plus its nesting depth. Grounded on
//! `GridView::sortedRef` — a flat vector of weak references into the
//! hierarchy, rebuilt whenever the underlying comparison changes.

use model::ItemId;

/// Which kind of pair a [`Row`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A file pair.
    File,
    /// A symlink pair.
    Symlink,
    /// A folder pair.
    Folder,
}

/// One row in a [`crate::GridView`]: an identity, its kind, and how deeply
/// nested it is under its ancestor folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    /// Identity of the underlying pair.
    pub id: ItemId,
    /// Row kind, cached so a caller doesn't need a tree lookup just to
    /// pick an icon or sort bucket.
    pub kind: RowKind,
    /// Nesting depth under the base-pair root (root children are depth 0).
    pub depth: u32,
}
