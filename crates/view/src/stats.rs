//! Aggregate counters over a [`crate::GridView`]'s visible rows, grounded
//! on `GridView::StatusCmpResult`/`StatusSyncPreview` and the two
//! `update*` methods that compute them.

use model::{BasePair, Category, Operation, PairedItem, Side};

use crate::filter::{CategoryFilter, OperationFilter};
use crate::row::{Row, RowKind};

/// Aggregate counts over the comparison result, filtered by
/// [`CategoryFilter`]. Mirrors `GridView::StatusCmpResult`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComparisonStats {
    /// Whether any visible row is left-only.
    pub exists_left_only: bool,
    /// Whether any visible row is right-only.
    pub exists_right_only: bool,
    /// Whether any visible row has a newer left side.
    pub exists_left_newer: bool,
    /// Whether any visible row has a newer right side.
    pub exists_right_newer: bool,
    /// Whether any visible row has different content or metadata.
    pub exists_different: bool,
    /// Whether any visible row is already equal.
    pub exists_equal: bool,
    /// Whether any visible row is an unresolved conflict.
    pub exists_conflict: bool,
    /// File or symlink rows visible on the left.
    pub files_on_left: u64,
    /// Folder rows visible on the left.
    pub folders_on_left: u64,
    /// File or symlink rows visible on the right.
    pub files_on_right: u64,
    /// Folder rows visible on the right.
    pub folders_on_right: u64,
    /// Total byte size of visible files on the left.
    pub file_size_left: u64,
    /// Total byte size of visible files on the right.
    pub file_size_right: u64,
}

/// Aggregate counts over the resolved sync plan, filtered by
/// [`OperationFilter`]. Mirrors `GridView::StatusSyncPreview`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncPreviewStats {
    /// Whether any visible row creates an item on the left.
    pub exists_create_left: bool,
    /// Whether any visible row creates an item on the right.
    pub exists_create_right: bool,
    /// Whether any visible row deletes an item from the left.
    pub exists_delete_left: bool,
    /// Whether any visible row deletes an item from the right.
    pub exists_delete_right: bool,
    /// Whether any visible row overwrites the left.
    pub exists_overwrite_left: bool,
    /// Whether any visible row overwrites the right.
    pub exists_overwrite_right: bool,
    /// Whether any visible row is left untouched.
    pub exists_do_nothing: bool,
    /// Whether any visible row is already equal.
    pub exists_equal: bool,
    /// Whether any visible row is an unresolved conflict.
    pub exists_conflict: bool,
    /// File or symlink rows visible on the left.
    pub files_on_left: u64,
    /// Folder rows visible on the left.
    pub folders_on_left: u64,
    /// File or symlink rows visible on the right.
    pub files_on_right: u64,
    /// Folder rows visible on the right.
    pub folders_on_right: u64,
    /// Total byte size of visible files on the left.
    pub file_size_left: u64,
    /// Total byte size of visible files on the right.
    pub file_size_right: u64,
}

/// Computes [`ComparisonStats`] over `rows`, counting only those whose
/// category passes `filter`.
#[must_use]
pub fn comparison_stats(base_pair: &BasePair, rows: &[Row], filter: &CategoryFilter) -> ComparisonStats {
    let mut stats = ComparisonStats::default();
    for row in rows {
        let Some(item) = base_pair.get(row.id) else { continue };
        let Some(category) = item.common().category() else { continue };
        if !filter.allows(category) {
            continue;
        }
        match category {
            Category::LeftOnly => stats.exists_left_only = true,
            Category::RightOnly => stats.exists_right_only = true,
            Category::LeftNewer => stats.exists_left_newer = true,
            Category::RightNewer => stats.exists_right_newer = true,
            Category::DifferentContent | Category::DifferentMetadata => stats.exists_different = true,
            Category::Equal => stats.exists_equal = true,
            Category::Conflict => stats.exists_conflict = true,
        }
        count_sides(item, row.kind, Side::Left, &mut stats.files_on_left, &mut stats.folders_on_left, &mut stats.file_size_left);
        count_sides(item, row.kind, Side::Right, &mut stats.files_on_right, &mut stats.folders_on_right, &mut stats.file_size_right);
    }
    stats
}

/// Computes [`SyncPreviewStats`] over `rows`, counting only those whose
/// resolved operation passes `filter`.
#[must_use]
pub fn sync_preview_stats(base_pair: &BasePair, rows: &[Row], filter: &OperationFilter) -> SyncPreviewStats {
    let mut stats = SyncPreviewStats::default();
    for row in rows {
        let Some(item) = base_pair.get(row.id) else { continue };
        let Some(operation) = item.common().operation() else { continue };
        if !filter.allows(operation) {
            continue;
        }
        match operation {
            Operation::CreateLeft => stats.exists_create_left = true,
            Operation::CreateRight => stats.exists_create_right = true,
            Operation::DeleteLeft => stats.exists_delete_left = true,
            Operation::DeleteRight => stats.exists_delete_right = true,
            Operation::OverwriteLeft | Operation::CopyMetadataLeft | Operation::MoveLeftSource | Operation::MoveLeftTarget => {
                stats.exists_overwrite_left = true;
            }
            Operation::OverwriteRight | Operation::CopyMetadataRight | Operation::MoveRightSource | Operation::MoveRightTarget => {
                stats.exists_overwrite_right = true;
            }
            Operation::DoNothing => stats.exists_do_nothing = true,
            Operation::Equal => stats.exists_equal = true,
            Operation::UnresolvedConflict => stats.exists_conflict = true,
        }
        count_sides(item, row.kind, Side::Left, &mut stats.files_on_left, &mut stats.folders_on_left, &mut stats.file_size_left);
        count_sides(item, row.kind, Side::Right, &mut stats.files_on_right, &mut stats.folders_on_right, &mut stats.file_size_right);
    }
    stats
}

fn count_sides(item: &PairedItem, kind: RowKind, side: Side, files: &mut u64, folders: &mut u64, size: &mut u64) {
    if !item.common().exists_on(side) {
        return;
    }
    match kind {
        RowKind::Folder => *folders += 1,
        RowKind::Symlink => *files += 1,
        RowKind::File => {
            *files += 1;
            if let PairedItem::File(pair) = item {
                let descriptor = match side {
                    Side::Left => pair.left,
                    Side::Right => pair.right,
                };
                *size += descriptor.map_or(0, |d| d.size);
            }
        }
    }
}
