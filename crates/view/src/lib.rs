//! Filtered, sorted, collapsible view of a paired tree, plus the aggregate
//! counters a UI collaborator needs to render totals and a live preview.
//!
//! # Overview
//!
//! [`GridView::new`] flattens a [`model::BasePair`]'s tree into a list of
//! [`Row`]s in natural (insertion) order, preserving nesting: a folder row
//! is immediately followed by its own children, so collapsing a folder in
//! a UI collaborator only has to hide a contiguous range. [`GridView::sort`]
//! re-sorts the children at every level independently rather than
//! flattening into one global order, so the hierarchy survives a sort the
//! same way a file manager's tree view does.
//!
//! # Design
//!
//! Grounded on `ui/grid_view.h`: `sortedRef`/`viewRef` become owned
//! [`Row`] vectors instead of weak-pointer vectors into a shared
//! hierarchy — there is no GUI event loop here to invalidate them out from
//! under a held reference — and the `GridView::Less*` comparator template
//! family becomes the free functions in [`sort`]. [`ComparisonStats`] and
//! [`SyncPreviewStats`] are `StatusCmpResult`/`StatusSyncPreview` renamed
//! to this crate's naming convention.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod filter;
mod row;
mod sort;
mod stats;

pub use filter::{CategoryFilter, OperationFilter};
pub use row::{Row, RowKind};
pub use sort::SortColumn;
pub use stats::{comparison_stats, sync_preview_stats, ComparisonStats, SyncPreviewStats};

use indexmap::IndexMap;
use model::{BasePair, ItemId, PairedItem, Side};

/// A flattened, sortable view over one [`BasePair`]'s paired tree.
pub struct GridView {
    rows: Vec<Row>,
}

type SortKey = (SortColumn, Side, bool);

impl GridView {
    /// Builds a view over `base_pair` in natural (insertion) order.
    #[must_use]
    pub fn new(base_pair: &BasePair) -> Self {
        Self { rows: build(base_pair, None) }
    }

    /// The rows currently in view, in display order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows currently in view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the view has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Re-sorts every level of the tree by `column`, evaluated on `side`.
    /// Sorting never moves a row to a different parent — only the order
    /// of siblings within each folder changes.
    pub fn sort(&mut self, base_pair: &BasePair, column: SortColumn, side: Side, ascending: bool) {
        self.rows = build(base_pair, Some((column, side, ascending)));
    }

    /// The identity at `row`, if the view has that many rows.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<ItemId> {
        self.rows.get(row).map(|r| r.id)
    }
}

fn build(base_pair: &BasePair, ordering: Option<SortKey>) -> Vec<Row> {
    let mut rows = Vec::new();
    build_level(base_pair, base_pair.root_files(), base_pair.root_symlinks(), base_pair.root_folders(), 0, ordering, &mut rows);
    rows
}

fn build_level(
    base_pair: &BasePair,
    files: &IndexMap<String, ItemId>,
    symlinks: &IndexMap<String, ItemId>,
    folders: &IndexMap<String, ItemId>,
    depth: u32,
    ordering: Option<SortKey>,
    out: &mut Vec<Row>,
) {
    let mut level: Vec<Row> = files
        .values()
        .map(|&id| Row { id, kind: RowKind::File, depth })
        .chain(symlinks.values().map(|&id| Row { id, kind: RowKind::Symlink, depth }))
        .chain(folders.values().map(|&id| Row { id, kind: RowKind::Folder, depth }))
        .collect();

    if let Some((column, side, ascending)) = ordering {
        level.sort_by(|a, b| sort::compare(base_pair, a.id, b.id, column, side, ascending));
    }

    for row in level {
        out.push(row);
        if row.kind == RowKind::Folder {
            if let Some(PairedItem::Folder(pair)) = base_pair.get(row.id) {
                build_level(base_pair, &pair.files, &pair.symlinks, &pair.folders, depth + 1, ordering, out);
            }
        }
    }
}
