//! Sort comparators for a [`crate::GridView`], grounded on the `less*`
//! comparator family in `ui/sorting.h`: an item missing on the chosen side
//! always sorts last, a folder pair always sorts after a file or symlink
//! pair, and the requested direction applies only within each bucket,
//! never to the bucket ordering itself.

use std::cmp::Ordering;

use model::{BasePair, Category, FileDescriptor, ItemId, Operation, PairedItem, Side, SymlinkDescriptor};

/// A column a [`crate::GridView`] can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    /// Short file/folder name on the chosen side.
    Name,
    /// File size on the chosen side (folders and symlinks sort last).
    Size,
    /// Last-write time on the chosen side.
    Time,
    /// File extension on the chosen side.
    Extension,
    /// Comparison category, equal-last.
    Category,
    /// Resolved sync operation.
    SyncDirection,
}

/// Orders two rows by `column`, evaluated on `side`, ascending or
/// descending.
#[must_use]
pub fn compare(base_pair: &BasePair, a: ItemId, b: ItemId, column: SortColumn, side: Side, ascending: bool) -> Ordering {
    let (Some(item_a), Some(item_b)) = (base_pair.get(a), base_pair.get(b)) else {
        return Ordering::Equal;
    };

    if column == SortColumn::Category {
        return order(category_rank(item_a.common().category()).cmp(&category_rank(item_b.common().category())), ascending);
    }
    if column == SortColumn::SyncDirection {
        return order(operation_rank(item_a.common().operation()).cmp(&operation_rank(item_b.common().operation())), ascending);
    }

    let bucket_a = bucket(item_a, side);
    let bucket_b = bucket(item_b, side);
    if bucket_a != bucket_b {
        // Bucket ordering is fixed regardless of direction, matching the
        // original's "empty rows always last"/"directories last" rules.
        return bucket_a.cmp(&bucket_b);
    }
    if bucket_a == Bucket::Missing {
        return Ordering::Equal;
    }

    let primary = match column {
        SortColumn::Name => item_a.common().name_on(side).cmp(&item_b.common().name_on(side)),
        SortColumn::Size => file_size(item_a, side).cmp(&file_size(item_b, side)),
        SortColumn::Time => mtime(item_a, side).cmp(&mtime(item_b, side)),
        SortColumn::Extension => extension(item_a, side).cmp(&extension(item_b, side)),
        SortColumn::Category | SortColumn::SyncDirection => unreachable!("handled above"),
    };
    order(primary, ascending)
}

fn order(ordering: Ordering, ascending: bool) -> Ordering {
    if ascending {
        ordering
    } else {
        ordering.reverse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Bucket {
    Item,
    Folder,
    Missing,
}

fn bucket(item: &PairedItem, side: Side) -> Bucket {
    if !item.common().exists_on(side) {
        Bucket::Missing
    } else if matches!(item, PairedItem::Folder(_)) {
        Bucket::Folder
    } else {
        Bucket::Item
    }
}

fn file_size(item: &PairedItem, side: Side) -> u64 {
    let PairedItem::File(pair) = item else { return 0 };
    let descriptor: Option<FileDescriptor> = match side {
        Side::Left => pair.left,
        Side::Right => pair.right,
    };
    descriptor.map_or(0, |d| d.size)
}

fn mtime(item: &PairedItem, side: Side) -> i64 {
    match item {
        PairedItem::File(pair) => {
            let descriptor: Option<FileDescriptor> = match side {
                Side::Left => pair.left,
                Side::Right => pair.right,
            };
            descriptor.map_or(0, |d| d.mtime)
        }
        PairedItem::Symlink(pair) => {
            let descriptor: Option<SymlinkDescriptor> = match side {
                Side::Left => pair.left,
                Side::Right => pair.right,
            };
            descriptor.map_or(0, |d| d.mtime)
        }
        PairedItem::Folder(_) => 0,
    }
}

fn extension(item: &PairedItem, side: Side) -> String {
    let name = item.common().name_on(side).unwrap_or_default();
    name.rsplit_once('.').map_or_else(String::new, |(_, ext)| ext.to_lowercase())
}

/// `Equal` sorts last, matching `lessCmpResult`'s explicit presort.
fn category_rank(category: Option<Category>) -> u8 {
    match category {
        None => 0,
        Some(Category::LeftOnly) => 1,
        Some(Category::RightOnly) => 2,
        Some(Category::LeftNewer) => 3,
        Some(Category::RightNewer) => 4,
        Some(Category::DifferentContent) => 5,
        Some(Category::DifferentMetadata) => 6,
        Some(Category::Conflict) => 7,
        Some(Category::Equal) => 8,
    }
}

fn operation_rank(operation: Option<Operation>) -> u8 {
    match operation {
        None => 0,
        Some(Operation::CreateLeft) => 1,
        Some(Operation::CreateRight) => 2,
        Some(Operation::DeleteLeft) => 3,
        Some(Operation::DeleteRight) => 4,
        Some(Operation::OverwriteLeft) => 5,
        Some(Operation::OverwriteRight) => 6,
        Some(Operation::CopyMetadataLeft) => 7,
        Some(Operation::CopyMetadataRight) => 8,
        Some(Operation::MoveLeftSource) => 9,
        Some(Operation::MoveLeftTarget) => 10,
        Some(Operation::MoveRightSource) => 11,
        Some(Operation::MoveRightTarget) => 12,
        Some(Operation::DoNothing) => 13,
        Some(Operation::Equal) => 14,
        Some(Operation::UnresolvedConflict) => 15,
    }
}
