use model::{BasePair, Category, Direction, FolderPair, ItemId, PairedItem};

use crate::db::DbLookup;
use crate::operation_rule::operation_for;
use crate::two_way::{two_way_file_direction, two_way_symlink_direction, ToleranceConfig};
use crate::variant::{DirectionSet, SyncVariant};

/// Runs Step A + Step B (§4.5) over every active pair reachable from
/// `base_pair`'s roots, in depth-first order, assigning a direction and an
/// operation to each.
///
/// Deactivated pairs (soft-filtered or user-deactivated) are left with
/// `Direction::None`/`Operation::DoNothing` — the resolver does not
/// recommend any action for a row it was told to skip — but their
/// descendants are still visited, since deactivation does not propagate
/// downward on its own.
pub fn resolve_base_pair(base_pair: &mut BasePair, variant: &SyncVariant, db: &dyn DbLookup) {
    // Owned locals, independent of `base_pair`'s borrow, since `tolerance` must
    // stay alive across the `&mut base_pair` passed to `resolve_item` below.
    let tolerance_secs = base_pair.tolerance_secs;
    let ignored_time_shifts_minutes = base_pair.ignored_time_shifts_minutes.clone();
    let tolerance = ToleranceConfig {
        tolerance_secs,
        ignored_time_shifts_minutes: &ignored_time_shifts_minutes,
    };
    let roots: Vec<ItemId> = base_pair
        .root_files()
        .values()
        .chain(base_pair.root_symlinks().values())
        .chain(base_pair.root_folders().values())
        .copied()
        .collect();
    for id in roots {
        resolve_item(base_pair, id, variant, db, tolerance, String::new());
    }
}

fn resolve_item(
    base_pair: &mut BasePair,
    id: ItemId,
    variant: &SyncVariant,
    db: &dyn DbLookup,
    tolerance: ToleranceConfig<'_>,
    relative_path: String,
) {
    let Some(item) = base_pair.get(id) else { return };
    let Some(category) = item.common().category() else { return };
    let active = item.common().is_active();

    let (direction, conflict) = if !active {
        (Direction::None, None)
    } else {
        match item {
            PairedItem::File(pair) => match variant {
                SyncVariant::TwoWay => {
                    two_way_file_direction(&relative_path, pair.left.as_ref(), pair.right.as_ref(), db, tolerance)
                }
                _ => (table_for(variant).direction_for(category), None),
            },
            PairedItem::Symlink(pair) => match variant {
                SyncVariant::TwoWay => {
                    two_way_symlink_direction(&relative_path, pair.left.as_ref(), pair.right.as_ref(), db, tolerance)
                }
                _ => (table_for(variant).direction_for(category), None),
            },
            PairedItem::Folder(_) => match variant {
                SyncVariant::TwoWay => two_way_folder_direction(category),
                _ => (table_for(variant).direction_for(category), None),
            },
        }
    };

    let children: Vec<(String, ItemId)> = match item {
        PairedItem::Folder(folder) => child_entries(folder),
        _ => Vec::new(),
    };

    let Some(item_mut) = base_pair.get_mut(id) else { return };
    let common = item_mut.common_mut();
    common.set_direction(direction, conflict);
    let resolved_direction = common.direction();
    common.set_operation(operation_for(category, resolved_direction));

    for (key, child_id) in children {
        let child_path = if relative_path.is_empty() { key } else { format!("{relative_path}/{key}") };
        resolve_item(base_pair, child_id, variant, db, tolerance, child_path);
    }
}

fn child_entries(folder: &FolderPair) -> Vec<(String, ItemId)> {
    folder
        .files
        .iter()
        .chain(folder.symlinks.iter())
        .chain(folder.folders.iter())
        .map(|(key, id)| (key.clone(), *id))
        .collect()
}

fn table_for(variant: &SyncVariant) -> DirectionSet {
    match variant {
        SyncVariant::Mirror => DirectionSet::mirror(),
        SyncVariant::Update => DirectionSet::update(),
        SyncVariant::Custom(set) => *set,
        SyncVariant::TwoWay => unreachable!("two-way direction never consults a static table"),
    }
}

/// Folder pairs carry no content descriptor to compare against the
/// database, only existence and a short-name-case flag, so their two-way
/// direction degrades to the "absent from DB" existence rule (§4.5 point 2)
/// regardless of whether a directory-status record exists: there is no
/// timestamp to classify `changed` vs `unchanged` against.
fn two_way_folder_direction(category: Category) -> (Direction, Option<String>) {
    match category {
        Category::LeftOnly => (Direction::Right, None),
        Category::RightOnly => (Direction::Left, None),
        Category::DifferentMetadata => (
            Direction::None,
            Some("folder metadata differs with no comparable prior state".to_owned()),
        ),
        Category::Equal
        | Category::DifferentContent
        | Category::LeftNewer
        | Category::RightNewer
        | Category::Conflict => (Direction::None, None),
    }
}
