use std::path::{Path, PathBuf};

use model::{BasePair, Category, CompareVariant, FilePair, FolderPair, ItemId, PairedItem, Side, SymlinkPair};

use crate::content::ContentComparator;

/// The handful of `BasePair` fields categorization needs, snapshotted up
/// front so the recursive pass below doesn't have to borrow `BasePair`'s
/// config while also holding a mutable borrow of its tree.
struct Config {
    variant: CompareVariant,
    tolerance_secs: i64,
    ignored_time_shifts_minutes: Vec<i64>,
}

/// Assigns a [`Category`] (and, where needed, a conflict description) to
/// every pair in `base_pair`, using `comparator` for byte-level equality
/// under [`CompareVariant::Content`].
///
/// Each pair is categorized independently of its siblings; only a folder
/// pair's own two sides are consulted, never its children's categories —
/// container-level propagation (promoting an empty delete to a create, or
/// downgrading it to `do_nothing`) is the `resolve` crate's job, run in a
/// later, separate pass once every leaf has a category.
pub fn categorize_base_pair(base_pair: &mut BasePair, comparator: &dyn ContentComparator) {
    tracing::debug!(
        left = %base_pair.left_path.display(),
        right = %base_pair.right_path.display(),
        variant = ?base_pair.variant,
        "categorizing base pair",
    );
    let config = Config {
        variant: base_pair.variant,
        tolerance_secs: base_pair.tolerance_secs,
        ignored_time_shifts_minutes: base_pair.ignored_time_shifts_minutes.clone(),
    };

    let roots: Vec<(String, ItemId)> = base_pair.root_files().iter().map(|(k, v)| (k.clone(), *v)).collect();
    for (name, id) in roots {
        let left_path = base_pair.left_path.join(&name);
        let right_path = base_pair.right_path.join(&name);
        categorize_file(base_pair, id, &left_path, &right_path, &config, comparator);
    }

    let roots: Vec<(String, ItemId)> = base_pair.root_symlinks().iter().map(|(k, v)| (k.clone(), *v)).collect();
    for (_, id) in roots {
        categorize_symlink(base_pair, id, &config);
    }

    let roots: Vec<(String, ItemId)> = base_pair.root_folders().iter().map(|(k, v)| (k.clone(), *v)).collect();
    for (name, id) in roots {
        let left_dir = base_pair.left_path.join(&name);
        let right_dir = base_pair.right_path.join(&name);
        categorize_folder(base_pair, id, left_dir, right_dir, &config, comparator);
    }
}

fn categorize_folder(
    base_pair: &mut BasePair,
    id: ItemId,
    left_dir: PathBuf,
    right_dir: PathBuf,
    config: &Config,
    comparator: &dyn ContentComparator,
) {
    let Some(PairedItem::Folder(folder)) = base_pair.get_mut(id) else {
        return;
    };
    let category = categorize_existence_and_name(folder);
    folder.common_mut().set_category(category);

    let Some(PairedItem::Folder(folder)) = base_pair.get(id) else {
        return;
    };
    let files: Vec<(String, ItemId)> = folder.files.iter().map(|(k, v)| (k.clone(), *v)).collect();
    let symlinks: Vec<(String, ItemId)> = folder.symlinks.iter().map(|(k, v)| (k.clone(), *v)).collect();
    let folders: Vec<(String, ItemId)> = folder.folders.iter().map(|(k, v)| (k.clone(), *v)).collect();

    for (name, file_id) in files {
        categorize_file(base_pair, file_id, &left_dir.join(&name), &right_dir.join(&name), config, comparator);
    }
    for (_, sym_id) in symlinks {
        categorize_symlink(base_pair, sym_id, config);
    }
    for (name, child_id) in folders {
        categorize_folder(base_pair, child_id, left_dir.join(&name), right_dir.join(&name), config, comparator);
    }
}

/// Existence-only categorization shared by every variant: `LeftOnly`/
/// `RightOnly` when one side is absent, `DifferentMetadata` when both
/// exist but their short names differ only in case, `Equal` otherwise.
/// Used as-is for folders ([`Category::valid_for_folder`] admits exactly
/// these four) and as the starting point for files and symlinks.
fn categorize_existence_and_name(pair: &FolderPair) -> Category {
    let common = pair.common();
    match (common.name_on(Side::Left), common.name_on(Side::Right)) {
        (Some(_), None) => Category::LeftOnly,
        (None, Some(_)) => Category::RightOnly,
        (None, None) => Category::Equal, // pruned away before resolution; never surfaced
        (Some(l), Some(r)) if l != r => Category::DifferentMetadata,
        (Some(_), Some(_)) => Category::Equal,
    }
}

fn categorize_file(
    base_pair: &mut BasePair,
    id: ItemId,
    left_path: &Path,
    right_path: &Path,
    config: &Config,
    comparator: &dyn ContentComparator,
) {
    let Some(PairedItem::File(file)) = base_pair.get_mut(id) else {
        return;
    };
    let (category, conflict) = categorize_file_pair(file, left_path, right_path, config, comparator);
    file.common_mut().set_category(category);
    if let Some(description) = conflict {
        file.common_mut().set_conflict_description(description);
    }
}

fn categorize_file_pair(
    pair: &FilePair,
    left_path: &Path,
    right_path: &Path,
    config: &Config,
    comparator: &dyn ContentComparator,
) -> (Category, Option<String>) {
    let (left, right) = match (&pair.left, &pair.right) {
        (Some(_), None) => return (existence_category(true), None),
        (None, Some(_)) => return (existence_category(false), None),
        (None, None) => return (Category::Equal, None),
        (Some(l), Some(r)) => (l, r),
    };

    let name_differs = names_differ(pair.common());
    let times_equal = times_equal(left.mtime, right.mtime, config);

    match config.variant {
        CompareVariant::TimestampAndSize => {
            if left.size == right.size && times_equal {
                return (if name_differs { Category::DifferentMetadata } else { Category::Equal }, None);
            }
            if left.size != right.size && times_equal {
                return (
                    Category::Conflict,
                    Some("same modification time, but different file size".to_owned()),
                );
            }
            (newer_category(left.mtime, right.mtime), None)
        }
        CompareVariant::Content => {
            if left.size != right.size {
                return (Category::DifferentContent, None);
            }
            match comparator.content_equal(left_path, right_path) {
                Ok(true) => (if name_differs || !times_equal { Category::DifferentMetadata } else { Category::Equal }, None),
                Ok(false) => (Category::DifferentContent, None),
                Err(error) => (
                    Category::Conflict,
                    Some(format!("content comparison failed: {error}")),
                ),
            }
        }
    }
}

fn categorize_symlink(base_pair: &mut BasePair, id: ItemId, config: &Config) {
    let Some(PairedItem::Symlink(symlink)) = base_pair.get_mut(id) else {
        return;
    };
    let category = categorize_symlink_pair(symlink, config);
    symlink.common_mut().set_category(category);
}

fn categorize_symlink_pair(pair: &SymlinkPair, config: &Config) -> Category {
    let (left, right) = match (&pair.left, &pair.right) {
        (Some(_), None) => return existence_category(true),
        (None, Some(_)) => return existence_category(false),
        (None, None) => return Category::Equal,
        (Some(l), Some(r)) => (l, r),
    };

    if times_equal(left.mtime, right.mtime, config) {
        if names_differ(pair.common()) {
            Category::DifferentMetadata
        } else {
            Category::Equal
        }
    } else {
        newer_category(left.mtime, right.mtime)
    }
}

fn existence_category(left_only: bool) -> Category {
    if left_only { Category::LeftOnly } else { Category::RightOnly }
}

fn names_differ(common: &model::PairCommon) -> bool {
    matches!((common.name_on(Side::Left), common.name_on(Side::Right)), (Some(l), Some(r)) if l != r)
}

fn newer_category(left_mtime: i64, right_mtime: i64) -> Category {
    if left_mtime > right_mtime {
        Category::LeftNewer
    } else {
        Category::RightNewer
    }
}

fn times_equal(left: i64, right: i64, config: &Config) -> bool {
    let diff = (left - right).abs();
    if diff <= config.tolerance_secs {
        return true;
    }
    config.ignored_time_shifts_minutes.iter().any(|shift_minutes| {
        let shift_secs = shift_minutes.abs() * 60;
        (diff - shift_secs).abs() <= config.tolerance_secs
    })
}
