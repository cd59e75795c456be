//! After a run completes, folds the newly observed comparison state back
//! into the last-synchronized-state tree (§4.6): `equal` pairs overwrite
//! their record, everything else is left untouched, and records for items
//! that have genuinely vanished (as opposed to merely falling outside the
//! current scope filter) are dropped.

use std::path::{Path, PathBuf};

use filters::HardFilter;
use indexmap::IndexMap;
use model::{BasePair, Category, CompareVariant, FolderPair, ItemId, PairedItem};

use crate::record::{DirStatus, FileRecord, InSyncDir, InSyncFile, InSyncSymlink, InSyncType, LinkRecord};

/// Updates `db` in place to reflect the outcome of comparing and (if an
/// executor ran) syncing `base_pair`.
pub fn update_last_synchronous_state(base_pair: &BasePair, db: &mut InSyncDir) {
    update_level(
        base_pair,
        db,
        Path::new(""),
        base_pair.root_files(),
        base_pair.root_symlinks(),
        base_pair.root_folders(),
    );
}

fn update_level(
    base_pair: &BasePair,
    db_dir: &mut InSyncDir,
    relative_dir: &Path,
    files: &IndexMap<String, ItemId>,
    symlinks: &IndexMap<String, ItemId>,
    folders: &IndexMap<String, ItemId>,
) {
    update_files(base_pair, db_dir, relative_dir, files);
    update_symlinks(base_pair, db_dir, relative_dir, symlinks);
    update_folders(base_pair, db_dir, relative_dir, folders);
}

fn update_files(base_pair: &BasePair, db_dir: &mut InSyncDir, relative_dir: &Path, files: &IndexMap<String, ItemId>) {
    for (name, id) in files {
        let Some(PairedItem::File(pair)) = base_pair.get(*id) else {
            continue;
        };
        if pair.common().category() != Some(Category::Equal) {
            continue;
        }
        let (Some(left), Some(right)) = (pair.left, pair.right) else {
            continue;
        };
        let sync_type = match base_pair.variant {
            CompareVariant::Content => InSyncType::BinaryEqual,
            CompareVariant::TimestampAndSize => InSyncType::AttributesEqual,
        };
        db_dir.files.insert(
            name.clone(),
            InSyncFile {
                left: FileRecord { mtime: left.mtime, file_id: left.file_id },
                right: FileRecord { mtime: right.mtime, file_id: right.file_id },
                sync_type,
                size: left.size,
            },
        );
    }

    db_dir.files.retain(|name, _| {
        files.contains_key(name) || !genuinely_removed(base_pair, &relative_dir.join(name), false)
    });
}

fn update_symlinks(base_pair: &BasePair, db_dir: &mut InSyncDir, relative_dir: &Path, symlinks: &IndexMap<String, ItemId>) {
    for (name, id) in symlinks {
        let Some(PairedItem::Symlink(pair)) = base_pair.get(*id) else {
            continue;
        };
        if pair.common().category() != Some(Category::Equal) {
            continue;
        }
        let (Some(left), Some(right)) = (pair.left, pair.right) else {
            continue;
        };
        db_dir.symlinks.insert(
            name.clone(),
            InSyncSymlink {
                left: LinkRecord { mtime: left.mtime },
                right: LinkRecord { mtime: right.mtime },
            },
        );
    }

    db_dir.symlinks.retain(|name, _| {
        symlinks.contains_key(name) || !genuinely_removed(base_pair, &relative_dir.join(name), false)
    });
}

fn update_folders(base_pair: &BasePair, db_dir: &mut InSyncDir, relative_dir: &Path, folders: &IndexMap<String, ItemId>) {
    for (name, id) in folders {
        let Some(PairedItem::Folder(pair)) = base_pair.get(*id) else {
            continue;
        };
        let child_relative = relative_dir.join(name);

        match pair.common().category() {
            Some(Category::Equal | Category::DifferentMetadata) => {
                let entry = db_dir
                    .dirs
                    .entry(name.clone())
                    .or_insert_with(|| InSyncDir::new(DirStatus::StrawMan));
                if pair.common().category() == Some(Category::Equal) {
                    entry.status = DirStatus::InSync;
                }
                recurse_into_existing(base_pair, db_dir, name, &child_relative, pair);
            }
            Some(Category::LeftOnly | Category::RightOnly) | None | Some(Category::DifferentContent | Category::LeftNewer | Category::RightNewer | Category::Conflict) => {
                if db_dir.dirs.contains_key(name) {
                    recurse_into_existing(base_pair, db_dir, name, &child_relative, pair);
                }
            }
        }
    }

    db_dir.dirs.retain(|name, _| {
        folders.contains_key(name) || !genuinely_removed(base_pair, &relative_dir.join(name), true)
    });
}

fn recurse_into_existing(base_pair: &BasePair, db_dir: &mut InSyncDir, name: &str, child_relative: &Path, pair: &FolderPair) {
    if let Some(child_db) = db_dir.dirs.get_mut(name) {
        update_level(base_pair, child_db, child_relative, &pair.files, &pair.symlinks, &pair.folders);
    }
}

/// Whether an item recorded in the database but absent from the current
/// comparison tree has actually disappeared, as opposed to merely sitting
/// outside the active scope filter.
fn genuinely_removed(base_pair: &BasePair, relative_path: &Path, is_dir: bool) -> bool {
    base_pair.filter.allows(relative_path, is_dir) && relative_path_reachable(&base_pair.filter, relative_path)
}

fn relative_path_reachable(filter: &HardFilter, relative_path: &Path) -> bool {
    let Some(parent) = relative_path.parent() else {
        return true;
    };
    let mut current = PathBuf::new();
    for component in parent.components() {
        current.push(component);
        if !filter.sub_items_might_match(&current) {
            return false;
        }
    }
    true
}
