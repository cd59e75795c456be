//! Merges two sides' buffered [`crate::side_tree::SideDir`] trees into a
//! [`model::BasePair`] (§4.3): a short name present in both trees becomes a
//! two-sided pair, a name present in only one becomes a one-sided pair.
//! Iteration order is the union of keys in the order they first appear on
//! the left, followed by right-only keys, so tree order is stable and
//! reproducible given the same traversal.

use indexmap::IndexMap;
use model::{BasePair, FileDescriptor, FolderDescriptor, ItemId, SymlinkDescriptor};

use crate::side_tree::SideDir;

/// Recursively merges `left` and `right` as the children of `parent`
/// (root-level when `parent` is `None`), inserting every resulting pair
/// into `base_pair`.
pub fn merge_into(base_pair: &mut BasePair, parent: Option<ItemId>, left: &SideDir, right: &SideDir) {
    for key in ordered_keys(&left.files, &right.files) {
        let on_left = left.files.get(&key);
        let on_right = right.files.get(&key);
        base_pair.insert_file(
            parent,
            key.clone(),
            on_left.map(|_| key.clone()),
            on_right.map(|_| key.clone()),
            on_left.map(|file| FileDescriptor {
                mtime: file.meta.mtime,
                size: file.meta.size,
                file_id: file.meta.file_id,
                followed_symlink: file.meta.followed_symlink,
            }),
            on_right.map(|file| FileDescriptor {
                mtime: file.meta.mtime,
                size: file.meta.size,
                file_id: file.meta.file_id,
                followed_symlink: file.meta.followed_symlink,
            }),
        );
    }

    for key in ordered_keys(&left.symlinks, &right.symlinks) {
        let on_left = left.symlinks.get(&key);
        let on_right = right.symlinks.get(&key);
        base_pair.insert_symlink(
            parent,
            key.clone(),
            on_left.map(|_| key.clone()),
            on_right.map(|_| key.clone()),
            on_left.map(|link| SymlinkDescriptor { mtime: link.meta.mtime }),
            on_right.map(|link| SymlinkDescriptor { mtime: link.meta.mtime }),
        );
    }

    for key in ordered_keys(&left.dirs, &right.dirs) {
        let on_left = left.dirs.get(&key);
        let on_right = right.dirs.get(&key);
        let id = base_pair.insert_folder(
            parent,
            key.clone(),
            on_left.map(|_| key.clone()),
            on_right.map(|_| key.clone()),
            on_left.map(|dir| FolderDescriptor {
                followed_symlink: dir.meta.map(|m| m.followed_symlink).unwrap_or_default(),
            }),
            on_right.map(|dir| FolderDescriptor {
                followed_symlink: dir.meta.map(|m| m.followed_symlink).unwrap_or_default(),
            }),
        );
        let empty = SideDir::default();
        merge_into(base_pair, Some(id), on_left.unwrap_or(&empty), on_right.unwrap_or(&empty));
    }
}

fn ordered_keys<V>(left: &IndexMap<String, V>, right: &IndexMap<String, V>) -> Vec<String> {
    let mut keys: Vec<String> = left.keys().cloned().collect();
    for key in right.keys() {
        if !left.contains_key(key) {
            keys.push(key.clone());
        }
    }
    keys
}
