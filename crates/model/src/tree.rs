use std::path::PathBuf;

use filters::HardFilter;
use indexmap::IndexMap;

use crate::arena::{Arena, ArenaId};
use crate::category::Category;
use crate::descriptor::{FileDescriptor, FolderDescriptor, SymlinkDescriptor};
use crate::direction::Direction;
use crate::operation::Operation;
use crate::side::Side;
use crate::variant::{CompareVariant, SymlinkPolicy};

/// Globally unique, process-lifetime identity for a paired item (§3, I4).
///
/// Combines the owning base-pair's id with an [`ArenaId`] so that handles
/// from different base-pairs never collide, even though each base-pair
/// has its own arena. A stale `ItemId` — one whose slot has been removed
/// or reused — simply fails every [`BasePair::get`] lookup; callers must
/// treat that as "not found", not as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId {
    base_pair: u32,
    slot: ArenaId,
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bp{}:{}", self.base_pair, self.slot)
    }
}

/// Fields shared by every [`PairedItem`] variant.
#[derive(Debug, Clone)]
pub struct PairCommon {
    left_name: Option<String>,
    right_name: Option<String>,
    category: Option<Category>,
    conflict_description: Option<String>,
    active: bool,
    direction: Direction,
    direction_conflict: Option<String>,
    operation: Option<Operation>,
    move_counterpart: Option<ItemId>,
}

impl PairCommon {
    fn new(left_name: Option<String>, right_name: Option<String>) -> Self {
        Self {
            left_name,
            right_name,
            category: None,
            conflict_description: None,
            active: true,
            direction: Direction::None,
            direction_conflict: None,
            operation: None,
            move_counterpart: None,
        }
    }

    /// Whether the item exists on `side` (I1: an empty short name is the
    /// canonical "does not exist" indicator).
    #[must_use]
    pub fn exists_on(&self, side: Side) -> bool {
        self.name_on(side).is_some()
    }

    /// The short name on `side`, if it exists there.
    #[must_use]
    pub fn name_on(&self, side: Side) -> Option<&str> {
        match side {
            Side::Left => self.left_name.as_deref(),
            Side::Right => self.right_name.as_deref(),
        }
    }

    /// The assigned category, if the categorizer has run.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        self.category
    }

    /// Assigns the category. Callers (the `compare` crate) own validity.
    pub fn set_category(&mut self, category: Category) {
        self.category = Some(category);
    }

    /// An optional human-readable description of why this pair could not
    /// be categorized cleanly.
    #[must_use]
    pub fn conflict_description(&self) -> Option<&str> {
        self.conflict_description.as_deref()
    }

    /// Sets the conflict description.
    pub fn set_conflict_description(&mut self, description: impl Into<String>) {
        self.conflict_description = Some(description.into());
    }

    /// Whether the resolver should consider this pair at all. Soft-filtered
    /// or user-deactivated rows are `false` but remain in the tree.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Sets the active flag.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// The resolved sync direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// An optional description of why the direction could not be resolved
    /// cleanly.
    #[must_use]
    pub fn direction_conflict(&self) -> Option<&str> {
        self.direction_conflict.as_deref()
    }

    /// Sets the direction and, if given, a conflict description.
    ///
    /// Enforces I2: a non-empty conflict description forces
    /// `direction == Direction::None`.
    pub fn set_direction(&mut self, direction: Direction, conflict: Option<String>) {
        self.direction = if conflict.is_some() { Direction::None } else { direction };
        self.direction_conflict = conflict;
    }

    /// The final resolved action for the executor (I5), once the resolver
    /// has run. `None` before resolution.
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Assigns the resolved operation. Used by the `resolve` crate's
    /// per-item step, its container-propagation pass, and its move
    /// detector, each of which may overwrite a previously assigned value.
    pub fn set_operation(&mut self, operation: Operation) {
        self.operation = Some(operation);
    }

    /// The paired item on the other side of a detected move, if move
    /// detection has paired this item with one (§4.5, §4.8 payload).
    #[must_use]
    pub const fn move_counterpart(&self) -> Option<ItemId> {
        self.move_counterpart
    }

    /// Records the counterpart of a detected move. Used by the move
    /// detector; the two sides of a detected move each point at the other.
    pub fn set_move_counterpart(&mut self, counterpart: ItemId) {
        self.move_counterpart = Some(counterpart);
    }
}

/// A paired file.
#[derive(Debug, Clone)]
pub struct FilePair {
    common: PairCommon,
    /// Descriptor on the left, if the file exists there.
    pub left: Option<FileDescriptor>,
    /// Descriptor on the right, if the file exists there.
    pub right: Option<FileDescriptor>,
}

impl FilePair {
    /// The fields shared across every pair variant.
    #[must_use]
    pub const fn common(&self) -> &PairCommon {
        &self.common
    }

    /// Mutable counterpart to [`FilePair::common`].
    pub fn common_mut(&mut self) -> &mut PairCommon {
        &mut self.common
    }
}

/// A paired symlink.
#[derive(Debug, Clone)]
pub struct SymlinkPair {
    common: PairCommon,
    /// Descriptor on the left, if the link exists there.
    pub left: Option<SymlinkDescriptor>,
    /// Descriptor on the right, if the link exists there.
    pub right: Option<SymlinkDescriptor>,
}

impl SymlinkPair {
    /// The fields shared across every pair variant.
    #[must_use]
    pub const fn common(&self) -> &PairCommon {
        &self.common
    }

    /// Mutable counterpart to [`SymlinkPair::common`].
    pub fn common_mut(&mut self) -> &mut PairCommon {
        &mut self.common
    }
}

/// A paired folder, with its own children.
#[derive(Debug, Clone)]
pub struct FolderPair {
    common: PairCommon,
    /// Descriptor on the left, if the folder exists there.
    pub left: Option<FolderDescriptor>,
    /// Descriptor on the right, if the folder exists there.
    pub right: Option<FolderDescriptor>,
    /// Child file pairs, in stable iteration order.
    pub files: IndexMap<String, ItemId>,
    /// Child symlink pairs, in stable iteration order.
    pub symlinks: IndexMap<String, ItemId>,
    /// Child folder pairs, in stable iteration order.
    pub folders: IndexMap<String, ItemId>,
}

impl FolderPair {
    /// Whether this folder has no remaining children of any kind.
    #[must_use]
    pub fn is_childless(&self) -> bool {
        self.files.is_empty() && self.symlinks.is_empty() && self.folders.is_empty()
    }

    /// The fields shared across every pair variant.
    #[must_use]
    pub const fn common(&self) -> &PairCommon {
        &self.common
    }

    /// Mutable counterpart to [`FolderPair::common`].
    pub fn common_mut(&mut self) -> &mut PairCommon {
        &mut self.common
    }
}

/// One node in a paired tree: a file pair, a symlink pair, or a folder
/// pair, tagged by variant rather than dispatched through a visitor.
#[derive(Debug, Clone)]
pub enum PairedItem {
    /// A file pair.
    File(FilePair),
    /// A symlink pair.
    Symlink(SymlinkPair),
    /// A folder pair.
    Folder(FolderPair),
}

impl PairedItem {
    /// The fields shared across every variant.
    #[must_use]
    pub fn common(&self) -> &PairCommon {
        match self {
            Self::File(p) => &p.common,
            Self::Symlink(p) => &p.common,
            Self::Folder(p) => &p.common,
        }
    }

    /// Mutable counterpart to [`PairedItem::common`].
    pub fn common_mut(&mut self) -> &mut PairCommon {
        match self {
            Self::File(p) => &mut p.common,
            Self::Symlink(p) => &mut p.common,
            Self::Folder(p) => &mut p.common,
        }
    }

    /// Whether both sides are absent — the indicator used by empty-subtree
    /// elision (I3).
    #[must_use]
    pub fn is_empty_both_sides(&self) -> bool {
        !self.common().exists_on(Side::Left) && !self.common().exists_on(Side::Right)
    }
}

enum ChildKind {
    File,
    Symlink,
    Folder,
}

/// The root of one left-right comparison, owning its own arena so that
/// identity handles never collide across base-pairs or leak once the
/// base-pair is discarded.
pub struct BasePair {
    id: u32,
    /// Absolute path of the left root.
    pub left_path: PathBuf,
    /// Absolute path of the right root.
    pub right_path: PathBuf,
    /// Whether the left root was reachable at comparison start.
    pub left_available: bool,
    /// Whether the right root was reachable at comparison start.
    pub right_available: bool,
    /// The scope filter used for this base-pair's traversal.
    pub filter: HardFilter,
    /// Which equality rule the categorizer applies.
    pub variant: CompareVariant,
    /// How symlinks are treated.
    pub symlink_policy: SymlinkPolicy,
    /// Mtime tolerance, in seconds, before two timestamps are treated as
    /// different.
    pub tolerance_secs: i64,
    /// Time-shift offsets (minutes) to also treat as "equal" mtimes, e.g.
    /// to tolerate FAT's 2-second/DST quirks across a remount.
    pub ignored_time_shifts_minutes: Vec<i64>,
    /// Directories whose contents could not be read, with the retry
    /// decision already exhausted.
    pub failed_dir_reads: Vec<PathBuf>,
    /// Individual entries that could not be stat'd.
    pub failed_item_reads: Vec<PathBuf>,
    arena: Arena<PairedItem>,
    root_files: IndexMap<String, ItemId>,
    root_symlinks: IndexMap<String, ItemId>,
    root_folders: IndexMap<String, ItemId>,
}

impl BasePair {
    /// Creates an empty base-pair ready to receive traversal results.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        left_path: PathBuf,
        right_path: PathBuf,
        filter: HardFilter,
        variant: CompareVariant,
        symlink_policy: SymlinkPolicy,
        tolerance_secs: i64,
        ignored_time_shifts_minutes: Vec<i64>,
    ) -> Self {
        Self {
            id,
            left_path,
            right_path,
            left_available: true,
            right_available: true,
            filter,
            variant,
            symlink_policy,
            tolerance_secs,
            ignored_time_shifts_minutes,
            failed_dir_reads: Vec::new(),
            failed_item_reads: Vec::new(),
            arena: Arena::new(),
            root_files: IndexMap::new(),
            root_symlinks: IndexMap::new(),
            root_folders: IndexMap::new(),
        }
    }

    /// This base-pair's id, the first component of every [`ItemId`] it
    /// issues.
    #[must_use]
    pub const fn base_pair_id(&self) -> u32 {
        self.id
    }

    /// Root-level file pairs, in stable order.
    #[must_use]
    pub fn root_files(&self) -> &IndexMap<String, ItemId> {
        &self.root_files
    }

    /// Root-level symlink pairs, in stable order.
    #[must_use]
    pub fn root_symlinks(&self) -> &IndexMap<String, ItemId> {
        &self.root_symlinks
    }

    /// Root-level folder pairs, in stable order.
    #[must_use]
    pub fn root_folders(&self) -> &IndexMap<String, ItemId> {
        &self.root_folders
    }

    /// Looks up a pair by identity; returns `None` once it has been
    /// removed ("not found" is a normal, expected outcome per I4).
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&PairedItem> {
        if id.base_pair != self.id {
            return None;
        }
        self.arena.get(id.slot)
    }

    /// Mutable counterpart to [`BasePair::get`].
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut PairedItem> {
        if id.base_pair != self.id {
            return None;
        }
        self.arena.get_mut(id.slot)
    }

    /// Iterates over every pair currently in the arena, in no particular
    /// order (use the `files`/`symlinks`/`folders` maps for stable order).
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &PairedItem)> {
        let base_pair = self.id;
        self.arena
            .iter()
            .map(move |(slot, item)| (ItemId { base_pair, slot }, item))
    }

    fn insert(&mut self, parent: Option<ItemId>, key: String, kind_value: (PairedItem, ChildKind)) -> ItemId {
        let (value, kind) = kind_value;
        let slot = self.arena.insert(value);
        let id = ItemId {
            base_pair: self.id,
            slot,
        };
        self.attach(parent, &key, id, kind);
        id
    }

    /// Registers a file pair as a root-level entry (`parent == None`) or as
    /// a child of `parent`.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_file(
        &mut self,
        parent: Option<ItemId>,
        key: String,
        left_name: Option<String>,
        right_name: Option<String>,
        left: Option<FileDescriptor>,
        right: Option<FileDescriptor>,
    ) -> ItemId {
        let pair = FilePair {
            common: PairCommon::new(left_name, right_name),
            left,
            right,
        };
        self.insert(parent, key, (PairedItem::File(pair), ChildKind::File))
    }

    /// Registers a symlink pair.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_symlink(
        &mut self,
        parent: Option<ItemId>,
        key: String,
        left_name: Option<String>,
        right_name: Option<String>,
        left: Option<SymlinkDescriptor>,
        right: Option<SymlinkDescriptor>,
    ) -> ItemId {
        let pair = SymlinkPair {
            common: PairCommon::new(left_name, right_name),
            left,
            right,
        };
        self.insert(parent, key, (PairedItem::Symlink(pair), ChildKind::Symlink))
    }

    /// Registers a folder pair.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_folder(
        &mut self,
        parent: Option<ItemId>,
        key: String,
        left_name: Option<String>,
        right_name: Option<String>,
        left: Option<FolderDescriptor>,
        right: Option<FolderDescriptor>,
    ) -> ItemId {
        let pair = FolderPair {
            common: PairCommon::new(left_name, right_name),
            left,
            right,
            files: IndexMap::new(),
            symlinks: IndexMap::new(),
            folders: IndexMap::new(),
        };
        self.insert(parent, key, (PairedItem::Folder(pair), ChildKind::Folder))
    }

    fn attach(&mut self, parent: Option<ItemId>, key: &str, id: ItemId, kind: ChildKind) {
        let (files, symlinks, folders) = if let Some(parent_id) = parent {
            let Some(PairedItem::Folder(folder)) = self.arena.get_mut(parent_id.slot) else {
                panic!("parent {parent_id} is not a folder pair in this base-pair");
            };
            (&mut folder.files, &mut folder.symlinks, &mut folder.folders)
        } else {
            (&mut self.root_files, &mut self.root_symlinks, &mut self.root_folders)
        };
        match kind {
            ChildKind::File => {
                files.insert(key.to_owned(), id);
            }
            ChildKind::Symlink => {
                symlinks.insert(key.to_owned(), id);
            }
            ChildKind::Folder => {
                folders.insert(key.to_owned(), id);
            }
        }
    }

    fn remove_recursive(&mut self, id: ItemId) {
        if let Some(PairedItem::Folder(folder)) = self.arena.get(id.slot) {
            let children: Vec<ItemId> = folder
                .files
                .values()
                .chain(folder.symlinks.values())
                .chain(folder.folders.values())
                .copied()
                .collect();
            for child in children {
                self.remove_recursive(child);
            }
        }
        self.arena.remove(id.slot);
    }

    /// Removes every pair that is empty on both sides, recursively (I3).
    /// A second call is always a no-op (P4).
    pub fn prune_empty(&mut self) {
        self.root_files = prune_map(&mut self.arena, std::mem::take(&mut self.root_files));
        self.root_symlinks = prune_map(&mut self.arena, std::mem::take(&mut self.root_symlinks));
        self.root_folders = prune_folder_map(&mut self.arena, std::mem::take(&mut self.root_folders));
    }

    /// Fully removes a pair (and, for a folder, its subtree) and unlinks
    /// it from `parent`'s child maps. Used by simulated-execution helpers
    /// in tests and by the database updater after a real executor runs.
    pub fn delete(&mut self, parent: Option<ItemId>, key: &str) {
        let maps = if let Some(parent_id) = parent {
            let Some(PairedItem::Folder(folder)) = self.arena.get_mut(parent_id.slot) else {
                return;
            };
            [&mut folder.files, &mut folder.symlinks, &mut folder.folders]
        } else {
            [&mut self.root_files, &mut self.root_symlinks, &mut self.root_folders]
        };
        for map in maps {
            if let Some(id) = map.shift_remove(key) {
                self.remove_recursive(id);
                return;
            }
        }
    }
}

fn prune_map(arena: &mut Arena<PairedItem>, map: IndexMap<String, ItemId>) -> IndexMap<String, ItemId> {
    map.into_iter()
        .filter(|(_, id)| {
            let keep = arena.get(id.slot).is_some_and(|item| !item.is_empty_both_sides());
            if !keep {
                arena.remove(id.slot);
            }
            keep
        })
        .collect()
}

fn prune_folder_map(
    arena: &mut Arena<PairedItem>,
    map: IndexMap<String, ItemId>,
) -> IndexMap<String, ItemId> {
    map.into_iter()
        .filter_map(|(key, id)| {
            let Some(PairedItem::Folder(folder)) = arena.get_mut(id.slot) else {
                return None;
            };
            let files = std::mem::take(&mut folder.files);
            let symlinks = std::mem::take(&mut folder.symlinks);
            let folders = std::mem::take(&mut folder.folders);

            let files = prune_map(arena, files);
            let symlinks = prune_map(arena, symlinks);
            let folders = prune_folder_map(arena, folders);

            if let Some(PairedItem::Folder(folder)) = arena.get_mut(id.slot) {
                folder.files = files;
                folder.symlinks = symlinks;
                folder.folders = folders;
            }

            let keep = arena.get(id.slot).is_some_and(|item| !item.is_empty_both_sides());
            if keep {
                Some((key, id))
            } else {
                arena.remove(id.slot);
                None
            }
        })
        .collect()
}
