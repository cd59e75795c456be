use model::{BasePair, ItemId, Operation, PairedItem, Side};

/// What an executor needs to carry out one entry of the stream without
/// re-inspecting the tree (§4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// A content copy: the source's size and last-write time.
    Copy {
        /// Size of the source file, in bytes.
        size: u64,
        /// Last-write time of the source, seconds since the Unix epoch.
        mtime: i64,
    },
    /// One half of a detected move; `counterpart` is the other half.
    Move {
        /// The paired item on the other end of the move.
        counterpart: ItemId,
    },
    /// No payload beyond the operation itself (deletes, metadata copies,
    /// folder creates, `equal`/`do_nothing`/`unresolved_conflict`).
    None,
}

/// One flattened action, ready for an executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamEntry {
    /// Identity of the pair this action applies to.
    pub item: ItemId,
    /// The resolved operation.
    pub operation: Operation,
    /// The side data is read from, if any.
    pub source_side: Option<Side>,
    /// The side data is written to, if any.
    pub target_side: Option<Side>,
    /// Executor-facing detail beyond the operation itself.
    pub payload: Payload,
}

/// Flattens a resolved tree into pre-order entries (P5): a container
/// appears before its contents, which is correct for creates (the folder
/// must exist first) and is reordered by the executor for deletes (which
/// must remove contents before the now-empty container) — the core only
/// commits to the traversal order, not to execution order.
pub fn operation_stream(base_pair: &BasePair) -> Vec<StreamEntry> {
    let mut entries = Vec::new();
    for id in base_pair.root_files().values() {
        push_entry(base_pair, *id, &mut entries);
    }
    for id in base_pair.root_symlinks().values() {
        push_entry(base_pair, *id, &mut entries);
    }
    for id in base_pair.root_folders().values() {
        visit_folder(base_pair, *id, &mut entries);
    }
    entries
}

fn visit_folder(base_pair: &BasePair, id: ItemId, entries: &mut Vec<StreamEntry>) {
    push_entry(base_pair, id, entries);
    let Some(PairedItem::Folder(folder)) = base_pair.get(id) else { return };
    for child in folder.files.values() {
        push_entry(base_pair, *child, entries);
    }
    for child in folder.symlinks.values() {
        push_entry(base_pair, *child, entries);
    }
    for child in folder.folders.values().copied().collect::<Vec<_>>() {
        visit_folder(base_pair, child, entries);
    }
}

fn push_entry(base_pair: &BasePair, id: ItemId, entries: &mut Vec<StreamEntry>) {
    let Some(item) = base_pair.get(id) else { return };
    if !item.common().is_active() {
        return;
    }
    let Some(operation) = item.common().operation() else { return };
    let (source_side, target_side) = sides_for(operation);
    let payload = payload_for(item, operation);
    entries.push(StreamEntry { item: id, operation, source_side, target_side, payload });
}

fn sides_for(operation: Operation) -> (Option<Side>, Option<Side>) {
    match operation {
        Operation::CreateLeft => (Some(Side::Right), Some(Side::Left)),
        Operation::CreateRight => (Some(Side::Left), Some(Side::Right)),
        Operation::DeleteLeft => (None, Some(Side::Left)),
        Operation::DeleteRight => (None, Some(Side::Right)),
        Operation::OverwriteLeft => (Some(Side::Right), Some(Side::Left)),
        Operation::OverwriteRight => (Some(Side::Left), Some(Side::Right)),
        Operation::CopyMetadataLeft => (Some(Side::Right), Some(Side::Left)),
        Operation::CopyMetadataRight => (Some(Side::Left), Some(Side::Right)),
        Operation::MoveLeftSource => (Some(Side::Left), None),
        Operation::MoveLeftTarget => (None, Some(Side::Left)),
        Operation::MoveRightSource => (Some(Side::Right), None),
        Operation::MoveRightTarget => (None, Some(Side::Right)),
        Operation::DoNothing | Operation::Equal | Operation::UnresolvedConflict => (None, None),
    }
}

fn payload_for(item: &PairedItem, operation: Operation) -> Payload {
    if let Some(counterpart) = item.common().move_counterpart() {
        if matches!(
            operation,
            Operation::MoveLeftSource | Operation::MoveLeftTarget | Operation::MoveRightSource | Operation::MoveRightTarget
        ) {
            return Payload::Move { counterpart };
        }
    }
    let PairedItem::File(pair) = item else { return Payload::None };
    let source = match operation {
        Operation::CreateLeft | Operation::OverwriteLeft | Operation::CopyMetadataLeft => pair.right,
        Operation::CreateRight | Operation::OverwriteRight | Operation::CopyMetadataRight => pair.left,
        _ => None,
    };
    match source {
        Some(descriptor) => Payload::Copy { size: descriptor.size, mtime: descriptor.mtime },
        None => Payload::None,
    }
}
