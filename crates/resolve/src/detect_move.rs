use model::{BasePair, FileDescriptor, ItemId, Operation, PairedItem, Side};

use crate::db::DbLookup;
use crate::two_way::ToleranceConfig;

struct CreateCandidate {
    id: ItemId,
    side: Side,
    relative_path: String,
    source_descriptor: FileDescriptor,
}

struct DeleteCandidate {
    id: ItemId,
    side: Side,
    relative_path: String,
    own_descriptor: FileDescriptor,
}

/// Move detection (§4.5 last paragraph): rewrites a `create_X` + `delete_X`
/// pair into `move_X_target` + `move_X_source` when they are plausibly the
/// same file under a new name — the DB's recorded identity for the create
/// candidate's path matches the delete candidate's live identity, or,
/// lacking that, their size and mtime agree within tolerance. Purely a hint
/// for the executor; no other field changes.
pub fn detect_moves(base_pair: &mut BasePair, db: &dyn DbLookup, tolerance: ToleranceConfig<'_>) {
    let (mut creates, mut deletes) = collect_candidates(base_pair);

    let mut matched = Vec::new();
    creates.retain(|create| {
        let Some(match_index) = deletes.iter().position(|delete| {
            delete.side == create.side && is_match(create, delete, db, tolerance)
        }) else {
            return true;
        };
        let delete = deletes.remove(match_index);
        matched.push((create.id, create.side, delete.id, delete.side));
        false
    });

    for (create_id, create_side, delete_id, delete_side) in matched {
        if let Some(item) = base_pair.get_mut(create_id) {
            let common = item.common_mut();
            common.set_operation(move_target(create_side));
            common.set_move_counterpart(delete_id);
        }
        if let Some(item) = base_pair.get_mut(delete_id) {
            let common = item.common_mut();
            common.set_operation(move_source(delete_side));
            common.set_move_counterpart(create_id);
        }
    }
}

fn is_match(create: &CreateCandidate, delete: &DeleteCandidate, db: &dyn DbLookup, tolerance: ToleranceConfig<'_>) -> bool {
    if let Some(delete_id) = delete.own_descriptor.file_id {
        if let Some(db_id) = db.file_id(&create.relative_path, create.side) {
            return db_id == delete_id;
        }
    }
    create.source_descriptor.size == delete.own_descriptor.size
        && times_equal(create.source_descriptor.mtime, delete.own_descriptor.mtime, tolerance)
}

fn times_equal(left: i64, right: i64, tolerance: ToleranceConfig<'_>) -> bool {
    let diff = (left - right).abs();
    if diff <= tolerance.tolerance_secs {
        return true;
    }
    tolerance
        .ignored_time_shifts_minutes
        .iter()
        .any(|shift_minutes| (diff - shift_minutes.abs() * 60).abs() <= tolerance.tolerance_secs)
}

fn collect_candidates(base_pair: &BasePair) -> (Vec<CreateCandidate>, Vec<DeleteCandidate>) {
    let mut creates = Vec::new();
    let mut deletes = Vec::new();

    let roots: Vec<ItemId> = base_pair.root_files().values().copied().collect();
    for id in roots {
        visit_file(base_pair, id, String::new(), &mut creates, &mut deletes);
    }
    let folder_roots: Vec<ItemId> = base_pair.root_folders().values().copied().collect();
    for id in folder_roots {
        visit_folder(base_pair, id, String::new(), &mut creates, &mut deletes);
    }

    (creates, deletes)
}

fn visit_folder(
    base_pair: &BasePair,
    id: ItemId,
    relative_path: String,
    creates: &mut Vec<CreateCandidate>,
    deletes: &mut Vec<DeleteCandidate>,
) {
    let Some(PairedItem::Folder(folder)) = base_pair.get(id) else { return };
    for (key, file_id) in &folder.files {
        visit_file(base_pair, *file_id, join(&relative_path, key), creates, deletes);
    }
    for (key, folder_id) in &folder.folders {
        visit_folder(base_pair, *folder_id, join(&relative_path, key), creates, deletes);
    }
}

fn visit_file(
    base_pair: &BasePair,
    id: ItemId,
    relative_path: String,
    creates: &mut Vec<CreateCandidate>,
    deletes: &mut Vec<DeleteCandidate>,
) {
    let Some(PairedItem::File(pair)) = base_pair.get(id) else { return };
    match pair.common().operation() {
        Some(Operation::CreateLeft) => {
            if let Some(source) = pair.right {
                creates.push(CreateCandidate { id, side: Side::Left, relative_path, source_descriptor: source });
            }
        }
        Some(Operation::CreateRight) => {
            if let Some(source) = pair.left {
                creates.push(CreateCandidate { id, side: Side::Right, relative_path, source_descriptor: source });
            }
        }
        Some(Operation::DeleteLeft) => {
            if let Some(own) = pair.left {
                deletes.push(DeleteCandidate { id, side: Side::Left, relative_path, own_descriptor: own });
            }
        }
        Some(Operation::DeleteRight) => {
            if let Some(own) = pair.right {
                deletes.push(DeleteCandidate { id, side: Side::Right, relative_path, own_descriptor: own });
            }
        }
        _ => {}
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}/{key}")
    }
}

const fn move_target(side: Side) -> Operation {
    match side {
        Side::Left => Operation::MoveLeftTarget,
        Side::Right => Operation::MoveRightTarget,
    }
}

const fn move_source(side: Side) -> Operation {
    match side {
        Side::Left => Operation::MoveLeftSource,
        Side::Right => Operation::MoveRightSource,
    }
}
