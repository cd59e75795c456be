use model::{BasePair, ItemId, Operation, PairedItem, Side};

/// Container propagation (§4.5): after every pair has its own operation,
/// a folder pair's operation is adjusted by looking at its direct children.
///
/// A single bottom-up pass is sufficient here because resolution is one-shot
/// batch work, not an interactive session where a later edit to one child
/// must re-notify an already-visited parent — the recursive post-order walk
/// below always sees final child state before computing the parent.
pub fn propagate_container_operations(base_pair: &mut BasePair) {
    let roots: Vec<ItemId> = base_pair.root_folders().values().copied().collect();
    for id in roots {
        propagate_folder(base_pair, id);
    }
}

fn propagate_folder(base_pair: &mut BasePair, id: ItemId) {
    let child_folders: Vec<ItemId> = match base_pair.get(id) {
        Some(PairedItem::Folder(folder)) => folder.folders.values().copied().collect(),
        _ => return,
    };
    for child in child_folders {
        propagate_folder(base_pair, child);
    }

    let Some(PairedItem::Folder(folder)) = base_pair.get(id) else { return };
    let Some(own_operation) = folder.common().operation() else { return };
    let child_ids: Vec<ItemId> = folder
        .files
        .values()
        .chain(folder.symlinks.values())
        .chain(folder.folders.values())
        .copied()
        .collect();

    let child_operations: Vec<Operation> = child_ids
        .iter()
        .filter_map(|child_id| base_pair.get(*child_id).and_then(|item| item.common().operation()))
        .collect();

    let adjusted = adjust_for_children(own_operation, &child_operations);
    if adjusted != own_operation {
        if let Some(item_mut) = base_pair.get_mut(id) {
            item_mut.common_mut().set_operation(adjusted);
        }
    }
}

fn adjust_for_children(own: Operation, children: &[Operation]) -> Operation {
    for side in [Side::Left, Side::Right] {
        let delete_op = Operation::delete(side);
        if own != delete_op {
            continue;
        }
        let create_op = Operation::create(side);
        let move_target = move_target(side);
        let move_source = move_source(side);

        if children.iter().any(|&op| op == create_op || op == move_target) {
            return create_op;
        }
        if children.iter().any(|&op| op != delete_op && op != move_source) {
            return Operation::DoNothing;
        }
    }
    own
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

#[cfg(test)]
mod tests {
    use super::*;
    use filters::HardFilter;
    use model::{Category, CompareVariant, FileDescriptor, FolderDescriptor, SymlinkPolicy};
    use std::path::PathBuf;

    fn base_pair() -> BasePair {
        BasePair::new(
            0,
            PathBuf::from("/left"),
            PathBuf::from("/right"),
            HardFilter::Null,
            CompareVariant::TimestampAndSize,
            SymlinkPolicy::Direct,
            2,
            Vec::new(),
        )
    }

    fn folder_with_one_child(op: Operation) -> (BasePair, ItemId, ItemId) {
        let mut bp = base_pair();
        let folder = bp.insert_folder(
            None,
            "sub".to_owned(),
            Some("sub".to_owned()),
            None,
            Some(FolderDescriptor::default()),
            None,
        );
        {
            let common = bp.get_mut(folder).unwrap().common_mut();
            common.set_category(Category::LeftOnly);
            common.set_operation(Operation::DeleteLeft);
        }
        let child = bp.insert_file(
            Some(folder),
            "c.txt".to_owned(),
            Some("c.txt".to_owned()),
            None,
            Some(FileDescriptor { mtime: 0, size: 1, file_id: None, followed_symlink: false }),
            None,
        );
        bp.get_mut(child).unwrap().common_mut().set_operation(op);
        (bp, folder, child)
    }

    #[test]
    fn delete_upgrades_to_create_when_a_child_is_being_created() {
        let (mut bp, folder, _child) = folder_with_one_child(Operation::CreateLeft);
        propagate_container_operations(&mut bp);
        assert_eq!(bp.get(folder).unwrap().common().operation(), Some(Operation::CreateLeft));
    }

    #[test]
    fn delete_downgrades_to_do_nothing_when_a_child_must_survive() {
        let (mut bp, folder, _child) = folder_with_one_child(Operation::DoNothing);
        propagate_container_operations(&mut bp);
        assert_eq!(bp.get(folder).unwrap().common().operation(), Some(Operation::DoNothing));
    }

    #[test]
    fn delete_survives_when_every_child_is_also_deleted() {
        let (mut bp, folder, _child) = folder_with_one_child(Operation::DeleteLeft);
        propagate_container_operations(&mut bp);
        assert_eq!(bp.get(folder).unwrap().common().operation(), Some(Operation::DeleteLeft));
    }
}
