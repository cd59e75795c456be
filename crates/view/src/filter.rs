//! Visibility toggles for a [`crate::GridView`]'s aggregate statistics,
//! grounded on the boolean parameter lists to `GridView::updateCmpResult`
//! and `GridView::updateSyncPreview`.

use model::{Category, Operation};

/// Per-category visibility toggle, used by [`crate::ComparisonStats`].
#[derive(Debug, Clone, Copy)]
pub struct CategoryFilter {
    /// Include rows that exist only on the left.
    pub left_only: bool,
    /// Include rows that exist only on the right.
    pub right_only: bool,
    /// Include rows where the left side is newer.
    pub left_newer: bool,
    /// Include rows where the right side is newer.
    pub right_newer: bool,
    /// Include rows with different content.
    pub different_content: bool,
    /// Include rows with matching content but different metadata.
    pub different_metadata: bool,
    /// Include rows already equal.
    pub equal: bool,
    /// Include unresolved conflicts.
    pub conflict: bool,
}

impl CategoryFilter {
    /// Every category visible.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            left_only: true,
            right_only: true,
            left_newer: true,
            right_newer: true,
            different_content: true,
            different_metadata: true,
            equal: true,
            conflict: true,
        }
    }

    /// Whether `category` passes this filter.
    #[must_use]
    pub const fn allows(&self, category: Category) -> bool {
        match category {
            Category::LeftOnly => self.left_only,
            Category::RightOnly => self.right_only,
            Category::LeftNewer => self.left_newer,
            Category::RightNewer => self.right_newer,
            Category::DifferentContent => self.different_content,
            Category::DifferentMetadata => self.different_metadata,
            Category::Equal => self.equal,
            Category::Conflict => self.conflict,
        }
    }
}

/// Per-operation-group visibility toggle, used by
/// [`crate::SyncPreviewStats`]. Groups mirror `StatusSyncPreview`'s
/// `existsSync*` flags, with one addition: this model tracks detected
/// moves as their own operations rather than folding them into overwrite,
/// so moves get their own toggle too.
#[derive(Debug, Clone, Copy)]
pub struct OperationFilter {
    /// Include items to be created on the left.
    pub create_left: bool,
    /// Include items to be created on the right.
    pub create_right: bool,
    /// Include items to be deleted from the left.
    pub delete_left: bool,
    /// Include items to be deleted from the right.
    pub delete_right: bool,
    /// Include items to be overwritten (content or metadata) on the left.
    pub overwrite_left: bool,
    /// Include items to be overwritten (content or metadata) on the right.
    pub overwrite_right: bool,
    /// Include items that are one half of a detected move to the left.
    pub move_left: bool,
    /// Include items that are one half of a detected move to the right.
    pub move_right: bool,
    /// Include items left untouched.
    pub do_nothing: bool,
    /// Include items already equal.
    pub equal: bool,
    /// Include unresolved conflicts.
    pub conflict: bool,
}

impl OperationFilter {
    /// Every operation group visible.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            create_left: true,
            create_right: true,
            delete_left: true,
            delete_right: true,
            overwrite_left: true,
            overwrite_right: true,
            move_left: true,
            move_right: true,
            do_nothing: true,
            equal: true,
            conflict: true,
        }
    }

    /// Whether `operation` passes this filter.
    #[must_use]
    pub const fn allows(&self, operation: Operation) -> bool {
        match operation {
            Operation::CreateLeft => self.create_left,
            Operation::CreateRight => self.create_right,
            Operation::DeleteLeft => self.delete_left,
            Operation::DeleteRight => self.delete_right,
            Operation::OverwriteLeft | Operation::CopyMetadataLeft => self.overwrite_left,
            Operation::OverwriteRight | Operation::CopyMetadataRight => self.overwrite_right,
            Operation::MoveLeftSource | Operation::MoveLeftTarget => self.move_left,
            Operation::MoveRightSource | Operation::MoveRightTarget => self.move_right,
            Operation::DoNothing => self.do_nothing,
            Operation::Equal => self.equal,
            Operation::UnresolvedConflict => self.conflict,
        }
    }
}
