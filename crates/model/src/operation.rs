use std::fmt;

use crate::Side;

/// The concrete per-item action for the executor: a closed set of fifteen
/// values.
///
/// The core only produces this value; a separate executor (out of scope)
/// carries it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create the item on the left from the right.
    CreateLeft,
    /// Create the item on the right from the left.
    CreateRight,
    /// Delete the item from the left.
    DeleteLeft,
    /// Delete the item from the right.
    DeleteRight,
    /// Overwrite the left with the right's content.
    OverwriteLeft,
    /// Overwrite the right with the left's content.
    OverwriteRight,
    /// Copy metadata only (no content change) onto the left.
    CopyMetadataLeft,
    /// Copy metadata only (no content change) onto the right.
    CopyMetadataRight,
    /// This pair is the source half of a detected left-side move.
    MoveLeftSource,
    /// This pair is the target half of a detected left-side move.
    MoveLeftTarget,
    /// This pair is the source half of a detected right-side move.
    MoveRightSource,
    /// This pair is the target half of a detected right-side move.
    MoveRightTarget,
    /// No action; the pair is deliberately left alone.
    DoNothing,
    /// No action; the pair was already equal.
    Equal,
    /// No automatic resolution was possible; needs user input.
    UnresolvedConflict,
}

impl Operation {
    /// A plain `create` targeting `side`.
    #[must_use]
    pub const fn create(side: Side) -> Self {
        match side {
            Side::Left => Self::CreateLeft,
            Side::Right => Self::CreateRight,
        }
    }

    /// A plain `delete` targeting `side`.
    #[must_use]
    pub const fn delete(side: Side) -> Self {
        match side {
            Side::Left => Self::DeleteLeft,
            Side::Right => Self::DeleteRight,
        }
    }

    /// A plain `overwrite` targeting `side`.
    #[must_use]
    pub const fn overwrite(side: Side) -> Self {
        match side {
            Side::Left => Self::OverwriteLeft,
            Side::Right => Self::OverwriteRight,
        }
    }

    /// A metadata-only copy targeting `side`.
    #[must_use]
    pub const fn copy_metadata(side: Side) -> Self {
        match side {
            Side::Left => Self::CopyMetadataLeft,
            Side::Right => Self::CopyMetadataRight,
        }
    }

    /// Whether this operation mutates the left side.
    #[must_use]
    pub const fn targets_left(self) -> bool {
        matches!(
            self,
            Self::CreateLeft
                | Self::DeleteLeft
                | Self::OverwriteLeft
                | Self::CopyMetadataLeft
                | Self::MoveLeftSource
                | Self::MoveLeftTarget
        )
    }

    /// Whether this operation mutates the right side.
    #[must_use]
    pub const fn targets_right(self) -> bool {
        matches!(
            self,
            Self::CreateRight
                | Self::DeleteRight
                | Self::OverwriteRight
                | Self::CopyMetadataRight
                | Self::MoveRightSource
                | Self::MoveRightTarget
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CreateLeft => "create_left",
            Self::CreateRight => "create_right",
            Self::DeleteLeft => "delete_left",
            Self::DeleteRight => "delete_right",
            Self::OverwriteLeft => "overwrite_left",
            Self::OverwriteRight => "overwrite_right",
            Self::CopyMetadataLeft => "copy_metadata_left",
            Self::CopyMetadataRight => "copy_metadata_right",
            Self::MoveLeftSource => "move_left_source",
            Self::MoveLeftTarget => "move_left_target",
            Self::MoveRightSource => "move_right_source",
            Self::MoveRightTarget => "move_right_target",
            Self::DoNothing => "do_nothing",
            Self::Equal => "equal",
            Self::UnresolvedConflict => "unresolved_conflict",
        };
        f.write_str(label)
    }
}
