use model::{Category, Direction, Operation};

/// Step B (§4.5): the concrete action for `category` once its direction is
/// known. `Category::Equal` always yields `Operation::Equal`; a `None`
/// direction on `Category::Conflict` yields `Operation::UnresolvedConflict`
/// rather than `Operation::DoNothing`, since an un-resolved conflict is a
/// distinct, user-visible state from "deliberately left alone".
#[must_use]
pub const fn operation_for(category: Category, direction: Direction) -> Operation {
    match category {
        Category::Equal => Operation::Equal,
        Category::LeftOnly => match direction {
            Direction::Left => Operation::DeleteLeft,
            Direction::Right => Operation::CreateRight,
            Direction::None => Operation::DoNothing,
        },
        Category::RightOnly => match direction {
            Direction::Left => Operation::CreateLeft,
            Direction::Right => Operation::DeleteRight,
            Direction::None => Operation::DoNothing,
        },
        Category::LeftNewer | Category::RightNewer | Category::DifferentContent => match direction {
            Direction::Left => Operation::OverwriteLeft,
            Direction::Right => Operation::OverwriteRight,
            Direction::None => Operation::DoNothing,
        },
        Category::DifferentMetadata => match direction {
            Direction::Left => Operation::CopyMetadataLeft,
            Direction::Right => Operation::CopyMetadataRight,
            Direction::None => Operation::DoNothing,
        },
        Category::Conflict => match direction {
            Direction::Left => Operation::OverwriteLeft,
            Direction::Right => Operation::OverwriteRight,
            Direction::None => Operation::UnresolvedConflict,
        },
    }
}
