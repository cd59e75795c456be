use model::{Category, Direction};

/// A fixed per-category direction table, used directly by [`SyncVariant::Mirror`]/
/// [`SyncVariant::Update`]/[`SyncVariant::Custom`] (Step A, §4.5). Two-way
/// resolution does not use a `DirectionSet` at all — its direction is
/// derived from the database per pair, not from a static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DirectionSet {
    /// Direction when the category is `left_only`.
    pub left_only: Direction,
    /// Direction when the category is `right_only`.
    pub right_only: Direction,
    /// Direction when the category is `left_newer`.
    pub left_newer: Direction,
    /// Direction when the category is `right_newer`.
    pub right_newer: Direction,
    /// Direction when the category is `different_content`.
    pub different_content: Direction,
    /// Direction when the category is `different_metadata`.
    pub different_metadata: Direction,
    /// Direction when the category is `conflict`.
    pub conflict: Direction,
}

impl DirectionSet {
    /// `mirror ->>`: every difference is resolved by making the right side
    /// match the left.
    #[must_use]
    pub const fn mirror() -> Self {
        Self {
            left_only: Direction::Right,
            right_only: Direction::Right,
            left_newer: Direction::Right,
            right_newer: Direction::Right,
            different_content: Direction::Right,
            different_metadata: Direction::Right,
            conflict: Direction::Right,
        }
    }

    /// `update ->`: the right side only ever receives updates and
    /// creations; nothing is ever deleted or overwritten on the left, and
    /// anything missing from the left (i.e. `right_only`) is left alone.
    #[must_use]
    pub const fn update() -> Self {
        Self {
            left_only: Direction::Right,
            right_only: Direction::None,
            left_newer: Direction::Right,
            right_newer: Direction::None,
            different_content: Direction::Right,
            different_metadata: Direction::Right,
            conflict: Direction::None,
        }
    }

    /// The direction for `category` under this table. `Category::Equal`
    /// always resolves to `Direction::None` regardless of the table.
    #[must_use]
    pub const fn direction_for(&self, category: Category) -> Direction {
        match category {
            Category::LeftOnly => self.left_only,
            Category::RightOnly => self.right_only,
            Category::LeftNewer => self.left_newer,
            Category::RightNewer => self.right_newer,
            Category::DifferentContent => self.different_content,
            Category::DifferentMetadata => self.different_metadata,
            Category::Conflict => self.conflict,
            Category::Equal => Direction::None,
        }
    }
}

/// Which synchronization policy drives direction resolution for a
/// base-pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SyncVariant {
    /// Make the right side an exact copy of the left.
    Mirror,
    /// Propagate left's changes to the right; never touch the left.
    Update,
    /// Direction is derived from the in-sync database, per pair.
    TwoWay,
    /// A user-supplied, fixed direction table.
    Custom(DirectionSet),
}
