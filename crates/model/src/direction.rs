use std::fmt;

use crate::Side;

/// Which side should receive a change, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// The left side receives the change.
    Left,
    /// The right side receives the change.
    Right,
    /// No change; the pair is equal or unresolved.
    None,
}

impl Direction {
    /// The side a direction targets, if any.
    #[must_use]
    pub const fn target_side(self) -> Option<Side> {
        match self {
            Self::Left => Some(Side::Left),
            Self::Right => Some(Side::Right),
            Self::None => None,
        }
    }

    /// The direction targeting `side`.
    #[must_use]
    pub const fn towards(side: Side) -> Self {
        match side {
            Side::Left => Self::Left,
            Side::Right => Self::Right,
        }
    }

    /// The mirror direction when both sides of the pair are swapped.
    #[must_use]
    pub const fn mirror(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::None => "none",
        })
    }
}
