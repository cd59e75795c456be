use std::fmt;

/// Which side of a comparison a value belongs to.
///
/// The model is perfectly symmetric: every operation parameterized by
/// [`Side`] has a mirror, reached through [`Side::other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The left-hand tree.
    Left,
    /// The right-hand tree.
    Right,
}

impl Side {
    /// The opposite side.
    ///
    /// # Examples
    ///
    /// ```
    /// use model::Side;
    ///
    /// assert_eq!(Side::Left.other(), Side::Right);
    /// assert_eq!(Side::Right.other(), Side::Left);
    /// ```
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}
