use std::fmt;

/// The comparison result for a paired item: a closed set of eight values.
///
/// Folder pairs are restricted to a subset — see the categorizer in the
/// `compare` crate for which categories it ever assigns to a
/// [`crate::FolderPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Exists only on the left.
    LeftOnly,
    /// Exists only on the right.
    RightOnly,
    /// Exists on both sides and is equal (within tolerance).
    Equal,
    /// Exists on both sides with different content (content variant only).
    DifferentContent,
    /// Exists on both sides; the left side is newer.
    LeftNewer,
    /// Exists on both sides; the right side is newer.
    RightNewer,
    /// Exists on both sides with equal content/mtime but a metadata
    /// difference (short-name case, or — for folders — any difference).
    DifferentMetadata,
    /// Exists on both sides with an unreliable comparison result (e.g.
    /// same mtime but different size under the timestamp-and-size
    /// variant).
    Conflict,
}

impl Category {
    /// The mirror category when both sides of the pair are swapped.
    ///
    /// # Examples
    ///
    /// ```
    /// use model::Category;
    ///
    /// assert_eq!(Category::LeftOnly.mirror(), Category::RightOnly);
    /// assert_eq!(Category::LeftNewer.mirror(), Category::RightNewer);
    /// assert_eq!(Category::Equal.mirror(), Category::Equal);
    /// ```
    #[must_use]
    pub const fn mirror(self) -> Self {
        match self {
            Self::LeftOnly => Self::RightOnly,
            Self::RightOnly => Self::LeftOnly,
            Self::LeftNewer => Self::RightNewer,
            Self::RightNewer => Self::LeftNewer,
            Self::Equal
            | Self::DifferentContent
            | Self::DifferentMetadata
            | Self::Conflict => self,
        }
    }

    /// Whether a [`crate::FolderPair`] may carry this category.
    #[must_use]
    pub const fn valid_for_folder(self) -> bool {
        matches!(
            self,
            Self::LeftOnly | Self::RightOnly | Self::Equal | Self::DifferentMetadata
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::LeftOnly => "left_only",
            Self::RightOnly => "right_only",
            Self::Equal => "equal",
            Self::DifferentContent => "different_content",
            Self::LeftNewer => "left_newer",
            Self::RightNewer => "right_newer",
            Self::DifferentMetadata => "different_metadata",
            Self::Conflict => "conflict",
        };
        f.write_str(label)
    }
}
