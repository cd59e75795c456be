use std::path::Path;

use crate::mask::Mask;

/// Traversal-time scope filter: decides per relative path whether an item
/// is in scope at all. Identical on both sides of a comparison.
///
/// When a directory is excluded, [`HardFilter::sub_items_might_match`]
/// reports that its entire subtree can be skipped without descending,
/// matching every other directory-exclusion filter in this family.
#[derive(Debug, Clone)]
pub enum HardFilter {
    /// Accepts everything; the default when no masks are configured.
    Null,
    /// `includes` (any match, or no includes at all) AND NOT `excludes`
    /// (any match).
    Masks {
        /// Include masks; an item passes if any matches, or if this list
        /// is empty.
        includes: Vec<Mask>,
        /// Exclude masks; an item is rejected if any matches.
        excludes: Vec<Mask>,
    },
    /// Conjunction of two filters: both must allow an item.
    And(Box<HardFilter>, Box<HardFilter>),
}

impl Default for HardFilter {
    fn default() -> Self {
        Self::Null
    }
}

impl HardFilter {
    /// Builds a filter from include and exclude masks.
    #[must_use]
    pub fn from_masks(
        includes: impl IntoIterator<Item = Mask>,
        excludes: impl IntoIterator<Item = Mask>,
    ) -> Self {
        Self::Masks {
            includes: includes.into_iter().collect(),
            excludes: excludes.into_iter().collect(),
        }
    }

    /// Composes two filters with conjunction (`A ∧ B`).
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (&self, &other) {
            (Self::Null, _) => other,
            (_, Self::Null) => self,
            _ => Self::And(Box::new(self), Box::new(other)),
        }
    }

    /// Whether `relative_path` is in scope.
    #[must_use]
    pub fn allows(&self, relative_path: &Path, is_dir: bool) -> bool {
        match self {
            Self::Null => true,
            Self::Masks { includes, excludes } => {
                let included = includes.is_empty()
                    || includes.iter().any(|m| m.is_match(relative_path, is_dir));
                let excluded = excludes.iter().any(|m| m.is_match(relative_path, is_dir));
                included && !excluded
            }
            Self::And(a, b) => a.allows(relative_path, is_dir) && b.allows(relative_path, is_dir),
        }
    }

    /// Fast path for the traversal layer: whether any item below
    /// `relative_dir` could possibly pass this filter. Returning `false`
    /// lets the traversal skip reading the directory entirely.
    ///
    /// This must never return `false` for a directory that itself, or some
    /// descendant of it, would pass [`HardFilter::allows`].
    #[must_use]
    pub fn sub_items_might_match(&self, relative_dir: &Path) -> bool {
        match self {
            Self::Null => true,
            Self::Masks { excludes, .. } => !excludes
                .iter()
                .any(|m| m.is_match(relative_dir, true)),
            Self::And(a, b) => {
                a.sub_items_might_match(relative_dir) && b.sub_items_might_match(relative_dir)
            }
        }
    }
}
