/// Post-pairing activation filter: toggles a paired item's active flag
/// without removing it from the tree. Unlike [`crate::HardFilter`], a soft
/// filter may legitimately accept one side of a pair and reject the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SoftFilter {
    /// Items with an mtime at or after this threshold (seconds since the
    /// Unix epoch) pass; `None` means no time restriction.
    pub time_from: Option<i64>,
    /// Items smaller than this are rejected; `None` means no minimum.
    pub min_size: Option<u64>,
    /// Items larger than this are rejected; `None` means no maximum.
    pub max_size: Option<u64>,
    /// Whether folders are themselves subject to the size/time thresholds.
    /// When `false`, folders always pass (only their contents are
    /// filtered).
    pub folder_match: bool,
}

impl SoftFilter {
    /// A filter that accepts everything.
    #[must_use]
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Whether an item with the given mtime and size passes.
    #[must_use]
    pub fn allows(&self, mtime: i64, size: u64, is_dir: bool) -> bool {
        if is_dir && !self.folder_match {
            return true;
        }
        if let Some(threshold) = self.time_from {
            if mtime < threshold {
                return false;
            }
        }
        if let Some(min) = self.min_size {
            if size < min {
                return false;
            }
        }
        if let Some(max) = self.max_size {
            if size > max {
                return false;
            }
        }
        true
    }

    /// Combines two soft filters with intersection semantics: the result
    /// is at least as restrictive as either input.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            time_from: match (self.time_from, other.time_from) {
                (None, None) => None,
                (a, b) => Some(a.unwrap_or(i64::MIN).max(b.unwrap_or(i64::MIN))),
            },
            min_size: match (self.min_size, other.min_size) {
                (None, None) => None,
                (a, b) => Some(a.unwrap_or(0).max(b.unwrap_or(0))),
            },
            max_size: match (self.max_size, other.max_size) {
                (None, None) => None,
                (a, b) => Some(a.unwrap_or(u64::MAX).min(b.unwrap_or(u64::MAX))),
            },
            folder_match: self.folder_match && other.folder_match,
        }
    }
}
