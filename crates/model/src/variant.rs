/// Which rule the categorizer uses to decide equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CompareVariant {
    /// Compare by last-write time and size; never reads file content.
    TimestampAndSize,
    /// Compare by content; falls back to a binary-equality probe supplied
    /// by the executor when sizes match.
    Content,
}

/// How symlinks are treated during traversal and comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SymlinkPolicy {
    /// Symlinks are compared as an opaque (target, mtime) pair.
    Direct,
    /// Symlinks are replaced by their target at traversal time and
    /// categorized as the file/folder they point to.
    Follow,
    /// Symlinks never enter the paired tree.
    Exclude,
}
