//! Errors an [`crate::engine::run_one`] call can return.
//!
//! Per §7, most of what a naive implementation would treat as an error is
//! not one here: a path-level traversal failure is recorded into
//! `BasePair::failed_dir_reads` and the walk continues; a corrupt or
//! missing database is "first-time sync"; a DB write failure after a
//! successful comparison is a warning, not a failed run. What remains —
//! the root of a side being unreadable at all, an invalid filter pattern,
//! or a lock that could not be acquired — are the only things that stop a
//! base-pair outright.
use thiserror::Error;

/// A base-pair's run could not complete.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Neither side's root could be traversed at all (as opposed to a
    /// failure part-way through, which is recorded rather than returned).
    #[error(transparent)]
    Traversal(#[from] walk::WalkError),
    /// One of the configured filter masks failed to compile.
    #[error(transparent)]
    Filter(#[from] filters::MaskError),
    /// The directory lock for this base-pair could not be acquired.
    #[error(transparent)]
    Lock(#[from] dirlock::DirLockError),
}
