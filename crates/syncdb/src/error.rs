use thiserror::Error;

/// Failure reading or writing the last-synchronized-state database.
///
/// Every variant here is something a caller can recover from by treating
/// the database as "not yet existing" (§7): a missing file, a corrupt one,
/// or one written by an incompatible format version all mean the next
/// comparison simply has no prior state to consult. [`store`](crate::store)
/// converts all three into a log line and `None` rather than propagating
/// this type further; it stays public only so [`crate::codec`] and
/// [`crate::session`] have something concrete to return.
#[derive(Debug, Error)]
pub enum SyncDbError {
    /// The stream is shorter than its own length-prefixed fields claim, or
    /// an enum tag does not match a value this crate understands.
    #[error("database stream is corrupt: {reason}")]
    Corrupt {
        /// What was expected versus what was found.
        reason: String,
    },
    /// The header tag and version parsed, but the version does not match
    /// what this build writes. Per design, older versions are refused
    /// outright rather than migrated.
    #[error("database format version {found} is incompatible with the supported version {expected}")]
    IncompatibleVersion {
        /// Version recorded in the file.
        found: i32,
        /// Version this build writes and reads.
        expected: i32,
    },
    /// The underlying file could not be read or written.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
