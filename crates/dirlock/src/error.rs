use thiserror::Error;

/// Failure acquiring or reading a directory lock.
#[derive(Debug, Error)]
pub enum DirLockError {
    /// The lock file's contents are shorter than its own fields claim, or
    /// its format tag doesn't match.
    #[error("lock file is corrupt: {reason}")]
    Corrupt {
        /// What was expected versus what was found.
        reason: String,
    },
    /// The header tag parsed, but the version does not match what this
    /// build writes. Per design, older versions are refused outright.
    #[error("lock file format version {found} is incompatible with the supported version {expected}")]
    IncompatibleVersion {
        /// Version recorded in the file.
        found: i32,
        /// Version this build writes and reads.
        expected: i32,
    },
    /// The underlying file could not be read, written, or removed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A platform identity or liveness probe failed.
    #[error(transparent)]
    Platform(#[from] platform::PlatformError),
}
