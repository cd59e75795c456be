//! Detects whether a directory's filesystem folds the case of file names.
//!
//! `model` and `filters` need this to decide whether two relative paths
//! that differ only in case denote the same item (FAT, most default macOS
//! and Windows volumes) or two distinct items (most Linux filesystems).

use std::fs;
use std::path::Path;

use crate::PlatformError;

/// Whether a directory's filesystem is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseSensitivity {
    /// `foo` and `FOO` name distinct entries.
    Sensitive,
    /// `foo` and `FOO` name the same entry.
    Insensitive,
}

/// Probes `dir` by creating a marker file and checking whether an
/// upper-cased lookup of its name resolves to the same inode.
///
/// `dir` must be writable; the probe file is removed before returning,
/// success or failure.
pub fn probe(dir: &Path) -> Result<CaseSensitivity, PlatformError> {
    let marker = dir.join(".twinsync-case-probe");
    fs::write(&marker, b"").map_err(|source| PlatformError::Probe {
        path: marker.clone(),
        source,
    })?;

    let upper = dir.join(".TWINSYNC-CASE-PROBE");
    let result = fs::metadata(&upper).is_ok();

    let _ = fs::remove_file(&marker);

    Ok(if result {
        CaseSensitivity::Insensitive
    } else {
        CaseSensitivity::Sensitive
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_a_real_directory_without_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Whatever the result, the probe must complete and clean up.
        let _ = probe(dir.path()).expect("probe");
        assert!(fs::read_dir(dir.path()).expect("read_dir").next().is_none());
    }
}
