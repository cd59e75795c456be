//! Top-level load/save entry points: locates each side's database file,
//! matches sessions across the pair, and writes transactionally.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use model::BasePair;
use uuid::Uuid;

use crate::codec::{decode_dir, encode_dir};
use crate::error::SyncDbError;
use crate::record::InSyncDir;
use crate::session::{deserialize_sessions, serialize_sessions};

const DB_FILE_NAME: &str = ".sync.twinsync_db";
const DB_TMP_FILE_NAME: &str = ".sync.tmp.twinsync_db";

fn db_path(root: &Path) -> PathBuf {
    root.join(DB_FILE_NAME)
}

fn tmp_db_path(root: &Path) -> PathBuf {
    root.join(DB_TMP_FILE_NAME)
}

/// Loads the last-synchronized-state tree shared by both sides of
/// `base_pair`.
///
/// Every failure mode — a missing file on either side, a corrupt stream, an
/// incompatible format version, or no session GUID common to both sides —
/// is logged and reported as `None`: per design, "no prior state" is a
/// normal outcome, never a hard error propagated to the caller.
#[must_use]
pub fn load_last_synchronous_state(base_pair: &BasePair) -> Option<InSyncDir> {
    let left_path = db_path(&base_pair.left_path);
    let right_path = db_path(&base_pair.right_path);

    let left_sessions = read_sessions(&left_path)?;
    let right_sessions = read_sessions(&right_path)?;

    let Some(guid) = common_session(&left_sessions, &right_sessions) else {
        tracing::info!(left = %left_path.display(), right = %right_path.display(), "no session common to both sides; treating database as not yet existing");
        return None;
    };

    let left_stream = left_sessions.get(&guid).expect("guid came from this map");
    let right_stream = right_sessions.get(&guid).expect("guid came from this map");

    match decode_dir(left_stream, right_stream) {
        Ok(tree) => Some(tree),
        Err(error) => {
            tracing::warn!(%error, "database session is corrupt; treating database as not yet existing");
            None
        }
    }
}

fn read_sessions(path: &Path) -> Option<IndexMap<Uuid, Vec<u8>>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return None,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "could not read database file");
            return None;
        }
    };
    match deserialize_sessions(&bytes) {
        Ok(sessions) => Some(sessions),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "could not parse database file");
            None
        }
    }
}

fn common_session(left: &IndexMap<Uuid, Vec<u8>>, right: &IndexMap<Uuid, Vec<u8>>) -> Option<Uuid> {
    left.keys().find(|guid| right.contains_key(*guid)).copied()
}

/// Writes `tree` as the new last-synchronized-state for `base_pair`.
///
/// Both sides' files are fully rewritten to temporary paths first; only
/// once both have been written successfully are they renamed into place,
/// left first. A failure renaming the right side after the left rename
/// already succeeded leaves the two sides briefly inconsistent — the same
/// narrow window the update-then-rename scheme has always had, not
/// something this function tries to hide with a second write phase.
///
/// If the freshly serialized streams are byte-identical to what is already
/// on disk under the matched session, the write is skipped entirely.
///
/// # Errors
/// Returns an error if either temporary file cannot be written, or if
/// either final rename fails.
pub fn save_last_synchronous_state(base_pair: &BasePair, tree: &InSyncDir) -> Result<(), SyncDbError> {
    let left_path = db_path(&base_pair.left_path);
    let right_path = db_path(&base_pair.right_path);

    let mut left_sessions = read_sessions(&left_path).unwrap_or_default();
    let mut right_sessions = read_sessions(&right_path).unwrap_or_default();

    let (left_stream, right_stream) = encode_dir(tree)?;

    let guid = common_session(&left_sessions, &right_sessions).unwrap_or_else(Uuid::new_v4);

    if left_sessions.get(&guid).is_some_and(|existing| existing == &left_stream)
        && right_sessions.get(&guid).is_some_and(|existing| existing == &right_stream)
    {
        tracing::debug!("last-synchronized-state is unchanged; skipping write");
        return Ok(());
    }

    left_sessions.insert(guid, left_stream);
    right_sessions.insert(guid, right_stream);

    let left_bytes = serialize_sessions(&left_sessions);
    let right_bytes = serialize_sessions(&right_sessions);

    let left_tmp = tmp_db_path(&base_pair.left_path);
    let right_tmp = tmp_db_path(&base_pair.right_path);

    write_and_cleanup_on_failure(&left_tmp, &left_bytes)?;
    if let Err(error) = write_and_cleanup_on_failure(&right_tmp, &right_bytes) {
        let _ = std::fs::remove_file(&left_tmp);
        return Err(error);
    }

    std::fs::rename(&left_tmp, &left_path)?;
    std::fs::rename(&right_tmp, &right_path)?;

    Ok(())
}

fn write_and_cleanup_on_failure(path: &Path, bytes: &[u8]) -> Result<(), SyncDbError> {
    if let Err(error) = std::fs::write(path, bytes) {
        let _ = std::fs::remove_file(path);
        return Err(error.into());
    }
    Ok(())
}
