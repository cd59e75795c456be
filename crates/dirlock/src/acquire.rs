//! Exclusive lock acquisition, abandoned-lock detection, and the
//! mandatory re-verification before deleting someone else's lock file.
//! Grounded directly on `tryLock`/`waitOnDirLock` in `dir_lock.cpp`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::DirLockError;
use crate::payload::LockPayload;
use crate::status::{classify, LockOwner};

const POLL_INTERVAL: Duration = Duration::from_secs(4);
const ABANDONED_AFTER: Duration = Duration::from_secs(30);
const REVERIFY_PAUSE: Duration = Duration::from_millis(200);

/// Blocks until `path` can be created exclusively: waits out a live
/// holder, reclaims an abandoned one, and returns the payload this call
/// wrote into the file once it succeeds.
pub fn acquire_blocking(path: &Path) -> Result<LockPayload, DirLockError> {
    loop {
        let payload = LockPayload::for_current_process()?;
        if try_create(path, &payload)? {
            return Ok(payload);
        }
        wait_or_reclaim(path)?;
        // Either the lock is gone now, or we just reclaimed it — retry.
    }
}

/// Exclusively creates `path` and writes `payload` into it. `Ok(false)`
/// means the file already existed; every other outcome is final.
fn try_create(path: &Path, payload: &LockPayload) -> Result<bool, DirLockError> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            if let Err(error) = file.write_all(&payload.encode()) {
                let _ = fs::remove_file(path);
                return Err(error.into());
            }
            Ok(true)
        }
        Err(error) if error.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(error) => Err(error.into()),
    }
}

/// Waits for the existing lock at `path` to either go away on its own or
/// be reclaimed as abandoned. Returns once the caller should retry
/// creating the lock.
fn wait_or_reclaim(path: &Path) -> Result<(), DirLockError> {
    let mut last_size = fs::metadata(path).map(|m| m.len()).ok();
    let mut last_change = Instant::now();

    loop {
        let existing = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(error) => return Err(error.into()),
        };

        let owner = LockPayload::decode(&existing).ok().and_then(|payload| classify(&payload).ok());
        let abandoned_by_owner = matches!(owner, Some(LockOwner::ItsUs | LockOwner::Abandoned));

        let size = fs::metadata(path).map(|m| m.len()).ok();
        if size != last_size {
            last_size = size;
            last_change = Instant::now();
        }
        let stale = last_change.elapsed() >= ABANDONED_AFTER;

        if abandoned_by_owner || stale {
            tracing::info!(path = %path.display(), abandoned_by_owner, stale, "treating lock as abandoned");
            if reclaim(path)? {
                return Ok(());
            }
            // A life sign arrived during re-verification; go back to polling.
            last_change = Instant::now();
        }

        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Acquires a secondary `Del.<name>` lock using this same protocol,
/// re-verifies the original lock hasn't changed since, and only then
/// deletes it. Returns `false` if re-verification found a fresh life sign,
/// meaning the original lock is not actually abandoned after all.
fn reclaim(path: &Path) -> Result<bool, DirLockError> {
    let secondary = deleting_lock_path(path);
    let secondary_payload = acquire_blocking(&secondary)?;

    let before = fs::read(path).ok();
    std::thread::sleep(REVERIFY_PAUSE);
    let after = fs::read(path).ok();

    let result = if before == after {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(error) => Err(error.into()),
        }
    } else {
        tracing::warn!(path = %path.display(), "life sign arrived during reclaim; lock is not abandoned after all");
        Ok(false)
    };

    drop(secondary_payload);
    let _ = fs::remove_file(&secondary);
    result
}

/// The secondary lock name used while reclaiming an abandoned lock,
/// prefixing the file's own name rather than replacing it so it sorts
/// next to the original and never collides with an unrelated file.
fn deleting_lock_path(path: &Path) -> PathBuf {
    let name = path.file_name().map_or_else(|| "Del.lock".into(), |name| format!("Del.{}", name.to_string_lossy()));
    path.with_file_name(name)
}
