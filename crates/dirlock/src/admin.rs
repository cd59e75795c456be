//! Process-wide lock registry, so two calls to [`DirLock::acquire`] for the
//! same directory — or for two paths that turn out to be the same file via
//! a symlink or a mounted alias — share one held lock instead of
//! deadlocking against each other. Grounded on `DirLock::LockAdmin` in
//! `dir_lock.cpp`: a path→id alias map checked first, an id→holder map
//! checked second by reading the lock file's own id, and a single mutex
//! serializing the whole acquisition so two concurrent calls in this
//! process can never race each other onto the filesystem.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, Weak};

use uuid::Uuid;

use crate::acquire::acquire_blocking;
use crate::error::DirLockError;
use crate::heartbeat::Heartbeat;
use crate::payload::LockPayload;

struct SharedDirLock {
    path: PathBuf,
    lock_id: Uuid,
    _heartbeat: Heartbeat,
}

impl Drop for SharedDirLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[derive(Default)]
struct LockAdmin {
    by_path: HashMap<PathBuf, Uuid>,
    by_id: HashMap<Uuid, Weak<SharedDirLock>>,
}

impl LockAdmin {
    fn tidy_up(&mut self) {
        self.by_id.retain(|_, holder| holder.strong_count() > 0);
        let live_ids = &self.by_id;
        self.by_path.retain(|_, id| live_ids.contains_key(id));
    }
}

static ADMIN: LazyLock<Mutex<LockAdmin>> = LazyLock::new(|| Mutex::new(LockAdmin::default()));

/// A held directory lock. Cloning shares ownership: the lock file is
/// removed once every clone held anywhere in this process is dropped.
#[derive(Clone)]
pub struct DirLock {
    inner: Arc<SharedDirLock>,
}

impl DirLock {
    /// Acquires the lock file at `path`, waiting out a live holder and
    /// reclaiming an abandoned one. Two acquisitions of the same path (or
    /// of paths that canonicalize to the same file) within this process
    /// return clones of one shared lock rather than each opening the file.
    ///
    /// # Errors
    /// Returns an error if the lock file cannot be created, read, or
    /// removed, or if reading this process's own identity fails.
    pub fn acquire(path: &Path) -> Result<Self, DirLockError> {
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

        let mut admin = ADMIN.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        admin.tidy_up();

        if let Some(existing) = admin.by_path.get(&canonical).and_then(|id| admin.by_id.get(id)).and_then(Weak::upgrade) {
            return Ok(Self { inner: existing });
        }

        if let Some(existing) = peek_existing_holder(&admin, path) {
            admin.by_path.insert(canonical, existing.lock_id);
            return Ok(Self { inner: existing.holder });
        }

        // Holding `admin` across this call serializes every acquisition in
        // this process, matching the original's single global lock — a
        // waiting acquire blocks out unrelated ones too, not just the one
        // for the same path.
        let payload = acquire_blocking(path)?;
        let shared = Arc::new(SharedDirLock { path: path.to_path_buf(), lock_id: payload.lock_id, _heartbeat: Heartbeat::start(path.to_path_buf()) });

        admin.by_path.insert(canonical, payload.lock_id);
        admin.by_id.insert(payload.lock_id, Arc::downgrade(&shared));

        Ok(Self { inner: shared })
    }

    /// The id of this particular lock hold, stable for its lifetime.
    #[must_use]
    pub fn lock_id(&self) -> Uuid {
        self.inner.lock_id
    }
}

struct ExistingHolder {
    lock_id: Uuid,
    holder: Arc<SharedDirLock>,
}

/// Reads the lock file already at `path` (if any) and checks whether its
/// recorded id matches a lock this process already holds under a
/// different path — the alias-by-content check `LockAdmin::retrieve` does
/// before falling back to `tryLock`.
fn peek_existing_holder(admin: &LockAdmin, path: &Path) -> Option<ExistingHolder> {
    let bytes = fs::read(path).ok()?;
    let payload = LockPayload::decode(&bytes).ok()?;
    let holder = admin.by_id.get(&payload.lock_id)?.upgrade()?;
    Some(ExistingHolder { lock_id: payload.lock_id, holder })
}
