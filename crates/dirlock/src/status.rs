//! Classifies a lock file's owner relative to the current process — the
//! decision `getProcessStatus` makes before `waitOnDirLock` either enters
//! its poll loop or reclaims the lock outright. Grounded on
//! `getProcessStatus` in `dir_lock.cpp`, including its field comparison
//! order: host and user first, then session, then process id.

use platform::identity::{current_process_identity, ProcessIdentity};
use platform::liveness::{process_alive, Liveness};

use crate::error::DirLockError;
use crate::payload::LockPayload;

/// Where a recorded lock owner stands relative to the calling process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOwner {
    /// The lock was created by this exact process — a prior run that
    /// crashed or exited without releasing it.
    ItsUs,
    /// Created by a different process, on this host, under this login
    /// session, and confirmed still running. The lock is live.
    Live,
    /// Created on a different host or under a different user or login
    /// session, or by a process this host can no longer find. Treated as
    /// abandoned.
    Abandoned,
}

/// Classifies `payload`'s owner against the calling process's own identity.
pub fn classify(payload: &LockPayload) -> Result<LockOwner, DirLockError> {
    let here = current_process_identity()?;
    Ok(classify_against(payload, &here))
}

fn classify_against(payload: &LockPayload, here: &ProcessIdentity) -> LockOwner {
    if payload.identity.host != here.host || payload.identity.user != here.user {
        return LockOwner::Abandoned;
    }
    if payload.identity.session != here.session {
        return LockOwner::Abandoned;
    }
    if payload.identity.process_id == here.process_id {
        return LockOwner::ItsUs;
    }
    match process_alive(payload.identity.process_id) {
        Liveness::Running => LockOwner::Live,
        Liveness::NotRunning | Liveness::Unknown | Liveness::ItsUs => LockOwner::Abandoned,
    }
}
