//! Cross-process directory lock, preventing two synchronizer runs from
//! touching the same base folder pair at once (§4.7).
//!
//! # Overview
//!
//! [`DirLock::acquire`] exclusively creates a small marker file in the
//! target directory. If the file already exists, the caller classifies its
//! recorded owner ([`status::classify`]): one left behind by this exact
//! process, a dead process on this host, or a process on another host
//! entirely are all treated as abandoned and reclaimed; a live process
//! under the same login on this host is waited out instead.
//!
//! # Design
//!
//! - [`payload`]: the lock file's contents — an id plus the creating
//!   process's host/user/session/pid, the same fields `dir_lock.cpp`
//!   stamps into its own lock files.
//! - [`status`]: the owner classification above, built on `platform`'s
//!   identity and liveness probes.
//! - [`heartbeat`]: while held, a cooperative task appends a byte to the
//!   lock file every few seconds so a waiter can tell the holder is still
//!   alive; dropping the handle cancels it and joins.
//! - [`acquire`]: the blocking acquire loop — poll for a life sign,
//!   declare the lock abandoned after either an owner check or a staleness
//!   timeout, reclaim it via a secondary `Del.<name>` lock with a
//!   mandatory re-verification pause, then retry.
//! - [`admin`]: the process-wide registry so two acquisitions of the same
//!   (or aliased) path inside one process share a lock instead of
//!   deadlocking, exposed as the crate's [`DirLock`] handle.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod acquire;
mod admin;
mod error;
mod heartbeat;
mod payload;
mod status;

pub use admin::DirLock;
pub use error::DirLockError;
pub use status::LockOwner;

/// Default lock file name placed inside a locked directory.
pub const LOCK_FILE_NAME: &str = "sync.twinsync_lock";
