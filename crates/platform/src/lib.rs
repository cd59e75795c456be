#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
// Unlike the other crates in this workspace, `platform` is where their
// `#![deny(unsafe_code)]` pushes the handful of unavoidable OS calls: this
// crate isolates them behind a safe API instead of forbidding them outright.

//! # Overview
//!
//! Small, testable wrappers around the handful of OS primitives the sync
//! core needs and cannot get from `std`: who is running this process, is
//! some other process still alive, and does a given directory fold case.
//!
//! # Design
//!
//! Three modules, each independent of the others:
//!
//! - [`identity`]: host/user/session/process identity, used by `dirlock` to
//!   decide whether a lock file was left behind by this exact process, a
//!   dead process on this machine, or a process on another machine
//!   entirely.
//! - [`liveness`]: "is this pid still running" — the single platform check
//!   the lock-abandonment heuristic needs once identity comparison narrows
//!   it down to "same machine, different process".
//! - [`case_sensitivity`]: probes whether a directory's filesystem folds
//!   the case of file names, so the comparator can pick a
//!   case-insensitive path ordering on volumes that need it (FAT, most
//!   default macOS/Windows volumes) without hard-coding it per OS.
//! - [`file_id`]: extracts a stable per-file identity from `std::fs`
//!   metadata, used by `resolve`'s move detector.
//!
//! # Invariants
//!
//! - None of these probes panic on I/O failure; callers get a
//!   [`PlatformError`] and decide what "don't know" means for them.
//! - [`liveness::process_alive`] never mistakes an invalid or reserved pid
//!   for a live one.
//!
//! # Examples
//!
//! ```
//! use platform::identity::current_process_identity;
//!
//! let me = current_process_identity().expect("read local process identity");
//! assert_eq!(me.process_id, std::process::id());
//! ```

pub mod case_sensitivity;
pub mod file_id;
pub mod identity;
pub mod liveness;

use thiserror::Error;

/// Failure reading a platform primitive.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The underlying OS call failed.
    #[error("platform call {call} failed: {source}")]
    Os {
        /// Name of the OS call that failed, for diagnostics.
        call: &'static str,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A probe directory could not be created or removed.
    #[error("probing {path} failed: {source}")]
    Probe {
        /// Directory the probe was attempted in.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
