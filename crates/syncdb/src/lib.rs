//! On-disk last-synchronized-state database.
//!
//! # Overview
//!
//! Two-way synchronization needs to know not just what the left and right
//! sides look like now, but what they looked like the last time they were
//! confirmed in sync (§4.6) — otherwise a file that changed on the right
//! only is indistinguishable from one that changed on both sides in
//! different ways. This crate owns that record: an [`InSyncDir`] tree,
//! persisted as a pair of per-side files and reloaded at the start of the
//! next comparison via [`lookup::DirLookup`], which implements
//! [`resolve::DbLookup`] directly against the in-memory tree.
//!
//! # Design
//!
//! Each side's file holds a map of session GUID to an opaque, independently
//! compressed byte stream ([`session`]); [`store::load_last_synchronous_state`]
//! matches the first GUID common to both sides and treats anything else —
//! a missing file, a parse failure, a version mismatch, no common session —
//! uniformly as "no prior state" rather than a hard error.
//!
//! Within a matched session, [`codec::encode_dir`]/[`codec::decode_dir`]
//! split the tree into three sub-streams (data that only makes sense with
//! the left descriptor, only the right, and shared data such as names and
//! sizes), compress each independently, and interleave half of the shared
//! stream's compressed bytes into each side's file. Losing one side's file
//! still leaves the other with its own descriptors and half of the shared
//! data, rather than nothing.
//!
//! [`update::update_last_synchronous_state`] folds a completed comparison
//! back into the tree: `equal` pairs overwrite their record, everything
//! else is left as it was, and records for items no longer present are
//! dropped unless the current scope filter — not an actual deletion — is
//! why they disappeared from view.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod codec;
mod error;
mod lookup;
mod record;
mod session;
mod store;
mod update;
mod wire;

pub use error::SyncDbError;
pub use lookup::DirLookup;
pub use record::{DirStatus, FileRecord, InSyncDir, InSyncFile, InSyncSymlink, InSyncType, LinkRecord};
pub use store::{load_last_synchronous_state, save_last_synchronous_state};
pub use update::update_last_synchronous_state;
