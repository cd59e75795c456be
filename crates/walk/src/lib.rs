#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! A blocking, deterministic, filter-pruned directory walk over an
//! abstract filesystem capability. `core` runs one worker per base-pair
//! side against [`OsFs`]; tests substitute an in-memory [`AbstractFs`] to
//! exercise traversal edge cases without touching disk.
//!
//! # Design
//!
//! [`AbstractFs::traverse`] is depth-first and left-first: within a
//! directory, entries are visited in sorted-by-name order so that two
//! traversals of the same tree produce the same sequence regardless of
//! the underlying directory's on-disk order. [`filters::HardFilter`] prunes
//! during the walk — an excluded directory is never opened.
//!
//! Traversal errors (a directory that can't be read, an entry that can't
//! be stat'd) are offered to an [`ErrorReporter`] for a retry-or-ignore
//! decision before being recorded and skipped.
//!
//! # Invariants
//!
//! - Directories are only descended into when
//!   [`filters::HardFilter::sub_items_might_match`] allows it.
//! - A directory-read failure prunes its entire subtree; a single-entry
//!   stat failure skips only that entry and its siblings continue.
//!
//! # Examples
//!
//! ```
//! use walk::{AbstractFs, OsFs, Visitor, DirAction};
//! use filters::HardFilter;
//! use model::SymlinkPolicy;
//! use std::path::Path;
//!
//! struct CountFiles(usize);
//! impl Visitor for CountFiles {
//!     fn on_file(&mut self, _relative: &Path, _meta: &walk::FileMeta) {
//!         self.0 += 1;
//!     }
//!     fn on_directory(&mut self, _relative: &Path, _meta: &walk::DirMeta) -> DirAction {
//!         DirAction::Descend
//!     }
//! }
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("a.txt"), b"x").unwrap();
//! let fs = OsFs;
//! let mut visitor = CountFiles(0);
//! fs.traverse(dir.path(), &HardFilter::Null, SymlinkPolicy::Direct, &mut visitor, &walk::AlwaysIgnore)
//!     .unwrap();
//! assert_eq!(visitor.0, 1);
//! ```

mod entry;
mod error;
mod fs;
mod visitor;

pub use entry::{DirMeta, FileMeta, SymlinkMeta};
pub use error::{AlwaysIgnore, ErrorDecision, ErrorReporter, TraversalErrorKind, WalkError};
pub use fs::{AbstractFs, OsFs};
pub use visitor::{DirAction, Visitor};
