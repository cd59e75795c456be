//! Engine facade tying the sync pipeline together.
//!
//! # Overview
//!
//! Given an [`EngineConfig`], [`run`] produces one [`engine::BasePairReport`]
//! per base-pair: a fully categorized and resolved [`model::BasePair`], its
//! flattened [`resolve::StreamEntry`] operation stream, aggregate
//! statistics, and a diagnostic [`message::Message`] log. Nothing here
//! copies, moves, or deletes a byte — the stream is the contract handed to
//! a separate executor.
//!
//! # Design
//!
//! Per base-pair, [`engine::run_one`] wires together every other crate in
//! this workspace in pipeline order:
//!
//! 1. [`filters`] compiles the configured patterns into a [`filters::HardFilter`].
//! 2. [`dirlock`] optionally locks both roots for the duration of the run.
//! 3. [`walk`] traverses each side concurrently; an internal buffer turns
//!    each side's flat callback stream into a nested tree.
//! 4. An internal merge step pairs the two sides' trees into a
//!    [`model::BasePair`], and the configured [`filters::SoftFilter`]
//!    toggles which pairs are active.
//! 5. [`compare`] assigns every pair a category.
//! 6. [`syncdb`] loads the prior synchronized state (or reports none
//!    found); [`resolve`] resolves directions, propagates container
//!    operations, and detects moves against it.
//! 7. [`syncdb`] folds the new state back in and persists it.
//! 8. [`resolve::operation_stream`] flattens the result; [`view`] computes
//!    the aggregate statistics included in the report.
//!
//! # Examples
//!
//! ```
//! use twinsync_core::config::{BasePairConfig, FilterSpec};
//! use filters::SoftFilter;
//! use model::{CompareVariant, SymlinkPolicy};
//! use resolve::SyncVariant;
//!
//! let dir_left = tempfile::tempdir().unwrap();
//! let dir_right = tempfile::tempdir().unwrap();
//! std::fs::write(dir_left.path().join("a.txt"), b"hi").unwrap();
//!
//! let config = BasePairConfig {
//!     id: 0,
//!     left_path: dir_left.path().to_path_buf(),
//!     right_path: dir_right.path().to_path_buf(),
//!     filter: FilterSpec::default(),
//!     soft_filter: SoftFilter::accept_all(),
//!     variant: CompareVariant::Content,
//!     sync_variant: SyncVariant::Mirror,
//!     symlink_policy: SymlinkPolicy::Direct,
//!     tolerance_secs: 2,
//!     ignored_time_shifts_minutes: Vec::new(),
//!     use_lock: false,
//! };
//!
//! let report = twinsync_core::engine::run_one(&config).unwrap();
//! assert_eq!(report.stream.len(), 1);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod engine;
pub mod error;
pub mod message;
mod merge;
mod side_tree;

pub use config::{BasePairConfig, EngineConfig, FilterSpec};
pub use engine::{run, run_one, BasePairReport, ConflictSummary};
pub use error::EngineError;
