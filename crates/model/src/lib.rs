//! Paired-tree data model.
//!
//! # Overview
//!
//! A [`BasePair`] owns one left-right comparison: a generational arena of
//! [`PairedItem`]s (files, symlinks, and folders, tagged rather than
//! dispatched through a visitor hierarchy) plus the root-level child maps.
//! Every pair carries the fields in [`PairCommon`] — short names on each
//! side, an assigned [`Category`], a resolved [`Direction`], and an active
//! flag — regardless of its variant.
//!
//! # Design
//!
//! Identity is a stable [`ItemId`]: a base-pair id plus an [`ArenaId`]
//! (index + generation). Looking a stale id up after its slot has been
//! freed or reused returns `None` rather than aliasing a different object;
//! no process-wide mutable registry is needed to make that guarantee hold.
//!
//! A short name of `None` is the sole "does not exist on this side"
//! indicator (no sentinel empty string). [`PairCommon::set_direction`]
//! enforces the direction/conflict invariant in one place: passing a
//! conflict description forces the direction to [`Direction::None`], so
//! callers cannot construct an inconsistent pair.
//!
//! [`BasePair::prune_empty`] removes every pair that is empty on both
//! sides, recursively, in a single bottom-up pass; because the criterion
//! is checked directly rather than iterated to convergence, a second call
//! is always a no-op.
//!
//! [`Category`], [`Direction`], and [`Operation`] live here rather than in
//! the crates that compute them (`compare`, `resolve`) because they are
//! structurally fields of the tree node itself — putting them in `model`
//! avoids a dependency cycle where `model` would need `compare`/`resolve`
//! for its own field types while those crates need `model` for the tree
//! they operate over.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod arena;
mod category;
mod descriptor;
mod direction;
mod operation;
mod side;
mod tree;
mod variant;

pub use arena::{Arena, ArenaId};
pub use category::Category;
pub use descriptor::{FileDescriptor, FolderDescriptor, SymlinkDescriptor};
pub use direction::Direction;
pub use operation::Operation;
pub use side::Side;
pub use tree::{BasePair, FilePair, FolderPair, ItemId, PairCommon, PairedItem, SymlinkPair};
pub use variant::{CompareVariant, SymlinkPolicy};
