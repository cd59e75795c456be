//! Direction resolution, container propagation, move detection, and the
//! flattened operation stream.
//!
//! # Overview
//!
//! Turns a categorized [`model::BasePair`] into a tree where every active
//! pair also carries a resolved [`model::Direction`] and [`model::Operation`]
//! (§4.5), then flattens it into an ordered stream of actions for an
//! executor (§4.8).
//!
//! # Design
//!
//! Resolution happens in four passes, each independent and composable:
//!
//! 1. Per-pair direction + operation ([`variant`], [`operation_rule`],
//!    [`two_way`]): a pure function of category, [`variant::SyncVariant`],
//!    and — for two-way only — the in-sync database behind [`db::DbLookup`].
//! 2. Container propagation ([`propagate`]): a single bottom-up pass fixes
//!    up folder pairs' own operations once their children are known, since
//!    this is one-shot batch resolution rather than an interactive session
//!    that needs incremental re-notification.
//! 3. Move detection ([`detect_move`]): pairs a `create` with a `delete` by
//!    file identity (falling back to size+time) and rewrites both to the
//!    matching `move_*_source`/`move_*_target` operation.
//! 4. Flattening ([`stream`]): a pre-order walk producing the ordered
//!    action list an executor consumes.
//!
//! [`db::DbLookup`] is a trait rather than a concrete type so this crate
//! never has to know about the in-sync database's on-disk format.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod db;
mod detect_move;
mod operation_rule;
mod propagate;
mod resolver;
mod stream;
mod two_way;
mod variant;

pub use db::{DbFileEntry, DbLookup, DbSymlinkEntry, EmptyDb};
pub use detect_move::detect_moves;
pub use operation_rule::operation_for;
pub use propagate::propagate_container_operations;
pub use resolver::resolve_base_pair;
pub use stream::{operation_stream, Payload, StreamEntry};
pub use two_way::{two_way_file_direction, two_way_symlink_direction, ToleranceConfig};
pub use variant::{DirectionSet, SyncVariant};
