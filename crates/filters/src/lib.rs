#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! Two filter kinds compose to decide which items a comparison sees:
//!
//! - [`HardFilter`] prunes during traversal — an excluded directory is never
//!   descended into, so its contents never reach the paired tree at all.
//! - [`SoftFilter`] is applied after pairing, since a size or mtime rule can
//!   legitimately accept an item on one side and reject it on the other;
//!   soft-filtered items are deactivated, not removed.
//!
//! # Design
//!
//! Masks use `*` (any sequence, including empty) and `?` (one character),
//! compiled through [`globset`]. A mask with no path separator matches the
//! short name at any depth; a mask containing a separator is anchored to
//! the base directory (a leading separator is stripped and has no extra
//! effect). A trailing separator restricts the mask to directories.
//!
//! # Invariants
//!
//! - [`HardFilter::sub_items_might_match`] never returns `false` for a
//!   directory that [`HardFilter::allows`] would accept, or for one that
//!   might contain an accepted descendant.
//! - [`SoftFilter::combine`] is commutative and associative: the result
//!   does not depend on the order filters are combined in.
//!
//! # Examples
//!
//! ```
//! use filters::{HardFilter, Mask};
//!
//! let filter = HardFilter::from_masks(
//!     [Mask::new("*").unwrap()],
//!     [Mask::new("*.tmp").unwrap()],
//! );
//! assert!(filter.allows("src/main.rs".as_ref(), false));
//! assert!(!filter.allows("build/out.tmp".as_ref(), false));
//! ```

mod hard;
mod mask;
mod soft;

pub use hard::HardFilter;
pub use mask::{Mask, MaskError};
pub use soft::SoftFilter;
